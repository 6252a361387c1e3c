//! Conversion of Spotify Web API JSON objects into spotcli records.
//!
//! Every conversion is total: a missing key, a `null`, a value of the wrong
//! type or an empty array maps to the zero value of the target field. Nothing
//! in here returns an error.
//!
//! Text fields are truncated to a fixed byte budget, always on a UTF-8 char
//! boundary. The budgets bound how much untrusted input a single record can
//! hold:
//!
//! | field                                   | bytes |
//! |-----------------------------------------|-------|
//! | ids, device type                        | 63    |
//! | names, artist, album, owner, email, ... | 255   |
//! | uris, snapshot ids                      | 127   |
//! | image and profile URLs, genres          | 511   |
//! | playlist description                    | 1023  |
//! | context type, release date              | 31    |
//! | repeat state                            | 15    |
//!
//! Artist genres keep at most [`MAX_GENRES`] entries joined by `", "`; anything
//! past that, or past the byte budget, is dropped without notice.

use serde_json::Value;

use crate::types::{
    Album, AlbumDetail, Artist, Device, Page, PlayHistory, PlayerState, Playlist,
    PlaylistDetail, Queue, Track, UserProfile,
};

pub const ID_BYTES: usize = 63;
pub const NAME_BYTES: usize = 255;
pub const URI_BYTES: usize = 127;
pub const URL_BYTES: usize = 511;
pub const GENRES_BYTES: usize = 511;
pub const DESCRIPTION_BYTES: usize = 1023;
pub const SNAPSHOT_BYTES: usize = 127;
pub const DEVICE_TYPE_BYTES: usize = 63;
pub const CONTEXT_TYPE_BYTES: usize = 31;
pub const RELEASE_DATE_BYTES: usize = 31;
pub const REPEAT_STATE_BYTES: usize = 15;
pub const PLAYED_AT_BYTES: usize = 63;

pub const MAX_GENRES: usize = 5;

/// Truncates `s` to at most `max_bytes`, backing off to the previous char
/// boundary when the cut would split a character.
pub fn bounded(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

/// String field `key` of `v`, bounded.
pub fn text(v: &Value, key: &str, max_bytes: usize) -> String {
    bounded(v[key].as_str().unwrap_or_default(), max_bytes)
}

fn uint(v: &Value) -> u64 {
    v.as_u64()
        .or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
        .unwrap_or(0)
}

fn uint32(v: &Value) -> u32 {
    u32::try_from(uint(v)).unwrap_or(u32::MAX)
}

fn flag(v: &Value) -> bool {
    v.as_bool().unwrap_or(false)
}

/// `name` of the first element of the array under `key`, e.g. the primary
/// artist of a track.
pub fn first_name(v: &Value, key: &str) -> String {
    v[key]
        .as_array()
        .and_then(|a| a.first())
        .map(|first| text(first, "name", NAME_BYTES))
        .unwrap_or_default()
}

/// URL of the first entry of `images`.
pub fn first_image(v: &Value) -> String {
    v["images"]
        .as_array()
        .and_then(|a| a.first())
        .map(|img| text(img, "url", URL_BYTES))
        .unwrap_or_default()
}

/// First [`MAX_GENRES`] genres joined by `", "`, bounded to
/// [`GENRES_BYTES`].
pub fn join_genres(v: &Value) -> String {
    let joined = v["genres"]
        .as_array()
        .map(|genres| {
            genres
                .iter()
                .take(MAX_GENRES)
                .map(|g| g.as_str().unwrap_or_default())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();
    bounded(&joined, GENRES_BYTES)
}

impl From<&Value> for Track {
    fn from(v: &Value) -> Self {
        Track {
            id: text(v, "id", ID_BYTES),
            name: text(v, "name", NAME_BYTES),
            artist: first_name(v, "artists"),
            album: text(&v["album"], "name", NAME_BYTES),
            duration_ms: uint(&v["duration_ms"]),
            uri: text(v, "uri", URI_BYTES),
        }
    }
}

impl From<&Value> for Artist {
    fn from(v: &Value) -> Self {
        Artist {
            id: text(v, "id", ID_BYTES),
            name: text(v, "name", NAME_BYTES),
            genres: join_genres(v),
            followers: uint(&v["followers"]["total"]),
            popularity: uint32(&v["popularity"]),
            uri: text(v, "uri", URI_BYTES),
            image_url: first_image(v),
        }
    }
}

impl From<&Value> for Album {
    fn from(v: &Value) -> Self {
        Album {
            id: text(v, "id", ID_BYTES),
            name: text(v, "name", NAME_BYTES),
            artist: first_name(v, "artists"),
            release_date: text(v, "release_date", RELEASE_DATE_BYTES),
            total_tracks: uint32(&v["total_tracks"]),
            uri: text(v, "uri", URI_BYTES),
        }
    }
}

impl From<&Value> for AlbumDetail {
    fn from(v: &Value) -> Self {
        let tracks: Vec<Track> = v["tracks"]["items"]
            .as_array()
            .map(|items| items.iter().map(Track::from).collect())
            .unwrap_or_default();

        let mut album = Album::from(v);
        if album.total_tracks == 0 {
            album.total_tracks = uint32(&v["tracks"]["total"]).max(tracks.len() as u32);
        }
        // Album track objects are simplified and carry no album name.
        let tracks = tracks
            .into_iter()
            .map(|mut t| {
                if t.album.is_empty() {
                    t.album = album.name.clone();
                }
                t
            })
            .collect();

        AlbumDetail { album, tracks }
    }
}

impl From<&Value> for Playlist {
    fn from(v: &Value) -> Self {
        // Newer API responses expose the track summary as `items`.
        let summary = if v["tracks"].is_object() {
            &v["tracks"]
        } else {
            &v["items"]
        };
        Playlist {
            id: text(v, "id", ID_BYTES),
            name: text(v, "name", NAME_BYTES),
            uri: text(v, "uri", URI_BYTES),
            is_public: flag(&v["public"]),
            track_count: uint32(&summary["total"]),
            image_url: first_image(v),
        }
    }
}

impl From<&Value> for PlaylistDetail {
    fn from(v: &Value) -> Self {
        let (positions, tracks): (Vec<u32>, Vec<Track>) =
            playlist_entries(&v["tracks"]["items"]).into_iter().unzip();
        PlaylistDetail {
            id: text(v, "id", ID_BYTES),
            name: text(v, "name", NAME_BYTES),
            description: text(v, "description", DESCRIPTION_BYTES),
            uri: text(v, "uri", URI_BYTES),
            owner_id: text(&v["owner"], "id", ID_BYTES),
            owner_name: text(&v["owner"], "display_name", NAME_BYTES),
            snapshot_id: text(v, "snapshot_id", SNAPSHOT_BYTES),
            is_public: flag(&v["public"]),
            is_collaborative: flag(&v["collaborative"]),
            total_tracks: uint32(&v["tracks"]["total"]),
            image_url: first_image(v),
            tracks,
            positions,
        }
    }
}

/// Tracks of a playlist item array (`[{ "track": {...} }, ...]`) paired with
/// their position in the array. Entries whose track is `null` (removed or
/// unavailable content) are skipped but still count towards the positions.
pub fn playlist_entries(items: &Value) -> Vec<(u32, Track)> {
    items
        .as_array()
        .map(|items| {
            items
                .iter()
                .enumerate()
                .filter(|(_, item)| item["track"].is_object())
                .map(|(i, item)| (u32::try_from(i).unwrap_or(u32::MAX), Track::from(&item["track"])))
                .collect()
        })
        .unwrap_or_default()
}

/// [`playlist_entries`] without the positions.
pub fn playlist_tracks(items: &Value) -> Vec<Track> {
    playlist_entries(items).into_iter().map(|(_, t)| t).collect()
}

impl From<&Value> for Device {
    fn from(v: &Value) -> Self {
        Device {
            id: text(v, "id", ID_BYTES),
            name: text(v, "name", NAME_BYTES),
            device_type: text(v, "type", DEVICE_TYPE_BYTES),
            volume_percent: uint32(&v["volume_percent"]),
            is_active: flag(&v["is_active"]),
            is_private_session: flag(&v["is_private_session"]),
            is_restricted: flag(&v["is_restricted"]),
        }
    }
}

impl From<&Value> for PlayerState {
    fn from(v: &Value) -> Self {
        let item = &v["item"];
        // Episodes carry the show instead of an album and artists.
        let album_name = if item["album"].is_object() {
            text(&item["album"], "name", NAME_BYTES)
        } else {
            text(&item["show"], "name", NAME_BYTES)
        };
        let artist_name = match first_name(item, "artists") {
            name if name.is_empty() => text(&item["show"], "publisher", NAME_BYTES),
            name => name,
        };

        PlayerState {
            track_id: text(item, "id", ID_BYTES),
            track_name: text(item, "name", NAME_BYTES),
            artist_name,
            album_name,
            duration_ms: uint(&item["duration_ms"]),
            track_uri: text(item, "uri", URI_BYTES),
            is_playing: flag(&v["is_playing"]),
            progress_ms: uint(&v["progress_ms"]),
            timestamp: uint(&v["timestamp"]),
            context_type: text(&v["context"], "type", CONTEXT_TYPE_BYTES),
            context_uri: text(&v["context"], "uri", URI_BYTES),
            shuffle_state: flag(&v["shuffle_state"]),
            repeat_state: match text(v, "repeat_state", REPEAT_STATE_BYTES) {
                s if s.is_empty() => "off".to_string(),
                s => s,
            },
            device: Device::from(&v["device"]),
        }
    }
}

impl From<&Value> for Queue {
    fn from(v: &Value) -> Self {
        let currently_playing = if v["currently_playing"].is_object() {
            Some(Track::from(&v["currently_playing"]))
        } else {
            None
        };
        let queue = v["queue"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter(|t| t.is_object())
                    .map(Track::from)
                    .collect()
            })
            .unwrap_or_default();
        Queue {
            currently_playing,
            queue,
        }
    }
}

impl From<&Value> for UserProfile {
    fn from(v: &Value) -> Self {
        UserProfile {
            id: text(v, "id", ID_BYTES),
            display_name: text(v, "display_name", NAME_BYTES),
            email: text(v, "email", NAME_BYTES),
            country: text(v, "country", NAME_BYTES),
            product: text(v, "product", NAME_BYTES),
            followers: uint(&v["followers"]["total"]),
            profile_url: text(&v["external_urls"], "spotify", URL_BYTES),
            image_url: first_image(v),
        }
    }
}

impl From<&Value> for PlayHistory {
    fn from(v: &Value) -> Self {
        PlayHistory {
            track: Track::from(&v["track"]),
            played_at: text(v, "played_at", PLAYED_AT_BYTES),
            context_type: text(&v["context"], "type", CONTEXT_TYPE_BYTES),
        }
    }
}

impl<T> Page<T> {
    /// Builds a page from a Spotify paging object (`{ items, total, ... }`),
    /// converting each item with `item`. Without a `total` field the total is
    /// the number of items read.
    pub fn from_paging(v: &Value, item: impl Fn(&Value) -> T) -> Self {
        let items: Vec<T> = v["items"]
            .as_array()
            .map(|items| items.iter().map(&item).collect())
            .unwrap_or_default();
        let total = if v["total"].is_number() {
            uint32(&v["total"])
        } else {
            items.len() as u32
        };
        Page { items, total }
    }

    /// Page for endpoints that return a bare array under `key` without paging
    /// metadata, e.g. artist top tracks.
    pub fn from_array(v: &Value, key: &str, item: impl Fn(&Value) -> T) -> Self {
        let items: Vec<T> = v[key]
            .as_array()
            .map(|items| items.iter().map(&item).collect())
            .unwrap_or_default();
        let total = items.len() as u32;
        Page { items, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bounded_respects_char_boundaries() {
        let s = "aé"; // 'é' is two bytes
        assert_eq!(bounded(s, 2), "a");
        assert_eq!(bounded(s, 3), "aé");
        assert_eq!(bounded("", 0), "");
    }

    #[test]
    fn genres_are_capped_at_five() {
        let v = json!({"genres": ["a", "b", "c", "d", "e", "f", "g"]});
        assert_eq!(join_genres(&v), "a, b, c, d, e");
    }

    #[test]
    fn genres_are_capped_in_bytes() {
        let long = "x".repeat(300);
        let v = json!({"genres": [long, long, long]});
        let joined = join_genres(&v);
        assert_eq!(joined.len(), GENRES_BYTES);
        assert!(joined.starts_with(&"x".repeat(300)));
    }

    #[test]
    fn negative_numbers_map_to_zero() {
        let v = json!({"duration_ms": -5, "name": 12});
        let track = Track::from(&v);
        assert_eq!(track.duration_ms, 0);
        assert_eq!(track.name, "");
    }

    #[test]
    fn page_total_defaults_to_item_count() {
        let v = json!({"items": [{"id": "1"}, {"id": "2"}]});
        let page = Page::from_paging(&v, |v| Track::from(v));
        assert_eq!(page.count(), 2);
        assert_eq!(page.total, 2);
    }
}
