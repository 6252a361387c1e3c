use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub scope: String,
    /// Lifetime in seconds as reported by the token endpoint.
    pub expires_in: u64,
    /// Unix timestamp at which the token was issued.
    #[serde(default)]
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    /// Primary artist.
    pub artist: String,
    pub album: String,
    pub duration_ms: u64,
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    /// At most five genres, comma separated.
    pub genres: String,
    pub followers: u64,
    pub popularity: u32,
    pub uri: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub release_date: String,
    pub total_tracks: u32,
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumDetail {
    pub album: Album,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub is_public: bool,
    pub track_count: u32,
    /// First cover image, empty when the playlist has none.
    pub image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistDetail {
    pub id: String,
    pub name: String,
    pub description: String,
    pub uri: String,
    pub owner_id: String,
    pub owner_name: String,
    pub snapshot_id: String,
    pub is_public: bool,
    pub is_collaborative: bool,
    pub total_tracks: u32,
    pub image_url: String,
    pub tracks: Vec<Track>,
    /// Playlist position of each entry of `tracks`. Unavailable items are left
    /// out of `tracks`, so these can differ from the list index.
    pub positions: Vec<u32>,
}

/// Sparse playlist patch. Only fields that are `Some` are sent, so anything
/// left as `None` keeps its current value on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaborative: Option<bool>,
}

impl PlaylistUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.public.is_none()
            && self.collaborative.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    /// "Computer", "Smartphone", "Speaker", ...
    pub device_type: String,
    pub volume_percent: u32,
    pub is_active: bool,
    pub is_private_session: bool,
    pub is_restricted: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatState {
    #[default]
    Off,
    Track,
    Context,
}

impl RepeatState {
    /// Wire value used by `/me/player/repeat`.
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatState::Off => "off",
            RepeatState::Track => "track",
            RepeatState::Context => "context",
        }
    }

    /// Cycles off -> context -> track -> off, like the Spotify clients do.
    pub fn next(&self) -> Self {
        match self {
            RepeatState::Off => RepeatState::Context,
            RepeatState::Context => RepeatState::Track,
            RepeatState::Track => RepeatState::Off,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "track" => RepeatState::Track,
            "context" => RepeatState::Context,
            _ => RepeatState::Off,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub track_id: String,
    pub track_name: String,
    pub artist_name: String,
    pub album_name: String,
    pub duration_ms: u64,
    pub track_uri: String,

    pub is_playing: bool,
    pub progress_ms: u64,
    /// Unix timestamp in milliseconds.
    pub timestamp: u64,

    /// "playlist", "album", "artist", ...
    pub context_type: String,
    pub context_uri: String,

    pub shuffle_state: bool,
    pub repeat_state: String,

    pub device: Device,
}

impl PlayerState {
    pub fn repeat(&self) -> RepeatState {
        RepeatState::parse(&self.repeat_state)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Queue {
    pub currently_playing: Option<Track>,
    pub queue: Vec<Track>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub country: String,
    pub product: String,
    pub followers: u64,
    pub profile_url: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayHistory {
    pub track: Track,
    pub played_at: String,
    pub context_type: String,
}

/// One page of a paginated listing.
///
/// `total` is what the service reports as available, which is usually larger
/// than the number of items actually fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u32,
}

impl<T> Page<T> {
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub type TrackList = Page<Track>;
pub type ArtistList = Page<Artist>;
pub type AlbumList = Page<Album>;
pub type PlaylistList = Page<Playlist>;

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub duration: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub name: String,
    pub followers: u64,
    pub popularity: String,
    pub genres: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub name: String,
    pub artist: String,
    pub released: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub name: String,
    pub tracks: u32,
    pub public: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct DeviceTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub name: String,
    #[tabled(rename = "type")]
    pub device_type: String,
    pub volume: String,
    pub active: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct HistoryTableRow {
    #[tabled(rename = "#")]
    pub index: usize,
    pub played_at: String,
    pub name: String,
    pub artist: String,
    pub context: String,
}
