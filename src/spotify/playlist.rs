use reqwest::Method;
use serde_json::{Map, Value, json};

use crate::{
    error::{Error, Result},
    mapping::{self, SNAPSHOT_BYTES},
    spotify::{SpotifyClient, encode_query},
    types::{PlaylistDetail, PlaylistUpdate},
};

/// Most items the playlist track endpoints accept per request.
pub const MAX_PLAYLIST_ITEMS: usize = 100;

fn playlist_path(playlist_id: &str) -> String {
    format!("/playlists/{}", encode_query(playlist_id))
}

fn check_uris(uris: &[&str]) -> Result<()> {
    if uris.is_empty() {
        return Err(Error::InvalidArgument("no track uris given".to_string()));
    }
    if uris.len() > MAX_PLAYLIST_ITEMS {
        return Err(Error::InvalidArgument(format!(
            "at most {} tracks per request, got {}",
            MAX_PLAYLIST_ITEMS,
            uris.len()
        )));
    }
    Ok(())
}

fn snapshot_of(body: Option<Value>) -> String {
    body.map(|v| mapping::text(&v, "snapshot_id", SNAPSHOT_BYTES))
        .unwrap_or_default()
}

/// Sends a playlist mutation and turns a non-empty 2xx into an error, so
/// callers only see `Ok` when the change was applied.
async fn apply(client: &SpotifyClient, method: Method, path: &str, body: &Value) -> Result<Option<Value>> {
    let res = client.request(method, path, Some(body)).await?;
    if !res.is_empty_success() {
        return Err(Error::Status {
            status: res.status,
            message: "change not applied".to_string(),
        });
    }
    Ok(res.body)
}

/// Creates a playlist owned by `user_id`.
///
/// Spotify only allows collaborative playlists that are private; the flags are
/// sent as given and the service decides.
pub async fn create_playlist(
    client: &SpotifyClient,
    user_id: &str,
    name: &str,
    description: &str,
    public: bool,
    collaborative: bool,
) -> Result<PlaylistDetail> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument("playlist name is empty".to_string()));
    }
    if user_id.is_empty() {
        return Err(Error::InvalidArgument("user id is empty".to_string()));
    }

    let body = json!({
        "name": name,
        "description": description,
        "public": public,
        "collaborative": collaborative,
    });
    let path = format!("/users/{}/playlists", encode_query(user_id));
    let json = client
        .send(Method::POST, &path, Some(&body))
        .await?
        .ok_or(Error::NotFound)?;
    Ok(PlaylistDetail::from(&json))
}

/// Retrieves playlist details.
///
/// # Arguments
///
/// * `client` - Authenticated client
/// * `playlist_id` - Spotify playlist id
/// * `fetch_tracks` - Keep the tracks of the embedded first page
/// * `track_limit` - Upper bound on kept tracks, 0 keeps them all
///
/// Without `fetch_tracks`, `tracks` and `positions` are empty but
/// `total_tracks` is still filled in. Items whose track is unavailable are
/// skipped; `positions` keeps the playlist index of every kept track.
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(PlaylistDetail)` - Metadata, owner, flags, cover image and tracks
/// - `Err(Error::NotFound)` - The service answered without a body
/// - `Err(_)` - Transport or authentication failure
///
/// # Example
///
/// ```
/// let detail = get_playlist(&client, "37i9dQZF1DXcBWIGoYBM5M", true, 20).await?;
/// for (pos, track) in detail.positions.iter().zip(&detail.tracks) {
///     println!("{:>3}. {}", pos + 1, track.name);
/// }
/// ```
pub async fn get_playlist(
    client: &SpotifyClient,
    playlist_id: &str,
    fetch_tracks: bool,
    track_limit: usize,
) -> Result<PlaylistDetail> {
    let json = client
        .get(&playlist_path(playlist_id))
        .await?
        .ok_or(Error::NotFound)?;
    let mut detail = PlaylistDetail::from(&json);
    if !fetch_tracks {
        detail.tracks.clear();
        detail.positions.clear();
    } else if track_limit > 0 {
        detail.tracks.truncate(track_limit);
        detail.positions.truncate(track_limit);
    }
    Ok(detail)
}

/// Applies the fields present in `update`. Absent fields are not sent and keep
/// their current value. An empty update is rejected without a request.
pub async fn update_playlist(
    client: &SpotifyClient,
    playlist_id: &str,
    update: &PlaylistUpdate,
) -> Result<bool> {
    if update.is_empty() {
        return Err(Error::InvalidArgument("nothing to update".to_string()));
    }
    if matches!(&update.name, Some(name) if name.trim().is_empty()) {
        return Err(Error::InvalidArgument("playlist name is empty".to_string()));
    }

    let body = serde_json::to_value(update)?;
    client
        .send_empty(Method::PUT, &playlist_path(playlist_id), Some(&body))
        .await
}

async fn toggle_flag(client: &SpotifyClient, playlist_id: &str, key: &str) -> Result<bool> {
    let path = playlist_path(playlist_id);
    let current = client.get(&path).await?.ok_or(Error::NotFound)?;
    let flipped = !current[key].as_bool().unwrap_or(false);

    let mut patch = Map::new();
    patch.insert(key.to_string(), Value::Bool(flipped));
    apply(client, Method::PUT, &path, &Value::Object(patch)).await?;
    Ok(flipped)
}

/// Flips the public flag. Returns the new value.
pub async fn toggle_playlist_public(client: &SpotifyClient, playlist_id: &str) -> Result<bool> {
    toggle_flag(client, playlist_id, "public").await
}

/// Flips the collaborative flag. Returns the new value.
pub async fn toggle_playlist_collaborative(
    client: &SpotifyClient,
    playlist_id: &str,
) -> Result<bool> {
    toggle_flag(client, playlist_id, "collaborative").await
}

/// Adds tracks to a playlist.
///
/// # Arguments
///
/// * `client` - Authenticated client
/// * `playlist_id` - Target playlist
/// * `uris` - Track or episode uris, 1 to 100 of them
/// * `position` - Zero-based insert position, appends when `None`
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(String)` - The playlist's new snapshot id
/// - `Err(Error::InvalidArgument)` - Empty or oversized `uris`, nothing was sent
/// - `Err(Error::Status)` - The service refused the change
pub async fn add_tracks_to_playlist(
    client: &SpotifyClient,
    playlist_id: &str,
    uris: &[&str],
    position: Option<u32>,
) -> Result<String> {
    check_uris(uris)?;
    let mut body = json!({ "uris": uris });
    if let Some(position) = position {
        body["position"] = json!(position);
    }

    let path = format!("{}/tracks", playlist_path(playlist_id));
    let res = apply(client, Method::POST, &path, &body).await?;
    Ok(snapshot_of(res))
}

/// Removes every occurrence of `uris`. With `snapshot_id` the removal applies
/// to that playlist version. Returns the new snapshot id.
pub async fn remove_tracks_from_playlist(
    client: &SpotifyClient,
    playlist_id: &str,
    uris: &[&str],
    snapshot_id: Option<&str>,
) -> Result<String> {
    check_uris(uris)?;
    let tracks: Vec<Value> = uris.iter().map(|uri| json!({ "uri": uri })).collect();
    let mut body = json!({ "tracks": tracks });
    if let Some(snapshot_id) = snapshot_id.filter(|s| !s.is_empty()) {
        body["snapshot_id"] = json!(snapshot_id);
    }

    let path = format!("{}/tracks", playlist_path(playlist_id));
    let res = apply(client, Method::DELETE, &path, &body).await?;
    Ok(snapshot_of(res))
}

/// Moves `range_length` tracks starting at `range_start` to before
/// `insert_before`. Returns the new snapshot id.
pub async fn reorder_playlist_tracks(
    client: &SpotifyClient,
    playlist_id: &str,
    range_start: u32,
    insert_before: u32,
    range_length: u32,
    snapshot_id: Option<&str>,
) -> Result<String> {
    if range_length == 0 {
        return Err(Error::InvalidArgument("range length must be at least 1".to_string()));
    }
    let mut body = json!({
        "range_start": range_start,
        "insert_before": insert_before,
        "range_length": range_length,
    });
    if let Some(snapshot_id) = snapshot_id.filter(|s| !s.is_empty()) {
        body["snapshot_id"] = json!(snapshot_id);
    }

    let path = format!("{}/tracks", playlist_path(playlist_id));
    let res = apply(client, Method::PUT, &path, &body).await?;
    Ok(snapshot_of(res))
}

/// Removes the playlist from the user's library. For an owned playlist this is
/// how Spotify "deletes" it.
pub async fn unfollow_playlist(client: &SpotifyClient, playlist_id: &str) -> Result<bool> {
    let path = format!("{}/followers", playlist_path(playlist_id));
    client.send_empty(Method::DELETE, &path, None).await
}
