//! Playback state and control.
//!
//! Every control call takes an optional target device. Without one, Spotify
//! acts on the currently active device. When nothing is playing anywhere the
//! state endpoints answer 204, which maps to `None`; the composite toggles
//! turn that into `Error::NotFound`.

use reqwest::Method;
use serde_json::{Value, json};

use crate::{
    error::{Error, Result},
    spotify::{SpotifyClient, encode_query},
    types::{Device, PlayerState, RepeatState},
};

fn with_device(path: &str, device_id: Option<&str>) -> String {
    match device_id.filter(|d| !d.is_empty()) {
        Some(device_id) => {
            let sep = if path.contains('?') { '&' } else { '?' };
            format!("{}{}device_id={}", path, sep, encode_query(device_id))
        }
        None => path.to_string(),
    }
}

async fn state_at(client: &SpotifyClient, path: &str) -> Result<Option<PlayerState>> {
    let res = client.request(Method::GET, path, None).await?;
    if res.status == 204 {
        return Ok(None);
    }
    Ok(res.body.filter(Value::is_object).map(|v| PlayerState::from(&v)))
}

/// Full playback state, `None` when there is no active device.
pub async fn get_player_state(client: &SpotifyClient) -> Result<Option<PlayerState>> {
    state_at(client, "/me/player").await
}

/// Like [`get_player_state`] but only the item being played and its progress;
/// device fields stay at their defaults.
pub async fn get_currently_playing(client: &SpotifyClient) -> Result<Option<PlayerState>> {
    state_at(client, "/me/player/currently-playing").await
}

/// Devices visible to the user's account. Entries that are not objects are
/// dropped.
pub async fn get_available_devices(client: &SpotifyClient) -> Result<Vec<Device>> {
    let json = client.get("/me/player/devices").await?.unwrap_or_default();
    Ok(json["devices"]
        .as_array()
        .map(|devices| {
            devices
                .iter()
                .filter(|d| d.is_object())
                .map(Device::from)
                .collect()
        })
        .unwrap_or_default())
}

pub async fn pause_playback(client: &SpotifyClient, device_id: Option<&str>) -> Result<bool> {
    let path = with_device("/me/player/pause", device_id);
    client.send_empty(Method::PUT, &path, None).await
}

pub async fn resume_playback(client: &SpotifyClient, device_id: Option<&str>) -> Result<bool> {
    let path = with_device("/me/player/play", device_id);
    client.send_empty(Method::PUT, &path, None).await
}

/// Starts playback of a context or a list of tracks.
///
/// # Arguments
///
/// * `client` - Authenticated client
/// * `device_id` - Target device, the active one when `None`
/// * `context_uri` - Album, playlist or artist uri; wins over `uris`
/// * `uris` - Track uris, used only without a context
///
/// With neither a context nor uris it behaves like [`resume_playback`].
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(true)` - Playback started
/// - `Err(Error::Status)` - E.g. 404 with no active device or 403 without Premium
///
/// # Example
///
/// ```
/// start_playback(&client, None, Some("spotify:album:4aawyAB9vmqN3uQ7FjRGTy"), &[]).await?;
/// start_playback(&client, Some("d1"), None, &["spotify:track:1", "spotify:track:2"]).await?;
/// ```
pub async fn start_playback(
    client: &SpotifyClient,
    device_id: Option<&str>,
    context_uri: Option<&str>,
    uris: &[&str],
) -> Result<bool> {
    let body = match context_uri.filter(|c| !c.is_empty()) {
        Some(context_uri) => Some(json!({ "context_uri": context_uri })),
        None if !uris.is_empty() => Some(json!({ "uris": uris })),
        None => None,
    };
    let path = with_device("/me/player/play", device_id);
    client.send_empty(Method::PUT, &path, body.as_ref()).await
}

/// Pauses when playing, resumes otherwise. Returns whether playback is now
/// running.
pub async fn toggle_playback(client: &SpotifyClient) -> Result<bool> {
    let state = get_player_state(client).await?.ok_or(Error::NotFound)?;
    if state.is_playing {
        pause_playback(client, None).await?;
        Ok(false)
    } else {
        resume_playback(client, None).await?;
        Ok(true)
    }
}

pub async fn skip_next(client: &SpotifyClient, device_id: Option<&str>) -> Result<bool> {
    let path = with_device("/me/player/next", device_id);
    client.send_empty(Method::POST, &path, None).await
}

pub async fn skip_previous(client: &SpotifyClient, device_id: Option<&str>) -> Result<bool> {
    let path = with_device("/me/player/previous", device_id);
    client.send_empty(Method::POST, &path, None).await
}

pub async fn set_shuffle(client: &SpotifyClient, device_id: Option<&str>, state: bool) -> Result<bool> {
    let path = with_device(&format!("/me/player/shuffle?state={}", state), device_id);
    client.send_empty(Method::PUT, &path, None).await
}

pub async fn set_repeat(
    client: &SpotifyClient,
    device_id: Option<&str>,
    state: RepeatState,
) -> Result<bool> {
    let path = with_device(&format!("/me/player/repeat?state={}", state.as_str()), device_id);
    client.send_empty(Method::PUT, &path, None).await
}

/// Advances the repeat mode off -> context -> track -> off. Returns the mode
/// that was set.
pub async fn cycle_repeat(client: &SpotifyClient, device_id: Option<&str>) -> Result<RepeatState> {
    let state = get_player_state(client).await?.ok_or(Error::NotFound)?;
    let next = state.repeat().next();
    set_repeat(client, device_id, next).await?;
    Ok(next)
}

pub async fn set_volume(client: &SpotifyClient, device_id: Option<&str>, percent: u32) -> Result<bool> {
    if percent > 100 {
        return Err(Error::InvalidArgument(format!(
            "volume must be between 0 and 100, got {}",
            percent
        )));
    }
    let path = with_device(&format!("/me/player/volume?volume_percent={}", percent), device_id);
    client.send_empty(Method::PUT, &path, None).await
}

pub async fn seek_to_position(
    client: &SpotifyClient,
    device_id: Option<&str>,
    position_ms: u64,
) -> Result<bool> {
    let path = with_device(&format!("/me/player/seek?position_ms={}", position_ms), device_id);
    client.send_empty(Method::PUT, &path, None).await
}

/// Moves playback to `device_id`; `play` starts it there right away.
pub async fn transfer_playback(client: &SpotifyClient, device_id: &str, play: bool) -> Result<bool> {
    if device_id.is_empty() {
        return Err(Error::InvalidArgument("device id is empty".to_string()));
    }
    let body = json!({ "device_ids": [device_id], "play": play });
    client.send_empty(Method::PUT, "/me/player", Some(&body)).await
}
