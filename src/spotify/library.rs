//! The user's library: saved tracks, saved albums and owned or followed
//! playlists.
//!
//! Id lists are checked before anything is sent: an empty list or more than
//! 50 ids is `Error::InvalidArgument`.

use reqwest::Method;
use serde_json::{Value, json};

use crate::{
    error::{Error, Result},
    spotify::{SpotifyClient, check_ids, clamp_limit, encode_query},
    types::{Album, AlbumList, Page, Playlist, PlaylistList, Track, TrackList},
};

fn paged(path: &str, limit: u32, offset: u32) -> String {
    format!("{}?limit={}&offset={}", path, clamp_limit(limit), offset)
}

async fn mutate_ids(client: &SpotifyClient, method: Method, path: &str, ids: &[&str]) -> Result<bool> {
    check_ids(ids)?;
    let body = json!({ "ids": ids });
    client.send_empty(method, path, Some(&body)).await
}

async fn contains(client: &SpotifyClient, path: &str, ids: &[&str]) -> Result<Vec<bool>> {
    check_ids(ids)?;
    let ids: Vec<String> = ids.iter().map(|id| encode_query(id)).collect();
    let path = format!("{}?ids={}", path, ids.join(","));
    let json = client.get(&path).await?.unwrap_or_default();
    Ok(json
        .as_array()
        .map(|flags| flags.iter().map(|f| f.as_bool().unwrap_or(false)).collect())
        .unwrap_or_default())
}

/// Retrieves a page of the user's saved tracks, most recently added first.
///
/// The endpoint wraps every track as `{ added_at, track }`; only the track is
/// kept. Unavailable tracks come back as default records.
///
/// # Arguments
///
/// * `client` - Authenticated client
/// * `limit` - Page size, clamped into `1..=50`
/// * `offset` - Index of the first item to return
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(TrackList)` - The requested page and the size of the whole library
/// - `Err(_)` - Transport or authentication failure
///
/// # Example
///
/// ```
/// let first = get_saved_tracks(&client, 50, 0).await?;
/// if first.total > 50 {
///     let second = get_saved_tracks(&client, 50, 50).await?;
/// }
/// ```
pub async fn get_saved_tracks(client: &SpotifyClient, limit: u32, offset: u32) -> Result<TrackList> {
    let json = client
        .get(&paged("/me/tracks", limit, offset))
        .await?
        .unwrap_or_default();
    Ok(Page::from_paging(&json, |item: &Value| Track::from(&item["track"])))
}

/// Saves tracks to the user's library.
///
/// # Arguments
///
/// * `client` - Authenticated client
/// * `ids` - Spotify track ids, 1 to 50 of them
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(true)` - The service answered 200, 201 or 204
/// - `Ok(false)` - Any other 2xx answer
/// - `Err(Error::InvalidArgument)` - Empty list, more than 50 ids or an empty id
/// - `Err(Error::Status)` - The service refused the change
///
/// # Example
///
/// ```
/// if save_tracks(&client, &["abc123"]).await? {
///     success!("Saved");
/// }
/// ```
pub async fn save_tracks(client: &SpotifyClient, ids: &[&str]) -> Result<bool> {
    mutate_ids(client, Method::PUT, "/me/tracks", ids).await
}

/// Removes tracks from the library. Same contract as [`save_tracks`].
pub async fn remove_tracks(client: &SpotifyClient, ids: &[&str]) -> Result<bool> {
    mutate_ids(client, Method::DELETE, "/me/tracks", ids).await
}

/// Checks which of `ids` are saved.
///
/// Ids are percent-encoded before they go into the query string.
///
/// # Returns
///
/// Returns one flag per id, in request order. Id lists are checked like in
/// [`save_tracks`].
///
/// # Example
///
/// ```
/// let flags = check_saved_tracks(&client, &["a", "b"]).await?;
/// assert_eq!(flags.len(), 2);
/// ```
pub async fn check_saved_tracks(client: &SpotifyClient, ids: &[&str]) -> Result<Vec<bool>> {
    contains(client, "/me/tracks/contains", ids).await
}

/// Single id shorthand for [`check_saved_tracks`]. `Error::NotFound` when the
/// service answered with an empty array.
pub async fn is_track_saved(client: &SpotifyClient, id: &str) -> Result<bool> {
    let flags = check_saved_tracks(client, &[id]).await?;
    flags.first().copied().ok_or(Error::NotFound)
}

/// Saved albums, unwrapped from their `{ added_at, album }` items. Paging
/// works like [`get_saved_tracks`].
pub async fn get_saved_albums(client: &SpotifyClient, limit: u32, offset: u32) -> Result<AlbumList> {
    let json = client
        .get(&paged("/me/albums", limit, offset))
        .await?
        .unwrap_or_default();
    Ok(Page::from_paging(&json, |item: &Value| Album::from(&item["album"])))
}

/// Saves albums. Same contract as [`save_tracks`].
pub async fn save_albums(client: &SpotifyClient, ids: &[&str]) -> Result<bool> {
    mutate_ids(client, Method::PUT, "/me/albums", ids).await
}

pub async fn remove_albums(client: &SpotifyClient, ids: &[&str]) -> Result<bool> {
    mutate_ids(client, Method::DELETE, "/me/albums", ids).await
}

/// Same as [`check_saved_tracks`] for albums.
pub async fn check_saved_albums(client: &SpotifyClient, ids: &[&str]) -> Result<Vec<bool>> {
    contains(client, "/me/albums/contains", ids).await
}

pub async fn is_album_saved(client: &SpotifyClient, id: &str) -> Result<bool> {
    let flags = check_saved_albums(client, &[id]).await?;
    flags.first().copied().ok_or(Error::NotFound)
}

/// Retrieves playlists the user owns or follows.
///
/// # Arguments
///
/// * `client` - Authenticated client
/// * `limit` - Page size, clamped into `1..=50`
/// * `offset` - Index of the first playlist to return
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(PlaylistList)` - Summaries with track counts and cover image
/// - `Err(_)` - Transport or authentication failure
pub async fn get_user_playlists(
    client: &SpotifyClient,
    limit: u32,
    offset: u32,
) -> Result<PlaylistList> {
    let json = client
        .get(&paged("/me/playlists", limit, offset))
        .await?
        .unwrap_or_default();
    Ok(Page::from_paging(&json, |v| Playlist::from(v)))
}
