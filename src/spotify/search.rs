//! `GET /search` for each item type.
//!
//! The query text is percent-encoded before it goes on the wire and the limit
//! is clamped into `1..=50`. A response without the expected section maps to
//! an empty page.

use serde_json::Value;

use crate::{
    error::{Error, Result},
    spotify::{SpotifyClient, clamp_limit, encode_query},
    types::{Album, AlbumList, Artist, ArtistList, Page, Playlist, PlaylistList, Track, TrackList},
};

async fn search(client: &SpotifyClient, query: &str, kind: &str, limit: u32) -> Result<Value> {
    if query.trim().is_empty() {
        return Err(Error::InvalidArgument("empty search query".to_string()));
    }
    let path = format!(
        "/search?q={}&type={}&limit={}",
        encode_query(query),
        kind,
        clamp_limit(limit)
    );
    Ok(client.get(&path).await?.unwrap_or_default())
}

/// Searches the catalog for tracks matching `query`.
///
/// # Arguments
///
/// * `client` - Authenticated client
/// * `query` - Free text, e.g. a title or `artist:name`; encoded before sending
/// * `limit` - Page size, clamped into `1..=50`
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(TrackList)` - The first page of matches and the service's total count
/// - `Err(Error::InvalidArgument)` - `query` is blank, nothing was sent
/// - `Err(_)` - Any transport or authentication failure
///
/// # Example
///
/// ```
/// let page = search_tracks(&client, "PTSMR", 10).await?;
/// println!("{} of {} tracks", page.count(), page.total);
/// ```
pub async fn search_tracks(client: &SpotifyClient, query: &str, limit: u32) -> Result<TrackList> {
    let json = search(client, query, "track", limit).await?;
    Ok(Page::from_paging(&json["tracks"], |v| Track::from(v)))
}

/// Searches for artists. Same contract as [`search_tracks`].
///
/// # Example
///
/// ```
/// let page = search_artists(&client, "tyler, the creator", 5).await?;
/// for artist in &page.items {
///     println!("{} ({} followers)", artist.name, artist.followers);
/// }
/// ```
pub async fn search_artists(client: &SpotifyClient, query: &str, limit: u32) -> Result<ArtistList> {
    let json = search(client, query, "artist", limit).await?;
    Ok(Page::from_paging(&json["artists"], |v| Artist::from(v)))
}

/// Searches for albums. Same contract as [`search_tracks`].
pub async fn search_albums(client: &SpotifyClient, query: &str, limit: u32) -> Result<AlbumList> {
    let json = search(client, query, "album", limit).await?;
    Ok(Page::from_paging(&json["albums"], |v| Album::from(v)))
}

/// Searches public playlists. Spotify sometimes returns `null` entries here;
/// they come back as default records so the count matches the service.
pub async fn search_playlists(
    client: &SpotifyClient,
    query: &str,
    limit: u32,
) -> Result<PlaylistList> {
    let json = search(client, query, "playlist", limit).await?;
    Ok(Page::from_paging(&json["playlists"], |v| Playlist::from(v)))
}
