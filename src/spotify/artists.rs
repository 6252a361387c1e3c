use crate::{
    error::{Error, Result},
    spotify::{SpotifyClient, clamp_limit, encode_query},
    types::{Album, AlbumList, Artist, Page, Track, TrackList},
};

/// Retrieves a single artist by id.
///
/// # Arguments
///
/// * `client` - Authenticated client
/// * `artist_id` - Spotify artist id, encoded into the path
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Artist)` - Name, genres joined with `", "`, follower count, popularity
///   and the first image url (empty when the artist has none)
/// - `Err(Error::NotFound)` - The service answered without a body
/// - `Err(_)` - Transport or authentication failure
///
/// # Example
///
/// ```
/// let artist = get_artist(&client, "0TnOYISbd1XYRBk9myaseg").await?;
/// info!("{} - {}", artist.name, artist.genres);
/// ```
pub async fn get_artist(client: &SpotifyClient, artist_id: &str) -> Result<Artist> {
    let path = format!("/artists/{}", encode_query(artist_id));
    let json = client.get(&path).await?.ok_or(Error::NotFound)?;
    Ok(Artist::from(&json))
}

/// Most popular tracks of an artist in `market` (ISO 3166-1 alpha-2 code).
///
/// The endpoint returns a bare `tracks` array; the page total is the number of
/// tracks returned.
pub async fn get_artist_top_tracks(
    client: &SpotifyClient,
    artist_id: &str,
    market: &str,
) -> Result<TrackList> {
    let market = if market.is_empty() { "US" } else { market };
    let path = format!(
        "/artists/{}/top-tracks?market={}",
        encode_query(artist_id),
        encode_query(market)
    );
    let json = client.get(&path).await?.unwrap_or_default();
    Ok(Page::from_array(&json, "tracks", |v| Track::from(v)))
}

/// First page of an artist's albums, singles included. `limit` is clamped into
/// `1..=50`.
pub async fn get_artist_albums(
    client: &SpotifyClient,
    artist_id: &str,
    limit: u32,
) -> Result<AlbumList> {
    let path = format!(
        "/artists/{}/albums?limit={}",
        encode_query(artist_id),
        clamp_limit(limit)
    );
    let json = client.get(&path).await?.unwrap_or_default();
    Ok(Page::from_paging(&json, |v| Album::from(v)))
}
