use crate::{
    error::{Error, Result},
    spotify::{SpotifyClient, encode_query},
    types::AlbumDetail,
};

/// Retrieves album metadata together with the first page of its tracks.
///
/// Tracks embedded in an album object carry no album of their own; they are
/// filled in with this album's name.
///
/// # Arguments
///
/// * `client` - Authenticated client
/// * `album_id` - Spotify album id
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(AlbumDetail)` - The album and its tracks in disc order
/// - `Err(Error::NotFound)` - The service answered without a body
/// - `Err(_)` - Transport or authentication failure
pub async fn get_album(client: &SpotifyClient, album_id: &str) -> Result<AlbumDetail> {
    let path = format!("/albums/{}", encode_query(album_id));
    let json = client.get(&path).await?.ok_or(Error::NotFound)?;
    Ok(AlbumDetail::from(&json))
}
