use reqwest::Method;

use crate::{
    error::{Error, Result},
    spotify::{SpotifyClient, encode_query},
    types::Queue,
};

/// Currently playing item and the upcoming queue.
pub async fn get_queue(client: &SpotifyClient) -> Result<Queue> {
    let json = client.get("/me/player/queue").await?.unwrap_or_default();
    Ok(Queue::from(&json))
}

/// Appends a track or episode `uri` to the queue of `device_id` (or the active
/// device).
pub async fn add_to_queue(client: &SpotifyClient, uri: &str, device_id: Option<&str>) -> Result<bool> {
    if uri.is_empty() {
        return Err(Error::InvalidArgument("uri is empty".to_string()));
    }
    let mut path = format!("/me/player/queue?uri={}", encode_query(uri));
    if let Some(device_id) = device_id.filter(|d| !d.is_empty()) {
        path.push_str(&format!("&device_id={}", encode_query(device_id)));
    }
    client.send_empty(Method::POST, &path, None).await
}
