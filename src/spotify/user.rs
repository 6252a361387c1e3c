use crate::{
    error::{Error, Result},
    spotify::{MAX_LIMIT, SpotifyClient, encode_query},
    types::{PlayHistory, UserProfile},
};

/// Page size used when the caller asks for zero or fewer history entries.
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

/// Profile of the signed-in user.
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(UserProfile)` - Including email, country and product, which need the
///   `user-read-email` and `user-read-private` scopes
/// - `Err(Error::NotFound)` - The service answered without a body
///
/// # Example
///
/// ```
/// let me = get_current_user_profile(&client).await?;
/// if me.product != "premium" {
///     warning!("Playback control needs Spotify Premium");
/// }
/// ```
pub async fn get_current_user_profile(client: &SpotifyClient) -> Result<UserProfile> {
    let json = client.get("/me").await?.ok_or(Error::NotFound)?;
    Ok(UserProfile::from(&json))
}

/// Public profile of another user. Email, country and product stay empty.
pub async fn get_user_profile(client: &SpotifyClient, user_id: &str) -> Result<UserProfile> {
    let path = format!("/users/{}", encode_query(user_id));
    let json = client.get(&path).await?.ok_or(Error::NotFound)?;
    Ok(UserProfile::from(&json))
}

/// Id of the signed-in user, needed to create playlists.
pub async fn get_current_user_id(client: &SpotifyClient) -> Result<String> {
    let profile = get_current_user_profile(client).await?;
    if profile.id.is_empty() {
        return Err(Error::NotFound);
    }
    Ok(profile.id)
}

/// Recently played tracks, newest first. A `limit` of zero or less uses
/// [`DEFAULT_HISTORY_LIMIT`]; anything above 50 is capped.
pub async fn get_recently_played(client: &SpotifyClient, limit: i32) -> Result<Vec<PlayHistory>> {
    let limit = match limit {
        l if l <= 0 => DEFAULT_HISTORY_LIMIT,
        l => (l as u32).min(MAX_LIMIT),
    };
    let path = format!("/me/player/recently-played?limit={}", limit);
    let json = client.get(&path).await?.unwrap_or_default();
    Ok(json["items"]
        .as_array()
        .map(|items| items.iter().map(PlayHistory::from).collect())
        .unwrap_or_default())
}
