use std::sync::Arc;

use crate::{
    config::Config,
    error::{Error, Result},
    info,
    management::{TokenFile, TokenManager},
    spotify::SpotifyClient,
    success,
};

/// Restores the stored session, or runs the browser flow when there is none,
/// and returns a client ready for the domain operations.
pub async fn connect(config: Config) -> Result<SpotifyClient> {
    let file = TokenFile::default();
    let tokens = match TokenManager::load(config.clone(), file.clone()).await {
        Ok(tokens) => tokens,
        Err(Error::NotFound) => {
            info!("No stored session, opening Spotify authorization...");
            let tokens = TokenManager::login(config.clone(), file).await?;
            success!("Authentication successful!");
            tokens
        }
        Err(e) => return Err(e),
    };

    let tokens = Arc::new(tokens.with_reauthorize(true));
    // Surface a dead refresh token now rather than at the first command.
    tokens.ensure_valid().await?;
    SpotifyClient::from_config(&config, tokens)
}
