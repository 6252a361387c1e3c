use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{
    config::Config,
    error::Result,
    management::TokenFile,
    spotify::auth,
    types::Token,
    utils,
};

/// Seconds before the real expiry at which a token is treated as expired.
pub const EXPIRY_BUFFER_SECS: u64 = 60;

/// Owns the session token and keeps it valid.
///
/// The token sits behind an async mutex. Callers that find it expired
/// serialize on the lock, so at most one refresh is in flight and everyone
/// queued behind it sees the refreshed token without refreshing again.
pub struct TokenManager {
    config: Config,
    file: TokenFile,
    token: Mutex<Token>,
    reauthorize: bool,
}

impl TokenManager {
    /// Wraps an already obtained token. Re-authorization is off until
    /// [`with_reauthorize`](Self::with_reauthorize) turns it on.
    pub fn new(config: Config, token: Token, file: TokenFile) -> Self {
        TokenManager {
            config,
            file,
            token: Mutex::new(token),
            reauthorize: false,
        }
    }

    /// Restores the session from `file`. `Error::NotFound` when there is no
    /// stored token.
    pub async fn load(config: Config, file: TokenFile) -> Result<Self> {
        let token = file.load().await?;
        Ok(Self::new(config, token, file))
    }

    /// Runs the interactive authorization flow and persists the result.
    pub async fn login(config: Config, file: TokenFile) -> Result<Self> {
        let token = auth::authorize(&config).await?;
        file.save(&token).await?;
        Ok(Self::new(config, token, file))
    }

    /// When enabled, a failed refresh falls back to the browser flow instead
    /// of returning the error.
    pub fn with_reauthorize(mut self, enabled: bool) -> Self {
        self.reauthorize = enabled;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns an access token that is not about to expire.
    ///
    /// An unexpired token is returned without touching the network. An expired
    /// one is refreshed (or re-authorized) and persisted first.
    pub async fn ensure_valid(&self) -> Result<String> {
        let mut token = self.token.lock().await;
        if !is_expired(&token, utils::now_secs()) {
            return Ok(token.access_token.clone());
        }

        debug!("access token expired, refreshing");
        self.renew(&mut token).await?;
        Ok(token.access_token.clone())
    }

    /// Refreshes after the service rejected `rejected`.
    ///
    /// If another caller already replaced that token while this one waited
    /// for the lock, the current token is returned as is.
    pub async fn force_refresh(&self, rejected: &str) -> Result<String> {
        let mut token = self.token.lock().await;
        if token.access_token != rejected {
            return Ok(token.access_token.clone());
        }

        debug!("access token rejected, forcing refresh");
        self.renew(&mut token).await?;
        Ok(token.access_token.clone())
    }

    pub async fn current_token(&self) -> Token {
        self.token.lock().await.clone()
    }

    async fn renew(&self, token: &mut Token) -> Result<()> {
        let fresh = match auth::refresh_token(&self.config, token).await {
            Ok(fresh) => fresh,
            Err(e) if self.reauthorize => {
                warn!("token refresh failed, re-authorizing: {}", e);
                auth::authorize(&self.config).await?
            }
            Err(e) => {
                warn!("token refresh failed: {}", e);
                return Err(e);
            }
        };

        *token = fresh;
        // Kept in memory even when the write fails; the caller still sees the error.
        self.file.save(token).await.inspect_err(|e| {
            warn!(path = %self.file.path().display(), "failed to persist refreshed token: {}", e);
        })
    }
}

/// Whether `token` expires within [`EXPIRY_BUFFER_SECS`] of `now`.
pub fn is_expired(token: &Token, now: u64) -> bool {
    let expires_at = token.obtained_at.saturating_add(token.expires_in);
    now.saturating_add(EXPIRY_BUFFER_SECS) >= expires_at
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(obtained_at: u64, expires_in: u64) -> Token {
        Token {
            access_token: "a".into(),
            refresh_token: "r".into(),
            obtained_at,
            expires_in,
            ..Default::default()
        }
    }

    #[test]
    fn fresh_token_is_valid() {
        assert!(!is_expired(&token(1_000, 3600), 1_000));
    }

    #[test]
    fn token_inside_buffer_is_expired() {
        assert!(is_expired(&token(1_000, 3600), 1_000 + 3600 - 30));
        assert!(is_expired(&token(1_000, 3600), 1_000 + 3600 - EXPIRY_BUFFER_SECS));
        assert!(!is_expired(&token(1_000, 3600), 1_000 + 3600 - EXPIRY_BUFFER_SECS - 1));
    }

    #[test]
    fn zero_lifetime_is_expired() {
        assert!(is_expired(&token(0, 0), 0));
    }
}
