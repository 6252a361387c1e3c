use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;
use tracing::warn;

use crate::{
    config::Config,
    error::{Error, Result},
    management::TokenManager,
    spotify::transport::{ApiResponse, Transport},
};

/// Largest page size and id batch the Web API accepts.
pub const MAX_LIMIT: u32 = 50;

/// Clamps a page size into `1..=50`.
pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_LIMIT)
}

/// Entry point of every domain operation: a transport plus the session token.
///
/// Each call makes sure the token is valid first. A 401 on an apparently
/// valid token forces one refresh and the request is retried once; a second
/// 401 is returned to the caller.
pub struct SpotifyClient {
    transport: Transport,
    tokens: Arc<TokenManager>,
}

impl SpotifyClient {
    pub fn new(transport: Transport, tokens: Arc<TokenManager>) -> Self {
        SpotifyClient { transport, tokens }
    }

    pub fn from_config(config: &Config, tokens: Arc<TokenManager>) -> Result<Self> {
        let transport = Transport::new(&config.api_url, config.request_timeout)?;
        Ok(Self::new(transport, tokens))
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        let token = self.tokens.ensure_valid().await?;
        match self.transport.request(method.clone(), path, &token, body).await {
            Err(Error::Unauthorized) => {
                warn!(path, "access token rejected, refreshing and retrying");
                let token = self.tokens.force_refresh(&token).await?;
                self.transport.request(method, path, &token, body).await
            }
            other => other,
        }
    }

    pub async fn get(&self, path: &str) -> Result<Option<Value>> {
        Ok(self.request(Method::GET, path, None).await?.body)
    }

    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Option<Value>> {
        Ok(self.request(method, path, body).await?.body)
    }

    pub async fn send_empty(&self, method: Method, path: &str, body: Option<&Value>) -> Result<bool> {
        Ok(self.request(method, path, body).await?.is_empty_success())
    }
}

/// Rejects id lists the API would refuse: empty, or more than [`MAX_LIMIT`]
/// entries.
pub fn check_ids<S: AsRef<str>>(ids: &[S]) -> Result<()> {
    if ids.is_empty() {
        return Err(Error::InvalidArgument("no ids given".to_string()));
    }
    if ids.len() > MAX_LIMIT as usize {
        return Err(Error::InvalidArgument(format!(
            "at most {} ids per request, got {}",
            MAX_LIMIT,
            ids.len()
        )));
    }
    if ids.iter().any(|id| id.as_ref().is_empty()) {
        return Err(Error::InvalidArgument("empty id".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_clamped() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(10), 10);
        assert_eq!(clamp_limit(51), 50);
    }

    #[test]
    fn id_lists_are_bounded() {
        assert!(check_ids::<&str>(&[]).is_err());
        assert!(check_ids(&["a"]).is_ok());
        let many: Vec<String> = (0..51).map(|i| i.to_string()).collect();
        assert!(matches!(check_ids(&many), Err(Error::InvalidArgument(_))));
        assert!(check_ids(&many[..50]).is_ok());
    }
}
