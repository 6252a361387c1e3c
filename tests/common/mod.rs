#![allow(dead_code)]

use std::sync::Arc;

use spotcli::{
    config::Config,
    management::{TokenFile, TokenManager},
    spotify::SpotifyClient,
    types::Token,
    utils,
};
use tempfile::TempDir;

pub const ACCESS: &str = "test-access-token";
pub const REFRESH: &str = "test-refresh-token";

pub fn fresh_token() -> Token {
    Token {
        access_token: ACCESS.to_string(),
        refresh_token: REFRESH.to_string(),
        scope: "user-library-read".to_string(),
        expires_in: 3600,
        obtained_at: utils::now_secs(),
    }
}

pub fn expired_token() -> Token {
    Token {
        obtained_at: 0,
        ..fresh_token()
    }
}

pub struct Harness {
    pub dir: TempDir,
    pub tokens: Arc<TokenManager>,
    pub client: SpotifyClient,
}

impl Harness {
    pub fn token_file(&self) -> TokenFile {
        TokenFile::new(self.dir.path().join("token.json"))
    }
}

/// Client pointed at `base_url` for both the Web API and the token endpoint,
/// with its token file in a fresh temp dir.
pub fn harness(base_url: &str, token: Token) -> Harness {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::with_base_url("test-client", base_url);
    let file = TokenFile::new(dir.path().join("token.json"));
    let tokens = Arc::new(TokenManager::new(config.clone(), token, file));
    let client = SpotifyClient::from_config(&config, Arc::clone(&tokens)).expect("client");
    Harness {
        dir,
        tokens,
        client,
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
