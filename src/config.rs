//! Configuration management for spotcli.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file. The lookup order is:
//! 1. Environment variables already set in the process (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`<data_local_dir>/spotcli/.env`)
//! 4. Built-in defaults for everything except the client id

use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use reqwest::Url;

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Every scope the domain operations need.
pub const DEFAULT_SCOPE: &str = "user-read-private user-read-email \
user-library-read user-library-modify \
playlist-read-private playlist-read-collaborative playlist-modify-public playlist-modify-private \
user-read-playback-state user-modify-playback-state user-read-currently-playing \
user-read-recently-played";

const APP_DIR: &str = "spotcli";

/// Loads environment variables from a `.env` file.
///
/// A `.env` in the working directory takes precedence over the one in the
/// local data directory. Neither file is required: a missing file leaves the
/// environment untouched. `dotenv` never overrides variables that are
/// already set.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
///
/// # Example
///
/// ```
/// if let Err(e) = spotcli::config::load_env().await {
///     eprintln!("Configuration error: {}", e);
/// }
/// ```
pub async fn load_env() -> Result<()> {
    let local = PathBuf::from(".env");
    if local.is_file() {
        dotenv::from_path(&local).map_err(|e| Error::Config(e.to_string()))?;
        return Ok(());
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    async_fs::create_dir_all(&path).await?;
    path.push(".env");

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| Error::Config(e.to_string()))?;
    }
    Ok(())
}

/// Location of the persisted token file.
///
/// - Linux: `~/.config/spotcli/token.json`
/// - macOS: `~/Library/Application Support/spotcli/token.json`
/// - Windows: `%APPDATA%/spotcli/token.json`
pub fn token_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path.push("token.json");
    path
}

/// Runtime configuration for the Spotify client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Application client id from the Spotify developer dashboard.
    pub client_id: String,
    /// Client secret. When absent, token requests rely on PKCE alone.
    pub client_secret: Option<String>,
    /// Redirect URI registered for the application; the callback server binds
    /// to its host and port.
    pub redirect_uri: String,
    /// Space separated OAuth scopes.
    pub scope: String,
    /// Web API base, e.g. `https://api.spotify.com/v1`.
    pub api_url: String,
    /// Authorization page URL.
    pub auth_url: String,
    /// Token exchange URL.
    pub token_url: String,
    /// Applied to every HTTP request.
    pub request_timeout: Duration,
}

impl Config {
    /// Builds the configuration from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `SPOTIFY_API_AUTH_CLIENT_ID` (required)
    /// - `SPOTIFY_API_AUTH_CLIENT_SECRET`
    /// - `SPOTIFY_API_REDIRECT_URI`
    /// - `SPOTIFY_API_AUTH_SCOPE`
    /// - `SPOTIFY_API_URL`
    /// - `SPOTIFY_API_AUTH_URL`
    /// - `SPOTIFY_API_TOKEN_URL`
    /// - `SPOTIFY_REQUEST_TIMEOUT` (seconds)
    ///
    /// # Errors
    ///
    /// `Error::Config` when the client id is missing or the timeout is not a
    /// number.
    pub fn from_env() -> Result<Self> {
        let client_id = non_empty_var("SPOTIFY_API_AUTH_CLIENT_ID").ok_or_else(|| {
            Error::Config("SPOTIFY_API_AUTH_CLIENT_ID must be set".to_string())
        })?;

        let request_timeout = match non_empty_var("SPOTIFY_REQUEST_TIMEOUT") {
            Some(raw) => Duration::from_secs(raw.parse::<u64>().map_err(|e| {
                Error::Config(format!("SPOTIFY_REQUEST_TIMEOUT is not a number: {}", e))
            })?),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            client_id,
            client_secret: non_empty_var("SPOTIFY_API_AUTH_CLIENT_SECRET"),
            redirect_uri: var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            scope: var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            api_url: var_or("SPOTIFY_API_URL", DEFAULT_API_URL),
            auth_url: var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            request_timeout,
        })
    }

    /// Configuration pointing every endpoint at one base URL. Used to run the
    /// client against a local stand-in for the Spotify service.
    pub fn with_base_url(client_id: &str, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            client_id: client_id.to_string(),
            client_secret: None,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            api_url: base.to_string(),
            auth_url: format!("{}/authorize", base),
            token_url: format!("{}/api/token", base),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Socket address the OAuth callback server listens on, taken from the
    /// redirect URI.
    pub fn callback_addr(&self) -> Result<SocketAddr> {
        let url = Url::parse(&self.redirect_uri)
            .map_err(|e| Error::Config(format!("invalid redirect uri: {}", e)))?;
        let host = match url.host_str() {
            Some("localhost") | None => "127.0.0.1",
            Some(h) => h,
        };
        let port = url.port_or_known_default().unwrap_or(8888);
        format!("{}:{}", host, port)
            .parse()
            .map_err(|e| Error::Config(format!("invalid callback address: {}", e)))
    }

    /// Path component of the redirect URI, `/callback` by default.
    pub fn callback_path(&self) -> String {
        Url::parse(&self.redirect_uri)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| "/callback".to_string())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn var_or(key: &str, default: &str) -> String {
    non_empty_var(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_addr_follows_redirect_uri() {
        let mut config = Config::with_base_url("id", "http://127.0.0.1:1234");
        config.redirect_uri = "http://localhost:9090/cb".to_string();
        assert_eq!(config.callback_addr().unwrap().port(), 9090);
        assert_eq!(config.callback_path(), "/cb");
    }

    #[test]
    fn base_url_is_trimmed() {
        let config = Config::with_base_url("id", "http://127.0.0.1:1234/");
        assert_eq!(config.api_url, "http://127.0.0.1:1234");
        assert_eq!(config.token_url, "http://127.0.0.1:1234/api/token");
    }
}
