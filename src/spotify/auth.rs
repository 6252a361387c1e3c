use std::{sync::Arc, time::Duration};

use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use tokio::sync::{Mutex, oneshot};
use tracing::debug;

use crate::{
    config::Config,
    error::{Error, Result},
    server,
    types::{PkceToken, Token},
    utils, warning,
};

/// How long the browser flow waits for the user to approve access.
pub const AUTHORIZE_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Runs the OAuth 2.0 authorization code flow with PKCE.
///
/// 1. Generates a code verifier and its S256 challenge
/// 2. Starts the local callback server on the redirect URI's address
/// 3. Opens the authorization page in the browser, or prints its URL when no
///    browser can be launched
/// 4. Waits up to [`AUTHORIZE_TIMEOUT`] for the callback to deliver a token
///
/// The callback handler performs the code exchange, so the token returned here
/// is ready to use. The caller decides whether to persist it.
///
/// # Errors
///
/// `Error::Auth` when the callback server cannot start, the user denies
/// access, the exchange fails or the flow times out.
pub async fn authorize(config: &Config) -> Result<Token> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let shared_state = Arc::new(Mutex::new(Some(PkceToken {
        code_verifier,
        token: None,
        error: None,
    })));

    let listener = server::bind(config)
        .await
        .map_err(|e| Error::Auth(format!("cannot start callback server: {}", e)))?;
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let server_state = Arc::clone(&shared_state);
    let server_config = Arc::new(config.clone());
    let server = tokio::spawn(async move {
        server::start_api_server(listener, server_config, server_state, shutdown_rx).await
    });

    let url = authorize_url(config, &code_challenge)?;
    if webbrowser::open(url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        );
    }

    let result = wait_for_token(shared_state, AUTHORIZE_TIMEOUT).await;

    let _ = shutdown_tx.send(());
    let _ = server.await;

    result
}

/// Authorization page URL carrying the client id, redirect URI, scope and
/// PKCE challenge.
pub fn authorize_url(config: &Config, code_challenge: &str) -> Result<Url> {
    Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge),
            ("scope", config.scope.as_str()),
        ],
    )
    .map_err(|e| Error::Config(format!("invalid authorization url: {}", e)))
}

async fn wait_for_token(
    shared_state: Arc<Mutex<Option<PkceToken>>>,
    max_wait: Duration,
) -> Result<Token> {
    let start = std::time::Instant::now();

    while start.elapsed() < max_wait {
        {
            let lock = shared_state.lock().await;
            if let Some(pkce) = lock.as_ref() {
                if let Some(token) = &pkce.token {
                    return Ok(token.clone());
                }
                if let Some(error) = &pkce.error {
                    return Err(Error::Auth(error.clone()));
                }
            }
        }
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    Err(Error::Auth("authorization timed out".to_string()))
}

/// Exchanges an authorization `code` for a token, proving possession of the
/// PKCE `verifier`.
pub async fn exchange_code(config: &Config, code: &str, verifier: &str) -> Result<Token> {
    let form = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", config.redirect_uri.as_str()),
        ("code_verifier", verifier),
        ("client_id", config.client_id.as_str()),
    ];
    let request = http(config)?.post(&config.token_url).form(&form);
    token_request(config, request, None).await
}

/// Obtains a new access token with the refresh token of `token`.
///
/// When the response carries no new refresh token the previous one is kept.
/// Nothing is sent if `token` has no refresh token.
pub async fn refresh_token(config: &Config, token: &Token) -> Result<Token> {
    if token.refresh_token.is_empty() {
        return Err(Error::Auth("no refresh token stored".to_string()));
    }

    let mut form = vec![
        ("grant_type", "refresh_token"),
        ("refresh_token", token.refresh_token.as_str()),
    ];
    if config.client_secret.is_none() {
        form.push(("client_id", config.client_id.as_str()));
    }
    let request = http(config)?.post(&config.token_url).form(&form);
    token_request(config, request, Some(&token.refresh_token)).await
}

fn http(config: &Config) -> Result<Client> {
    Ok(Client::builder().timeout(config.request_timeout).build()?)
}

async fn token_request(
    config: &Config,
    mut request: RequestBuilder,
    previous_refresh: Option<&str>,
) -> Result<Token> {
    if let Some(secret) = &config.client_secret {
        request = request.basic_auth(&config.client_id, Some(secret));
    }

    let res = request
        .send()
        .await
        .map_err(|e| Error::Auth(format!("token request failed: {}", e)))?;
    let status = res.status();
    debug!(status = status.as_u16(), "token endpoint answered");

    let body = res
        .text()
        .await
        .map_err(|e| Error::Auth(format!("token response unreadable: {}", e)))?;

    if !status.is_success() {
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v["error_description"]
                    .as_str()
                    .or_else(|| v["error"].as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| status.to_string());
        return Err(Error::Auth(format!("token endpoint returned {}: {}", status.as_u16(), detail)));
    }

    let parsed: TokenResponse = serde_json::from_str(&body)
        .map_err(|e| Error::Auth(format!("malformed token response: {}", e)))?;
    if parsed.access_token.is_empty() {
        return Err(Error::Auth("token response has no access token".to_string()));
    }

    let refresh_token = parsed
        .refresh_token
        .filter(|r| !r.is_empty())
        .or_else(|| previous_refresh.map(str::to_string))
        .unwrap_or_default();

    Ok(Token {
        access_token: parsed.access_token,
        refresh_token,
        scope: parsed.scope,
        expires_in: parsed.expires_in,
        obtained_at: utils::now_secs(),
    })
}
