use thiserror::Error;

/// Errors returned by every spotcli operation.
///
/// Callers can tell an authentication problem from a missing resource or a
/// network failure, which the CLI uses to decide between exiting and printing
/// a warning before returning to the menu.
#[derive(Error, Debug)]
pub enum Error {
    /// The authorization or refresh exchange failed. No request can proceed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The API answered 401 for an otherwise valid request.
    #[error("Unauthorized: access token rejected by Spotify")]
    Unauthorized,

    /// Any other non-2xx answer from the API.
    #[error("Spotify API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Connection, timeout or TLS failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request succeeded but there was nothing to return
    /// (no active device, no stored token, empty profile).
    #[error("Not found")]
    NotFound,

    /// Arguments rejected before any request was made.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for failures that only re-authentication can fix.
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth(_) | Error::Unauthorized)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
