use std::time::Duration;

use reqwest::{Client, Method, header::CONTENT_LENGTH};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

/// Status and decoded body of a successful API call. `body` is `None` when the
/// service sent nothing or something that is not JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn is_empty_success(&self) -> bool {
        matches!(self.status, 200 | 201 | 204)
    }
}

/// Bearer-authenticated JSON requests against the Web API.
///
/// Holds one connection pool for the process lifetime. Paths are appended to
/// the base URL verbatim, so callers encode any query values themselves (see
/// [`encode_query`]).
#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
    base_url: String,
}

impl Transport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Transport {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues one request.
    ///
    /// A JSON `body` is sent with `Content-Type: application/json`. PUT and
    /// POST without a body send `Content-Length: 0`, which the service
    /// requires.
    ///
    /// # Errors
    ///
    /// - `Error::Unauthorized` on 401, never retried here
    /// - `Error::Status` for any other non-2xx, with the service's
    ///   `error.message` when it sent one
    /// - `Error::Http` when the request could not be completed
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method.clone(), &url).bearer_auth(token);

        builder = match body {
            Some(json) => builder.json(json),
            None if method == Method::PUT || method == Method::POST => {
                builder.header(CONTENT_LENGTH, 0)
            }
            None => builder,
        };

        let res = builder.send().await?;
        let status = res.status();
        debug!(%method, path, status = status.as_u16(), "spotify request");

        let text = res.text().await?;

        if status.as_u16() == 401 {
            return Err(Error::Unauthorized);
        }
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                message: error_message(&text)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string()),
            });
        }

        let body = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str(&text).ok()
        };

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }

    /// GET returning the decoded body.
    pub async fn get_json(&self, path: &str, token: &str) -> Result<Option<Value>> {
        Ok(self.request(Method::GET, path, token, None).await?.body)
    }

    /// Mutation whose answer carries no payload of interest. True only for
    /// 200, 201 and 204.
    pub async fn send_empty(
        &self,
        method: Method,
        path: &str,
        token: &str,
        body: Option<&Value>,
    ) -> Result<bool> {
        Ok(self
            .request(method, path, token, body)
            .await?
            .is_empty_success())
    }
}

/// `error.message` of a Spotify error body, falling back to a string `error`.
fn error_message(text: &str) -> Option<String> {
    let v: Value = serde_json::from_str(text).ok()?;
    v["error"]["message"]
        .as_str()
        .or_else(|| v["error"].as_str())
        .map(str::to_string)
}

/// Percent-encodes untrusted text for use as a query value.
pub fn encode_query(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_nested_message() {
        let body = r#"{"error":{"status":404,"message":"Non existing id"}}"#;
        assert_eq!(error_message(body).as_deref(), Some("Non existing id"));
        assert_eq!(error_message(r#"{"error":"invalid_grant"}"#).as_deref(), Some("invalid_grant"));
        assert_eq!(error_message("<html>"), None);
    }

    #[test]
    fn encode_query_escapes_reserved_characters() {
        assert_eq!(encode_query("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_query("spotify:track:1"), "spotify%3Atrack%3A1");
    }
}
