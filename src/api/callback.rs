use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{config::Config, spotify::auth::exchange_code, types::PkceToken, warning};

/// Redirect target of the authorization page.
///
/// Exchanges `code` with the verifier stored for this flow and records the
/// token, or the failure, in the shared state the flow is polling.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(config): Extension<Arc<Config>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PkceToken>>>>,
) -> Html<&'static str> {
    let mut state = shared_state.lock().await;
    let Some(pkce_state) = state.as_mut() else {
        return Html("<h4>No authorization in progress.</h4>");
    };

    if let Some(error) = params.get("error") {
        pkce_state.error = Some(format!("authorization denied: {}", error));
        return Html("<h4>Authorization denied.</h4><p>You can close this window.</p>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    match exchange_code(&config, code, &pkce_state.code_verifier).await {
        Ok(token) => {
            pkce_state.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>You can close this window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            pkce_state.error = Some(e.to_string());
            Html("<h4>Login failed.</h4>")
        }
    }
}
