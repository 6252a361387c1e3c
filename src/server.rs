use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::Mutex, sync::oneshot};

use crate::{api, config::Config, error::Result, types::PkceToken};

/// Binds the callback listener to the address of the configured redirect URI.
pub async fn bind(config: &Config) -> Result<TcpListener> {
    let addr = config.callback_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::debug!(%addr, "callback server listening");
    Ok(listener)
}

/// Serves the OAuth callback until `shutdown` fires (or its sender is
/// dropped).
pub async fn start_api_server(
    listener: TcpListener,
    config: Arc<Config>,
    state: Arc<Mutex<Option<PkceToken>>>,
    shutdown: oneshot::Receiver<()>,
) -> Result<()> {
    let app = Router::new()
        .route(&config.callback_path(), get(api::callback))
        .layer(Extension(state))
        .layer(Extension(Arc::clone(&config)));

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = shutdown.await;
        })
        .await?;
    Ok(())
}
