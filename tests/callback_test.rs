use std::sync::Arc;

use mockito::{Matcher, Server};
use serde_json::json;
use spotcli::{config::Config, server, types::PkceToken};
use tokio::{
    net::TcpListener,
    sync::{Mutex, oneshot},
    task::JoinHandle,
};

type SharedState = Arc<Mutex<Option<PkceToken>>>;

struct Running {
    base: String,
    state: SharedState,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<spotcli::error::Result<()>>,
}

async fn start(config: Config) -> Running {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let base = format!("http://{}", listener.local_addr().unwrap());
    let state: SharedState = Arc::new(Mutex::new(Some(PkceToken {
        code_verifier: "verifier-123".to_string(),
        token: None,
        error: None,
    })));
    let (shutdown, rx) = oneshot::channel();
    let handle = tokio::spawn(server::start_api_server(
        listener,
        Arc::new(config),
        Arc::clone(&state),
        rx,
    ));
    Running {
        base,
        state,
        shutdown,
        handle,
    }
}

async fn stop(running: Running) {
    let _ = running.shutdown.send(());
    running.handle.await.unwrap().expect("server exits cleanly");
}

#[tokio::test]
async fn callback_exchanges_code_for_token() {
    let mut spotify = Server::new_async().await;
    let exchange = spotify
        .mock("POST", "/api/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
            Matcher::UrlEncoded("code".into(), "the-code".into()),
            Matcher::UrlEncoded("code_verifier".into(), "verifier-123".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "access_token": "granted",
                "refresh_token": "refresh",
                "expires_in": 3600,
                "scope": "user-library-read"
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let running = start(Config::with_base_url("test-client", &spotify.url())).await;
    let res = reqwest::get(format!("{}/callback?code=the-code", running.base))
        .await
        .expect("callback reachable");
    assert!(res.status().is_success());

    exchange.assert_async().await;
    {
        let state = running.state.lock().await;
        let pkce = state.as_ref().unwrap();
        assert_eq!(pkce.token.as_ref().unwrap().access_token, "granted");
        assert!(pkce.error.is_none());
    }
    stop(running).await;
}

#[tokio::test]
async fn denied_authorization_is_recorded() {
    let running = start(Config::with_base_url("test-client", "http://127.0.0.1:9")).await;
    let res = reqwest::get(format!("{}/callback?error=access_denied", running.base))
        .await
        .expect("callback reachable");
    assert!(res.status().is_success());

    {
        let state = running.state.lock().await;
        let pkce = state.as_ref().unwrap();
        assert!(pkce.token.is_none());
        assert!(pkce.error.as_deref().unwrap().contains("access_denied"));
    }
    stop(running).await;
}

#[tokio::test]
async fn other_paths_are_not_served() {
    let running = start(Config::with_base_url("test-client", "http://127.0.0.1:9")).await;
    let res = reqwest::get(format!("{}/health", running.base))
        .await
        .expect("server reachable");
    assert_eq!(res.status().as_u16(), 404);
    stop(running).await;
}
