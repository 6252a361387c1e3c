use std::time::Duration;

use mockito::{Matcher, Server};
use reqwest::Method;
use serde_json::json;
use spotcli::{error::Error, spotify::Transport};

const TOKEN: &str = "tok";

fn transport(server: &Server) -> Transport {
    Transport::new(&server.url(), Duration::from_secs(5)).expect("transport")
}

#[tokio::test]
async fn sends_bearer_token_and_decodes_json() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/me")
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "u1" }).to_string())
        .create_async()
        .await;

    let res = transport(&server)
        .request(Method::GET, "/me", TOKEN, None)
        .await
        .expect("request");

    mock.assert_async().await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body, Some(json!({ "id": "u1" })));
}

#[tokio::test]
async fn unauthorized_is_its_own_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/me")
        .with_status(401)
        .with_body(json!({ "error": { "status": 401, "message": "The access token expired" } }).to_string())
        .expect(1)
        .create_async()
        .await;

    let err = transport(&server)
        .get_json("/me", TOKEN)
        .await
        .expect_err("401 must fail");

    mock.assert_async().await;
    assert!(matches!(err, Error::Unauthorized));
    assert!(err.is_auth());
}

#[tokio::test]
async fn other_failures_carry_status_and_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/artists/nope")
        .with_status(404)
        .with_body(json!({ "error": { "status": 404, "message": "Non existing id" } }).to_string())
        .create_async()
        .await;

    let err = transport(&server)
        .get_json("/artists/nope", TOKEN)
        .await
        .expect_err("404 must fail");

    match err {
        Error::Status { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Non existing id");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn empty_success_has_no_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/me/player")
        .with_status(204)
        .create_async()
        .await;

    let res = transport(&server)
        .request(Method::GET, "/me/player", TOKEN, None)
        .await
        .expect("request");

    assert_eq!(res.status, 204);
    assert!(res.body.is_none());
}

#[tokio::test]
async fn bodyless_put_sends_zero_content_length() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/me/player/pause")
        .match_header("content-length", "0")
        .with_status(204)
        .create_async()
        .await;

    let ok = transport(&server)
        .send_empty(Method::PUT, "/me/player/pause", TOKEN, None)
        .await
        .expect("request");

    mock.assert_async().await;
    assert!(ok);
}

#[tokio::test]
async fn json_body_is_sent_with_content_type() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/me/tracks")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({ "ids": ["a", "b"] })))
        .with_status(200)
        .create_async()
        .await;

    let body = json!({ "ids": ["a", "b"] });
    let ok = transport(&server)
        .send_empty(Method::PUT, "/me/tracks", TOKEN, Some(&body))
        .await
        .expect("request");

    mock.assert_async().await;
    assert!(ok);
}

#[tokio::test]
async fn accepted_is_not_an_empty_success() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/me/player/next")
        .with_status(202)
        .create_async()
        .await;

    let ok = transport(&server)
        .send_empty(Method::POST, "/me/player/next", TOKEN, None)
        .await
        .expect("request");

    assert!(!ok);
}

#[tokio::test]
async fn unreachable_host_is_an_http_error() {
    let transport = Transport::new("http://127.0.0.1:9", Duration::from_secs(2)).expect("transport");
    let err = transport
        .get_json("/me", TOKEN)
        .await
        .expect_err("nothing listens on port 9");
    assert!(matches!(err, Error::Http(_)));
}
