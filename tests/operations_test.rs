mod common;

use common::{ACCESS, bearer, fresh_token, harness};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{Value, json};
use spotcli::{
    error::Error,
    spotify::{albums, artists, library, player, playlist, queue, search, user},
    types::{PlaylistUpdate, RepeatState},
};

async fn json_mock(server: &mut ServerGuard, method: &str, path: &str, query: &str, body: Value) -> mockito::Mock {
    let mut mock = server
        .mock(method, path)
        .match_header("authorization", bearer(ACCESS).as_str());
    if !query.is_empty() {
        mock = mock.match_query(Matcher::Exact(query.to_string()));
    }
    mock.with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(1)
        .create_async()
        .await
}

fn track(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:track:{}", id),
        "duration_ms": 215_000,
        "artists": [{ "name": "Tyler, The Creator" }, { "name": "Someone Else" }],
        "album": { "name": "CHROMAKOPIA" }
    })
}

#[tokio::test]
async fn search_tracks_reads_items_and_total() {
    let mut server = Server::new_async().await;
    let mock = json_mock(
        &mut server,
        "GET",
        "/search",
        "q=PTSMR&type=track&limit=10",
        json!({
            "tracks": {
                "items": [track("1", "One"), track("2", "Two"), track("3", "Three")],
                "total": 57
            }
        }),
    )
    .await;

    let h = harness(&server.url(), fresh_token());
    let page = search::search_tracks(&h.client, "PTSMR", 10).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.count(), 3);
    assert_eq!(page.total, 57);
    let first = &page.items[0];
    assert_eq!(first.name, "One");
    assert_eq!(first.artist, "Tyler, The Creator");
    assert_eq!(first.album, "CHROMAKOPIA");
    assert_eq!(first.duration_ms, 215_000);
    assert_eq!(first.uri, "spotify:track:1");
}

#[tokio::test]
async fn search_query_is_encoded_and_limit_clamped() {
    let mut server = Server::new_async().await;
    let mock = json_mock(
        &mut server,
        "GET",
        "/search",
        "q=tyler%2C%20the%20creator&type=artist&limit=50",
        json!({ "artists": { "items": [], "total": 0 } }),
    )
    .await;

    let h = harness(&server.url(), fresh_token());
    let page = search::search_artists(&h.client, "tyler, the creator", 500)
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(page.is_empty());
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn search_without_section_is_empty() {
    let mut server = Server::new_async().await;
    let _mock = json_mock(
        &mut server,
        "GET",
        "/search",
        "q=nothing&type=playlist&limit=5",
        json!({}),
    )
    .await;

    let h = harness(&server.url(), fresh_token());
    let page = search::search_playlists(&h.client, "nothing", 5).await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn save_tracks_sends_ids_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/me/tracks")
        .match_body(Matcher::Json(json!({ "ids": ["abc123"] })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let h = harness(&server.url(), fresh_token());
    assert!(library::save_tracks(&h.client, &["abc123"]).await.unwrap());
    mock.assert_async().await;
}

#[tokio::test]
async fn save_tracks_failure_is_reported() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("PUT", "/me/tracks")
        .with_status(500)
        .create_async()
        .await;

    let h = harness(&server.url(), fresh_token());
    let err = library::save_tracks(&h.client, &["abc123"]).await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 500, .. }));
}

#[tokio::test]
async fn id_lists_are_checked_before_sending() {
    let mut server = Server::new_async().await;
    let mock = server.mock("PUT", "/me/tracks").expect(0).create_async().await;

    let h = harness(&server.url(), fresh_token());
    let many: Vec<String> = (0..51).map(|i| format!("id{}", i)).collect();
    let many: Vec<&str> = many.iter().map(String::as_str).collect();

    assert!(matches!(
        library::save_tracks(&h.client, &[]).await,
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        library::save_tracks(&h.client, &many).await,
        Err(Error::InvalidArgument(_))
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn saved_tracks_unwrap_library_items() {
    let mut server = Server::new_async().await;
    let _mock = json_mock(
        &mut server,
        "GET",
        "/me/tracks",
        "limit=20&offset=0",
        json!({
            "items": [
                { "added_at": "2024-01-01T00:00:00Z", "track": track("a", "A") },
                { "added_at": "2024-01-02T00:00:00Z", "track": track("b", "B") }
            ],
            "total": 120
        }),
    )
    .await;

    let h = harness(&server.url(), fresh_token());
    let page = library::get_saved_tracks(&h.client, 20, 0).await.unwrap();
    assert_eq!(page.count(), 2);
    assert_eq!(page.total, 120);
    assert_eq!(page.items[1].id, "b");
}

#[tokio::test]
async fn contains_check_returns_flags_in_order() {
    let mut server = Server::new_async().await;
    let _mock = json_mock(
        &mut server,
        "GET",
        "/me/albums/contains",
        "ids=x,y",
        json!([true, false]),
    )
    .await;

    let h = harness(&server.url(), fresh_token());
    let flags = library::check_saved_albums(&h.client, &["x", "y"]).await.unwrap();
    assert_eq!(flags, vec![true, false]);
}

#[tokio::test]
async fn contains_check_encodes_ids() {
    let mut server = Server::new_async().await;
    let mock = json_mock(
        &mut server,
        "GET",
        "/me/tracks/contains",
        "ids=a%26market%3DXX,b",
        json!([false, true]),
    )
    .await;

    let h = harness(&server.url(), fresh_token());
    let flags = library::check_saved_tracks(&h.client, &["a&market=XX", "b"])
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(flags, vec![false, true]);
}

#[tokio::test]
async fn artist_without_images_has_empty_image_url() {
    let mut server = Server::new_async().await;
    let _mock = json_mock(
        &mut server,
        "GET",
        "/artists/4V8LLVI7PbaPR0K2TGSxFF",
        "",
        json!({
            "id": "4V8LLVI7PbaPR0K2TGSxFF",
            "name": "Tyler, The Creator",
            "genres": ["hip hop", "rap", "alternative hip hop", "neo soul", "west coast", "jazz rap"],
            "followers": { "total": 15_000_000 },
            "popularity": 88,
            "images": []
        }),
    )
    .await;

    let h = harness(&server.url(), fresh_token());
    let artist = artists::get_artist(&h.client, "4V8LLVI7PbaPR0K2TGSxFF").await.unwrap();
    assert_eq!(artist.image_url, "");
    assert_eq!(artist.genres, "hip hop, rap, alternative hip hop, neo soul, west coast");
    assert_eq!(artist.followers, 15_000_000);
    assert_eq!(artist.popularity, 88);
}

#[tokio::test]
async fn top_tracks_page_counts_bare_array() {
    let mut server = Server::new_async().await;
    let _mock = json_mock(
        &mut server,
        "GET",
        "/artists/a1/top-tracks",
        "market=US",
        json!({ "tracks": [track("1", "One"), track("2", "Two")] }),
    )
    .await;

    let h = harness(&server.url(), fresh_token());
    let page = artists::get_artist_top_tracks(&h.client, "a1", "US").await.unwrap();
    assert_eq!(page.count(), 2);
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn album_tracks_inherit_album_name() {
    let mut server = Server::new_async().await;
    let _mock = json_mock(
        &mut server,
        "GET",
        "/albums/al1",
        "",
        json!({
            "id": "al1",
            "name": "IGOR",
            "release_date": "2019-05-17",
            "total_tracks": 12,
            "artists": [{ "name": "Tyler, The Creator" }],
            "tracks": { "items": [{ "id": "t1", "name": "IGOR'S THEME", "duration_ms": 200_000 }], "total": 12 }
        }),
    )
    .await;

    let h = harness(&server.url(), fresh_token());
    let detail = albums::get_album(&h.client, "al1").await.unwrap();
    assert_eq!(detail.album.total_tracks, 12);
    assert_eq!(detail.tracks.len(), 1);
    assert_eq!(detail.tracks[0].album, "IGOR");
}

#[tokio::test]
async fn update_playlist_sends_only_present_fields() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/playlists/p1")
        .match_body(Matcher::Json(json!({ "name": "New name" })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let h = harness(&server.url(), fresh_token());
    let update = PlaylistUpdate {
        name: Some("New name".to_string()),
        ..Default::default()
    };
    assert!(playlist::update_playlist(&h.client, "p1", &update).await.unwrap());
    mock.assert_async().await;
}

#[tokio::test]
async fn empty_playlist_update_sends_nothing() {
    let mut server = Server::new_async().await;
    let mock = server.mock("PUT", "/playlists/p1").expect(0).create_async().await;

    let h = harness(&server.url(), fresh_token());
    let err = playlist::update_playlist(&h.client, "p1", &PlaylistUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn toggle_public_flips_current_value() {
    let mut server = Server::new_async().await;
    let _get = json_mock(
        &mut server,
        "GET",
        "/playlists/p1",
        "",
        json!({ "id": "p1", "name": "Mix", "public": true, "collaborative": false }),
    )
    .await;
    let put = server
        .mock("PUT", "/playlists/p1")
        .match_body(Matcher::Json(json!({ "public": false })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let h = harness(&server.url(), fresh_token());
    let public = playlist::toggle_playlist_public(&h.client, "p1").await.unwrap();
    assert!(!public);
    put.assert_async().await;
}

#[tokio::test]
async fn get_playlist_caps_embedded_tracks_and_skips_nulls() {
    let mut server = Server::new_async().await;
    let _mock = json_mock(
        &mut server,
        "GET",
        "/playlists/p1",
        "",
        json!({
            "id": "p1",
            "name": "Mix",
            "description": "daily",
            "snapshot_id": "snap",
            "owner": { "id": "u1", "display_name": "User One" },
            "public": false,
            "collaborative": true,
            "tracks": {
                "items": [
                    { "track": track("1", "One") },
                    { "track": null },
                    { "track": track("2", "Two") },
                    { "track": track("3", "Three") }
                ],
                "total": 4
            }
        }),
    )
    .await;

    let h = harness(&server.url(), fresh_token());
    let detail = playlist::get_playlist(&h.client, "p1", true, 2).await.unwrap();
    assert_eq!(detail.total_tracks, 4);
    assert_eq!(detail.owner_name, "User One");
    assert!(detail.is_collaborative);
    let ids: Vec<&str> = detail.tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(detail.positions, vec![0, 2]);
}

#[tokio::test]
async fn playlist_without_images_has_empty_image_url() {
    let mut server = Server::new_async().await;
    let _mock = json_mock(
        &mut server,
        "GET",
        "/playlists/p2",
        "",
        json!({
            "id": "p2",
            "name": "No cover",
            "images": [],
            "tracks": { "items": [], "total": 0 }
        }),
    )
    .await;

    let h = harness(&server.url(), fresh_token());
    let detail = playlist::get_playlist(&h.client, "p2", false, 0).await.unwrap();
    assert_eq!(detail.name, "No cover");
    assert_eq!(detail.image_url, "");
    assert!(detail.tracks.is_empty());
    assert!(detail.positions.is_empty());
}

#[tokio::test]
async fn user_playlists_carry_cover_image() {
    let mut server = Server::new_async().await;
    let _mock = json_mock(
        &mut server,
        "GET",
        "/me/playlists",
        "limit=50&offset=0",
        json!({
            "items": [
                { "id": "p1", "name": "Covered", "images": [{ "url": "https://i.scdn.co/image/cover" }], "tracks": { "total": 3 } },
                { "id": "p2", "name": "Bare", "images": [], "tracks": { "total": 0 } }
            ],
            "total": 2
        }),
    )
    .await;

    let h = harness(&server.url(), fresh_token());
    let page = library::get_user_playlists(&h.client, 50, 0).await.unwrap();
    assert_eq!(page.items[0].image_url, "https://i.scdn.co/image/cover");
    assert_eq!(page.items[1].image_url, "");
}

#[tokio::test]
async fn add_tracks_returns_snapshot() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/playlists/p1/tracks")
        .match_body(Matcher::Json(json!({ "uris": ["spotify:track:1"], "position": 0 })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json!({ "snapshot_id": "snap-2" }).to_string())
        .expect(1)
        .create_async()
        .await;

    let h = harness(&server.url(), fresh_token());
    let snapshot = playlist::add_tracks_to_playlist(&h.client, "p1", &["spotify:track:1"], Some(0))
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(snapshot, "snap-2");
}

#[tokio::test]
async fn create_playlist_posts_to_user() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/users/u1/playlists")
        .match_body(Matcher::Json(json!({
            "name": "Road trip",
            "description": "",
            "public": false,
            "collaborative": false
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(json!({ "id": "p9", "name": "Road trip", "owner": { "id": "u1" } }).to_string())
        .expect(1)
        .create_async()
        .await;

    let h = harness(&server.url(), fresh_token());
    let created = playlist::create_playlist(&h.client, "u1", "Road trip", "", false, false)
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(created.id, "p9");
    assert_eq!(created.owner_id, "u1");

    assert!(matches!(
        playlist::create_playlist(&h.client, "u1", "  ", "", false, false).await,
        Err(Error::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn idle_player_has_no_state() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/me/player")
        .with_status(204)
        .create_async()
        .await;

    let h = harness(&server.url(), fresh_token());
    assert!(player::get_player_state(&h.client).await.unwrap().is_none());
    assert!(matches!(
        player::toggle_playback(&h.client).await,
        Err(Error::NotFound)
    ));
}

#[tokio::test]
async fn toggle_playback_pauses_when_playing() {
    let mut server = Server::new_async().await;
    let _state = json_mock(
        &mut server,
        "GET",
        "/me/player",
        "",
        json!({
            "is_playing": true,
            "progress_ms": 1000,
            "repeat_state": "off",
            "item": track("1", "One"),
            "device": { "id": "d1", "name": "Laptop", "type": "Computer", "volume_percent": 40, "is_active": true }
        }),
    )
    .await;
    let pause = server
        .mock("PUT", "/me/player/pause")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let h = harness(&server.url(), fresh_token());
    assert!(!player::toggle_playback(&h.client).await.unwrap());
    pause.assert_async().await;
}

#[tokio::test]
async fn cycle_repeat_moves_off_to_context() {
    let mut server = Server::new_async().await;
    let _state = json_mock(
        &mut server,
        "GET",
        "/me/player",
        "",
        json!({ "is_playing": true, "repeat_state": "off", "item": track("1", "One") }),
    )
    .await;
    let repeat = server
        .mock("PUT", "/me/player/repeat")
        .match_query(Matcher::Exact("state=context".to_string()))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let h = harness(&server.url(), fresh_token());
    let mode = player::cycle_repeat(&h.client, None).await.unwrap();
    assert_eq!(mode, RepeatState::Context);
    repeat.assert_async().await;
}

#[tokio::test]
async fn volume_out_of_range_is_rejected() {
    let server = Server::new_async().await;
    let h = harness(&server.url(), fresh_token());
    assert!(matches!(
        player::set_volume(&h.client, None, 101).await,
        Err(Error::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn transfer_playback_sends_device_list() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/me/player")
        .match_body(Matcher::Json(json!({ "device_ids": ["d2"], "play": true })))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let h = harness(&server.url(), fresh_token());
    assert!(player::transfer_playback(&h.client, "d2", true).await.unwrap());
    mock.assert_async().await;
}

#[tokio::test]
async fn recently_played_limit_defaults_and_caps() {
    let mut server = Server::new_async().await;
    let default_limit = json_mock(
        &mut server,
        "GET",
        "/me/player/recently-played",
        "limit=20",
        json!({
            "items": [{
                "track": track("1", "One"),
                "played_at": "2024-05-01T10:00:00.000Z",
                "context": { "type": "playlist" }
            }]
        }),
    )
    .await;
    let capped = json_mock(
        &mut server,
        "GET",
        "/me/player/recently-played",
        "limit=50",
        json!({ "items": [] }),
    )
    .await;

    let h = harness(&server.url(), fresh_token());
    let history = user::get_recently_played(&h.client, 0).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].context_type, "playlist");
    assert!(user::get_recently_played(&h.client, 100).await.unwrap().is_empty());

    default_limit.assert_async().await;
    capped.assert_async().await;
}

#[tokio::test]
async fn current_user_id_requires_an_id() {
    let mut server = Server::new_async().await;
    let _mock = json_mock(&mut server, "GET", "/me", "", json!({ "display_name": "nobody" })).await;

    let h = harness(&server.url(), fresh_token());
    assert!(matches!(
        user::get_current_user_id(&h.client).await,
        Err(Error::NotFound)
    ));
}

#[tokio::test]
async fn queue_skips_null_entries() {
    let mut server = Server::new_async().await;
    let _mock = json_mock(
        &mut server,
        "GET",
        "/me/player/queue",
        "",
        json!({
            "currently_playing": track("1", "One"),
            "queue": [track("2", "Two"), null, track("3", "Three")]
        }),
    )
    .await;

    let h = harness(&server.url(), fresh_token());
    let q = queue::get_queue(&h.client).await.unwrap();
    assert_eq!(q.currently_playing.map(|t| t.id), Some("1".to_string()));
    assert_eq!(q.queue.len(), 2);
}

#[tokio::test]
async fn add_to_queue_encodes_uri() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/me/player/queue")
        .match_query(Matcher::Exact("uri=spotify%3Atrack%3A1&device_id=d1".to_string()))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let h = harness(&server.url(), fresh_token());
    assert!(queue::add_to_queue(&h.client, "spotify:track:1", Some("d1")).await.unwrap());
    mock.assert_async().await;
}
