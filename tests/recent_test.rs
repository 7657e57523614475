use serde_json::json;
use spotipod::recent::{RecentError, fetch_recent_activity};
use spotipod::spotify::SpotifyClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn played(album_id: Option<&str>) -> serde_json::Value {
    match album_id {
        Some(id) => json!({ "track": { "name": "t", "album": { "id": id, "name": format!("Album {id}") } } }),
        None => json!({ "track": { "name": "t" } }),
    }
}

fn ids(entries: &[spotipod::types::LibraryEntry]) -> Vec<&str> {
    entries.iter().filter_map(|e| e.id()).collect()
}

#[tokio::test]
async fn test_recent_tracks_are_required() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me/player/recently-played"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = SpotifyClient::new(server.uri(), server.uri());
    let result = fetch_recent_activity(&client, "token").await;

    match result {
        Err(RecentError::RecentTracks(status)) => assert_eq!(status, "401"),
        other => panic!("Expected RecentTracks error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_sources_are_merged_and_deduplicated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me/player/recently-played"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [played(Some("a1")), played(None), played(Some("a2")), played(Some("a1"))]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/browse/new-releases"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "albums": { "items": [{ "id": "a2", "name": "dup" }, { "id": "a3", "name": "new" }] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me/playlists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "p1", "name": "mine" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/browse/categories/rock/playlists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "playlists": { "items": [{ "id": "p2", "name": "rock" }, { "id": "p1", "name": "again" }] }
        })))
        .mount(&server)
        .await;
    // featured and the other categories fail and are skipped

    let client = SpotifyClient::new(server.uri(), server.uri());
    let activity = fetch_recent_activity(&client, "token").await.unwrap();

    assert_eq!(ids(&activity.albums), vec!["a1", "a2", "a3"]);
    assert_eq!(ids(&activity.playlists), vec!["p1", "p2"]);
    assert_eq!(activity.playlists[0].name(), "mine");
}
