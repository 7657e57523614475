use serde_json::json;
use spotipod::management::LibraryManager;
use spotipod::spotify::{SpotifyClient, SpotifyError};
use spotipod::types::{ItemDetail, ItemKind, LibraryEntry};
use spotipod::utils::track_rows;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn track_json(id: &str, name: &str, duration_ms: u64) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:track:{id}"),
        "duration_ms": duration_ms,
        "artists": [{ "name": "Artist A" }, { "name": "Artist B" }]
    })
}

#[tokio::test]
async fn test_playlist_tracks_are_unwrapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/playlists/p1"))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "name": "Road trip",
            "uri": "spotify:playlist:p1",
            "tracks": { "items": [
                { "track": track_json("t1", "First", 61_000) },
                { "track": null },
                { "track": track_json("t2", "Second", 200_000) }
            ] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SpotifyClient::new(server.uri(), server.uri());
    let detail = client
        .item_detail("token", ItemKind::Playlist, "p1")
        .await
        .unwrap();

    assert_eq!(detail.kind, ItemKind::Playlist);
    assert_eq!(detail.entry.uri(), Some("spotify:playlist:p1"));
    let names: Vec<&str> = detail.tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second"]);
    assert_eq!(detail.track(2).unwrap().uri, "spotify:track:t2");
}

#[tokio::test]
async fn test_album_tracks_are_listed_directly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/albums/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "a1",
            "name": "Record",
            "uri": "spotify:album:a1",
            "tracks": { "items": [track_json("t1", "Intro", 59_999)] }
        })))
        .mount(&server)
        .await;

    let client = SpotifyClient::new(server.uri(), server.uri());
    let detail = client
        .item_detail("token", ItemKind::Album, "a1")
        .await
        .unwrap();

    assert_eq!(detail.tracks.len(), 1);
    assert_eq!(detail.tracks[0].artist_names(), "Artist A, Artist B");
}

#[tokio::test]
async fn test_missing_item_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/albums/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "not found" })))
        .mount(&server)
        .await;

    let client = SpotifyClient::new(server.uri(), server.uri());
    let err = client
        .item_detail("token", ItemKind::Album, "gone")
        .await
        .unwrap_err();

    assert!(matches!(err, SpotifyError::Status { .. }));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
}

#[test]
fn test_track_numbers_start_at_one() {
    let detail = ItemDetail::from_provider(
        ItemKind::Album,
        json!({ "tracks": { "items": [track_json("t1", "Only", 1_000)] } }),
    );

    assert!(detail.track(0).is_none());
    assert_eq!(detail.track(1).unwrap().name, "Only");
    assert!(detail.track(2).is_none());
}

#[test]
fn test_item_without_tracks() {
    let detail = ItemDetail::from_provider(ItemKind::Playlist, json!({ "id": "p1" }));
    assert!(detail.tracks.is_empty());
}

#[test]
fn test_track_rows() {
    let detail = ItemDetail::from_provider(
        ItemKind::Album,
        json!({ "tracks": { "items": [
            track_json("t1", "Intro", 59_999),
            track_json("t2", "Outro", 125_000)
        ] } }),
    );

    let rows = track_rows(&detail.tracks);

    assert_eq!(rows[0].number, 1);
    assert_eq!(rows[0].length, "0:59");
    assert_eq!(rows[1].number, 2);
    assert_eq!(rows[1].name, "Outro");
    assert_eq!(rows[1].length, "2:05");
}

#[test]
fn test_find_looks_in_both_lists() {
    let mut manager = LibraryManager::new("unused");
    manager.import(ItemKind::Album, LibraryEntry(json!({ "id": "a1", "name": "Record" })));

    let item = manager.find("a1").unwrap();
    assert_eq!(item.kind, ItemKind::Album);
    assert_eq!(item.entry.name(), "Record");
    assert!(manager.find("p1").is_none());
}
