use serde_json::json;
use spotipod::importer::{
    ImportError, ImportTarget, Importer, Probe, default_playlist_probes, import_url,
    parse_import_url,
};
use spotipod::spotify::SpotifyClient;
use spotipod::types::ItemKind;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SpotifyClient {
    SpotifyClient::new(server.uri(), server.uri())
}

fn playlist_json(id: &str, name: &str) -> serde_json::Value {
    json!({ "id": id, "name": name, "uri": format!("spotify:playlist:{id}") })
}

mod parsing {
    use super::*;

    fn target(id: &str, kind: ItemKind) -> Option<ImportTarget> {
        Some(ImportTarget {
            id: id.to_string(),
            kind,
        })
    }

    #[test]
    fn test_playlist_url_with_query() {
        assert_eq!(
            parse_import_url("https://open.spotify.com/playlist/37i9dQZF1DX0XUsuxWHRQd?si=abc123"),
            target("37i9dQZF1DX0XUsuxWHRQd", ItemKind::Playlist)
        );
    }

    #[test]
    fn test_album_url() {
        assert_eq!(
            parse_import_url("https://open.spotify.com/album/4aawyAB9vmqN3uQ7FjRGTy"),
            target("4aawyAB9vmqN3uQ7FjRGTy", ItemKind::Album)
        );
    }

    #[test]
    fn test_user_playlist_url() {
        assert_eq!(
            parse_import_url("https://open.spotify.com/user/some.user/playlist/abc123XYZ"),
            target("abc123XYZ", ItemKind::Playlist)
        );
    }

    #[test]
    fn test_url_inside_text() {
        assert_eq!(
            parse_import_url("listen to this: https://open.spotify.com/album/xyz789 !"),
            target("xyz789", ItemKind::Album)
        );
    }

    #[test]
    fn test_playlist_shape_is_tried_before_album() {
        assert_eq!(
            parse_import_url("spotify.com/album/a1 or spotify.com/playlist/p1"),
            target("p1", ItemKind::Playlist)
        );
    }

    #[test]
    fn test_rejects_other_input() {
        assert_eq!(parse_import_url(""), None);
        assert_eq!(parse_import_url("not a url"), None);
        assert_eq!(parse_import_url("https://example.com/playlist/abc"), None);
        assert_eq!(parse_import_url("https://open.spotify.com/track/abc"), None);
        assert_eq!(parse_import_url("https://open.spotify.com/playlist/"), None);
        assert_eq!(parse_import_url("spotify:playlist:37i9dQZF1DX4OzrY981I1W"), None);
    }
}

mod probes {
    use super::*;

    #[test]
    fn test_default_order() {
        let names: Vec<String> = default_playlist_probes().iter().map(Probe::name).collect();
        assert_eq!(
            names,
            vec![
                "direct",
                "user playlists",
                "search",
                "featured playlists",
                "pop category",
                "hip-hop category",
                "rock category",
                "mood category",
                "party category",
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_input_makes_no_request() {
        let server = MockServer::start().await;
        let client = client_for(&server);

        let result = import_url(&client, Some("token"), "definitely not a url").await;
        assert_eq!(result, Err(ImportError::InvalidInput));

        let result = import_url(
            &client,
            None,
            "https://open.spotify.com/playlist/abc123",
        )
        .await;
        assert_eq!(result, Err(ImportError::InvalidInput));

        let requests = server.received_requests().await.unwrap_or_default();
        assert!(requests.is_empty());
        assert_eq!(
            ImportError::InvalidInput.to_string(),
            "Invalid URL or not logged in."
        );
    }

    #[tokio::test]
    async fn test_direct_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/abc123"))
            .and(header("authorization", "Bearer token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(playlist_json("abc123", "Mine")))
            .expect(1)
            .mount(&server)
            .await;

        let item = import_url(
            &client_for(&server),
            Some("token"),
            "https://open.spotify.com/playlist/abc123",
        )
        .await
        .unwrap();

        assert_eq!(item.kind, ItemKind::Playlist);
        assert_eq!(item.entry.name(), "Mine");
    }

    #[tokio::test]
    async fn test_falls_back_to_user_playlists() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/abc123"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "nope" })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/me/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [null, playlist_json("other", "Other"), playlist_json("abc123", "Followed")]
            })))
            .mount(&server)
            .await;
        // later probes must not be reached
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let target = parse_import_url("https://open.spotify.com/playlist/abc123").unwrap();
        let item = Importer::new(&client, "token").resolve(&target).await.unwrap();

        assert_eq!(item.entry.name(), "Followed");
    }

    #[tokio::test]
    async fn test_search_queries_target_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "abc123"))
            .and(query_param("type", "playlist"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "playlists": { "items": [null, playlist_json("abc123", "Found by search")] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let target = parse_import_url("https://open.spotify.com/playlist/abc123").unwrap();
        let item = Importer::new(&client, "token")
            .with_probes(vec![Probe::Direct, Probe::Search])
            .resolve(&target)
            .await
            .unwrap();

        assert_eq!(item.entry.name(), "Found by search");
    }

    #[tokio::test]
    async fn test_custom_category_probe() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/browse/categories/jazz/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "playlists": { "items": [playlist_json("abc123", "Jazz pick")] }
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let target = parse_import_url("https://open.spotify.com/playlist/abc123").unwrap();
        let importer =
            Importer::new(&client, "token").with_probes(vec![Probe::Category("jazz".into())]);

        let item = importer.resolve(&target).await.unwrap();
        assert_eq!(item.entry.name(), "Jazz pick");
    }

    #[tokio::test]
    async fn test_exhausted_probes_map_direct_status() {
        let cases: [(u16, ImportError); 2] = [
            (404, ImportError::PlaylistNotFound),
            (403, ImportError::PlaylistForbidden),
        ];

        for (status, expected) in cases {
            // every other probe answers 404 from the unmatched mock server
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/playlists/abc123"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let result = import_url(
                &client_for(&server),
                Some("token"),
                "https://open.spotify.com/playlist/abc123",
            )
            .await;
            assert_eq!(result, Err(expected));
        }
    }

    #[tokio::test]
    async fn test_exhausted_probes_other_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/abc123"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = import_url(
            &client_for(&server),
            Some("token"),
            "https://open.spotify.com/playlist/abc123",
        )
        .await;

        match result {
            Err(ImportError::PlaylistFailed(status)) => assert!(status.contains("500")),
            other => panic!("Expected PlaylistFailed, got {other:?}"),
        }
    }
}

mod albums {
    use super::*;

    #[tokio::test]
    async fn test_album_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/albums/alb1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "alb1",
                "name": "Record",
                "images": [{ "url": "https://img/1" }]
            })))
            .mount(&server)
            .await;

        let item = import_url(
            &client_for(&server),
            Some("token"),
            "https://open.spotify.com/album/alb1",
        )
        .await
        .unwrap();

        assert_eq!(item.kind, ItemKind::Album);
        assert_eq!(item.entry.image_url(), Some("https://img/1"));
    }

    #[tokio::test]
    async fn test_album_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/albums/missing"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let result = import_url(
            &client_for(&server),
            Some("token"),
            "https://open.spotify.com/album/missing",
        )
        .await;

        assert_eq!(result, Err(ImportError::AlbumNotFound));
        assert_eq!(
            ImportError::AlbumNotFound.to_string(),
            "Album not found."
        );
    }
}
