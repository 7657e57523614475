use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::json;
use spotipod::proxy::{ProxyClient, ProxyError};
use spotipod::server::callback_app;
use spotipod::types::{LibraryEntry, PendingLogin};
use tokio::sync::Mutex;
use tower::util::ServiceExt;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod client {
    use super::*;

    #[test]
    fn test_login_url() {
        let proxy = ProxyClient::new("http://localhost:3001/");
        let url = proxy
            .login_url("http://127.0.0.1:8888/callback", "s1")
            .unwrap();

        assert_eq!(
            url,
            "http://localhost:3001/api/spotify/login?redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback&state=s1"
        );
    }

    #[tokio::test]
    async fn test_exchange_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/spotify/token"))
            .and(body_json(json!({ "code": "c", "redirect_uri": "http://cb" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "at" })))
            .mount(&server)
            .await;

        let answer = ProxyClient::new(server.uri())
            .exchange_code("c", "http://cb")
            .await
            .unwrap();
        assert_eq!(answer["access_token"], "at");
    }

    #[tokio::test]
    async fn test_exchange_failure_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/spotify/token"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": { "error": "invalid_grant", "error_description": "Invalid authorization code" }
            })))
            .mount(&server)
            .await;

        let err = ProxyClient::new(server.uri())
            .exchange_code("c", "http://cb")
            .await
            .unwrap_err();

        match &err {
            ProxyError::Status { status, .. } => {
                assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR)
            }
            other => panic!("Expected Status error, got {other:?}"),
        }
        assert_eq!(err.reason(), "Invalid authorization code");
    }

    #[tokio::test]
    async fn test_save_and_load_library() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user/library"))
            .and(header("authorization", "Bearer tok"))
            .and(body_json(json!({
                "userId": "u1",
                "playlists": [{ "id": "p1" }],
                "albums": []
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Library saved successfully"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/user/library/u1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "userId": "u1",
                "playlists": [{ "id": "p1" }],
                "albums": [],
                "lastUpdated": "2026-10-18T09:30:00Z"
            })))
            .mount(&server)
            .await;

        let proxy = ProxyClient::new(server.uri());
        let saved = proxy
            .save_library("tok", "u1", &[LibraryEntry(json!({ "id": "p1" }))], &[])
            .await
            .unwrap();
        assert!(saved.success);

        let library = proxy.load_library("tok", "u1").await.unwrap();
        assert_eq!(library.playlists.len(), 1);
        assert!(library.albums.is_empty());
    }

    #[tokio::test]
    async fn test_load_library_without_timestamp() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/library/u1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "userId": "u1",
                "playlists": [{ "id": "p1" }, { "id": "p2" }]
            })))
            .mount(&server)
            .await;

        let library = ProxyClient::new(server.uri())
            .load_library("tok", "u1")
            .await
            .unwrap();

        assert_eq!(library.playlists.len(), 2);
        assert!(library.albums.is_empty());
        assert_eq!(library.last_updated, None);
    }

    #[tokio::test]
    async fn test_forbidden_reason() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/library/u2"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({ "error": "User ID mismatch" })),
            )
            .mount(&server)
            .await;

        let err = ProxyClient::new(server.uri())
            .load_library("tok", "u2")
            .await
            .unwrap_err();
        assert_eq!(err.reason(), "User ID mismatch");
    }
}

mod callback {
    use super::*;

    fn pending(state: &str) -> Arc<Mutex<Option<PendingLogin>>> {
        Arc::new(Mutex::new(Some(PendingLogin {
            state: state.to_string(),
            token: None,
            failure: None,
        })))
    }

    async fn call(shared: Arc<Mutex<Option<PendingLogin>>>, uri: &str) -> String {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = callback_app(shared).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_state_mismatch_is_rejected() {
        let shared = pending("expected");
        let page = call(Arc::clone(&shared), "/callback?code=c&state=forged").await;

        assert!(page.contains("state mismatch"));
        let login = shared.lock().await;
        let login = login.as_ref().unwrap();
        assert!(login.token.is_none());
        assert_eq!(
            login.failure.as_deref(),
            Some("State mismatch in OAuth callback")
        );
    }

    #[tokio::test]
    async fn test_denied_authorization_is_reported() {
        let shared = pending("s1");
        call(Arc::clone(&shared), "/callback?error=access_denied&state=s1").await;

        let login = shared.lock().await;
        assert_eq!(
            login.as_ref().unwrap().failure.as_deref(),
            Some("Authorization denied: access_denied")
        );
    }

    #[tokio::test]
    async fn test_no_login_in_progress() {
        let shared = Arc::new(Mutex::new(None));
        let page = call(shared, "/callback?code=c&state=s1").await;

        assert!(page.contains("No login in progress"));
    }
}
