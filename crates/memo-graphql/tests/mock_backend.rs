//! Mock backend tests for the GraphQL gateway.
//!
//! These use wiremock to simulate the notes backend and exercise the
//! gateway without network access or real credentials.

use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use memo_core::error::{AuthError, Error};
use memo_core::{AccessToken, BackendUrl, Credentials, Draft, Gateway, NoteId, ObjectKey, RefreshToken};
use memo_graphql::GraphqlGateway;

/// Backend URL for a mock server (HTTP is allowed for localhost).
fn mock_backend_url(server: &MockServer) -> BackendUrl {
    BackendUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn restored_gateway(server: &MockServer) -> GraphqlGateway {
    GraphqlGateway::from_tokens(
        mock_backend_url(server),
        AccessToken::new("token-1"),
        Some(RefreshToken::new("refresh-1")),
    )
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn sign_in_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("signIn"))
        .and(body_partial_json(json!({
            "variables": { "username": "alice", "password": "secret123" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "signIn": { "accessToken": "access-1", "refreshToken": "refresh-1" }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = GraphqlGateway::sign_in(
        mock_backend_url(&server),
        Credentials::new("alice", "secret123"),
    )
    .await
    .unwrap();

    assert_eq!(gateway.access_token().as_str(), "access-1");
    assert_eq!(gateway.refresh_token().unwrap().as_str(), "refresh-1");
}

#[tokio::test]
async fn sign_in_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": "Unauthorized",
            "message": "Invalid username or password"
        })))
        .mount(&server)
        .await;

    let result = GraphqlGateway::sign_in(
        mock_backend_url(&server),
        Credentials::new("alice", "wrong"),
    )
    .await;

    match result.unwrap_err() {
        Error::Auth(AuthError::InvalidCredentials(reason)) => {
            assert!(reason.contains("Invalid username or password"));
        }
        other => panic!("expected invalid credentials, got {other:?}"),
    }
}

#[tokio::test]
async fn refresh_session_rotates_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("refreshSession"))
        .and(header("authorization", "Bearer refresh-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "refreshSession": { "accessToken": "access-2", "refreshToken": "refresh-2" }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = restored_gateway(&server);
    gateway.refresh_session().await.unwrap();

    assert_eq!(gateway.access_token().as_str(), "access-2");
    assert_eq!(gateway.refresh_token().unwrap().as_str(), "refresh-2");
}

#[tokio::test]
async fn expired_token_maps_to_session_expired() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [
                { "message": "token expired", "extensions": { "code": "ExpiredToken" } }
            ]
        })))
        .mount(&server)
        .await;

    let gateway = restored_gateway(&server);
    let err = gateway.list_notes().await.unwrap_err();

    assert!(matches!(err, Error::Auth(AuthError::SessionExpired)));
}

// ============================================================================
// Note operations
// ============================================================================

#[tokio::test]
async fn list_notes_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("listNotes"))
        .and(header("authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "listNotes": {
                    "items": [
                        { "id": "n1", "name": "First", "description": "one", "image": "cover.png" },
                        { "id": "n2", "name": "Second", "description": "two" }
                    ],
                    "nextToken": null
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = restored_gateway(&server);
    let listing = gateway.list_notes().await.unwrap();

    assert_eq!(listing.notes.len(), 2);
    assert_eq!(listing.notes[0].id.as_str(), "n1");
    assert_eq!(
        listing.notes[0].image_key.as_ref().unwrap().as_str(),
        "cover.png"
    );
    assert!(listing.notes[1].image_key.is_none());
    assert!(listing.cursor.is_none());
}

#[tokio::test]
async fn create_note_returns_stored_note() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("createNote"))
        .and(body_partial_json(json!({
            "variables": { "input": { "name": "A", "description": "B" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "createNote": {
                    "id": "n42",
                    "name": "A",
                    "description": "B",
                    "createdAt": "2024-06-01T12:00:00Z"
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = restored_gateway(&server);
    let note = gateway.create_note(&Draft::new("A", "B")).await.unwrap();

    assert_eq!(note.id.as_str(), "n42");
    assert!(note.created_at.is_some());
}

#[tokio::test]
async fn delete_missing_note_reports_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("deleteNote"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [
                { "message": "no such note", "extensions": { "code": "NotFound" } }
            ]
        })))
        .mount(&server)
        .await;

    let gateway = restored_gateway(&server);
    let err = gateway
        .delete_note(&NoteId::new("gone").unwrap())
        .await
        .unwrap_err();

    match err {
        Error::Protocol(p) => assert!(p.is_not_found()),
        other => panic!("expected protocol error, got {other:?}"),
    }
}

// ============================================================================
// Object storage
// ============================================================================

#[tokio::test]
async fn put_object_uploads_bytes() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/storage/cover.png"))
        .and(header("authorization", "Bearer token-1"))
        .and(header("content-type", "application/octet-stream"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = restored_gateway(&server);
    gateway
        .put_object(&ObjectKey::new("cover.png").unwrap(), vec![1, 2, 3])
        .await
        .unwrap();
}

#[tokio::test]
async fn get_object_url_resolves_temporary_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storage/cover.png/url"))
        .and(header("authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://cdn.example.com/cover.png?sig=xyz",
            "expiresIn": 900
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = restored_gateway(&server);
    let url = gateway
        .get_object_url(&ObjectKey::new("cover.png").unwrap())
        .await
        .unwrap();

    assert_eq!(url, "https://cdn.example.com/cover.png?sig=xyz");
}

#[tokio::test]
async fn missing_object_is_a_protocol_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/storage/gone.png/url"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "NotFound",
            "message": "no such object"
        })))
        .mount(&server)
        .await;

    let gateway = restored_gateway(&server);
    let err = gateway
        .get_object_url(&ObjectKey::new("gone.png").unwrap())
        .await
        .unwrap_err();

    match err {
        Error::Protocol(p) => {
            assert!(p.is_not_found());
            assert!(!Error::Protocol(p).is_retryable());
        }
        other => panic!("expected protocol error, got {other:?}"),
    }
}
