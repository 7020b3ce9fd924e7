//! Integration tests for the Firebase adapter.
//!
//! These tests run the REST store and the streaming listener against a mock
//! HTTP server.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pushkit-lib --test firebase_integration
//! ```

#![cfg(feature = "firebase")]

use futures::StreamExt;
use pushkit_lib::config::FirebaseConfig;
use pushkit_lib::notification::factory;
use pushkit_lib::protocol::{build_listen_url, build_notification_path};
use pushkit_lib::realtime::{FirebaseListener, StreamEvent};
use pushkit_lib::transport::FirebaseStore;
use pushkit_lib::{
    fetch_notifications, send_notification, NotificationStoreRead, NotificationStoreWrite,
    PushkitError,
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path, path_regex, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn sse(events: &[(&str, serde_json::Value)]) -> String {
    events
        .iter()
        .map(|(name, data)| format!("event: {}\ndata: {}\n\n", name, data))
        .collect()
}

// ============================================================================
// Store
// ============================================================================

#[tokio::test]
async fn test_put_sends_json_with_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/notifications/abc/n1.json"))
        .and(query_param("auth", "secret"))
        .and(body_json(json!({"title": "hi"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "hi"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = FirebaseStore::new(&mock_server.uri())
        .unwrap()
        .with_auth_token("secret");
    store
        .put("notifications/abc/n1", &json!({"title": "hi"}))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_missing_node_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notifications/nobody.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&mock_server)
        .await;

    let store = FirebaseStore::new(&mock_server.uri()).unwrap();
    assert!(store.get("notifications/nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_hits_node() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/notifications/abc.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = FirebaseStore::new(&mock_server.uri()).unwrap();
    store.delete("notifications/abc").await.unwrap();
}

#[tokio::test]
async fn test_permission_denied_maps_to_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Permission denied"})),
        )
        .mount(&mock_server)
        .await;

    let store = FirebaseStore::new(&mock_server.uri()).unwrap();
    let err = store.get("notifications/abc").await.unwrap_err();
    match err {
        PushkitError::Auth(msg) => assert!(msg.contains("Permission denied")),
        other => panic!("expected auth error, got {other}"),
    }
}

#[tokio::test]
async fn test_server_error_maps_to_internal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&mock_server)
        .await;

    let store = FirebaseStore::new(&mock_server.uri()).unwrap();
    let err = store.put("a", &json!(1)).await.unwrap_err();
    assert!(matches!(err, PushkitError::Internal(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_rate_limit_is_retryable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let store = FirebaseStore::new(&mock_server.uri()).unwrap();
    let err = store.get("a").await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.retry_after_ms(), Some(5000));
}

#[tokio::test]
async fn test_send_notification_writes_hashed_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path_regex(r"^/notifications/e606e38b0d8c/[0-9a-f-]{36}\.json$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = FirebaseStore::new(&mock_server.uri()).unwrap();
    let record = factory::welcome(chrono::Utc::now());
    send_notification(&store, "User123", &record).await.unwrap();
}

#[tokio::test]
async fn test_fetch_notifications_sorts_snapshot() {
    let mock_server = MockServer::start().await;
    let node = format!("/{}.json", build_notification_path("alice").unwrap());

    Mock::given(method("GET"))
        .and(path(node.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "first": {"title": "a", "body": "", "timestamp": "2024-01-01T00:00:00Z", "type": "random"},
            "second": {"title": "b", "body": "", "timestamp": "2024-01-01T00:10:00Z", "type": "random"}
        })))
        .mount(&mock_server)
        .await;

    let store = FirebaseStore::new(&mock_server.uri()).unwrap();
    let notifications = fetch_notifications(&store, "alice").await.unwrap();
    let ids: Vec<&str> = notifications.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["second", "first"]);
}

#[tokio::test]
async fn test_store_from_resolved_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/x.json"))
        .and(query_param("auth", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(1)))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let resolved = FirebaseConfig::new()
        .with_database_url(format!("{}/", mock_server.uri()))
        .with_service_account_path(dir.path().join("none.json").to_string_lossy())
        .with_auth_token("tok")
        .resolve()
        .unwrap();

    let store = FirebaseStore::from_config(&resolved).unwrap();
    assert_eq!(store.get("x").await.unwrap(), Some(json!(1)));
}

// ============================================================================
// Listener
// ============================================================================

#[tokio::test]
async fn test_subscribe_decodes_event_stream() {
    let mock_server = MockServer::start().await;

    let body = sse(&[
        ("put", json!({"path": "/", "data": null})),
        ("keep-alive", json!(null)),
        ("patch", json!({"path": "/", "data": {"n1": {"title": "t"}}})),
    ]);

    Mock::given(method("GET"))
        .and(path("/notifications/abc.json"))
        .and(header("accept", "text/event-stream"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(body),
        )
        .mount(&mock_server)
        .await;

    let listener = FirebaseListener::new().unwrap();
    let events: Vec<StreamEvent> = listener
        .subscribe(&format!("{}/notifications/abc", mock_server.uri()))
        .await
        .unwrap()
        .map(|e| e.unwrap())
        .collect()
        .await;

    assert_eq!(events.len(), 3);
    assert_eq!(events[1], StreamEvent::KeepAlive);
    assert!(matches!(events[2], StreamEvent::Patch { .. }));
}

#[tokio::test]
async fn test_notifications_emit_latest_once() {
    let mock_server = MockServer::start().await;
    let listen_url = build_listen_url(&mock_server.uri(), "u1").unwrap();

    let body = sse(&[
        (
            "put",
            json!({"path": "/", "data": {
                "a": {"title": "old", "body": "", "timestamp": "2024-01-01T00:00:00Z", "type": "welcome"}
            }}),
        ),
        ("keep-alive", json!(null)),
        (
            "put",
            json!({"path": "/b", "data":
                {"title": "new", "body": "", "timestamp": "2024-01-01T00:01:00Z", "type": "random"}
            }),
        ),
        (
            "put",
            json!({"path": "/a/body", "data": "edited"}),
        ),
        ("cancel", json!("Permission denied")),
    ]);

    Mock::given(method("GET"))
        .and(path("/notifications/bb82030dbc2b.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(body),
        )
        .mount(&mock_server)
        .await;

    let listener = FirebaseListener::new().unwrap();
    let items: Vec<_> = listener.notifications(&listen_url).await.unwrap().collect().await;

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].as_ref().unwrap().record.title, "old");
    assert_eq!(items[1].as_ref().unwrap().record.title, "new");
    assert!(matches!(items[2], Err(PushkitError::StreamClosed(_))));
}

#[tokio::test]
async fn test_subscribe_rejected_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "Permission denied"})))
        .mount(&mock_server)
        .await;

    let listener = FirebaseListener::new().unwrap();
    let err = listener
        .subscribe(&format!("{}/notifications/abc", mock_server.uri()))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, PushkitError::Auth(_)));
}
