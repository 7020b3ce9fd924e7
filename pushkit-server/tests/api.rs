//! Router tests for the notification API.
//!
//! Requests go through the full router with an in-memory store behind it.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use pushkit_lib::config::ClientConfig;
use pushkit_lib::test_utils::{assert_newest_first, assert_token_format, MemoryStore, TestFixtures};
use pushkit_lib::{NotificationStoreRead, StoredNotification};
use pushkit_server::{app, config::ServerConfig, state::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_config() -> ServerConfig {
    ServerConfig {
        port: 0,
        database_url: None,
        service_account_path: "unused.json".to_string(),
        region: "asia-southeast1".to_string(),
        auth_token: None,
        mock_store: true,
    }
}

fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let firebase = ClientConfig::new(TestFixtures::PROJECT_ID, TestFixtures::DATABASE_URL).unwrap();
    let state = AppState::with_store(test_config(), store.clone(), firebase);
    (app(state), store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_register_writes_welcome_and_returns_listen_url() {
    let (app, store) = test_app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/notification/register",
        Some(json!({"userId": "User123"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["userId"], "User123");
    assert_eq!(
        body["listenUrl"],
        format!("{}/notifications/e606e38b0d8c", TestFixtures::DATABASE_URL)
    );

    let node = store.get("notifications/e606e38b0d8c").await.unwrap().unwrap();
    let children = node.as_object().unwrap();
    assert_eq!(children.len(), 1);
    let welcome = children.values().next().unwrap();
    assert_eq!(welcome["title"], "Welcome!");
    assert_eq!(welcome["type"], "welcome");
}

#[tokio::test]
async fn test_blank_user_id_is_rejected_everywhere() {
    let (app, store) = test_app();

    for uri in [
        "/api/notification/register",
        "/api/notification/send-random",
        "/api/notification/firebase-path",
    ] {
        for body in [json!({"userId": "   "}), json!({})] {
            let (status, error) = send_json(&app, Method::POST, uri, Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(error["message"], "UserId is required");
            assert_eq!(error["error"], "Bad Request");
            assert!(error["timestamp"].is_string());
        }
    }

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/api/notification/send",
        Some(json!({"userId": "", "title": "hi", "body": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(store.is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (app, _) = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/notification/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_send_random_returns_empty_ok() {
    let (app, store) = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/notification/send-random",
        Some(json!({"userId": "u1"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let node = store.get("notifications/bb82030dbc2b").await.unwrap().unwrap();
    let record = node.as_object().unwrap().values().next().unwrap();
    assert_eq!(record["type"], "random");
    let priority = record["priority"].as_u64().unwrap();
    assert!((1..=3).contains(&priority));
}

#[tokio::test]
async fn test_send_custom_notification() {
    let (app, store) = test_app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/notification/send",
        Some(json!({
            "userId": "alice@example.com",
            "title": "Deploy finished",
            "body": "All green",
            "data": {"type": "deploy", "priority": "2", "category": "success"}
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let id = body["notificationId"].as_str().unwrap();

    let stored = store
        .get(&format!("notifications/ff8d9819fc0e/{id}"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored["title"], "Deploy finished");
    assert_eq!(stored["type"], "deploy");
    assert_eq!(stored["priority"], 2);
    assert_eq!(stored["category"], "success");
}

#[tokio::test]
async fn test_send_without_title_is_bad_request() {
    let (app, store) = test_app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/notification/send",
        Some(json!({"userId": "alice", "title": " ", "body": "x"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("title"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_firebase_path_reports_hash() {
    let (app, store) = test_app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/notification/firebase-path",
        Some(json!({"userId": "  UserA "})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], "notifications/43595993db09");
    assert_eq!(body["hashedUserId"], "43595993db09");
    assert_eq!(body["originalUserId"], "  UserA ");
    assert_token_format(body["hashedUserId"].as_str().unwrap());

    // Reporting a path writes nothing.
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_user_notifications_newest_first() {
    let (app, _) = test_app();

    for title in ["first", "second"] {
        let (status, _) = send_json(
            &app,
            Method::POST,
            "/api/notification/send",
            Some(json!({"userId": "bob", "title": title, "body": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, bytes) = send(&app, Method::GET, "/api/notification/user/BOB", None).await;
    assert_eq!(status, StatusCode::OK);

    let notifications: Vec<StoredNotification> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(notifications.len(), 2);
    assert_newest_first(&notifications);
}

#[tokio::test]
async fn test_unknown_user_has_no_notifications() {
    let (app, _) = test_app();

    let (status, body) = send_json(&app, Method::GET, "/api/notification/user/nobody", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_store_failure_is_internal_error() {
    let (app, store) = test_app();
    store.set_failure(Some("offline")).unwrap();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/notification/register",
        Some(json!({"userId": "carol"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to register user");
    assert_eq!(body["error"], "Internal Server Error");
}

#[tokio::test]
async fn test_test_endpoint() {
    let (app, _) = test_app();

    let (status, body) = send_json(&app, Method::GET, "/api/notification/test", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Notification API is working");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_firebase_config_has_no_trailing_slash() {
    let (app, _) = test_app();

    let (status, body) = send_json(&app, Method::GET, "/api/notification/firebase-config", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["projectId"], TestFixtures::PROJECT_ID);
    assert_eq!(body["databaseURL"], TestFixtures::DATABASE_URL);
    assert!(!body["databaseURL"].as_str().unwrap().ends_with('/'));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let (app, _) = test_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/notification/register")
        .header(header::ORIGIN, "http://localhost:4200")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (app, _) = test_app();

    let (status, _) = send(&app, Method::GET, "/api/notification/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
