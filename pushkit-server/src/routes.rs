use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use pushkit_lib::{
    config::ClientConfig,
    fetch_notifications,
    notification::factory,
    protocol::{build_listen_url, build_notification_path, hash_identifier},
    send_notification, StoredNotification,
};
use tracing::info;

use super::{
    error::AppError,
    models::{
        FirebasePathResponse, RegisterResponse, SendRequest, SendResponse, TestResponse,
        UserRequest,
    },
    state::AppState,
};

pub const REGISTER_MESSAGE: &str = "User registered successfully";
pub const TEST_MESSAGE: &str = "Notification API is working";

fn require_user_id(user_id: &str) -> Result<&str, AppError> {
    if user_id.trim().is_empty() {
        return Err(AppError::MissingUserId);
    }
    Ok(user_id)
}

pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, AppError> {
    let Json(request) = payload?;
    let user_id = require_user_id(&request.user_id)?;

    let record = factory::welcome(Utc::now());
    send_notification(state.store.as_ref(), user_id, &record)
        .await
        .map_err(|e| AppError::pushkit("register user", e))?;

    let listen_url = build_listen_url(&state.firebase.database_url, user_id)
        .map_err(|e| AppError::pushkit("register user", e))?;
    info!("Registered user, listening at {listen_url}");

    Ok(Json(RegisterResponse {
        message: REGISTER_MESSAGE.to_string(),
        listen_url,
        user_id: request.user_id,
    }))
}

pub async fn send_random_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload?;
    let user_id = require_user_id(&request.user_id)?;

    let record = factory::random(&mut rand::thread_rng(), Utc::now());
    send_notification(state.store.as_ref(), user_id, &record)
        .await
        .map_err(|e| AppError::pushkit("send notification", e))?;

    Ok(StatusCode::OK)
}

pub async fn send_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SendRequest>, JsonRejection>,
) -> Result<Json<SendResponse>, AppError> {
    let Json(request) = payload?;
    let user_id = require_user_id(&request.user_id)?;

    let record = factory::custom(
        &request.title,
        &request.body,
        request.data.as_ref(),
        Utc::now(),
    )
    .map_err(|e| AppError::pushkit("send notification", e))?;

    let id = send_notification(state.store.as_ref(), user_id, &record)
        .await
        .map_err(|e| AppError::pushkit("send notification", e))?;

    Ok(Json(SendResponse {
        notification_id: id.to_string(),
    }))
}

pub async fn firebase_path_handler(
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> Result<Json<FirebasePathResponse>, AppError> {
    let Json(request) = payload?;
    let user_id = require_user_id(&request.user_id)?;

    let token = hash_identifier(user_id)
        .map_err(|e| AppError::pushkit("get Firebase notification path", e))?;
    let path = build_notification_path(user_id)
        .map_err(|e| AppError::pushkit("get Firebase notification path", e))?;

    Ok(Json(FirebasePathResponse {
        path,
        hashed_user_id: token.into_inner(),
        original_user_id: request.user_id,
    }))
}

pub async fn user_notifications_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<StoredNotification>>, AppError> {
    let user_id = require_user_id(&user_id)?;

    let notifications = fetch_notifications(state.store.as_ref(), user_id)
        .await
        .map_err(|e| AppError::pushkit("read notifications", e))?;

    Ok(Json(notifications))
}

pub async fn test_handler() -> Json<TestResponse> {
    Json(TestResponse {
        message: TEST_MESSAGE.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn firebase_config_handler(State(state): State<Arc<AppState>>) -> Json<ClientConfig> {
    Json(state.firebase.clone())
}
