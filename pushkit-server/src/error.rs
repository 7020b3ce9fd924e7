use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use pushkit_lib::PushkitError;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("UserId is required")]
    MissingUserId,

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to {action}")]
    Failed {
        action: &'static str,
        #[source]
        source: PushkitError,
    },
}

impl AppError {
    /// Classify a library error raised while performing `action`.
    pub fn pushkit(action: &'static str, err: PushkitError) -> Self {
        match err {
            PushkitError::InvalidArgument { .. } => AppError::InvalidArgument(err.to_string()),
            PushkitError::NotFound { .. } => AppError::NotFound(err.to_string()),
            source => AppError::Failed { action, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingUserId
            | AppError::MalformedPayload(_)
            | AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedPayload(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let AppError::Failed { action, source } = &self {
            error!(action, code = ?source.code(), "Request failed: {source}");
        }

        let body = ErrorResponse {
            error: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            message: self.to_string(),
            timestamp: Utc::now(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_errors_map_to_status() {
        let bad = AppError::pushkit("send", PushkitError::invalid_argument("title", "must not be empty"));
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let missing = AppError::pushkit("read", PushkitError::not_found("node", "notifications/x"));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let offline = AppError::pushkit("send notification", PushkitError::Transport("offline".into()));
        assert_eq!(offline.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(offline.to_string(), "Failed to send notification");
    }

    #[test]
    fn missing_user_id_message() {
        assert_eq!(AppError::MissingUserId.to_string(), "UserId is required");
        assert_eq!(AppError::MissingUserId.status(), StatusCode::BAD_REQUEST);
    }
}
