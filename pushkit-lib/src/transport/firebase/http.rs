//! REST plumbing shared by the store and the streaming listener.

use url::Url;

use crate::{PushkitError, Result};

/// Suffix the REST API expects on every node path.
const JSON_SUFFIX: &str = ".json";

/// Build `<database_url>/<path>.json`, adding `?auth=` when a token is set.
pub(crate) fn node_url(database_url: &str, path: &str, auth_token: Option<&str>) -> Result<String> {
    let base = database_url.trim_end_matches('/');
    let path = path.trim_matches('/');
    let raw = if path.is_empty() {
        format!("{}/{}", base, JSON_SUFFIX)
    } else {
        format!("{}/{}{}", base, path, JSON_SUFFIX)
    };
    with_auth(&raw, auth_token)
}

/// Build the REST URL for a listen URL (`<listen_url>.json`).
pub(crate) fn listen_node_url(listen_url: &str, auth_token: Option<&str>) -> Result<String> {
    let raw = format!("{}{}", listen_url.trim_end_matches('/'), JSON_SUFFIX);
    with_auth(&raw, auth_token)
}

fn with_auth(raw: &str, auth_token: Option<&str>) -> Result<String> {
    let mut url = Url::parse(raw)
        .map_err(|err| PushkitError::invalid_argument("url", format!("{}: {}", raw, err)))?;
    if let Some(token) = auth_token {
        url.query_pairs_mut().append_pair("auth", token);
    }
    Ok(url.into())
}

/// Pull the `error` field out of a Firebase error body, if there is one.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Map HTTP status codes to PushkitError.
pub(crate) fn map_status_error(status: u16, path: &str, body: &str) -> PushkitError {
    let message = error_message(body);
    match status {
        400 => PushkitError::InvalidArgument {
            field: "request".to_string(),
            reason: message,
        },
        401 | 403 => PushkitError::Auth(format!("{} ({}): {}", path, status, message)),
        404 => PushkitError::not_found("path", path),
        429 => PushkitError::RateLimited {
            retry_after_ms: 5000,
        },
        500..=599 => {
            PushkitError::Internal(format!("Firebase server error ({}): {}", status, message))
        }
        _ => PushkitError::Transport(format!(
            "Firebase request failed ({}): {}",
            status, message
        )),
    }
}

/// Map reqwest errors to PushkitError.
pub(crate) fn map_reqwest_error(err: reqwest::Error, target: &str, timeout_secs: u64) -> PushkitError {
    if err.is_timeout() {
        PushkitError::ConnectionTimeout {
            operation: format!("Firebase request to {}", target),
            timeout_ms: timeout_secs * 1000,
        }
    } else if err.is_connect() {
        PushkitError::ConnectionFailed {
            target: target.to_string(),
            reason: err.to_string(),
        }
    } else {
        PushkitError::Transport(format!("Firebase request failed: {}", err))
    }
}
