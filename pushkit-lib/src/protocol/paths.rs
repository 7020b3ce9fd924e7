//! Canonical storage path builders.
//!
//! These functions produce the exact paths and URLs used to write and listen
//! for notifications. Writers and listeners must use identical paths.

use url::Url;

use super::token::hash_identifier;
use crate::{PushkitError, Result};

/// Namespace separating notification records from other data in the database.
pub const NOTIFICATIONS_NAMESPACE: &str = "notifications";

/// Build the storage path for a user's notifications.
///
/// Path format: `notifications/{token}`
///
/// # Errors
///
/// Returns `PushkitError::InvalidArgument` if the identifier is blank.
///
/// # Example
///
/// ```
/// use pushkit_lib::protocol::build_notification_path;
///
/// let path = build_notification_path("user123").unwrap();
/// assert_eq!(path, "notifications/e606e38b0d8c");
/// ```
pub fn build_notification_path(identifier: &str) -> Result<String> {
    let token = hash_identifier(identifier)?;
    Ok(format!("{}/{}", NOTIFICATIONS_NAMESPACE, token))
}

/// Build the storage path for a single notification record.
///
/// Path format: `notifications/{token}/{notification_id}`
pub fn build_record_path(identifier: &str, notification_id: &str) -> Result<String> {
    if notification_id.trim().is_empty() || notification_id.contains('/') {
        return Err(PushkitError::invalid_argument(
            "notification_id",
            "must be a single non-empty path segment",
        ));
    }

    let path = build_notification_path(identifier)?;
    Ok(format!("{}/{}", path, notification_id))
}

/// Build the fully-qualified listen URL for a user.
///
/// URL format: `{base_url}/notifications/{token}`
///
/// Exactly one trailing `/` is stripped from `base_url` before joining.
///
/// # Errors
///
/// Returns `PushkitError::InvalidArgument` if `base_url` is empty or not an
/// absolute URL with a host, or if the identifier is blank.
///
/// # Example
///
/// ```
/// use pushkit_lib::protocol::build_listen_url;
///
/// let a = build_listen_url("https://db.example.com/", "u1").unwrap();
/// let b = build_listen_url("https://db.example.com", "u1").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a, "https://db.example.com/notifications/bb82030dbc2b");
/// ```
pub fn build_listen_url(base_url: &str, identifier: &str) -> Result<String> {
    let base = validate_base_url(base_url)?;
    let path = build_notification_path(identifier)?;
    Ok(format!("{}/{}", base, path))
}

/// Validate a database base URL and strip a single trailing slash.
///
/// Only the trailing slash is corrected; anything else malformed is rejected.
pub fn validate_base_url(base_url: &str) -> Result<&str> {
    if base_url.is_empty() {
        return Err(PushkitError::invalid_argument(
            "base_url",
            "must not be empty",
        ));
    }

    let parsed = Url::parse(base_url)
        .map_err(|err| PushkitError::invalid_argument("base_url", err.to_string()))?;

    if parsed.cannot_be_a_base() || !parsed.has_host() {
        return Err(PushkitError::invalid_argument(
            "base_url",
            format!("'{}' is not an absolute URL with a host", base_url),
        ));
    }

    Ok(base_url.strip_suffix('/').unwrap_or(base_url))
}

/// Split a listen URL into its database root and node path.
///
/// The root is the URL origin (scheme, host and port); the path is
/// everything after it without surrounding slashes.
///
/// # Example
///
/// ```
/// use pushkit_lib::protocol::split_listen_url;
///
/// let (root, path) =
///     split_listen_url("https://db.example.com/notifications/bb82030dbc2b").unwrap();
/// assert_eq!(root, "https://db.example.com");
/// assert_eq!(path, "notifications/bb82030dbc2b");
/// ```
pub fn split_listen_url(listen_url: &str) -> Result<(String, String)> {
    let parsed = Url::parse(listen_url)
        .map_err(|err| PushkitError::invalid_argument("listen_url", err.to_string()))?;

    if !parsed.has_host() {
        return Err(PushkitError::invalid_argument(
            "listen_url",
            format!("'{}' has no host", listen_url),
        ));
    }

    let path = parsed.path().trim_matches('/');
    if path.is_empty() {
        return Err(PushkitError::invalid_argument(
            "listen_url",
            "does not name a database path",
        ));
    }

    Ok((parsed.origin().ascii_serialization(), path.to_string()))
}
