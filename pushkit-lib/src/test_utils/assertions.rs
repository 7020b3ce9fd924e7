//! Test assertions and verification helpers.

use crate::notification::StoredNotification;
use crate::protocol::{TOKEN_LENGTH, NOTIFICATIONS_NAMESPACE};

/// Assert that `token` looks like a derived token.
///
/// # Panics
/// Panics unless it is exactly 12 lowercase hex characters.
pub fn assert_token_format(token: &str) {
    assert_eq!(
        token.len(),
        TOKEN_LENGTH,
        "token {:?} should be {} characters",
        token,
        TOKEN_LENGTH
    );
    assert!(
        token.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')),
        "token {:?} should be lowercase hex",
        token
    );
}

/// Assert that `path` is `notifications/{token}`.
///
/// # Panics
/// Panics if the namespace or token is wrong.
pub fn assert_notification_path(path: &str) {
    let token = path
        .strip_prefix(NOTIFICATIONS_NAMESPACE)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or_else(|| panic!("path {:?} should start with notifications/", path));
    assert_token_format(token);
}

/// Assert that notifications are ordered newest first.
///
/// # Panics
/// Panics if any record is newer than the one before it.
pub fn assert_newest_first(notifications: &[StoredNotification]) {
    for pair in notifications.windows(2) {
        assert!(
            pair[0].record.sent_at() >= pair[1].record.sent_at(),
            "{} ({}) is older than {} ({})",
            pair[0].id,
            pair[0].record.timestamp,
            pair[1].id,
            pair[1].record.timestamp
        );
    }
}
