//! Pushkit library.
//!
//! Derives a short, stable token from each user identifier and uses it as the
//! storage path for that user's notifications. The server writes under the
//! path; clients listen on the same path. Storage access goes through the
//! store traits, so the Firebase adapter can be swapped for the in-memory one.
//!
//! # Features
//!
//! - **Protocol**: identifier hashing, notification paths and listen URLs
//! - **Notifications**: record model and the welcome/random/custom factory
//! - **Transport**: store traits, Firebase Realtime Database adapter, in-memory store
//! - **Realtime**: streaming listener that reports the newest notification
//!
//! # Example
//!
//! ```
//! use pushkit_lib::protocol::{build_listen_url, build_notification_path, hash_identifier};
//!
//! let token = hash_identifier("  User123 ").unwrap();
//! assert_eq!(token.as_str(), "e606e38b0d8c");
//!
//! assert_eq!(build_notification_path("user123").unwrap(), "notifications/e606e38b0d8c");
//! assert_eq!(
//!     build_listen_url("https://db.example.com/", "user123").unwrap(),
//!     "https://db.example.com/notifications/e606e38b0d8c"
//! );
//! ```

pub mod config;
pub mod errors;
mod json_tree;
pub mod notification;
pub mod prelude;
pub mod protocol;
pub mod realtime;
pub mod transport;

/// Test utilities for notification testing.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use errors::{PushkitError, PushkitErrorCode};
pub use notification::{NotificationId, NotificationRecord, StoredNotification};
pub use protocol::HashedToken;
pub use transport::{NotificationStore, NotificationStoreRead, NotificationStoreWrite};

/// Common result alias for Pushkit operations.
pub type Result<T> = std::result::Result<T, PushkitError>;

/// Writes a notification under the user's hashed path.
///
/// The record lands at `notifications/{token}/{id}` where `id` is a fresh
/// [`NotificationId`]. Listeners built with
/// [`build_listen_url`](protocol::build_listen_url) for the same identifier
/// observe it.
///
/// # Examples
/// ```
/// # use pushkit_lib::{send_notification, NotificationStoreWrite};
/// # use pushkit_lib::notification::factory;
/// # async fn demo(store: &impl NotificationStoreWrite) -> pushkit_lib::Result<()> {
/// let record = factory::welcome(chrono::Utc::now());
/// let id = send_notification(store, "user123", &record).await?;
/// println!("stored notification {}", id);
/// # Ok(())
/// # }
/// ```
#[cfg_attr(feature = "tracing", tracing::instrument(skip(store, identifier, record), fields(kind = %record.kind)))]
pub async fn send_notification<S>(
    store: &S,
    identifier: &str,
    record: &NotificationRecord,
) -> Result<NotificationId>
where
    S: NotificationStoreWrite + ?Sized,
{
    let id = NotificationId::generate();
    let path = protocol::build_record_path(identifier, id.as_str())?;
    let value = serde_json::to_value(record)?;

    store
        .put(&path, &value)
        .await
        .map_err(|err| map_transport_error("send_notification", err))?;

    #[cfg(feature = "tracing")]
    tracing::info!(%path, "notification stored");

    Ok(id)
}

/// Reads every notification stored for a user, newest first.
///
/// # Semantics
/// - Returns an empty list when nothing has been sent to the user yet.
/// - Children that are not notification records are skipped.
/// - Propagates store failures as returned by the adapter.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(reader, identifier)))]
pub async fn fetch_notifications<R>(reader: &R, identifier: &str) -> Result<Vec<StoredNotification>>
where
    R: NotificationStoreRead + ?Sized,
{
    let path = protocol::build_notification_path(identifier)?;
    let snapshot = reader
        .get(&path)
        .await
        .map_err(|err| map_transport_error("fetch_notifications", err))?;

    Ok(snapshot
        .map(|value| notification::notifications_from_snapshot(&value))
        .unwrap_or_default())
}

fn map_transport_error(label: &'static str, err: PushkitError) -> PushkitError {
    match err {
        PushkitError::Transport(msg) => PushkitError::Transport(format!("{label}: {msg}")),
        _ => err,
    }
}
