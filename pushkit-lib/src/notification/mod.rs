//! Notification documents and the factory that builds them.
//!
//! Records are written as children of `notifications/{token}`, keyed by a
//! random [`NotificationId`]. Listeners read the whole node and pick the
//! newest record by timestamp.

pub mod factory;
mod model;

pub use model::{
    format_timestamp, latest_notification, notifications_from_snapshot, parse_timestamp,
    sort_newest_first, Category, NotificationId, NotificationKind, NotificationRecord,
    StoredNotification, TIMESTAMP_FORMAT,
};
