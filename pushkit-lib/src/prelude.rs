//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits for
//! quick setup. Import everything with:
//!
//! ```rust,ignore
//! use pushkit_lib::prelude::*;
//! ```
//!
//! ## What's Included
//!
//! - Protocol: `hash_identifier`, `build_notification_path`, `build_listen_url`
//! - Error types: `PushkitError`, `PushkitErrorCode`, `Result`
//! - Notifications: `NotificationRecord`, `StoredNotification`, `factory`
//! - Store traits and the in-memory store
//! - Firebase adapter and listener (with the `firebase` feature)

// Protocol
pub use crate::protocol::{
    build_listen_url, build_notification_path, hash_identifier, split_listen_url, HashedToken,
};

// Error handling
pub use crate::errors::{PushkitError, PushkitErrorCode};
pub use crate::Result;

// Notifications
pub use crate::notification::{
    factory, Category, NotificationId, NotificationKind, NotificationRecord, StoredNotification,
};
pub use crate::{fetch_notifications, send_notification};

// Store traits
pub use crate::transport::{
    MemoryStore, NotificationStore, NotificationStoreRead, NotificationStoreWrite,
};

// Configuration
pub use crate::config::{ClientConfig, FirebaseConfig, ResolvedFirebase};

// Realtime
pub use crate::realtime::{NotificationFeed, StreamEvent};

// Firebase adapter (when available)
#[cfg(feature = "firebase")]
pub use crate::realtime::FirebaseListener;

#[cfg(feature = "firebase")]
pub use crate::transport::FirebaseStore;
