//! Realtime notification delivery.
//!
//! Listeners subscribe to `notifications/{token}` and receive the newest
//! notification each time it changes. The parser and feed are transport
//! independent; [`FirebaseListener`] connects them to the Realtime Database
//! streaming API and needs the `firebase` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use pushkit_lib::realtime::FirebaseListener;
//!
//! let listener = FirebaseListener::new()?;
//! let mut updates = listener.notifications(&listen_url).await?;
//! while let Some(update) = updates.next().await {
//!     let notification = update?;
//!     println!("{}: {}", notification.record.title, notification.record.body);
//! }
//! ```

mod event_stream;
mod feed;
#[cfg(feature = "firebase")]
mod listener;

pub use event_stream::{parse_event_stream, EventStreamParser, StreamEvent};
pub use feed::NotificationFeed;
#[cfg(feature = "firebase")]
pub use listener::{follow_latest, FirebaseListener};
