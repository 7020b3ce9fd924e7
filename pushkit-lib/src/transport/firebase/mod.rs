//! Firebase Realtime Database adapter.
//!
//! Requires the `firebase` feature (enabled by default).

pub(crate) mod http;
mod store;

pub use store::FirebaseStore;
