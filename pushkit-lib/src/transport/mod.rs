//! Storage backends for notification records.

#[cfg(feature = "firebase")]
pub mod firebase;
mod memory;
mod traits;

#[cfg(feature = "firebase")]
pub use firebase::FirebaseStore;
pub use memory::MemoryStore;
pub use traits::{NotificationStore, NotificationStoreRead, NotificationStoreWrite};
