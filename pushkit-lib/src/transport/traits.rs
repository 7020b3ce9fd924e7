use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// Read access to the notification store.
#[async_trait]
pub trait NotificationStoreRead: Send + Sync {
    /// Fetches the JSON value stored at `path`.
    ///
    /// Returns `None` if nothing is stored there.
    async fn get(&self, path: &str) -> Result<Option<Value>>;
}

/// Write access to the notification store.
#[async_trait]
pub trait NotificationStoreWrite: Send + Sync {
    /// Creates or replaces the value at `path`.
    async fn put(&self, path: &str, value: &Value) -> Result<()>;

    /// Removes the value at `path` and everything below it.
    ///
    /// Deleting a missing path is not an error.
    async fn delete(&self, path: &str) -> Result<()>;
}

/// Full read/write access. Implemented for every type that has both halves.
pub trait NotificationStore: NotificationStoreRead + NotificationStoreWrite {}

impl<T: NotificationStoreRead + NotificationStoreWrite + ?Sized> NotificationStore for T {}
