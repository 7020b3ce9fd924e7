//! In-memory notification store.
//!
//! Holds a single JSON tree and follows Realtime Database semantics: writing
//! `null` deletes, and nodes left without children disappear. Meant for
//! tests and offline demos; nothing survives the process.
//!
//! # Thread Safety
//!
//! The tree sits behind an `RwLock`. Lock poisoning is reported as
//! `PushkitError::Internal` rather than panicking.

use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::traits::{NotificationStoreRead, NotificationStoreWrite};
use crate::json_tree::{self, lookup, segments};
use crate::{PushkitError, Result};

/// In-memory implementation of the notification store.
pub struct MemoryStore {
    root: RwLock<Value>,
    failure: RwLock<Option<String>>,
}

fn lock_error(context: &str) -> PushkitError {
    PushkitError::Internal(format!("MemoryStore: lock poisoned during {}", context))
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Value::Object(Map::new())),
            failure: RwLock::new(None),
        }
    }

    /// Make every subsequent operation fail with a transport error.
    ///
    /// Pass `None` to recover.
    ///
    /// # Errors
    ///
    /// Returns `PushkitError::Internal` if the lock is poisoned.
    pub fn set_failure(&self, message: Option<&str>) -> Result<()> {
        let mut failure = self.failure.write().map_err(|_| lock_error("set_failure"))?;
        *failure = message.map(str::to_string);
        Ok(())
    }

    /// Copy of the whole tree.
    ///
    /// Returns `Value::Null` if the lock is poisoned.
    pub fn snapshot(&self) -> Value {
        self.root.read().map(|r| r.clone()).unwrap_or(Value::Null)
    }

    /// Check if nothing is stored.
    ///
    /// Returns true if the lock is poisoned.
    pub fn is_empty(&self) -> bool {
        self.root
            .read()
            .map(|r| json_tree::is_empty(&r))
            .unwrap_or(true)
    }

    fn check_failure(&self) -> Result<()> {
        let failure = self.failure.read().map_err(|_| lock_error("check"))?;
        match failure.as_ref() {
            Some(message) => Err(PushkitError::Transport(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationStoreRead for MemoryStore {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        self.check_failure()?;
        let root = self.root.read().map_err(|_| lock_error("get"))?;
        let parts = segments(path);

        Ok(lookup(&root, &parts)
            .filter(|v| !json_tree::is_empty(v))
            .cloned())
    }
}

#[async_trait]
impl NotificationStoreWrite for MemoryStore {
    async fn put(&self, path: &str, value: &Value) -> Result<()> {
        self.check_failure()?;
        let mut root = self.root.write().map_err(|_| lock_error("put"))?;
        json_tree::set(&mut root, &segments(path), value.clone());
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.check_failure()?;
        let mut root = self.root.write().map_err(|_| lock_error("delete"))?;
        json_tree::remove(&mut root, &segments(path));
        Ok(())
    }
}
