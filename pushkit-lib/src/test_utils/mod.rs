//! Test utilities for Pushkit.
//!
//! This module provides testing infrastructure including:
//! - Fixtures with known identifier/token pairs and deterministic records
//! - Builders for streaming protocol bodies
//! - Assertion helpers for tokens, paths and ordering
//!
//! The in-memory store lives in [`crate::transport::MemoryStore`] and is
//! re-exported here for convenience.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pushkit_lib::test_utils::{MemoryStore, TestFixtures};
//!
//! let store = MemoryStore::new();
//! let record = TestFixtures::record("hello", 0);
//! pushkit_lib::send_notification(&store, "alice", &record).await?;
//! ```

mod assertions;
mod fixtures;

pub use fixtures::{sse_keep_alive, sse_patch, sse_put, TestFixtures};

pub use assertions::{assert_newest_first, assert_notification_path, assert_token_format};

pub use crate::transport::MemoryStore;
