//! Canonical notification protocol conventions.
//!
//! This module defines the single source of truth for:
//! - Identifier normalization and token hashing
//! - Storage path and listen URL construction
//!
//! The server that writes notifications and every client that listens for
//! them must derive the same token from the same identifier.
//!
//! # Path Layout
//!
//! | Object Type        | Path Template                              |
//! |--------------------|--------------------------------------------|
//! | User notifications | `notifications/{token}`                    |
//! | Single record      | `notifications/{token}/{notification_id}`  |
//! | Listen URL         | `{base_url}/notifications/{token}`         |
//!
//! # Token Derivation
//!
//! `token = hex(sha256(utf8(lowercase(trim(identifier)))))[..12]`
//!
//! The token is deterministic and does not reveal the identifier in the
//! path. It is a 48-bit prefix, so see [`collision_probability`] before
//! relying on it for large populations.

mod paths;
mod token;

pub use paths::*;
pub use token::*;
