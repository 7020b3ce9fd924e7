//! Pushkit demo client.
//!
//! The binary lives in `main.rs`; the API client, commands and terminal
//! helpers are exposed here so integration tests can drive them.

pub mod api;
pub mod commands;
pub mod ui;
