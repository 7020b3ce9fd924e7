//! CLI command implementations

pub mod config;
pub mod hash;
pub mod inbox;
pub mod listen;
pub mod path;
pub mod register;
pub mod send;
pub mod send_random;
pub mod status;
