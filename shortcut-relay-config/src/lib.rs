//! Configuration and wire types for shortcut-relay.
//!
//! This crate provides:
//!
//! - Raw action descriptors as pushed by the server for each owner
//! - Raw modifier key codes
//! - Action-list payload decoding
//! - Keymap file loading, saving and validation

mod actions;
pub mod config;
pub mod error;
mod types;

pub use actions::parse_action_list;
pub use config::RelayConfig;
pub use error::ConfigError;
pub use types::{KeymapEntry, LogLevel, ModifierKey, RawAction};
