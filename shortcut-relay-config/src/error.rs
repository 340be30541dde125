//! Typed error variants for the shortcut-relay-config crate.
//!
//! Provides structured error types for keymap I/O, action-list decoding and
//! validation, so callers can match on specific failure modes instead of
//! opaque `anyhow` strings.
//!
//! # Example
//!
//! ```rust,no_run
//! use shortcut_relay_config::{ConfigError, RelayConfig};
//!
//! match RelayConfig::load_from("keymap.yaml") {
//!     Ok(config) => println!("{} shortcuts", config.shortcuts.len()),
//!     Err(ConfigError::Io(io)) => eprintln!("I/O error: {io}"),
//!     Err(ConfigError::Parse(p)) => eprintln!("YAML parse error: {p}"),
//!     Err(other) => eprintln!("{other}"),
//! }
//! ```

use thiserror::Error;

/// Errors that can occur when loading, saving or decoding shortcut configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the keymap file.
    #[error("I/O error reading keymap: {0}")]
    Io(#[from] std::io::Error),

    /// The keymap file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in keymap: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// The action-list payload pushed by the host was not a JSON array.
    ///
    /// Individual entries that fail to decode are dropped instead; this
    /// variant only covers a payload that cannot be read at all.
    #[error("Malformed action list: {0}")]
    ActionList(#[from] serde_json::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which entry is invalid and why.
    #[error("Keymap validation error: {0}")]
    Validation(String),
}
