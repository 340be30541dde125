//! shortcut-relay: keyboard shortcuts for server-driven UI clients.
//!
//! The registry and dispatch logic live in `shortcut-relay-keybindings`;
//! this crate adds nested owner scopes, the debug log bridge and the CLI.

pub mod cli;
pub mod console;
pub mod debug;
pub mod scopes;

pub use scopes::{ScopeError, ShortcutScopes};
