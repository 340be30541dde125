//! Shortcut system for shortcut-relay.
//!
//! Each owner (window or view) gets a [`ShortcutRegistry`] holding the
//! shortcut actions the server last pushed for it. A key press is matched
//! against the bindings in order; the first equal combination fires.
//!
//! Features:
//! - Whole-set replacement from raw action descriptors or a JSON action list
//! - First-match-wins dispatch with a synchronous pending-edit flush and a
//!   deferred action notification
//! - Key combination parsing ("Ctrl+Shift+S", "ctrl-shift-s") and shorthand
//!   captions ("^_Print")

mod host;
pub mod keymap;
pub mod keys;
mod modifiers;
pub mod parser;
mod registry;
mod scheduler;

pub use host::{KeyEvent, KeyPress, ShortcutHost};
pub use keymap::raw_actions_from_keymap;
pub use keys::key_code;
pub use modifiers::ModifierMask;
pub use parser::{
    KeyCombination, ParseError, ShorthandCaption, parse_key_combination, parse_shorthand_caption,
};
pub use registry::{ShortcutBinding, ShortcutRegistry};
pub use scheduler::{DeferredQueue, DeferredTask, UiScheduler};
