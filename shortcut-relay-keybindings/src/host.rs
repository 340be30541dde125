//! Host capabilities and key event abstraction.
//!
//! The registry never touches a widget tree. Everything it needs from the
//! surrounding UI framework goes through [`ShortcutHost`], and the key press
//! itself is seen through [`KeyEvent`].

use crate::modifiers::ModifierMask;
use crate::parser::KeyCombination;

/// Capabilities the surrounding UI framework supplies to a registry.
///
/// Methods take `&self`; hosts keep their mutable state behind interior
/// mutability since the registry shares them with deferred tasks.
pub trait ShortcutHost: 'static {
    /// Reference to a UI component, as understood by the host.
    type Widget: Clone + 'static;
    /// Raw target of a key event (typically a display-tree node).
    type EventTarget;

    /// Find the nearest owning component for a raw event target.
    fn resolve_owner_from_event_target(&self, target: &Self::EventTarget) -> Option<Self::Widget>;

    /// The component that currently has keyboard focus, if any.
    fn focused_widget(&self) -> Option<Self::Widget>;

    /// Give the focused editable component a chance to commit an in-progress
    /// value before the shortcut action is reported.
    ///
    /// Runs synchronously inside the key event handler. The return value says
    /// whether anything was flushed and is informational only.
    fn flush_pending_edits(&self, active: Option<&Self::Widget>) -> bool;

    /// Forward a fired action to the server-facing layer.
    fn notify_action_invoked(&self, action_id: &str, target: Option<&Self::Widget>);
}

/// A key press as seen by the registry.
pub trait KeyEvent {
    type Target;

    /// Platform key code; 0 means no actionable key.
    fn key_code(&self) -> u32;
    fn modifiers(&self) -> ModifierMask;
    /// Raw event target, used to resolve the owning component.
    fn target(&self) -> Option<&Self::Target>;
    /// Suppress the platform's default handling of this key.
    fn prevent_default(&mut self);
}

/// Plain-data key press, for hosts that translate native events up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress<T = ()> {
    key_code: u32,
    modifiers: ModifierMask,
    target: Option<T>,
    default_prevented: bool,
}

impl<T> KeyPress<T> {
    pub fn new(key_code: u32, modifiers: ModifierMask) -> Self {
        Self {
            key_code,
            modifiers,
            target: None,
            default_prevented: false,
        }
    }

    /// Key press producing exactly the given combination.
    pub fn from_combination(combination: &KeyCombination) -> Self {
        Self::new(combination.key_code(), combination.modifiers())
    }

    pub fn with_target(mut self, target: T) -> Self {
        self.target = Some(target);
        self
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl<T> KeyEvent for KeyPress<T> {
    type Target = T;

    fn key_code(&self) -> u32 {
        self.key_code
    }

    fn modifiers(&self) -> ModifierMask {
        self.modifiers
    }

    fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}
