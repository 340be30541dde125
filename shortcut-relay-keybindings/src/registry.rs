//! Per-owner shortcut registry and dispatch.

use crate::host::{KeyEvent, ShortcutHost};
use crate::modifiers::ModifierMask;
use crate::parser::KeyCombination;
use crate::scheduler::UiScheduler;
use shortcut_relay_config::{ConfigError, RawAction, parse_action_list};
use std::fmt;
use std::rc::Rc;

/// A key combination bound to a server-side action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutBinding {
    combination: KeyCombination,
    action_id: String,
    caption: String,
}

impl ShortcutBinding {
    pub fn new(
        combination: KeyCombination,
        action_id: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            combination,
            action_id: action_id.into(),
            caption: caption.into(),
        }
    }

    /// Normalize a raw action descriptor.
    ///
    /// Unknown modifier codes are ignored. Returns `None` for descriptors
    /// that can never fire: key code 0 or an empty action id.
    pub fn from_raw(raw: &RawAction) -> Option<Self> {
        if raw.key_code == 0 || raw.id.is_empty() {
            return None;
        }
        let combination = KeyCombination::from_raw(raw.key_code, raw.modifiers.as_deref());
        Some(Self::new(combination, raw.id.as_str(), raw.caption.as_str()))
    }

    pub fn combination(&self) -> &KeyCombination {
        &self.combination
    }

    pub fn action_id(&self) -> &str {
        &self.action_id
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }
}

/// Shortcut bindings of one owner (window or view).
///
/// Bindings are kept in the order the host supplied them and the first
/// binding equal to a key press wins, even when a later one has the same
/// combination. The set is only ever replaced as a whole.
pub struct ShortcutRegistry<H: ShortcutHost> {
    owner: String,
    bindings: Vec<ShortcutBinding>,
    host: Rc<H>,
    scheduler: Rc<dyn UiScheduler>,
}

impl<H: ShortcutHost> ShortcutRegistry<H> {
    /// Create an empty registry for `owner`.
    ///
    /// `owner` only labels log output.
    pub fn new(owner: impl Into<String>, host: Rc<H>, scheduler: Rc<dyn UiScheduler>) -> Self {
        Self {
            owner: owner.into(),
            bindings: Vec::new(),
            host,
            scheduler,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Discard all bindings and install the ones described by `actions`.
    ///
    /// Malformed descriptors are logged and dropped.
    pub fn replace_bindings(&mut self, actions: &[RawAction]) {
        let mut bindings = Vec::with_capacity(actions.len());
        for raw in actions {
            match ShortcutBinding::from_raw(raw) {
                Some(binding) => bindings.push(binding),
                None => log::warn!(
                    "Dropping shortcut action '{}' (key code {}) for owner '{}'",
                    raw.id,
                    raw.key_code,
                    self.owner
                ),
            }
        }

        log::debug!(
            "Owner '{}' now has {} shortcut bindings ({} descriptors received)",
            self.owner,
            bindings.len(),
            actions.len()
        );
        self.bindings = bindings;
    }

    /// Decode a JSON action list and replace the bindings with it.
    ///
    /// If the payload is not a JSON array the current bindings are kept and
    /// the error is returned.
    pub fn replace_bindings_from_json(&mut self, payload: &str) -> Result<(), ConfigError> {
        let actions = parse_action_list(payload)?;
        self.replace_bindings(&actions);
        Ok(())
    }

    pub fn bindings(&self) -> &[ShortcutBinding] {
        &self.bindings
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// First binding equal to the given key press, without side effects.
    pub fn find(&self, key_code: u32, modifiers: ModifierMask) -> Option<&ShortcutBinding> {
        if key_code == 0 {
            return None;
        }
        self.bindings
            .iter()
            .find(|binding| binding.combination.matches(key_code, modifiers))
    }

    /// Handle a key press.
    ///
    /// On a match the event's default handling is prevented, the focused
    /// component's pending edits are flushed synchronously, and the action is
    /// reported to the host on the next UI turn. `target` overrides the
    /// component resolved from the event's raw target.
    ///
    /// Returns `false` without side effects for key code 0 or when nothing
    /// matches.
    pub fn dispatch<E>(&self, event: &mut E, target: Option<H::Widget>) -> bool
    where
        E: KeyEvent<Target = H::EventTarget>,
    {
        let key_code = event.key_code();
        if key_code == 0 {
            return false;
        }
        let modifiers = event.modifiers();

        let Some(binding) = self.find(key_code, modifiers) else {
            log::trace!(
                "No shortcut for key {} ({:?}) on owner '{}'",
                key_code,
                modifiers,
                self.owner
            );
            return false;
        };

        event.prevent_default();

        let target = target.or_else(|| {
            event
                .target()
                .and_then(|raw| self.host.resolve_owner_from_event_target(raw))
        });

        let focused = self.host.focused_widget();
        let flushed = self.host.flush_pending_edits(focused.as_ref());

        log::debug!(
            "Shortcut {} -> '{}' on owner '{}' (pending edits flushed: {})",
            binding.combination,
            binding.action_id,
            self.owner,
            flushed
        );

        let host = Rc::clone(&self.host);
        let action_id = binding.action_id.clone();
        self.scheduler.schedule_deferred(Box::new(move || {
            host.notify_action_invoked(&action_id, target.as_ref());
        }));

        true
    }
}

impl<H: ShortcutHost> fmt::Debug for ShortcutRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutRegistry")
            .field("owner", &self.owner)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}
