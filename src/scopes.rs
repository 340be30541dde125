//! Nested shortcut owners.
//!
//! Windows, panels and views each own a [`ShortcutRegistry`]. A key press is
//! offered to the innermost owner first; if none of its bindings match it
//! bubbles to the enclosing owner, up to the root.

use shortcut_relay_config::{ConfigError, RawAction};
use shortcut_relay_keybindings::{KeyEvent, ShortcutHost, ShortcutRegistry, UiScheduler};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use thiserror::Error;

/// Errors from owner bookkeeping.
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("Unknown shortcut owner '{0}'")]
    UnknownOwner(String),

    #[error("Unknown parent owner '{0}'")]
    UnknownParent(String),

    #[error("Shortcut owner '{0}' is already attached")]
    DuplicateOwner(String),

    #[error(transparent)]
    ActionList(#[from] ConfigError),
}

struct Scope<H: ShortcutHost> {
    parent: Option<String>,
    registry: ShortcutRegistry<H>,
}

/// Registry per owner, linked to the enclosing owner.
pub struct ShortcutScopes<H: ShortcutHost> {
    scheduler: Rc<dyn UiScheduler>,
    scopes: HashMap<String, Scope<H>>,
}

impl<H: ShortcutHost> ShortcutScopes<H> {
    pub fn new(scheduler: Rc<dyn UiScheduler>) -> Self {
        Self {
            scheduler,
            scopes: HashMap::new(),
        }
    }

    /// Create an empty registry for a new owner.
    ///
    /// `host` receives the callbacks of this owner's registry. The parent must
    /// already be attached.
    pub fn attach_owner(
        &mut self,
        id: impl Into<String>,
        parent: Option<&str>,
        host: Rc<H>,
    ) -> Result<(), ScopeError> {
        let id = id.into();
        if self.scopes.contains_key(&id) {
            return Err(ScopeError::DuplicateOwner(id));
        }
        if let Some(parent) = parent
            && !self.scopes.contains_key(parent)
        {
            return Err(ScopeError::UnknownParent(parent.to_string()));
        }

        log::debug!("Attaching shortcut owner '{}' (parent: {:?})", id, parent);
        let registry = ShortcutRegistry::new(id.as_str(), host, Rc::clone(&self.scheduler));
        self.scopes.insert(
            id,
            Scope {
                parent: parent.map(str::to_string),
                registry,
            },
        );
        Ok(())
    }

    /// Drop an owner and every owner nested inside it.
    ///
    /// Returns how many registries were discarded.
    pub fn detach_owner(&mut self, id: &str) -> Result<usize, ScopeError> {
        if !self.scopes.contains_key(id) {
            return Err(ScopeError::UnknownOwner(id.to_string()));
        }

        let mut doomed: HashSet<String> = HashSet::from([id.to_string()]);
        loop {
            let nested: Vec<String> = self
                .scopes
                .iter()
                .filter(|(owner, scope)| {
                    !doomed.contains(*owner)
                        && scope
                            .parent
                            .as_ref()
                            .is_some_and(|parent| doomed.contains(parent))
                })
                .map(|(owner, _)| owner.clone())
                .collect();
            if nested.is_empty() {
                break;
            }
            doomed.extend(nested);
        }

        for owner in &doomed {
            self.scopes.remove(owner);
        }
        log::debug!(
            "Detached shortcut owner '{}' ({} registries discarded)",
            id,
            doomed.len()
        );
        Ok(doomed.len())
    }

    /// Replace an owner's bindings with a freshly pushed action list.
    pub fn update_actions(&mut self, id: &str, actions: &[RawAction]) -> Result<(), ScopeError> {
        self.registry_mut(id)?.replace_bindings(actions);
        Ok(())
    }

    /// Replace an owner's bindings from a JSON action list.
    pub fn update_actions_from_json(&mut self, id: &str, payload: &str) -> Result<(), ScopeError> {
        self.registry_mut(id)?.replace_bindings_from_json(payload)?;
        Ok(())
    }

    pub fn registry(&self, id: &str) -> Option<&ShortcutRegistry<H>> {
        self.scopes.get(id).map(|scope| &scope.registry)
    }

    fn registry_mut(&mut self, id: &str) -> Result<&mut ShortcutRegistry<H>, ScopeError> {
        self.scopes
            .get_mut(id)
            .map(|scope| &mut scope.registry)
            .ok_or_else(|| ScopeError::UnknownOwner(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.scopes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// The owner followed by its ancestors, innermost first.
    pub fn chain(&self, id: &str) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut current = self.scopes.get_key_value(id);
        while let Some((owner, scope)) = current {
            chain.push(owner.as_str());
            current = scope
                .parent
                .as_deref()
                .and_then(|parent| self.scopes.get_key_value(parent));
        }
        chain
    }

    /// Offer a key press to `id`, then to each enclosing owner.
    ///
    /// Returns the owner whose registry handled the key. Events for owners
    /// that are no longer attached are ignored.
    pub fn dispatch<E>(&self, id: &str, event: &mut E, target: Option<H::Widget>) -> Option<&str>
    where
        E: KeyEvent<Target = H::EventTarget>,
    {
        if !self.contains(id) {
            log::warn!("Ignoring key event for detached shortcut owner '{}'", id);
            return None;
        }

        for owner in self.chain(id) {
            let registry = &self.scopes.get(owner)?.registry;
            if registry.dispatch(event, target.clone()) {
                return Some(registry.owner());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortcut_relay_keybindings::DeferredQueue;

    struct NullHost;

    impl ShortcutHost for NullHost {
        type Widget = ();
        type EventTarget = ();

        fn resolve_owner_from_event_target(&self, _target: &()) -> Option<()> {
            None
        }

        fn focused_widget(&self) -> Option<()> {
            None
        }

        fn flush_pending_edits(&self, _active: Option<&()>) -> bool {
            false
        }

        fn notify_action_invoked(&self, _action_id: &str, _target: Option<&()>) {}
    }

    fn scopes() -> ShortcutScopes<NullHost> {
        ShortcutScopes::new(Rc::new(DeferredQueue::new()))
    }

    #[test]
    fn test_attach_requires_known_parent() {
        let mut scopes = scopes();
        assert!(matches!(
            scopes.attach_owner("panel", Some("ui"), Rc::new(NullHost)),
            Err(ScopeError::UnknownParent(_))
        ));
        scopes.attach_owner("ui", None, Rc::new(NullHost)).unwrap();
        scopes
            .attach_owner("panel", Some("ui"), Rc::new(NullHost))
            .unwrap();
        assert!(matches!(
            scopes.attach_owner("ui", None, Rc::new(NullHost)),
            Err(ScopeError::DuplicateOwner(_))
        ));
        assert_eq!(scopes.chain("panel"), vec!["panel", "ui"]);
    }

    #[test]
    fn test_detach_removes_descendants() {
        let mut scopes = scopes();
        scopes.attach_owner("ui", None, Rc::new(NullHost)).unwrap();
        scopes
            .attach_owner("window", Some("ui"), Rc::new(NullHost))
            .unwrap();
        scopes
            .attach_owner("panel", Some("window"), Rc::new(NullHost))
            .unwrap();
        scopes
            .attach_owner("sidebar", Some("ui"), Rc::new(NullHost))
            .unwrap();

        assert_eq!(scopes.detach_owner("window").unwrap(), 2);
        assert!(!scopes.contains("panel"));
        assert!(scopes.contains("sidebar"));
        assert_eq!(scopes.len(), 2);
        assert!(matches!(
            scopes.detach_owner("window"),
            Err(ScopeError::UnknownOwner(_))
        ));
    }

    #[test]
    fn test_update_unknown_owner() {
        let mut scopes = scopes();
        assert!(matches!(
            scopes.update_actions("ghost", &[]),
            Err(ScopeError::UnknownOwner(_))
        ));
        assert!(scopes.is_empty());
    }
}
