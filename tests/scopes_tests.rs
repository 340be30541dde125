//! Owner scope tests: bubbling from nested owners and teardown.

use shortcut_relay::{ScopeError, ShortcutScopes};
use shortcut_relay_config::RawAction;
use shortcut_relay_keybindings::{DeferredQueue, KeyPress, ModifierMask, ShortcutHost, key_code};
use std::cell::RefCell;
use std::rc::Rc;

/// Host bound to one owner; records notifications into a shared log.
struct OwnerHost {
    owner: &'static str,
    log: Rc<RefCell<Vec<String>>>,
}

impl ShortcutHost for OwnerHost {
    type Widget = String;
    type EventTarget = String;

    fn resolve_owner_from_event_target(&self, target: &String) -> Option<String> {
        Some(target.clone())
    }

    fn focused_widget(&self) -> Option<String> {
        None
    }

    fn flush_pending_edits(&self, _active: Option<&String>) -> bool {
        self.log.borrow_mut().push(format!("{}:flush", self.owner));
        false
    }

    fn notify_action_invoked(&self, action_id: &str, _target: Option<&String>) {
        self.log
            .borrow_mut()
            .push(format!("{}:{}", self.owner, action_id));
    }
}

struct Ui {
    scopes: ShortcutScopes<OwnerHost>,
    queue: Rc<DeferredQueue>,
    log: Rc<RefCell<Vec<String>>>,
}

impl Ui {
    fn new() -> Self {
        let queue = Rc::new(DeferredQueue::new());
        Self {
            scopes: ShortcutScopes::new(queue.clone()),
            queue,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn attach(&mut self, owner: &'static str, parent: Option<&str>) {
        let host = Rc::new(OwnerHost {
            owner,
            log: Rc::clone(&self.log),
        });
        self.scopes.attach_owner(owner, parent, host).unwrap();
    }

    fn press(&self, owner: &str, key: u32, modifiers: ModifierMask) -> Option<String> {
        let mut event: KeyPress<String> = KeyPress::new(key, modifiers);
        let handled = self
            .scopes
            .dispatch(owner, &mut event, None)
            .map(str::to_string);
        self.queue.run_pending();
        handled
    }

    fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

fn window_in_ui() -> Ui {
    let mut ui = Ui::new();
    ui.attach("ui", None);
    ui.attach("window", Some("ui"));
    ui.scopes
        .update_actions("ui", &[RawAction::new(key_code::ESCAPE, "closeAll")])
        .unwrap();
    ui.scopes
        .update_actions(
            "window",
            &[
                RawAction::new(key_code::ENTER, "ok"),
                RawAction::new(83, "save").with_modifiers([17]),
            ],
        )
        .unwrap();
    ui
}

#[test]
fn innermost_owner_handles_first() {
    let ui = window_in_ui();
    assert_eq!(
        ui.press("window", key_code::ENTER, ModifierMask::empty()),
        Some("window".to_string())
    );
    assert_eq!(ui.log(), vec!["window:flush", "window:ok"]);
}

#[test]
fn unhandled_key_bubbles_to_parent() {
    let ui = window_in_ui();
    assert_eq!(
        ui.press("window", key_code::ESCAPE, ModifierMask::empty()),
        Some("ui".to_string())
    );
    assert_eq!(ui.log(), vec!["ui:flush", "ui:closeAll"]);
}

#[test]
fn parent_does_not_see_child_bindings() {
    let ui = window_in_ui();
    assert_eq!(ui.press("ui", key_code::ENTER, ModifierMask::empty()), None);
    assert!(ui.log().is_empty());
}

#[test]
fn inner_binding_shadows_outer_one() {
    let mut ui = window_in_ui();
    ui.scopes
        .update_actions("ui", &[RawAction::new(83, "globalSave").with_modifiers([17])])
        .unwrap();

    assert_eq!(
        ui.press("window", 83, ModifierMask::CTRL),
        Some("window".to_string())
    );
    assert_eq!(ui.log(), vec!["window:flush", "window:save"]);
}

#[test]
fn nothing_matches_anywhere() {
    let ui = window_in_ui();
    let mut event: KeyPress<String> = KeyPress::new(112, ModifierMask::empty());
    assert_eq!(ui.scopes.dispatch("window", &mut event, None), None);
    assert!(!event.is_default_prevented());
}

#[test]
fn detached_owner_ignores_keys() {
    let mut ui = window_in_ui();
    assert_eq!(ui.scopes.detach_owner("window").unwrap(), 1);

    assert_eq!(ui.press("window", key_code::ENTER, ModifierMask::empty()), None);
    assert!(ui.log().is_empty());
    assert!(ui.scopes.registry("window").is_none());
}

#[test]
fn queued_notification_survives_detach() {
    let mut ui = window_in_ui();
    let mut event: KeyPress<String> = KeyPress::new(key_code::ENTER, ModifierMask::empty());
    assert_eq!(ui.scopes.dispatch("window", &mut event, None), Some("window"));
    assert_eq!(ui.log(), vec!["window:flush"]);

    assert_eq!(ui.scopes.detach_owner("window").unwrap(), 1);
    assert_eq!(ui.queue.pending(), 1);

    ui.queue.run_pending();
    assert_eq!(ui.log(), vec!["window:flush", "window:ok"]);
}

#[test]
fn json_updates_route_to_owner() {
    let mut ui = window_in_ui();
    ui.scopes
        .update_actions_from_json("window", r#"[{"kc":113,"key":"rename"}]"#)
        .unwrap();
    assert_eq!(ui.scopes.registry("window").unwrap().len(), 1);

    assert!(matches!(
        ui.scopes.update_actions_from_json("window", "{}"),
        Err(ScopeError::ActionList(_))
    ));
    assert!(matches!(
        ui.scopes.update_actions_from_json("ghost", "[]"),
        Err(ScopeError::UnknownOwner(_))
    ));
}
