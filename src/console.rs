//! Line-recording host used by the `replay` command.

use shortcut_relay_keybindings::ShortcutHost;
use std::cell::RefCell;

/// Host that records every callback as a text line.
///
/// Widgets and event targets are plain names; the event target is its own
/// owner.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    focused: Option<String>,
    lines: RefCell<Vec<String>>,
}

impl ConsoleHost {
    pub fn new(focused: Option<String>) -> Self {
        Self {
            focused,
            lines: RefCell::new(Vec::new()),
        }
    }

    /// Take the lines recorded so far.
    pub fn take_lines(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.borrow_mut())
    }

    fn record(&self, line: String) {
        self.lines.borrow_mut().push(line);
    }
}

impl ShortcutHost for ConsoleHost {
    type Widget = String;
    type EventTarget = String;

    fn resolve_owner_from_event_target(&self, target: &String) -> Option<String> {
        Some(target.clone())
    }

    fn focused_widget(&self) -> Option<String> {
        self.focused.clone()
    }

    fn flush_pending_edits(&self, active: Option<&String>) -> bool {
        match active {
            Some(widget) => {
                self.record(format!("flush {}", widget));
                true
            }
            None => {
                self.record("flush (no focused widget)".to_string());
                false
            }
        }
    }

    fn notify_action_invoked(&self, action_id: &str, target: Option<&String>) {
        match target {
            Some(target) => self.record(format!("action {} (target {})", action_id, target)),
            None => self.record(format!("action {}", action_id)),
        }
    }
}
