//! Deferred execution on the UI thread.
//!
//! Shortcut notifications run after the key event handler returns, so any
//! blur/refocus work triggered by flushing pending edits settles first.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;

/// A unit of work posted to the end of the current UI turn.
pub type DeferredTask = Box<dyn FnOnce()>;

/// "Post to end of the current UI turn" primitive supplied by the host.
///
/// Tasks must run after the synchronous handler that scheduled them returns
/// and before the next user input is processed. Tasks are never dropped
/// without running.
pub trait UiScheduler {
    fn schedule_deferred(&self, task: DeferredTask);
}

/// FIFO scheduler drained by the host's event loop.
///
/// The host calls [`DeferredQueue::run_pending`] once it has finished
/// handling the current input event.
#[derive(Default)]
pub struct DeferredQueue {
    tasks: RefCell<VecDeque<DeferredTask>>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    /// Run queued tasks in order until the queue is empty.
    ///
    /// Tasks scheduled by a running task are run in the same drain. Returns
    /// the number of tasks executed.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // The borrow must end before the task runs; tasks may schedule more work.
            let next = self.tasks.borrow_mut().pop_front();
            let Some(task) = next else {
                break;
            };
            task();
            ran += 1;
        }
        if ran > 0 {
            log::trace!("Ran {} deferred UI task(s)", ran);
        }
        ran
    }
}

impl UiScheduler for DeferredQueue {
    fn schedule_deferred(&self, task: DeferredTask) {
        self.tasks.borrow_mut().push_back(task);
    }
}

impl fmt::Debug for DeferredQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredQueue")
            .field("pending", &self.pending())
            .finish()
    }
}
