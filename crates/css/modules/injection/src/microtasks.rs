//! Microtask queues.

use crate::{MicrotaskQueue, Task};
use core::fmt;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tokio::task::LocalSet;

/// Queue drained explicitly with [`DeferredQueue::run_pending`].
///
/// Clones share the same queue, so one clone can be handed to a
/// [`crate::Host`] while the caller keeps another to drain it.
#[derive(Clone, Default)]
pub struct DeferredQueue {
    tasks: Rc<RefCell<VecDeque<Task>>>,
}

impl DeferredQueue {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the tasks queued so far and return how many ran.
    ///
    /// Tasks queued while draining wait for the next call.
    pub fn run_pending(&self) -> usize {
        let batch: Vec<Task> = self.tasks.borrow_mut().drain(..).collect();
        let ran = batch.len();
        for task in batch {
            task();
        }
        ran
    }

    #[inline]
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl MicrotaskQueue for DeferredQueue {
    #[inline]
    fn queue(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }
}

impl fmt::Debug for DeferredQueue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("DeferredQueue")
            .field("pending", &self.pending())
            .finish()
    }
}

/// Spawns each task on a `tokio::task::LocalSet`.
///
/// Tasks queued while the set is not being driven run the next time it is.
#[derive(Clone, Debug)]
pub struct TokioMicrotasks {
    local: Rc<LocalSet>,
}

impl TokioMicrotasks {
    #[inline]
    pub const fn new(local: Rc<LocalSet>) -> Self {
        Self { local }
    }
}

impl MicrotaskQueue for TokioMicrotasks {
    fn queue(&self, task: Task) {
        drop(self.local.spawn_local(async move { task() }));
    }
}
