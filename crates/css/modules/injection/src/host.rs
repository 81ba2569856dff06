//! Seams to the outside world: the document and the microtask queue.

use crate::RuleRejected;
use core::fmt;
use std::rc::Rc;

/// Handle to a style element owned by a [`HostDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StyleElementId(usize);

impl StyleElementId {
    #[inline]
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }
}

/// The parts of a DOM the injector needs.
///
/// Methods take `&self`; implementations hold their own interior state the
/// way a browser binding would.
pub trait HostDocument {
    /// First `<style>` element carrying `attribute`.
    fn find_style_element(&self, attribute: &str) -> Option<StyleElementId>;

    /// Create a `<style>` element with `attribute` set to the empty string
    /// and append it to the document head.
    fn create_style_element(&self, attribute: &str) -> StyleElementId;

    /// Number of rules in the element's sheet.
    fn rule_count(&self, element: StyleElementId) -> usize;

    /// Insert `rule` at `index` in the element's sheet.
    ///
    /// # Errors
    /// Returns [`RuleRejected`] when the sheet refuses the rule. The sheet is
    /// left unchanged in that case.
    fn insert_rule(
        &self,
        element: StyleElementId,
        rule: &str,
        index: usize,
    ) -> Result<(), RuleRejected>;
}

/// Deferred unit of work.
pub type Task = Box<dyn FnOnce()>;

/// Runs a callback once the current synchronous work is done.
pub trait MicrotaskQueue {
    fn queue(&self, task: Task);
}

/// A document plus the queue used to schedule flushes into it.
#[derive(Clone)]
pub struct Host {
    pub document: Rc<dyn HostDocument>,
    pub microtasks: Rc<dyn MicrotaskQueue>,
}

impl Host {
    pub fn new<D, Q>(document: D, microtasks: Q) -> Self
    where
        D: HostDocument + 'static,
        Q: MicrotaskQueue + 'static,
    {
        Self {
            document: Rc::new(document),
            microtasks: Rc::new(microtasks),
        }
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Host").finish_non_exhaustive()
    }
}
