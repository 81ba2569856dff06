//! The injection cache and pending buffer.

use crate::{Host, InjectionError, MicrotaskQueue, StyleElementId};
use indexmap::IndexSet;
use log::{debug, error, trace};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Injector shared between a styles instance, its extensions and the
/// scheduled flush task.
pub type SharedInjector = Rc<RefCell<Injector>>;

/// Tracks which identifiers have been injected and buffers their rules
/// until they are flushed.
#[derive(Debug)]
pub struct Injector {
    injected: IndexSet<String>,
    buffer: Vec<String>,
    buffering: bool,
    style_element: Option<StyleElementId>,
    host: Option<Host>,
    marker: String,
    style_tag_suffix: String,
    this: Weak<RefCell<Self>>,
}

impl Injector {
    /// Create a shared injector whose style tag is marked with
    /// `data-<marker>`.
    pub fn shared(marker: impl Into<String>, host: Option<Host>) -> SharedInjector {
        let marker = marker.into();
        Rc::new_cyclic(|this| {
            RefCell::new(Self {
                injected: IndexSet::new(),
                buffer: Vec::new(),
                buffering: false,
                style_element: None,
                host,
                marker,
                style_tag_suffix: String::new(),
                this: this.clone(),
            })
        })
    }

    #[inline]
    pub fn is_injected(&self, key: &str) -> bool {
        self.injected.contains(key)
    }

    #[inline]
    pub const fn is_buffering(&self) -> bool {
        self.buffering
    }

    /// Buffer `rules` under `key` unless `key` was injected before.
    ///
    /// When nothing is buffering yet, buffering starts and one flush into the
    /// host document is queued on its microtask queue. Every injection made
    /// before that task runs lands in the same flush.
    ///
    /// # Errors
    /// [`InjectionError::NoDocument`] when a flush would be needed but no
    /// host is attached. Nothing is buffered or marked in that case.
    pub fn inject_generated_once(
        &mut self,
        key: &str,
        rules: Vec<String>,
    ) -> Result<(), InjectionError> {
        if self.injected.contains(key) {
            trace!("`{key}` already injected");
            return Ok(());
        }
        if !self.buffering {
            let Some(host) = self.host.as_ref() else {
                return Err(InjectionError::NoDocument);
            };
            self.buffering = true;
            let this = self.this.clone();
            let microtasks = Rc::clone(&host.microtasks);
            host.microtasks
                .queue(Box::new(move || flush_scheduled(this, microtasks)));
        }
        self.buffer.extend(rules);
        self.injected.insert(key.to_owned());
        Ok(())
    }

    /// Buffer everything injected from now on until a flush.
    ///
    /// # Errors
    /// [`InjectionError::AlreadyBuffering`] when buffering is already on,
    /// either explicitly or because a flush is queued.
    pub fn start_buffering(&mut self) -> Result<(), InjectionError> {
        if self.buffering {
            return Err(InjectionError::AlreadyBuffering);
        }
        self.buffering = true;
        Ok(())
    }

    /// Stop buffering and take the pending rules in insertion order.
    pub fn flush_to_vec(&mut self) -> Vec<String> {
        self.buffering = false;
        core::mem::take(&mut self.buffer)
    }

    /// [`Injector::flush_to_vec`] joined into one stylesheet.
    #[inline]
    pub fn flush_to_string(&mut self) -> String {
        self.flush_to_vec().concat()
    }

    /// Stop buffering and insert the pending rules into the host's style
    /// element, creating the element when the document has none.
    ///
    /// Rules the document rejects are skipped; the rest are still inserted
    /// in order at the end of the sheet.
    ///
    /// # Errors
    /// [`InjectionError::NoDocument`] without a host. The buffer is kept.
    pub fn flush_to_document(&mut self) -> Result<(), InjectionError> {
        let Some(host) = self.host.clone() else {
            return Err(InjectionError::NoDocument);
        };
        let rules = self.flush_to_vec();
        if rules.is_empty() {
            return Ok(());
        }

        let attribute = self.style_tag_attribute();
        let element = *self.style_element.get_or_insert_with(|| {
            host.document
                .find_style_element(&attribute)
                .unwrap_or_else(|| host.document.create_style_element(&attribute))
        });

        let mut index = host.document.rule_count(element);
        let mut inserted = 0_usize;
        for rule in &rules {
            match host.document.insert_rule(element, rule, index) {
                Ok(()) => {
                    index += 1;
                    inserted += 1;
                }
                Err(rejected) => debug!("{rejected}"),
            }
        }
        debug!(
            "flushed {inserted} of {} rules into style[{attribute}]",
            rules.len()
        );
        Ok(())
    }

    /// Forget every injection and pending rule, stop buffering and drop
    /// the cached style element and style tag suffix.
    pub fn reset(&mut self) {
        self.injected.clear();
        self.buffer.clear();
        self.buffering = false;
        self.style_element = None;
        self.style_tag_suffix.clear();
    }

    /// Mark identifiers as injected without generating anything, e.g. the
    /// ones a server render already put in the page.
    pub fn rehydrate<I, S>(&mut self, identifiers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.injected
            .extend(identifiers.into_iter().map(Into::into));
    }

    /// Identifiers injected since the last reset, in injection order.
    pub fn rendered_identifiers(&self) -> Vec<String> {
        self.injected.iter().cloned().collect()
    }

    /// Rules waiting for the next flush.
    #[inline]
    pub fn buffered_rules(&self) -> &[String] {
        &self.buffer
    }

    /// Use `data-<marker>-<suffix>` for the style tag from now on. An empty
    /// suffix restores the plain marker.
    pub fn set_style_tag_suffix(&mut self, suffix: impl Into<String>) {
        self.style_tag_suffix = suffix.into();
    }

    /// Attribute that marks the style tag rules are flushed into.
    pub fn style_tag_attribute(&self) -> String {
        if self.style_tag_suffix.is_empty() {
            format!("data-{}", self.marker)
        } else {
            format!("data-{}-{}", self.marker, self.style_tag_suffix)
        }
    }
}

/// Body of the queued flush task.
///
/// While the injector is borrowed elsewhere the flush is queued again.
fn flush_scheduled(this: Weak<RefCell<Injector>>, microtasks: Rc<dyn MicrotaskQueue>) {
    let Some(shared) = this.upgrade() else {
        return;
    };
    let Ok(mut injector) = shared.try_borrow_mut() else {
        debug!("injector in use, retrying the scheduled style flush");
        let queue = Rc::clone(&microtasks);
        queue.queue(Box::new(move || flush_scheduled(this, microtasks)));
        return;
    };
    if let Err(err) = injector.flush_to_document() {
        error!("scheduled style flush failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffering_without_host_collects_rules() {
        let shared = Injector::shared("valor-styles", None);
        let mut injector = shared.borrow_mut();
        assert_eq!(
            injector.inject_generated_once("a", vec![".a{}".to_owned()]),
            Err(InjectionError::NoDocument)
        );
        assert!(!injector.is_injected("a"));

        assert_eq!(injector.start_buffering(), Ok(()));
        assert_eq!(injector.start_buffering(), Err(InjectionError::AlreadyBuffering));
        assert_eq!(injector.inject_generated_once("a", vec![".a{}".to_owned()]), Ok(()));
        assert_eq!(injector.inject_generated_once("a", vec![".dup{}".to_owned()]), Ok(()));
        assert_eq!(injector.buffered_rules(), [".a{}"]);
        assert_eq!(injector.flush_to_string(), ".a{}");
        assert!(!injector.is_buffering());
        assert_eq!(injector.rendered_identifiers(), ["a"]);
    }

    #[test]
    fn style_tag_attribute_uses_suffix_until_reset() {
        let shared = Injector::shared("valor-styles", None);
        let mut injector = shared.borrow_mut();
        assert_eq!(injector.style_tag_attribute(), "data-valor-styles");
        injector.set_style_tag_suffix("admin");
        assert_eq!(injector.style_tag_attribute(), "data-valor-styles-admin");
        injector.reset();
        assert_eq!(injector.style_tag_attribute(), "data-valor-styles");
    }

    #[test]
    fn rehydrated_identifiers_count_as_injected() {
        let shared = Injector::shared("valor-styles", None);
        let mut injector = shared.borrow_mut();
        injector.rehydrate(["a", "b"]);
        assert!(injector.is_injected("b"));
        assert_eq!(injector.inject_generated_once("a", vec![".a{}".to_owned()]), Ok(()));
        assert!(injector.buffered_rules().is_empty());
    }
}
