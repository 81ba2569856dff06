//! Ordered handler chains and the extensions that grow them.

use crate::{AtRules, PseudoSelectors, SelectorHandler};
use core::fmt;
use std::rc::Rc;

/// Handlers tried in order for every special key.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Rc<dyn SelectorHandler>>,
}

impl HandlerChain {
    /// The built-ins: pseudo-selectors, then at-rules.
    pub fn defaults() -> Self {
        Self {
            handlers: vec![Rc::new(PseudoSelectors), Rc::new(AtRules)],
        }
    }

    /// A chain with no handlers; every key is treated as a property.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A new chain with the handlers of `extensions` appended. `self` is
    /// left unchanged.
    #[must_use]
    pub fn extended<'ext, I>(&self, extensions: I) -> Self
    where
        I: IntoIterator<Item = &'ext Extension>,
    {
        let mut handlers = self.handlers.clone();
        handlers.extend(
            extensions
                .into_iter()
                .filter_map(|extension| extension.selector_handler.clone()),
        );
        Self { handlers }
    }

    #[inline]
    pub fn push(&mut self, handler: Rc<dyn SelectorHandler>) {
        self.handlers.push(handler);
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &dyn SelectorHandler> {
        self.handlers.iter().map(AsRef::as_ref)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerChain {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("HandlerChain")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// A bundle of optional additions to a styles instance.
///
/// Only selector handlers exist today; an extension without one adds
/// nothing.
#[derive(Clone, Default)]
pub struct Extension {
    pub selector_handler: Option<Rc<dyn SelectorHandler>>,
}

impl Extension {
    /// An extension contributing `handler`.
    pub fn selector_handler<H: SelectorHandler + 'static>(handler: H) -> Self {
        Self {
            selector_handler: Some(Rc::new(handler)),
        }
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Extension")
            .field("selector_handler", &self.selector_handler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HandlerOutput, Subtree};

    struct Descendant;

    impl SelectorHandler for Descendant {
        fn handle(
            &self,
            key: &str,
            base_selector: &str,
            generate_subtree: &mut Subtree<'_>,
        ) -> anyhow::Result<Option<HandlerOutput>> {
            let Some(ancestor) = key.strip_prefix('>') else {
                return Ok(None);
            };
            Ok(Some(generate_subtree(&format!(".{ancestor} {base_selector}"))?.into()))
        }
    }

    #[test]
    fn defaults_are_pseudo_then_at_rules() {
        assert_eq!(HandlerChain::defaults().len(), 2);
        assert!(HandlerChain::empty().is_empty());
    }

    #[test]
    fn extending_appends_and_keeps_original() -> anyhow::Result<()> {
        let base = HandlerChain::defaults();
        let extended = base.extended(&[Extension::selector_handler(Descendant), Extension::default()]);
        assert_eq!(base.len(), 2);
        assert_eq!(extended.len(), 3);

        let mut generate = |selector: &str| -> anyhow::Result<Vec<String>> {
            Ok(vec![format!("{selector}{{}}")])
        };
        let claimed = extended
            .iter()
            .map(|handler| handler.handle(">parent", ".child", &mut generate))
            .find_map(Result::transpose)
            .transpose()?;
        assert_eq!(
            claimed,
            Some(HandlerOutput::Rules(vec![".parent .child{}".to_owned()]))
        );
        Ok(())
    }
}
