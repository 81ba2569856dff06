//! Selector expansion.

use crate::{DEFAULT_TRANSFORMERS, ValueTransformer};
use anyhow::Result;
use core::fmt;
use css_injection::Injector;
use css_prefixer::Prefixer;
use css_selectors::{HandlerChain, HandlerOutput};
use css_style_map::{StyleMap, StyleValue};
use log::{trace, warn};

/// Settings for one generation pass.
#[derive(Clone, Copy)]
pub struct Generator<'ctx> {
    handlers: &'ctx HandlerChain,
    transformers: &'ctx [&'ctx dyn ValueTransformer],
    prefixer: &'ctx dyn Prefixer,
    use_important: bool,
}

impl<'ctx> Generator<'ctx> {
    /// A generator with the default value transformers.
    pub fn new(handlers: &'ctx HandlerChain, prefixer: &'ctx dyn Prefixer, use_important: bool) -> Self {
        Self {
            handlers,
            transformers: DEFAULT_TRANSFORMERS,
            prefixer,
            use_important,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_transformers(self, transformers: &'ctx [&'ctx dyn ValueTransformer]) -> Self {
        Self {
            transformers,
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_important(self, use_important: bool) -> Self {
        Self {
            use_important,
            ..self
        }
    }

    /// Same settings over a different handler chain.
    #[inline]
    pub const fn with_handlers<'short>(&self, handlers: &'short HandlerChain) -> Generator<'short>
    where
        'ctx: 'short,
    {
        Generator {
            handlers,
            transformers: self.transformers,
            prefixer: self.prefixer,
            use_important: self.use_important,
        }
    }

    #[inline]
    pub const fn transformers(&self) -> &'ctx [&'ctx dyn ValueTransformer] {
        self.transformers
    }

    #[inline]
    pub const fn prefixer(&self) -> &'ctx dyn Prefixer {
        self.prefixer
    }

    #[inline]
    pub const fn use_important(&self) -> bool {
        self.use_important
    }

    /// Generate the rules for `style_types` merged under `selector`.
    ///
    /// Later style maps win, both in value and in position. Every merged key
    /// is offered to the handler chain in order and the first handler that
    /// claims it contributes its rules right away. Unclaimed keys form the
    /// selector's own ruleset, which goes in front of everything else.
    ///
    /// # Errors
    /// Propagates handler, transformer and injection failures.
    pub fn generate_css(
        &self,
        selector: &str,
        style_types: &[&StyleMap],
        injector: &mut Injector,
    ) -> Result<Vec<String>> {
        let mut merged = StyleMap::new();
        for style in style_types {
            merged.add_style_type(style);
        }

        let mut plain = StyleMap::new();
        let mut generated = Vec::new();
        for (key, value) in merged.iter() {
            let mut claimed = None;
            for handler in self.handlers.iter() {
                let mut subtree = |nested_selector: &str| {
                    self.generate_subtree(key, value, nested_selector, injector)
                };
                claimed = handler.handle(key, selector, &mut subtree)?;
                if claimed.is_some() {
                    break;
                }
            }
            match claimed {
                Some(HandlerOutput::Rules(rules)) => generated.extend(rules),
                Some(HandlerOutput::Legacy(text)) => {
                    warn!(
                        "selector handler for `{key}` returned a string; handlers should return a list of rules"
                    );
                    generated.push(format!("@media all {{{text}}}"));
                }
                None => plain.set(key, value.clone(), true),
            }
        }

        let ruleset = self.generate_css_ruleset(selector, plain, injector)?;
        if !ruleset.is_empty() {
            generated.insert(0, ruleset);
        }
        Ok(generated)
    }

    fn generate_subtree(
        &self,
        key: &str,
        value: &StyleValue,
        selector: &str,
        injector: &mut Injector,
    ) -> Result<Vec<String>> {
        if let StyleValue::Nested(nested) = value {
            return self.generate_css(selector, &[nested], injector);
        }
        warn!("`{key}` was claimed by a selector handler but holds no style block");
        Ok(Vec::new())
    }

    /// Generate the rules for `definitions` under `selector` and inject them
    /// as `key`, unless `key` is already injected.
    ///
    /// # Errors
    /// Propagates generation failures and [`css_injection::InjectionError`].
    pub fn inject_style_once(
        &self,
        key: &str,
        selector: &str,
        definitions: &[&StyleMap],
        injector: &mut Injector,
    ) -> Result<()> {
        if injector.is_injected(key) {
            trace!("`{key}` already injected, skipping generation");
            return Ok(());
        }
        let generated = self.generate_css(selector, definitions, injector)?;
        injector.inject_generated_once(key, generated)?;
        Ok(())
    }
}

impl fmt::Debug for Generator<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Generator")
            .field("handlers", self.handlers)
            .field("transformers", &self.transformers.len())
            .field("use_important", &self.use_important)
            .finish_non_exhaustive()
    }
}
