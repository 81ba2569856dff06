//! The styles instance: sheet creation and class-name injection.

use crate::StyleConfig;
use crate::registry::{DefinitionArg, Selection, Sheet};
use anyhow::{Context as _, Result};
use css_injection::{Host, Injector, SharedInjector};
use css_orchestrator::Generator;
use css_prefixer::{Prefixer, StaticPrefixer};
use css_selectors::{Extension, HandlerChain};
use css_style_map::{StyleMap, StyleMapError, hash_string, to_base36};
use log::debug;
use serde_json::Value;
use std::cell::{Cell, RefMut};
use std::rc::Rc;

/// Separator between readable identifiers in a combined class name.
const CLASS_SEPARATOR: &str = "-o_O-";

/// Entry point for defining styles and turning them into class names.
///
/// Clones share the injection cache and the minify switch. Instances made by
/// [`Styles::extend`] do too, only their selector handlers differ.
#[derive(Clone)]
pub struct Styles {
    injector: SharedInjector,
    handlers: HandlerChain,
    minify: Rc<Cell<bool>>,
    use_important: bool,
    prefixer: Rc<dyn Prefixer>,
}

impl Styles {
    /// Build an instance from `config`, flushing into `host` when given.
    pub fn new(config: &StyleConfig, host: Option<Host>) -> Self {
        let injector = Injector::shared(config.marker.clone(), host);
        if !config.style_tag_suffix.is_empty() {
            injector
                .borrow_mut()
                .set_style_tag_suffix(config.style_tag_suffix.clone());
        }
        Self {
            injector,
            handlers: HandlerChain::defaults(),
            minify: Rc::new(Cell::new(config.minify)),
            use_important: config.use_important,
            prefixer: Rc::new(StaticPrefixer),
        }
    }

    /// Every declaration gets `!important`.
    #[inline]
    pub fn with_important(host: Option<Host>) -> Self {
        Self::new(&StyleConfig::default(), host)
    }

    /// Declarations are emitted as written.
    #[inline]
    pub fn without_important(host: Option<Host>) -> Self {
        let config = StyleConfig {
            use_important: false,
            ..StyleConfig::default()
        };
        Self::new(&config, host)
    }

    /// An instance with no host document. Injection outside of
    /// [`Styles::render_static`] or suppressed injection fails.
    #[inline]
    pub fn detached(config: &StyleConfig) -> Self {
        Self::new(config, None)
    }

    /// Replace the vendor prefixer used for every ruleset.
    #[must_use]
    pub fn with_prefixer<P: Prefixer + 'static>(mut self, prefixer: P) -> Self {
        self.prefixer = Rc::new(prefixer);
        self
    }

    /// Turn named style bodies into definitions, in the order given.
    pub fn create<I, K>(&self, entries: I) -> Sheet
    where
        I: IntoIterator<Item = (K, StyleMap)>,
        K: Into<String>,
    {
        Sheet::from_entries(entries, self.minify.get())
    }

    /// [`Styles::create`] for a JSON object of named style objects.
    ///
    /// # Errors
    /// [`StyleMapError`] when the sheet or one of its entries is not an
    /// object.
    pub fn create_from_json(&self, sheet: &Value) -> Result<Sheet, StyleMapError> {
        Sheet::from_json(sheet, self.minify.get())
    }

    /// Class name for `args`, injecting its rules on first use.
    ///
    /// Skipped and empty arguments contribute nothing; with nothing left the
    /// class name is empty and nothing is injected.
    ///
    /// # Errors
    /// Generation failures, injecting outside a buffer without a host, or
    /// calling back into this instance while it is generating.
    pub fn css(&self, args: &[DefinitionArg<'_>]) -> Result<String> {
        self.inject_and_get_class_name(self.use_important, args, &self.handlers)
    }

    /// The work behind [`Styles::css`], with explicit settings.
    ///
    /// # Errors
    /// See [`Styles::css`].
    pub fn inject_and_get_class_name(
        &self,
        use_important: bool,
        args: &[DefinitionArg<'_>],
        handlers: &HandlerChain,
    ) -> Result<String> {
        let selection = Selection::collect(args);
        if selection.identifiers.is_empty() {
            return Ok(String::new());
        }
        let class_name = self.class_name(&selection);

        let generator = Generator::new(handlers, self.prefixer.as_ref(), use_important);
        let mut injector = self.injector_mut()?;
        generator
            .inject_style_once(
                &class_name,
                &format!(".{class_name}"),
                &selection.bodies,
                &mut injector,
            )
            .with_context(|| format!("failed to inject styles for `{class_name}`"))?;
        Ok(class_name)
    }

    fn class_name(&self, selection: &Selection<'_>) -> String {
        if !self.minify.get() {
            return selection.identifiers.join(CLASS_SEPARATOR);
        }
        if let [identifier] = selection.identifiers.as_slice() {
            return format!("_{identifier}");
        }
        let remainder = u32::try_from(selection.serialized_len % 36).unwrap_or_default();
        format!(
            "_{}{}",
            hash_string(&selection.identifiers.join(",")),
            to_base36(remainder)
        )
    }

    /// Mark identifiers rendered elsewhere (by a server) as injected.
    ///
    /// # Errors
    /// When called while this instance is generating.
    pub fn rehydrate<I, S>(&self, identifiers: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.injector_mut()?.rehydrate(identifiers);
        Ok(())
    }

    /// Switch between hashed and readable names for sheets created and class
    /// names computed from now on.
    #[inline]
    pub fn minify(&self, minify: bool) {
        self.minify.set(minify);
    }

    #[inline]
    pub fn is_minified(&self) -> bool {
        self.minify.get()
    }

    /// A new instance whose handler chain has the selector handlers of
    /// `extensions` appended. The cache is shared with `self`.
    #[must_use]
    pub fn extend(&self, extensions: &[Extension]) -> Self {
        let handlers = self.handlers.extended(extensions);
        debug!(
            "extended selector handlers from {} to {}",
            self.handlers.len(),
            handlers.len()
        );
        Self {
            handlers,
            ..self.clone()
        }
    }

    /// Flush pending rules into the host document now.
    ///
    /// # Errors
    /// Without a host document, or when called while generating.
    pub fn flush_to_style_tag(&self) -> Result<()> {
        self.injector_mut()?.flush_to_document()?;
        Ok(())
    }

    /// Flush into `style[data-<marker>-<suffix>]` from now on.
    ///
    /// # Errors
    /// When called while this instance is generating.
    pub fn set_style_tag_suffix(&self, suffix: impl Into<String>) -> Result<()> {
        self.injector_mut()?.set_style_tag_suffix(suffix);
        Ok(())
    }

    #[inline]
    pub const fn handlers(&self) -> &HandlerChain {
        &self.handlers
    }

    #[inline]
    pub const fn use_important(&self) -> bool {
        self.use_important
    }

    #[inline]
    pub const fn injector(&self) -> &SharedInjector {
        &self.injector
    }

    pub(crate) fn injector_mut(&self) -> Result<RefMut<'_, Injector>> {
        self.injector
            .try_borrow_mut()
            .context("style injector is already in use")
    }
}

/// The built-in chain: pseudo-selectors, then at-rules.
#[inline]
pub fn default_selector_handlers() -> HandlerChain {
    HandlerChain::defaults()
}

impl core::fmt::Debug for Styles {
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        formatter
            .debug_struct("Styles")
            .field("handlers", &self.handlers)
            .field("minify", &self.minify.get())
            .field("use_important", &self.use_important)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn buffered(config: &StyleConfig) -> Result<Styles> {
        let styles = Styles::detached(config);
        styles.injector_mut()?.start_buffering()?;
        Ok(styles)
    }

    #[test]
    fn readable_names_join_identifiers() -> Result<()> {
        let styles = buffered(&StyleConfig::default())?;
        let sheet = styles.create_from_json(&json!({"a": {"color": "red"}, "b": {"margin": 0}}))?;
        let (Some(first), Some(second)) = (sheet.get("a"), sheet.get("b")) else {
            anyhow::bail!("missing definitions");
        };
        let class_name = styles.css(&[first.into(), second.into()])?;
        assert_eq!(
            class_name,
            format!("{}-o_O-{}", first.identifier(), second.identifier())
        );
        Ok(())
    }

    #[test]
    fn minified_names_hash_the_identifiers() -> Result<()> {
        let config = StyleConfig {
            minify: true,
            ..StyleConfig::default()
        };
        let styles = buffered(&config)?;
        let sheet = styles.create_from_json(&json!({"a": {"color": "red"}, "b": {"margin": 0}}))?;
        let (Some(first), Some(second)) = (sheet.get("a"), sheet.get("b")) else {
            anyhow::bail!("missing definitions");
        };
        assert_eq!(styles.css(&[first.into()])?, format!("_{}", first.identifier()));

        let total = first.serialized_len() + second.serialized_len();
        let expected = format!(
            "_{}{}",
            hash_string(&format!("{},{}", first.identifier(), second.identifier())),
            to_base36(u32::try_from(total % 36)?)
        );
        assert_eq!(styles.css(&[first.into(), second.into()])?, expected);
        Ok(())
    }

    #[test]
    fn nothing_selected_is_an_empty_class() -> Result<()> {
        let styles = Styles::detached(&StyleConfig::default());
        assert_eq!(styles.css(&[false.into(), DefinitionArg::Skip])?, "");
        Ok(())
    }

    #[test]
    fn detached_injection_without_buffer_fails() -> Result<()> {
        let styles = Styles::detached(&StyleConfig::default());
        let sheet = styles.create([("red", StyleMap::new().with("color", "red"))]);
        let Some(red) = sheet.get("red") else {
            anyhow::bail!("missing definition");
        };
        assert!(matches!(styles.css(&[red.into()]), Err(_)));
        Ok(())
    }

    #[test]
    fn configured_suffix_reaches_the_style_tag() {
        let config = StyleConfig {
            style_tag_suffix: "app".to_owned(),
            ..StyleConfig::default()
        };
        let styles = Styles::detached(&config);
        assert_eq!(
            styles.injector().borrow().style_tag_attribute(),
            "data-valor-styles-app"
        );
    }
}
