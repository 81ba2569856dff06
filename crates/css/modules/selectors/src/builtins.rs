//! Built-in handlers for pseudo-selectors and at-rules.

use crate::{HandlerOutput, SelectorHandler, Subtree};

/// Keys starting with `:` extend the current selector, so
/// `{":hover": {...}}` under `.x` generates rules for `.x:hover`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PseudoSelectors;

impl SelectorHandler for PseudoSelectors {
    fn handle(
        &self,
        key: &str,
        base_selector: &str,
        generate_subtree: &mut Subtree<'_>,
    ) -> anyhow::Result<Option<HandlerOutput>> {
        if !key.starts_with(':') {
            return Ok(None);
        }
        let rules = generate_subtree(&format!("{base_selector}{key}"))?;
        Ok(Some(HandlerOutput::Rules(rules)))
    }
}

/// Keys starting with `@` wrap the rules generated for the unchanged
/// selector: `{"@media print": {...}}` becomes `@media print{.x{...}}`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AtRules;

impl SelectorHandler for AtRules {
    fn handle(
        &self,
        key: &str,
        base_selector: &str,
        generate_subtree: &mut Subtree<'_>,
    ) -> anyhow::Result<Option<HandlerOutput>> {
        if !key.starts_with('@') {
            return Ok(None);
        }
        let inner = generate_subtree(base_selector)?;
        Ok(Some(HandlerOutput::Rules(vec![format!(
            "{key}{{{}}}",
            inner.concat()
        )])))
    }
}
