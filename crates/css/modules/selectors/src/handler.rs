//! The handler seam.

/// Generates the rules for the nested styles of the key being handled,
/// under the selector passed in.
pub type Subtree<'sub> = dyn FnMut(&str) -> anyhow::Result<Vec<String>> + 'sub;

/// Rules produced by a handler for one key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandlerOutput {
    /// Finished rules, emitted in order.
    Rules(Vec<String>),
    /// Declarations returned as one bare string by handlers written against
    /// the older interface. Generation wraps it in `@media all{...}`.
    Legacy(String),
}

impl From<Vec<String>> for HandlerOutput {
    #[inline]
    fn from(rules: Vec<String>) -> Self {
        Self::Rules(rules)
    }
}

/// Expands one kind of special key.
///
/// `handle` returns `Ok(None)` for keys it does not own, so the next handler
/// gets a chance. A claiming handler usually calls `generate_subtree` with
/// the selector the nested styles should live under.
pub trait SelectorHandler {
    /// Claim `key` (or not) while generating under `base_selector`.
    ///
    /// # Errors
    /// Propagates failures from `generate_subtree` or from the handler itself.
    fn handle(
        &self,
        key: &str,
        base_selector: &str,
        generate_subtree: &mut Subtree<'_>,
    ) -> anyhow::Result<Option<HandlerOutput>>;
}

impl<F> SelectorHandler for F
where
    F: Fn(&str, &str, &mut Subtree<'_>) -> anyhow::Result<Option<HandlerOutput>>,
{
    #[inline]
    fn handle(
        &self,
        key: &str,
        base_selector: &str,
        generate_subtree: &mut Subtree<'_>,
    ) -> anyhow::Result<Option<HandlerOutput>> {
        self(key, base_selector, generate_subtree)
    }
}
