//! Selector handlers: how special style keys expand into CSS rules.
//!
//! A style definition may contain keys that are not properties, such as
//! `:hover` or `@media (max-width: 600px)`. During generation every key is
//! offered to an ordered chain of [`SelectorHandler`]s. The first handler
//! that claims a key decides which selector its nested styles are generated
//! under and how the resulting rules are wrapped.
//!
//! Built-ins come first ([`PseudoSelectors`], then [`AtRules`]); handlers
//! from extensions are appended after them.

mod builtins;
mod chain;
mod handler;

pub use builtins::{AtRules, PseudoSelectors};
pub use chain::{Extension, HandlerChain};
pub use handler::{HandlerOutput, SelectorHandler, Subtree};
