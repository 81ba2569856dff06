//! Injection and caching of generated CSS.
//!
//! Generated rules are keyed by an identifier. The [`Injector`] appends the
//! rules for a key to a pending buffer at most once, and either flushes the
//! buffer into a style element of the host document on the next microtask
//! or keeps buffering until a caller drains it (server rendering).
//!
//! The document and the microtask primitive are traits so the injector runs
//! against a browser binding, the headless [`MemoryDocument`], or nothing at
//! all when only buffering is needed.

#![forbid(unsafe_code)]

mod host;
mod injector;
mod memory;
mod microtasks;

pub use host::{Host, HostDocument, MicrotaskQueue, StyleElementId, Task};
pub use injector::{Injector, SharedInjector};
pub use memory::MemoryDocument;
pub use microtasks::{DeferredQueue, TokioMicrotasks};

/// Misuse of the injector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InjectionError {
    #[error("Cannot buffer while already buffering")]
    AlreadyBuffering,
    #[error("Cannot automatically buffer without a document")]
    NoDocument,
}

/// A host document refused a single rule.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("rule `{rule}` rejected: {reason}")]
pub struct RuleRejected {
    pub rule: String,
    pub reason: String,
}
