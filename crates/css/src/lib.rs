//! Styles written as data, turned into class names.
//!
//! A [`Styles`] instance creates sheets of named definitions and, when a
//! combination of them is used, generates the CSS for it once, injects it
//! into the host document (or a buffer on the server) and returns a class
//! name derived from the definitions' content.
//!
//! ```no_run
//! use serde_json::json;
//! use valor_styles::{StyleConfig, Styles};
//!
//! # fn main() -> anyhow::Result<()> {
//! let styles = Styles::detached(&StyleConfig::default());
//! let sheet = styles.create_from_json(&json!({
//!     "button": {"color": "red", ":hover": {"color": "blue"}}
//! }))?;
//! let page = styles.render_static(|| styles.css(&[sheet.get("button").into()]))?;
//! println!("<style>{}</style>", page.css.content);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod config;
mod registry;
mod server;
mod styles;
mod test_utils;

pub use config::{DEFAULT_MARKER, StyleConfig};
pub use registry::{DefinitionArg, Sheet, StyleDefinition};
pub use server::{StaticCss, StaticRender};
pub use styles::{Styles, default_selector_handlers};

pub use css_injection::{
    DeferredQueue, Host, HostDocument, InjectionError, MemoryDocument, MicrotaskQueue,
    RuleRejected, StyleElementId, Task, TokioMicrotasks,
};
pub use css_orchestrator::{Generator, ValueTransformer};
pub use css_prefixer::{NoPrefixer, Prefixer, StaticPrefixer};
pub use css_selectors::{Extension, HandlerChain, HandlerOutput, SelectorHandler, Subtree};
pub use css_style_map::{FontFace, Keyframes, StyleMap, StyleMapError, StyleValue};
