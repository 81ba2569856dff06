//! Ordered style maps, the working storage behind every stylesheet merge.
//!
//! Style definitions are nested maps from camel-cased property names,
//! pseudo-selector keys (`:hover`) and at-rule keys (`@media print`) to
//! values. Merging several definitions must keep both the last-written value
//! and the last-written position of every key, because generated CSS relies
//! on declaration order for the cascade and for vendor-prefix placement.

#![forbid(unsafe_code)]

mod hash;
mod json;
mod map;
mod value;

pub use hash::{hash_object, hash_string, to_base36};
pub use json::json_kind;
pub use map::StyleMap;
pub use value::{FontFace, Keyframes, StyleValue};

/// Property whose object values describe `@font-face` rules.
pub const FONT_FAMILY: &str = "fontFamily";

/// Property whose object values describe `@keyframes` blocks.
pub const ANIMATION_NAME: &str = "animationName";

/// Errors raised while converting external input into style maps.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StyleMapError {
    /// A style definition (or a sheet of them) was not a JSON object.
    #[error("style definitions must be objects, found {0}")]
    NotAnObject(&'static str),
}
