//! CSS generation: from merged style maps to rule text.
//!
//! [`Generator`] bundles everything one generation pass needs (the selector
//! handler chain, value transformers, the vendor prefixer and the
//! `!important` flag). It is `Copy`, so nested passes derive a tweaked copy
//! instead of threading arguments:
//!
//! * [`Generator::generate_css`] expands special keys through the handler
//!   chain and returns the rules for one selector;
//! * [`Generator::generate_css_ruleset`] renders one flat declaration block;
//! * [`Generator::inject_style_once`] generates and hands the result to the
//!   injector unless the key was injected already.

mod generate;
mod ruleset;
mod transformers;

pub use generate::Generator;
pub use ruleset::unprefixed_name;
pub use transformers::{
    AnimationNameTransformer, DEFAULT_TRANSFORMERS, FontFamilyTransformer, ValueTransformer,
};
