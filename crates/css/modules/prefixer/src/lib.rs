//! Vendor prefixing for flat declaration maps.
//!
//! [`prefix_all`] takes the declarations of one ruleset and adds the
//! engine-specific variants older browsers need: prefixed property names
//! (`WebkitTransform` ahead of `transform`) and prefixed values (`display`
//! expanding to every flexbox spelling). Ruleset generation only sees the
//! [`Prefixer`] trait, so callers can swap in their own tables.

#![forbid(unsafe_code)]

mod data;
mod plugins;

pub use data::{PREFIX_MAP, css_prefix, required_prefixes};
pub use plugins::{is_prefixed_value, run_plugins};

use css_style_map::{StyleMap, StyleValue};

/// Expands declarations with their vendor-prefixed variants.
pub trait Prefixer {
    /// Return `declarations` with prefixed properties and values added.
    fn prefix(&self, declarations: StyleMap) -> StyleMap;
}

/// Prefixes for every browser in the static table.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticPrefixer;

impl Prefixer for StaticPrefixer {
    #[inline]
    fn prefix(&self, declarations: StyleMap) -> StyleMap {
        prefix_all(declarations)
    }
}

/// Leaves declarations untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPrefixer;

impl Prefixer for NoPrefixer {
    #[inline]
    fn prefix(&self, declarations: StyleMap) -> StyleMap {
        declarations
    }
}

/// Upper-case the first character.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Add every prefixed variant to `style`.
///
/// Properties present on entry are visited in order; declarations the
/// plugins add along the way are not revisited. List values run the
/// plugins per entry and keep each resulting value once. Nested maps are
/// prefixed recursively.
#[must_use]
pub fn prefix_all(mut style: StyleMap) -> StyleMap {
    let properties: Vec<String> = style.keys().map(ToOwned::to_owned).collect();
    for property in properties {
        let Some(value) = style.get(&property).cloned() else {
            continue;
        };
        match value {
            StyleValue::Nested(nested) => {
                style.set(property.as_str(), StyleValue::Nested(prefix_all(nested)), false);
            }
            StyleValue::List(items) => {
                let mut combined = Vec::with_capacity(items.len());
                for item in items {
                    let processed = run_plugins(&property, &item, &mut style).unwrap_or(item);
                    add_new_values_only(&mut combined, processed);
                }
                if !combined.is_empty() {
                    style.set(property.as_str(), StyleValue::List(combined), false);
                }
            }
            single => {
                if let Some(processed) = run_plugins(&property, &single, &mut style) {
                    style.set(property.as_str(), processed, false);
                }
                prefix_property(&property, &mut style);
            }
        }
    }
    style
}

/// Insert the prefixed names `property` requires directly before it, each
/// carrying the property's current value.
pub fn prefix_property(property: &str, style: &mut StyleMap) {
    let Some(prefixes) = required_prefixes(property) else {
        return;
    };
    let Some(value) = style.get(property).cloned() else {
        return;
    };
    let capitalized = capitalize(property);
    for prefix in prefixes {
        style.insert_before(property, format!("{prefix}{capitalized}"), value.clone());
    }
}

fn add_new_values_only(combined: &mut Vec<StyleValue>, value: StyleValue) {
    match value {
        StyleValue::List(items) => {
            for item in items {
                add_new_values_only(combined, item);
            }
        }
        single => {
            if !combined.contains(&single) {
                combined.push(single);
            }
        }
    }
}
