//! Rendering one flat declaration block.

use crate::Generator;
use anyhow::Result;
use css_injection::Injector;
use css_style_map::{StyleMap, StyleValue};
use css_values_units::{kebabify_style_name, stringify_and_importantify_value, stringify_value};
use std::collections::HashSet;

/// Name of the standard property a prefixed name was derived from.
///
/// `WebkitTransition` → `transition`, `MozTransition` → `transition`,
/// `msTransform` / `MsTransform` → `transform`. The prefix is recognized by
/// shape only: a leading `W` means six characters of prefix, a second
/// character `o` means three, anything else two.
pub fn unprefixed_name(name: &str) -> Option<String> {
    let offset = if name.starts_with('W') {
        6
    } else if name.get(1..2) == Some("o") {
        3
    } else {
        2
    };
    let head = name.get(offset..=offset)?;
    let tail = name.get(offset + 1..)?;
    Some(head.to_ascii_lowercase() + tail)
}

impl Generator<'_> {
    /// Render `declarations` as `selector{...}`.
    ///
    /// Value transformers run first and may inject side rules such as
    /// `@font-face`. The prefixer then adds vendor variants; each name it
    /// introduces is placed directly before the standard property it came
    /// from, or at the very front when that property is not declared. List
    /// values emit one declaration per entry. Returns an empty string when
    /// nothing renders.
    ///
    /// # Errors
    /// Propagates transformer failures.
    pub fn generate_css_ruleset(
        &self,
        selector: &str,
        mut declarations: StyleMap,
        injector: &mut Injector,
    ) -> Result<String> {
        for transformer in self.transformers() {
            let property = transformer.property();
            let Some(value) = declarations.get(property) else {
                continue;
            };
            let transformed = transformer.transform(value, self, injector)?;
            declarations.set(property, transformed, false);
        }

        let mut order: Vec<String> = declarations.keys().map(ToOwned::to_owned).collect();
        let original: HashSet<String> = order.iter().cloned().collect();
        let prefixed = self.prefixer().prefix(declarations);

        for name in prefixed.keys() {
            if original.contains(name) {
                continue;
            }
            let sibling = unprefixed_name(name)
                .filter(|standard| original.contains(standard))
                .and_then(|standard| order.iter().position(|key| *key == standard));
            order.insert(sibling.unwrap_or(0), name.to_owned());
        }

        let mut body = String::new();
        for property in &order {
            match prefixed.get(property) {
                Some(StyleValue::List(items)) => {
                    for item in items {
                        self.push_declaration(&mut body, property, item);
                    }
                }
                Some(value) => self.push_declaration(&mut body, property, value),
                None => {}
            }
        }

        if body.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{selector}{{{body}}}"))
    }

    fn push_declaration(&self, body: &mut String, property: &str, value: &StyleValue) {
        let text = if self.use_important() {
            stringify_and_importantify_value(property, value)
        } else {
            stringify_value(property, value)
        };
        if let Some(text) = text {
            body.push_str(&kebabify_style_name(property));
            body.push(':');
            body.push_str(&text);
            body.push(';');
        }
    }
}
