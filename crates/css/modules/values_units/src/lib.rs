//! Property and value codec: turns style-map entries into declaration text.
//!
//! Property names arrive camel-cased (`backgroundColor`) and leave
//! kebab-cased (`background-color`). Values arrive as numbers or strings and
//! leave as CSS text, with `px` appended to numbers for properties that take
//! lengths.

#![forbid(unsafe_code)]

mod names;
mod numbers;

pub use names::kebabify_style_name;
pub use numbers::{format_number, is_unitless_number};

use css_style_map::StyleValue;

/// Suffix appended to every declaration value in important mode.
pub const IMPORTANT_SUFFIX: &str = " !important";

/// Stringify a terminal value for `property`.
///
/// Numbers become `<n>px` unless the property is unitless. Strings pass
/// through. Tombstones and structured values have no declaration text and
/// yield `None`.
pub fn stringify_value(property: &str, value: &StyleValue) -> Option<String> {
    match value {
        StyleValue::Number(number) => {
            let text = format_number(*number);
            if is_unitless_number(property) {
                Some(text)
            } else {
                Some(text + "px")
            }
        }
        StyleValue::Str(text) => Some(text.clone()),
        StyleValue::Null
        | StyleValue::List(_)
        | StyleValue::Nested(_)
        | StyleValue::FontFace(_)
        | StyleValue::Keyframes(_) => None,
    }
}

/// Append ` !important` unless `value` already ends with it.
///
/// The common case has no `!` ten bytes from the end, which settles it
/// without comparing the whole suffix.
pub fn importantify(value: String) -> String {
    let bang_at = value.len().checked_sub(10);
    let maybe_important =
        bang_at.is_some_and(|index| value.as_bytes().get(index) == Some(&b'!'));
    if maybe_important && value.ends_with(IMPORTANT_SUFFIX) {
        return value;
    }
    value + IMPORTANT_SUFFIX
}

/// [`stringify_value`] followed by [`importantify`].
#[inline]
pub fn stringify_and_importantify_value(property: &str, value: &StyleValue) -> Option<String> {
    stringify_value(property, value).map(importantify)
}
