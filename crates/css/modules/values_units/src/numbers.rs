//! Numeric values and the properties that take them without units.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Properties whose numeric values are not lengths.
const UNITLESS_PROPERTIES: &[&str] = &[
    "animationIterationCount",
    "borderImageOutset",
    "borderImageSlice",
    "borderImageWidth",
    "boxFlex",
    "boxFlexGroup",
    "boxOrdinalGroup",
    "columnCount",
    "flex",
    "flexGrow",
    "flexPositive",
    "flexShrink",
    "flexNegative",
    "flexOrder",
    "gridRow",
    "gridColumn",
    "fontWeight",
    "lineClamp",
    "lineHeight",
    "opacity",
    "order",
    "orphans",
    "tabSize",
    "widows",
    "zIndex",
    "zoom",
    // SVG
    "fillOpacity",
    "floodOpacity",
    "stopOpacity",
    "strokeDasharray",
    "strokeDashoffset",
    "strokeMiterlimit",
    "strokeOpacity",
    "strokeWidth",
];

const VENDOR_PREFIXES: &[&str] = &["Webkit", "ms", "Moz", "O"];

/// Unitless properties plus every vendor-prefixed spelling of them.
static UNITLESS: Lazy<HashSet<String>> = Lazy::new(|| {
    let mut set = HashSet::with_capacity(UNITLESS_PROPERTIES.len() * (VENDOR_PREFIXES.len() + 1));
    for property in UNITLESS_PROPERTIES {
        set.insert((*property).to_owned());
        for prefix in VENDOR_PREFIXES {
            set.insert(prefix_key(prefix, property));
        }
    }
    set
});

/// `prefix` + `key` with the first letter of `key` uppercased.
fn prefix_key(prefix: &str, key: &str) -> String {
    let mut chars = key.chars();
    let mut out = String::with_capacity(prefix.len() + key.len());
    out.push_str(prefix);
    if let Some(first) = chars.next() {
        out.push(first.to_ascii_uppercase());
        out.push_str(chars.as_str());
    }
    out
}

/// True when numbers for `property` are emitted without a `px` suffix.
#[inline]
pub fn is_unitless_number(property: &str) -> bool {
    UNITLESS.contains(property)
}

/// Format a number the way script engines print them: no trailing `.0`
/// for integral values and no negative zero.
///
/// Magnitudes from `1e21` up and below `1e-6` use exponent notation with a
/// signed exponent (`1e+21`, `1.5e-7`).
pub fn format_number(number: f64) -> String {
    if number.is_nan() {
        return "NaN".to_owned();
    }
    if number.is_infinite() {
        let text = if number.is_sign_negative() { "-Infinity" } else { "Infinity" };
        return text.to_owned();
    }
    if number == 0.0 {
        return "0".to_owned();
    }
    let magnitude = number.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{number:e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        };
    }
    number.to_string()
}
