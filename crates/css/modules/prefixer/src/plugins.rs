//! Value plugins: rewrite values that need vendor spellings.
//!
//! A plugin sees one property/value pair plus the whole declaration map. It
//! either returns a replacement value or `None`, and may add sibling
//! declarations (the flexbox plugins only do the latter).

use crate::capitalize;
use crate::data::{PREFIX_MAP, css_prefix};
use css_style_map::{StyleMap, StyleValue};
use css_values_units::kebabify_style_name;

pub type Plugin = fn(&str, &StyleValue, &mut StyleMap) -> Option<StyleValue>;

/// Plugins in the order they are tried. The first replacement wins.
pub const PLUGINS: &[Plugin] = &[
    calc,
    cross_fade,
    cursor,
    filter,
    flex,
    flexbox_ie,
    flexbox_old,
    gradient,
    image_set,
    position,
    sizing,
    transition,
];

const ALL_PREFIXES: &[&str] = &["-webkit-", "-moz-", ""];
const WEBKIT_ONLY: &[&str] = &["-webkit-", ""];

const GRADIENTS: &[&str] = &[
    "repeating-linear-gradient",
    "repeating-radial-gradient",
    "linear-gradient",
    "radial-gradient",
];

const TRANSITION_PROPERTIES: &[&str] = &[
    "transition",
    "transitionProperty",
    "WebkitTransition",
    "WebkitTransitionProperty",
    "MozTransition",
    "MozTransitionProperty",
];

const SIZING_PROPERTIES: &[&str] = &[
    "maxHeight",
    "maxWidth",
    "width",
    "height",
    "columnWidth",
    "minWidth",
    "minHeight",
];

const SIZING_VALUES: &[&str] = &[
    "min-content",
    "max-content",
    "fill-available",
    "fit-content",
    "contain-floats",
];

/// Run every plugin in order and return the first replacement.
pub fn run_plugins(property: &str, value: &StyleValue, style: &mut StyleMap) -> Option<StyleValue> {
    PLUGINS
        .iter()
        .find_map(|plugin| plugin(property, value, style))
}

/// True when `value` already carries a vendor spelling.
#[inline]
pub fn is_prefixed_value(value: &str) -> bool {
    value.contains("-webkit-") || value.contains("-moz-") || value.contains("-ms-")
}

fn string_list<I: IntoIterator<Item = String>>(items: I) -> StyleValue {
    StyleValue::List(items.into_iter().map(StyleValue::Str).collect())
}

/// Prefix every occurrence of `function` (including its open paren).
fn prefix_function(value: &StyleValue, function: &str, prefixes: &[&str]) -> Option<StyleValue> {
    let text = value.as_str()?;
    if is_prefixed_value(text) || !text.contains(function) {
        return None;
    }
    Some(string_list(prefixes.iter().map(|prefix| {
        text.replace(function, &format!("{prefix}{function}"))
    })))
}

fn calc(_property: &str, value: &StyleValue, _style: &mut StyleMap) -> Option<StyleValue> {
    prefix_function(value, "calc(", ALL_PREFIXES)
}

fn cross_fade(_property: &str, value: &StyleValue, _style: &mut StyleMap) -> Option<StyleValue> {
    prefix_function(value, "cross-fade(", WEBKIT_ONLY)
}

fn filter(_property: &str, value: &StyleValue, _style: &mut StyleMap) -> Option<StyleValue> {
    prefix_function(value, "filter(", WEBKIT_ONLY)
}

fn image_set(_property: &str, value: &StyleValue, _style: &mut StyleMap) -> Option<StyleValue> {
    prefix_function(value, "image-set(", WEBKIT_ONLY)
}

fn cursor(property: &str, value: &StyleValue, _style: &mut StyleMap) -> Option<StyleValue> {
    let text = value.as_str()?;
    if property != "cursor" || !matches!(text, "zoom-in" | "zoom-out" | "grab" | "grabbing") {
        return None;
    }
    Some(string_list(
        ALL_PREFIXES.iter().map(|prefix| format!("{prefix}{text}")),
    ))
}

fn flex(property: &str, value: &StyleValue, _style: &mut StyleMap) -> Option<StyleValue> {
    if property != "display" {
        return None;
    }
    let variants: &[&str] = match value.as_str()? {
        "flex" => &["-webkit-box", "-moz-box", "-ms-flexbox", "-webkit-flex", "flex"],
        "inline-flex" => &[
            "-webkit-inline-box",
            "-moz-inline-box",
            "-ms-inline-flexbox",
            "-webkit-inline-flex",
            "inline-flex",
        ],
        _ => return None,
    };
    Some(string_list(variants.iter().map(|variant| (*variant).to_owned())))
}

/// Copy `value` to `alternative`, translating the keyword when a
/// translation exists.
fn set_alternative(
    style: &mut StyleMap,
    alternative: &str,
    value: &StyleValue,
    translate: fn(&str) -> Option<&'static str>,
) {
    let translated = value
        .as_str()
        .and_then(translate)
        .map_or_else(|| value.clone(), StyleValue::from);
    style.set(alternative, translated, false);
}

/// IE 10 spellings of the flexbox properties.
fn flexbox_ie(property: &str, value: &StyleValue, style: &mut StyleMap) -> Option<StyleValue> {
    let alternative = match property {
        "alignContent" => "msFlexLinePack",
        "alignSelf" => "msFlexItemAlign",
        "alignItems" => "msFlexAlign",
        "justifyContent" => "msFlexPack",
        "order" => "msFlexOrder",
        "flexGrow" => "msFlexPositive",
        "flexShrink" => "msFlexNegative",
        "flexBasis" => "msFlexPreferredSize",
        _ => return None,
    };
    set_alternative(style, alternative, value, |keyword| match keyword {
        "space-around" => Some("distribute"),
        "space-between" => Some("justify"),
        "flex-start" => Some("start"),
        "flex-end" => Some("end"),
        _ => None,
    });
    None
}

/// 2009 box-model spellings of the flexbox properties.
fn flexbox_old(property: &str, value: &StyleValue, style: &mut StyleMap) -> Option<StyleValue> {
    if property == "flexDirection"
        && let Some(direction) = value.as_str()
    {
        let orient = if direction.contains("column") { "vertical" } else { "horizontal" };
        let order = if direction.contains("reverse") { "reverse" } else { "normal" };
        style.set("WebkitBoxOrient", orient.into(), false);
        style.set("WebkitBoxDirection", order.into(), false);
    }
    let alternative = match property {
        "alignItems" => "WebkitBoxAlign",
        "justifyContent" => "WebkitBoxPack",
        "flexWrap" => "WebkitBoxLines",
        _ => return None,
    };
    set_alternative(style, alternative, value, |keyword| match keyword {
        "space-around" | "space-between" => Some("justify"),
        "flex-start" => Some("start"),
        "flex-end" => Some("end"),
        "wrap-reverse" | "wrap" => Some("multiple"),
        _ => None,
    });
    None
}

fn gradient(_property: &str, value: &StyleValue, _style: &mut StyleMap) -> Option<StyleValue> {
    let text = value.as_str()?;
    if is_prefixed_value(text) || !contains_gradient(text) {
        return None;
    }
    Some(string_list(
        ALL_PREFIXES
            .iter()
            .map(|prefix| prefix_gradients(text, prefix)),
    ))
}

fn gradient_at(rest: &str) -> Option<usize> {
    GRADIENTS
        .iter()
        .find(|name| {
            rest.get(..name.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(name))
        })
        .map(|name| name.len())
}

fn contains_gradient(text: &str) -> bool {
    let lowered = text.to_ascii_lowercase();
    GRADIENTS.iter().any(|name| lowered.contains(name))
}

/// Put `prefix` in front of every gradient function name, matching names
/// case-insensitively and keeping their original spelling.
fn prefix_gradients(text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len() + prefix.len() * 2);
    let mut rest = text;
    while !rest.is_empty() {
        if let Some(name_len) = gradient_at(rest) {
            let (name, tail) = rest.split_at(name_len);
            out.push_str(prefix);
            out.push_str(name);
            rest = tail;
        } else {
            let mut chars = rest.chars();
            if let Some(character) = chars.next() {
                out.push(character);
            }
            rest = chars.as_str();
        }
    }
    out
}

fn position(property: &str, value: &StyleValue, _style: &mut StyleMap) -> Option<StyleValue> {
    (property == "position" && value.as_str() == Some("sticky"))
        .then(|| string_list(["-webkit-sticky".to_owned(), "sticky".to_owned()]))
}

fn sizing(property: &str, value: &StyleValue, _style: &mut StyleMap) -> Option<StyleValue> {
    let text = value.as_str()?;
    if !SIZING_PROPERTIES.contains(&property) || !SIZING_VALUES.contains(&text) {
        return None;
    }
    Some(string_list(
        ALL_PREFIXES.iter().map(|prefix| format!("{prefix}{text}")),
    ))
}

/// Split on commas that are not inside parentheses.
fn split_top_level(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0_usize;
    let mut start = 0;
    for (index, character) in value.char_indices() {
        match character {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(value.get(start..index).unwrap_or_default());
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(value.get(start..).unwrap_or_default());
    parts
}

/// Add prefixed copies of every transition entry that names a property
/// which itself needs a prefix. Copies go in front of the entry.
fn prefix_transition_value(value: &str) -> String {
    if is_prefixed_value(value) {
        return value.to_owned();
    }
    split_top_level(value)
        .into_iter()
        .map(|entry| {
            let mut variants = vec![entry.to_owned()];
            for (property, prefixes) in PREFIX_MAP {
                let dashed = kebabify_style_name(property);
                if dashed == "order" || !entry.contains(&dashed) {
                    continue;
                }
                for prefix in *prefixes {
                    let prefixed = format!("{}{dashed}", css_prefix(prefix));
                    variants.insert(0, entry.replacen(&dashed, &prefixed, 1));
                }
            }
            variants.join(",")
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Keep only the comma-separated entries free of every marker.
fn without_entries(value: &str, markers: &[&str]) -> String {
    split_top_level(value)
        .into_iter()
        .filter(|entry| !markers.iter().any(|marker| entry.contains(marker)))
        .collect::<Vec<_>>()
        .join(",")
}

fn transition(property: &str, value: &StyleValue, style: &mut StyleMap) -> Option<StyleValue> {
    if !TRANSITION_PROPERTIES.contains(&property) {
        return None;
    }
    let output = prefix_transition_value(value.as_str()?);
    let webkit_output = without_entries(&output, &["-moz-", "-ms-"]);
    if property.contains("Webkit") {
        return Some(webkit_output.into());
    }
    let moz_output = without_entries(&output, &["-webkit-", "-ms-"]);
    if property.contains("Moz") {
        return Some(moz_output.into());
    }
    let capitalized = capitalize(property);
    style.set(format!("Webkit{capitalized}"), webkit_output.into(), false);
    style.set(format!("Moz{capitalized}"), moz_output.into(), false);
    Some(output.into())
}
