//! Property name conversion.

/// Convert a camel-cased property name to its CSS spelling.
///
/// Every uppercase ASCII letter becomes `-` plus its lowercase form. Names
/// that come out starting with `ms-` gain a leading hyphen, since the
/// Microsoft prefix is conventionally written lowercase in camel case
/// (`msTransform` and `MsTransform` both become `-ms-transform`).
pub fn kebabify_style_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for character in name.chars() {
        if character.is_ascii_uppercase() {
            out.push('-');
            out.push(character.to_ascii_lowercase());
        } else {
            out.push(character);
        }
    }
    if out.starts_with("ms-") {
        out.insert(0, '-');
    }
    out
}
