//! Which vendor prefixes each property still needs.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const WEBKIT: &[&str] = &["Webkit"];
const MOZ: &[&str] = &["Moz"];
const MS: &[&str] = &["ms"];
const WEBKIT_MOZ: &[&str] = &["Webkit", "Moz"];
const WEBKIT_MS: &[&str] = &["Webkit", "ms"];
const WEBKIT_MOZ_MS: &[&str] = &["Webkit", "Moz", "ms"];

/// Camel-cased property to the prefixes emitted ahead of it, in emission
/// order. Table order matters: value rewriting walks it front to back.
pub const PREFIX_MAP: &[(&str, &[&str])] = &[
    ("transform", WEBKIT_MS),
    ("transformOrigin", WEBKIT_MS),
    ("transformOriginX", WEBKIT_MS),
    ("transformOriginY", WEBKIT_MS),
    ("backfaceVisibility", WEBKIT),
    ("perspective", WEBKIT),
    ("perspectiveOrigin", WEBKIT),
    ("transformStyle", WEBKIT),
    ("transformOriginZ", WEBKIT),
    ("animation", WEBKIT),
    ("animationDelay", WEBKIT),
    ("animationDirection", WEBKIT),
    ("animationFillMode", WEBKIT),
    ("animationDuration", WEBKIT),
    ("animationIterationCount", WEBKIT),
    ("animationName", WEBKIT),
    ("animationPlayState", WEBKIT),
    ("animationTimingFunction", WEBKIT),
    ("appearance", WEBKIT_MOZ),
    ("userSelect", WEBKIT_MOZ_MS),
    ("fontKerning", WEBKIT),
    ("textEmphasisPosition", WEBKIT),
    ("textEmphasis", WEBKIT),
    ("textEmphasisStyle", WEBKIT),
    ("textEmphasisColor", WEBKIT),
    ("boxDecorationBreak", WEBKIT),
    ("clipPath", WEBKIT),
    ("maskImage", WEBKIT),
    ("maskMode", WEBKIT),
    ("maskRepeat", WEBKIT),
    ("maskPosition", WEBKIT),
    ("maskClip", WEBKIT),
    ("maskOrigin", WEBKIT),
    ("maskSize", WEBKIT),
    ("maskComposite", WEBKIT),
    ("mask", WEBKIT),
    ("maskBorderSource", WEBKIT),
    ("maskBorderMode", WEBKIT),
    ("maskBorderSlice", WEBKIT),
    ("maskBorderWidth", WEBKIT),
    ("maskBorderOutset", WEBKIT),
    ("maskBorderRepeat", WEBKIT),
    ("maskBorder", WEBKIT),
    ("maskType", WEBKIT),
    ("textDecorationStyle", WEBKIT_MOZ),
    ("textDecorationSkip", WEBKIT_MOZ),
    ("textDecorationLine", WEBKIT_MOZ),
    ("textDecorationColor", WEBKIT_MOZ),
    ("filter", WEBKIT),
    ("fontFeatureSettings", WEBKIT_MOZ),
    ("breakAfter", WEBKIT_MOZ_MS),
    ("breakBefore", WEBKIT_MOZ_MS),
    ("breakInside", WEBKIT_MOZ_MS),
    ("columnCount", WEBKIT_MOZ),
    ("columnFill", WEBKIT_MOZ),
    ("columnGap", WEBKIT_MOZ),
    ("columnRule", WEBKIT_MOZ),
    ("columnRuleColor", WEBKIT_MOZ),
    ("columnRuleStyle", WEBKIT_MOZ),
    ("columnRuleWidth", WEBKIT_MOZ),
    ("columns", WEBKIT_MOZ),
    ("columnSpan", WEBKIT_MOZ),
    ("columnWidth", WEBKIT_MOZ),
    ("writingMode", WEBKIT_MS),
    ("flex", WEBKIT_MS),
    ("flexBasis", WEBKIT),
    ("flexDirection", WEBKIT_MS),
    ("flexGrow", WEBKIT),
    ("flexFlow", WEBKIT_MS),
    ("flexShrink", WEBKIT),
    ("flexWrap", WEBKIT_MS),
    ("alignContent", WEBKIT),
    ("alignItems", WEBKIT),
    ("alignSelf", WEBKIT),
    ("justifyContent", WEBKIT),
    ("order", WEBKIT),
    ("transitionDelay", WEBKIT),
    ("transitionDuration", WEBKIT),
    ("transitionProperty", WEBKIT),
    ("transitionTimingFunction", WEBKIT),
    ("backdropFilter", WEBKIT),
    ("scrollSnapType", WEBKIT_MS),
    ("scrollSnapPointsX", WEBKIT_MS),
    ("scrollSnapPointsY", WEBKIT_MS),
    ("scrollSnapDestination", WEBKIT_MS),
    ("scrollSnapCoordinate", WEBKIT_MS),
    ("shapeImageThreshold", WEBKIT),
    ("shapeImageMargin", WEBKIT),
    ("shapeImageOutside", WEBKIT),
    ("hyphens", WEBKIT_MOZ_MS),
    ("flowInto", WEBKIT_MS),
    ("flowFrom", WEBKIT_MS),
    ("regionFragment", WEBKIT_MS),
    ("textOrientation", WEBKIT),
    ("boxSizing", MOZ),
    ("textAlignLast", MOZ),
    ("tabSize", MOZ),
    ("wrapFlow", MS),
    ("wrapThrough", MS),
    ("wrapMargin", MS),
    ("touchAction", MS),
    ("gridTemplateColumns", MS),
    ("gridTemplateRows", MS),
    ("gridTemplateAreas", MS),
    ("gridTemplate", MS),
    ("gridAutoColumns", MS),
    ("gridAutoRows", MS),
    ("gridAutoFlow", MS),
    ("grid", MS),
    ("gridRowStart", MS),
    ("gridColumnStart", MS),
    ("gridRowEnd", MS),
    ("gridRow", MS),
    ("gridColumn", MS),
    ("gridColumnEnd", MS),
    ("gridColumnGap", MS),
    ("gridRowGap", MS),
    ("gridArea", MS),
    ("gridGap", MS),
    ("textSizeAdjust", &["ms", "Webkit"]),
    ("borderImage", WEBKIT),
    ("borderImageOutset", WEBKIT),
    ("borderImageRepeat", WEBKIT),
    ("borderImageSlice", WEBKIT),
    ("borderImageSource", WEBKIT),
    ("borderImageWidth", WEBKIT),
];

static PREFIX_LOOKUP: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| PREFIX_MAP.iter().copied().collect());

/// Prefixes required for `property`, if any.
#[inline]
pub fn required_prefixes(property: &str) -> Option<&'static [&'static str]> {
    PREFIX_LOOKUP.get(property).copied()
}

/// CSS spelling of a camel-cased prefix (`Webkit` → `-webkit-`).
pub fn css_prefix(prefix: &str) -> &'static str {
    match prefix {
        "Webkit" => "-webkit-",
        "Moz" => "-moz-",
        "ms" => "-ms-",
        _ => "",
    }
}
