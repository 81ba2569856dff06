//! Style values and the two descriptor shapes that carry side effects.

use crate::StyleMap;

/// A single value inside a style map.
///
/// The shape is resolved once, when the value enters a map, so generation
/// code can match on it instead of inspecting runtime types.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    /// Explicitly unset value. Kept as a tombstone and never emitted.
    Null,
    /// A bare number; rendered in `px` unless the property is unitless.
    Number(f64),
    /// Any other terminal value, rendered verbatim.
    Str(String),
    /// Several values for one property, e.g. fallback `display` values or a
    /// font stack.
    List(Vec<StyleValue>),
    /// A nested style block under a selector or at-rule key.
    Nested(StyleMap),
    /// An inline `@font-face` description used as a `fontFamily` value.
    FontFace(FontFace),
    /// An inline `@keyframes` description used as an `animationName` value.
    Keyframes(Keyframes),
}

impl StyleValue {
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_nested(&self) -> Option<&StyleMap> {
        match self {
            Self::Nested(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for StyleValue {
    #[inline]
    fn from(text: &str) -> Self {
        Self::Str(text.to_owned())
    }
}

impl From<String> for StyleValue {
    #[inline]
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl From<f64> for StyleValue {
    #[inline]
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<f32> for StyleValue {
    #[inline]
    fn from(number: f32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<i32> for StyleValue {
    #[inline]
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<u32> for StyleValue {
    #[inline]
    fn from(number: u32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<StyleMap> for StyleValue {
    #[inline]
    fn from(map: StyleMap) -> Self {
        Self::Nested(map)
    }
}

impl From<FontFace> for StyleValue {
    #[inline]
    fn from(face: FontFace) -> Self {
        Self::FontFace(face)
    }
}

impl From<Keyframes> for StyleValue {
    #[inline]
    fn from(keyframes: Keyframes) -> Self {
        Self::Keyframes(keyframes)
    }
}

impl<T: Into<Self>> From<Vec<T>> for StyleValue {
    #[inline]
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for StyleValue {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Descriptors of one `@font-face` rule.
///
/// `fontFamily` names the face and `src` doubles as its injection key, so
/// two faces with the same source are only emitted once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontFace {
    descriptors: StyleMap,
}

impl FontFace {
    /// Start a face from its family name and `src` descriptor.
    pub fn new(family: impl Into<String>, src: impl Into<String>) -> Self {
        let descriptors = StyleMap::new()
            .with(crate::FONT_FAMILY, family.into())
            .with("src", src.into());
        Self { descriptors }
    }

    /// Add another descriptor such as `fontStyle` or `fontWeight`.
    #[must_use]
    pub fn descriptor(mut self, name: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.descriptors.set(name, value.into(), false);
        self
    }

    #[inline]
    pub const fn from_descriptors(descriptors: StyleMap) -> Self {
        Self { descriptors }
    }

    #[inline]
    pub fn family(&self) -> Option<&str> {
        self.descriptors
            .get(crate::FONT_FAMILY)
            .and_then(StyleValue::as_str)
    }

    #[inline]
    pub fn src(&self) -> Option<&str> {
        self.descriptors.get("src").and_then(StyleValue::as_str)
    }

    #[inline]
    pub const fn descriptors(&self) -> &StyleMap {
        &self.descriptors
    }
}

/// Keyframe stops of one `@keyframes` block, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keyframes {
    stops: StyleMap,
}

impl Keyframes {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append (or merge into) the stop at `offset`, e.g. `from` or `50%`.
    #[must_use]
    pub fn stop(mut self, offset: impl Into<String>, body: StyleMap) -> Self {
        self.stops.set(offset, StyleValue::Nested(body), false);
        self
    }

    #[inline]
    pub const fn from_stops(stops: StyleMap) -> Self {
        Self { stops }
    }

    #[inline]
    pub const fn stops(&self) -> &StyleMap {
        &self.stops
    }
}
