//! JSON input and canonical serialization.
//!
//! The serialized form feeds identifier hashing, so it has to be stable:
//! keys in insertion order and integral numbers without a fraction.

use crate::{ANIMATION_NAME, FONT_FAMILY, FontFace, Keyframes, StyleMap, StyleMapError, StyleValue};
use serde::ser::{Serialize, SerializeMap as _, Serializer};
use serde_json::{Map, Value};

/// Largest integer a double represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl StyleMap {
    /// Convert a JSON object into a style map.
    ///
    /// # Errors
    /// Returns [`StyleMapError::NotAnObject`] when `value` is not an object.
    pub fn from_json(value: &Value) -> Result<Self, StyleMapError> {
        match value {
            Value::Object(object) => Ok(map_from_object(object)),
            other => Err(StyleMapError::NotAnObject(json_kind(other))),
        }
    }

    /// Canonical JSON text of this map.
    pub fn to_json_string(&self) -> String {
        // Maps with string keys and plain values always serialize.
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl TryFrom<&Value> for StyleMap {
    type Error = StyleMapError;

    #[inline]
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

impl TryFrom<Value> for StyleMap {
    type Error = StyleMapError;

    #[inline]
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(&value)
    }
}

impl StyleValue {
    /// Convert the JSON value found under `property`.
    ///
    /// Objects under `fontFamily` become font faces and objects under
    /// `animationName` become keyframes, including object entries of arrays
    /// under those properties. Other objects become nested maps.
    pub fn from_json_property(property: &str, value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Str(flag.to_string()),
            Value::Number(number) => Self::Number(number.as_f64().unwrap_or_default()),
            Value::String(text) => Self::Str(text.clone()),
            Value::Array(items) => Self::List(
                items
                    .iter()
                    .map(|item| Self::from_json_property(property, item))
                    .collect(),
            ),
            Value::Object(object) => {
                let map = map_from_object(object);
                match property {
                    FONT_FAMILY => Self::FontFace(FontFace::from_descriptors(map)),
                    ANIMATION_NAME => Self::Keyframes(Keyframes::from_stops(map)),
                    _ => Self::Nested(map),
                }
            }
        }
    }
}

fn map_from_object(object: &Map<String, Value>) -> StyleMap {
    let mut map = StyleMap::new();
    for (key, value) in object {
        map.set(key.as_str(), StyleValue::from_json_property(key, value), false);
    }
    map
}

/// Article-qualified name of a JSON value kind, for error messages.
pub const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Serialize for StyleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            state.serialize_entry(key, value)?;
        }
        state.end()
    }
}

impl Serialize for StyleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Number(number) => {
                if number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
                    serializer.serialize_i64(*number as i64)
                } else {
                    serializer.serialize_f64(*number)
                }
            }
            Self::Str(text) => serializer.serialize_str(text),
            Self::List(items) => items.serialize(serializer),
            Self::Nested(map) => map.serialize(serializer),
            Self::FontFace(face) => face.descriptors().serialize(serializer),
            Self::Keyframes(keyframes) => keyframes.stops().serialize(serializer),
        }
    }
}
