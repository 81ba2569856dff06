//! Configuration for a styles instance.
//!
//! Settings can be built in code, deserialized (e.g. from a project file) or
//! read from the environment.

use serde::Deserialize;
use std::env;

/// Marker used for the style tag attribute when none is configured.
pub const DEFAULT_MARKER: &str = "valor-styles";

/// Settings for a [`crate::Styles`] instance.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StyleConfig {
    /// Append `!important` to every generated declaration.
    pub use_important: bool,
    /// Short hashed identifiers and class names instead of readable ones.
    pub minify: bool,
    /// The style tag is marked with `data-<marker>`.
    pub marker: String,
    /// Optional suffix, giving `data-<marker>-<suffix>`.
    pub style_tag_suffix: String,
}

impl Default for StyleConfig {
    #[inline]
    fn default() -> Self {
        Self {
            use_important: true,
            minify: false,
            marker: DEFAULT_MARKER.to_owned(),
            style_tag_suffix: String::new(),
        }
    }
}

impl StyleConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `VALOR_STYLES_MINIFY`: Set to "1" to minify identifiers (default: disabled)
    /// - `VALOR_STYLES_IMPORTANT`: Set to "0" to drop `!important` (default: enabled)
    /// - `VALOR_STYLES_MARKER`: Style tag marker (default: `valor-styles`)
    /// - `VALOR_STYLES_SUFFIX`: Style tag suffix (default: none)
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        let minify = env::var("VALOR_STYLES_MINIFY").is_ok_and(|val| val == "1");
        let use_important = env::var("VALOR_STYLES_IMPORTANT").map_or(true, |val| val != "0");
        let marker = env::var("VALOR_STYLES_MARKER")
            .ok()
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| DEFAULT_MARKER.to_owned());
        let style_tag_suffix = env::var("VALOR_STYLES_SUFFIX").unwrap_or_default();
        Self {
            use_important,
            minify,
            marker,
            style_tag_suffix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() -> serde_json::Result<()> {
        let config: StyleConfig = serde_json::from_str(r#"{"minify": true}"#)?;
        assert!(config.minify);
        assert!(config.use_important);
        assert_eq!(config.marker, DEFAULT_MARKER);
        assert!(config.style_tag_suffix.is_empty());
        Ok(())
    }
}
