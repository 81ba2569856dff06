//! Insertion-ordered style map with deep merge.

use crate::StyleValue;
use indexmap::IndexMap;
use indexmap::map::IntoIter;

/// An ordered map of style keys to values.
///
/// Keys are unique. Updating a key keeps its position unless the caller asks
/// for a reorder, in which case the key moves to the end. Nested maps are
/// merged key by key instead of replaced.
#[derive(Clone, Debug, Default)]
pub struct StyleMap {
    entries: IndexMap<String, StyleValue>,
}

impl StyleMap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`StyleMap::set`] without reordering.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.set(key, value.into(), false);
        self
    }

    /// Set `key` to `value`.
    ///
    /// Absent keys are appended. Present keys stay where they are unless
    /// `reorder` is set, which moves them to the end. A nested map merges
    /// into the nested map already stored at `key`, applying the same
    /// `reorder` flag to each of its keys; any other value overwrites.
    pub fn set(&mut self, key: impl Into<String>, value: StyleValue, reorder: bool) {
        let key = key.into();
        if reorder && let Some(existing) = self.entries.shift_remove(&key) {
            self.entries.insert(key.clone(), existing);
        }

        let StyleValue::Nested(incoming) = value else {
            self.entries.insert(key, value);
            return;
        };

        let slot = self
            .entries
            .entry(key)
            .or_insert_with(|| StyleValue::Nested(Self::new()));
        if !matches!(slot, StyleValue::Nested(_)) {
            *slot = StyleValue::Nested(Self::new());
        }
        if let StyleValue::Nested(nested) = slot {
            for (nested_key, nested_value) in incoming {
                nested.set(nested_key, nested_value, reorder);
            }
        }
    }

    /// Place `key` directly before `anchor`.
    ///
    /// A key already ahead of the anchor keeps its place and takes the new
    /// value. A key behind the anchor moves up to just before it and keeps
    /// its own value. Without the anchor the key is set normally.
    pub fn insert_before(&mut self, anchor: &str, key: impl Into<String>, value: StyleValue) {
        let key = key.into();
        let Some(anchor_index) = self.entries.get_index_of(anchor) else {
            self.set(key, value, false);
            return;
        };
        match self.entries.get_index_of(&key) {
            Some(index) if index < anchor_index => {
                self.entries.insert(key, value);
            }
            Some(index) => self.entries.move_index(index, anchor_index),
            None => {
                self.entries.shift_insert(anchor_index, key, value);
            }
        }
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.get(key)
    }

    #[inline]
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Visit every entry in order as `(value, key)`.
    #[inline]
    pub fn for_each<F: FnMut(&StyleValue, &str)>(&self, mut visit: F) {
        for (key, value) in &self.entries {
            visit(value, key);
        }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Merge a whole style object, moving every key it sets to the end.
    ///
    /// Merging definitions `a` then `b` this way gives `b` precedence both in
    /// value and in final position.
    pub fn add_style_type(&mut self, style: &Self) {
        for (key, value) in style.iter() {
            self.set(key, value.clone(), true);
        }
    }
}

impl PartialEq for StyleMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl IntoIterator for StyleMap {
    type Item = (String, StyleValue);
    type IntoIter = IntoIter<String, StyleValue>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.set(key, value.into(), false);
        }
        map
    }
}
