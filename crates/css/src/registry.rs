//! Named style definitions and the arguments class names are built from.

use css_style_map::{StyleMap, StyleMapError, hash_string, json_kind};
use indexmap::IndexMap;
use serde_json::Value;
use std::rc::Rc;

/// One named entry of a sheet, immutable once created.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleDefinition {
    name: String,
    identifier: String,
    serialized_len: usize,
    body: Rc<StyleMap>,
}

impl StyleDefinition {
    /// Build a definition, deriving its identifier from the serialized body.
    ///
    /// Minified identifiers are the bare content hash; otherwise the name is
    /// kept in front for readability: `button_1x2y3z`.
    pub fn new(name: impl Into<String>, body: StyleMap, minify: bool) -> Self {
        let name = name.into();
        let serialized = body.to_json_string();
        let digest = hash_string(&serialized);
        let identifier = if minify {
            digest
        } else {
            format!("{name}_{digest}")
        };
        Self {
            serialized_len: serialized.encode_utf16().count(),
            name,
            identifier,
            body: Rc::new(body),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Length of the serialized body in UTF-16 code units.
    #[inline]
    pub const fn serialized_len(&self) -> usize {
        self.serialized_len
    }

    #[inline]
    pub fn body(&self) -> &StyleMap {
        &self.body
    }
}

/// Definitions returned by [`crate::Styles::create`], in creation order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sheet {
    definitions: IndexMap<String, StyleDefinition>,
}

impl Sheet {
    pub(crate) fn from_entries<I, K>(entries: I, minify: bool) -> Self
    where
        I: IntoIterator<Item = (K, StyleMap)>,
        K: Into<String>,
    {
        let definitions = entries
            .into_iter()
            .map(|(name, body)| {
                let definition = StyleDefinition::new(name, body, minify);
                (definition.name.clone(), definition)
            })
            .collect();
        Self { definitions }
    }

    pub(crate) fn from_json(sheet: &Value, minify: bool) -> Result<Self, StyleMapError> {
        let Value::Object(entries) = sheet else {
            return Err(StyleMapError::NotAnObject(json_kind(sheet)));
        };
        let mut bodies = Vec::with_capacity(entries.len());
        for (name, body) in entries {
            bodies.push((name.as_str(), StyleMap::from_json(body)?));
        }
        Ok(Self::from_entries(bodies, minify))
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&StyleDefinition> {
        self.definitions.get(name)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleDefinition)> {
        self.definitions
            .iter()
            .map(|(name, definition)| (name.as_str(), definition))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// One argument to [`crate::Styles::css`].
///
/// Conditional styling passes `false` or `None` for definitions that do not
/// apply; those are skipped. Lists nest arbitrarily.
#[derive(Clone, Debug)]
pub enum DefinitionArg<'def> {
    Definition(&'def StyleDefinition),
    List(Vec<DefinitionArg<'def>>),
    Skip,
}

impl<'def> From<&'def StyleDefinition> for DefinitionArg<'def> {
    #[inline]
    fn from(definition: &'def StyleDefinition) -> Self {
        Self::Definition(definition)
    }
}

impl<'def> From<Option<&'def StyleDefinition>> for DefinitionArg<'def> {
    #[inline]
    fn from(definition: Option<&'def StyleDefinition>) -> Self {
        definition.map_or(Self::Skip, Self::Definition)
    }
}

/// `false` skips. `true` carries no definition either, so it skips too.
impl From<bool> for DefinitionArg<'_> {
    #[inline]
    fn from(_flag: bool) -> Self {
        Self::Skip
    }
}

impl<'def, T: Into<Self>> From<Vec<T>> for DefinitionArg<'def> {
    #[inline]
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// Definitions selected by a set of arguments, flattened in order.
#[derive(Debug, Default)]
pub(crate) struct Selection<'def> {
    pub identifiers: Vec<&'def str>,
    pub bodies: Vec<&'def StyleMap>,
    pub serialized_len: usize,
}

impl<'def> Selection<'def> {
    pub fn collect(args: &[DefinitionArg<'def>]) -> Self {
        let mut selection = Self::default();
        selection.extend(args);
        selection
    }

    fn extend(&mut self, args: &[DefinitionArg<'def>]) {
        for arg in args {
            match arg {
                DefinitionArg::Definition(definition) => {
                    self.identifiers.push(definition.identifier());
                    self.bodies.push(definition.body());
                    self.serialized_len += definition.serialized_len();
                }
                DefinitionArg::List(items) => self.extend(items),
                DefinitionArg::Skip => {}
            }
        }
    }
}
