//! Headless document for servers, tools and tests.

use crate::{HostDocument, RuleRejected, StyleElementId};
use css_syntax::check_rule;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct StyleElement {
    attribute: String,
    rules: Vec<String>,
}

/// In-memory document head holding style elements and their rules.
///
/// Clones share state. Rules are checked with [`check_rule`] on insertion
/// and refused when they are not exactly one well-formed rule.
#[derive(Clone, Debug, Default)]
pub struct MemoryDocument {
    head: Rc<RefCell<Vec<StyleElement>>>,
}

impl MemoryDocument {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a style element that already holds `rules`, as server-rendered
    /// markup would.
    pub fn add_style_element<I, S>(&self, attribute: &str, rules: I) -> StyleElementId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut head = self.head.borrow_mut();
        let id = StyleElementId::new(head.len());
        head.push(StyleElement {
            attribute: attribute.to_owned(),
            rules: rules.into_iter().map(Into::into).collect(),
        });
        id
    }

    /// Rules of the first style element carrying `attribute`.
    pub fn rules(&self, attribute: &str) -> Vec<String> {
        self.head
            .borrow()
            .iter()
            .find(|element| element.attribute == attribute)
            .map(|element| element.rules.clone())
            .unwrap_or_default()
    }

    #[inline]
    pub fn style_element_count(&self) -> usize {
        self.head.borrow().len()
    }
}

impl HostDocument for MemoryDocument {
    fn find_style_element(&self, attribute: &str) -> Option<StyleElementId> {
        self.head
            .borrow()
            .iter()
            .position(|element| element.attribute == attribute)
            .map(StyleElementId::new)
    }

    fn create_style_element(&self, attribute: &str) -> StyleElementId {
        self.add_style_element(attribute, Vec::<String>::new())
    }

    fn rule_count(&self, element: StyleElementId) -> usize {
        self.head
            .borrow()
            .get(element.raw())
            .map_or(0, |style| style.rules.len())
    }

    fn insert_rule(
        &self,
        element: StyleElementId,
        rule: &str,
        index: usize,
    ) -> Result<(), RuleRejected> {
        let rejected = |reason: String| RuleRejected {
            rule: rule.to_owned(),
            reason,
        };
        check_rule(rule).map_err(|err| rejected(err.to_string()))?;

        let mut head = self.head.borrow_mut();
        let style = head
            .get_mut(element.raw())
            .ok_or_else(|| rejected(format!("no style element {}", element.raw())))?;
        if index > style.rules.len() {
            return Err(rejected(format!(
                "index {index} past the {} rules in the sheet",
                style.rules.len()
            )));
        }
        style.rules.insert(index, rule.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_created_elements_by_attribute() {
        let document = MemoryDocument::new();
        assert_eq!(document.find_style_element("data-valor-styles"), None);
        let created = document.create_style_element("data-valor-styles");
        assert_eq!(document.find_style_element("data-valor-styles"), Some(created));
        assert_eq!(document.find_style_element("data-valor-styles-admin"), None);
    }

    #[test]
    fn inserts_at_index_and_refuses_malformed_rules() {
        let document = MemoryDocument::new();
        let element = document.create_style_element("data-x");
        assert!(matches!(document.insert_rule(element, ".b{color:blue;}", 0), Ok(_)));
        assert!(matches!(document.insert_rule(element, ".a{color:red;}", 0), Ok(_)));
        assert!(matches!(document.insert_rule(element, "::garbage", 2), Err(_)));
        assert!(matches!(document.insert_rule(element, ".c{color:red;}", 7), Err(_)));
        assert_eq!(document.rules("data-x"), [".a{color:red;}", ".b{color:blue;}"]);
        assert_eq!(document.rule_count(element), 2);
    }

    #[test]
    fn clones_share_state() {
        let document = MemoryDocument::new();
        let view = document.clone();
        document.add_style_element("data-x", [".a{color:red;}"]);
        assert_eq!(view.style_element_count(), 1);
        assert_eq!(view.rules("data-x"), [".a{color:red;}"]);
    }
}
