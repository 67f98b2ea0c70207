//! Element types: NodeId, ElementData, ClassList.

use std::fmt;

use indexmap::IndexMap;
use slotmap::new_key_type;

use crate::css::style::StyleDeclaration;

new_key_type! {
    /// Unique identifier for an element in the tree. Copy, lightweight (u64).
    pub struct NodeId;
}

// ---------------------------------------------------------------------------
// ClassList
// ---------------------------------------------------------------------------

/// Ordered, duplicate-free set of CSS classes (the DOM `classList`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    /// Create an empty class list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `class` is present.
    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    /// Add a class. No-op if already present.
    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.0.push(class.to_owned());
        }
    }

    /// Remove a class. No-op if not present.
    pub fn remove(&mut self, class: &str) {
        self.0.retain(|c| c != class);
    }

    /// Toggle a class; returns `true` if it is present afterwards.
    pub fn toggle(&mut self, class: &str) -> bool {
        if self.contains(class) {
            self.remove(class);
            false
        } else {
            self.add(class);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate classes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

// ---------------------------------------------------------------------------
// ElementData
// ---------------------------------------------------------------------------

/// Data held by a single element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// Tag name (e.g. "div", "button").
    pub tag: String,
    /// Optional unique id.
    pub id: Option<String>,
    pub class_list: ClassList,
    /// Attributes in the order they were first set.
    pub attributes: IndexMap<String, String>,
    /// Inline styles.
    pub style: StyleDeclaration,
    /// Text content, if this is a text-bearing element.
    pub text: Option<String>,
}

impl ElementData {
    /// Create an element with the given tag and no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            class_list: ClassList::new(),
            attributes: IndexMap::new(),
            style: StyleDeclaration::new(),
            text: None,
        }
    }

    /// Set the id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a class (builder).
    pub fn with_class(mut self, class: &str) -> Self {
        self.class_list.add(class);
        self
    }

    /// Set an attribute (builder).
    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set an inline style property by camelCase name (builder).
    pub fn with_style(mut self, name: &str, value: impl Into<String>) -> Self {
        self.style.set(name, value);
        self
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set an attribute, overwriting any previous value.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.insert(name.to_owned(), value.into());
    }

    /// Read an attribute.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }

    /// Whether an attribute is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_defaults() {
        let el = ElementData::new("div");
        assert_eq!(el.tag, "div");
        assert!(el.id.is_none());
        assert!(el.class_list.is_empty());
        assert!(el.attributes.is_empty());
        assert!(el.style.is_empty());
        assert!(el.text.is_none());
    }

    #[test]
    fn builders() {
        let el = ElementData::new("button")
            .with_id("save")
            .with_class("primary")
            .with_class("primary")
            .with_attribute("type", "submit")
            .with_style("color", "red")
            .with_text("Save");
        assert_eq!(el.id.as_deref(), Some("save"));
        assert_eq!(el.class_list.len(), 1);
        assert_eq!(el.get_attribute("type"), Some("submit"));
        assert_eq!(el.style.get("color"), Some("red"));
        assert_eq!(el.text.as_deref(), Some("Save"));
    }

    #[test]
    fn class_list_ops() {
        let mut classes = ClassList::new();
        classes.add("a");
        classes.add("b");
        classes.add("a");
        assert_eq!(classes.to_string(), "a b");
        classes.remove("a");
        assert!(!classes.contains("a"));
        classes.remove("missing");
        assert!(classes.toggle("c"));
        assert!(!classes.toggle("c"));
        assert_eq!(classes.iter().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn attributes() {
        let mut el = ElementData::new("div");
        el.set_attribute("role", "button");
        el.set_attribute("role", "link");
        assert_eq!(el.get_attribute("role"), Some("link"));
        assert!(el.has_attribute("role"));
        assert_eq!(el.remove_attribute("role"), Some("link".into()));
        assert!(!el.has_attribute("role"));
    }

    #[test]
    fn node_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<NodeId>();
    }
}
