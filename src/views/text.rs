//! Text view: a `<span>` with text content.

use crate::component::Component;
use crate::dom::{Dom, ElementData, NodeId};

/// A run of text.
///
/// # Examples
///
/// ```
/// use mantle::prelude::*;
///
/// let title = Text::new("Welcome").with_id("title");
/// assert_eq!(title.content(), "Welcome");
/// ```
#[derive(Debug, Clone)]
pub struct Text {
    id: String,
    content: String,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: super::next_id("text"),
            content: content.into(),
        }
    }

    /// Set the instance id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Component for Text {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_name(&self) -> &str {
        "Text"
    }

    fn render(&self, dom: &mut Dom) -> Vec<NodeId> {
        vec![dom.create_element(ElementData::new("span").with_text(self.content.as_str()))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_span() {
        let mut dom = Dom::new();
        let nodes = Text::new("hi").render(&mut dom);
        let data = dom.get(nodes[0]).unwrap();
        assert_eq!(data.tag, "span");
        assert_eq!(data.text.as_deref(), Some("hi"));
    }

    #[test]
    fn ids_are_unique() {
        let a = Text::new("a");
        let b = Text::new("b");
        assert_ne!(a.id(), b.id());
        assert!(a.id().starts_with("text-"));
        assert_eq!(Text::new("c").with_id("c").id(), "c");
    }
}
