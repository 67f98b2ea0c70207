//! Element queries: by id, class, tag; generic predicate matching.

use super::node::{ElementData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Find the first element whose `id` matches.
    ///
    /// Iterates the whole arena, including detached elements.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, el)| el.id.as_deref() == Some(id))
            .map(|(node, _)| node)
    }

    /// All elements carrying `class`.
    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.query_all(|el| el.class_list.contains(class))
    }

    /// All elements with the given tag name.
    pub fn query_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.query_all(|el| el.tag == tag)
    }

    /// All elements matching `predicate`, in arena order.
    pub fn query_all(&self, predicate: impl Fn(&ElementData) -> bool) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, el)| predicate(el))
            .map(|(node, _)| node)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::ElementData;
    use crate::dom::tree::Dom;

    fn build() -> Dom {
        let mut dom = Dom::new();
        let root = dom.create_element(ElementData::new("main").with_id("root"));
        let nav = dom
            .append_child(root, ElementData::new("nav").with_id("sidebar").with_class("panel"))
            .unwrap();
        dom.append_child(nav, ElementData::new("button").with_id("save").with_class("btn"));
        dom.append_child(nav, ElementData::new("button").with_id("cancel").with_class("btn"));
        dom
    }

    #[test]
    fn by_id() {
        let dom = build();
        let found = dom.query_by_id("sidebar").unwrap();
        assert_eq!(dom.get(found).unwrap().tag, "nav");
        assert!(dom.query_by_id("nope").is_none());
    }

    #[test]
    fn by_class_and_tag() {
        let dom = build();
        assert_eq!(dom.query_by_class("btn").len(), 2);
        assert_eq!(dom.query_by_tag("button").len(), 2);
        assert!(dom.query_by_class("missing").is_empty());
    }

    #[test]
    fn by_predicate() {
        let dom = build();
        let with_id = dom.query_all(|el| el.id.is_some());
        assert_eq!(with_id.len(), 4);
    }
}
