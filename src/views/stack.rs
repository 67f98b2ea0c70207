//! Stack view: a flex container laying children along one axis.
//!
//! Children are components; each renders into the tree and is moved under the
//! stack's `<div>`, so modifiable children keep their own snapshots.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::component::Component;
use crate::css::Length;
use crate::dom::{Dom, ElementData, NodeId};

/// Main axis of a [`Stack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

impl Axis {
    fn flex_direction(self) -> &'static str {
        match self {
            Axis::Vertical => "column",
            Axis::Horizontal => "row",
        }
    }
}

/// A vertical or horizontal stack of child components.
pub struct Stack {
    id: String,
    axis: Axis,
    spacing: Option<Length>,
    children: Vec<Rc<dyn Component>>,
    /// Nodes each child rendered last time, by child index.
    rendered: RefCell<Vec<Vec<NodeId>>>,
}

impl Stack {
    /// Vertical stack (`VStack`).
    pub fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    /// Horizontal stack (`HStack`).
    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    pub fn new(axis: Axis) -> Self {
        Self {
            id: super::next_id("stack"),
            axis,
            spacing: None,
            children: Vec::new(),
            rendered: RefCell::default(),
        }
    }

    /// Set the instance id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Gap between children (builder).
    pub fn spacing(mut self, spacing: impl Into<Length>) -> Self {
        self.spacing = Some(spacing.into());
        self
    }

    /// Add a child component (builder).
    pub fn with_child(mut self, child: impl Component + 'static) -> Self {
        self.children.push(Rc::new(child));
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn children(&self) -> &[Rc<dyn Component>] {
        &self.children
    }
}

impl Component for Stack {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_name(&self) -> &str {
        "Stack"
    }

    fn render(&self, dom: &mut Dom) -> Vec<NodeId> {
        let mut data = ElementData::new("div")
            .with_style("display", "flex")
            .with_style("flexDirection", self.axis.flex_direction());
        if let Some(spacing) = self.spacing {
            data = data.with_style("gap", spacing.to_string());
        }
        let container = dom.create_element(data);
        let mut rendered = Vec::with_capacity(self.children.len());
        for child in &self.children {
            let nodes = child.render(dom);
            for &node in &nodes {
                dom.reparent(node, container);
            }
            rendered.push(nodes);
        }
        *self.rendered.borrow_mut() = rendered;
        vec![container]
    }

    fn mounted(&self, dom: &mut Dom, _nodes: &[NodeId]) {
        let rendered = self.rendered.borrow().clone();
        for (child, nodes) in self.children.iter().zip(&rendered) {
            child.mounted(dom, nodes);
        }
    }

    fn cleanup(&self) {
        for child in &self.children {
            child.cleanup();
        }
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("id", &self.id)
            .field("axis", &self.axis)
            .field("children", &self.children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentExt;
    use crate::views::Text;

    #[test]
    fn renders_children_in_order() {
        let stack = Stack::horizontal()
            .spacing(8)
            .with_child(Text::new("a"))
            .with_child(Text::new("b"));
        let mut dom = Dom::new();
        let nodes = stack.render(&mut dom);
        let container = nodes[0];
        let style = dom.style(container).unwrap();
        assert_eq!(style.get("flexDirection"), Some("row"));
        assert_eq!(style.get("gap"), Some("8px"));

        let texts: Vec<_> = dom
            .children(container)
            .iter()
            .map(|&c| dom.get(c).unwrap().text.clone().unwrap())
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn modifiable_children_keep_snapshots() {
        let child = Text::new("x").modifiers().opacity(0.5).build();
        let stack = Stack::vertical().with_child(child);
        let mut dom = Dom::new();
        let nodes = stack.render(&mut dom);
        let inner = dom.children(nodes[0])[0];
        assert!(dom.snapshot(nodes[0]).is_none());
        assert_eq!(dom.snapshot(inner).unwrap().modifiers.len(), 1);
    }
}
