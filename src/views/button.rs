//! Button view: a `<button>` with a text label.

use crate::component::Component;
use crate::dom::{Dom, ElementData, NodeId};

/// A clickable button.
///
/// Tap handling is attached with the `on_tap` modifier:
///
/// ```
/// use mantle::prelude::*;
///
/// let save = Button::new("Save").modifiers().on_tap(|| {}).build();
/// assert_eq!(save.type_name(), "Button");
/// ```
#[derive(Debug, Clone)]
pub struct Button {
    id: String,
    label: String,
    disabled: bool,
}

impl Button {
    /// Create a new button with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: super::next_id("button"),
            label: label.into(),
            disabled: false,
        }
    }

    /// Set the instance id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Render with the `disabled` attribute (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl Component for Button {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_name(&self) -> &str {
        "Button"
    }

    fn render(&self, dom: &mut Dom) -> Vec<NodeId> {
        let mut data = ElementData::new("button")
            .with_attribute("type", "button")
            .with_text(self.label.as_str());
        if self.disabled {
            data = data.with_attribute("disabled", "");
        }
        vec![dom.create_element(data)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_sets_attribute() {
        let mut dom = Dom::new();
        let nodes = Button::new("Go").disabled(true).render(&mut dom);
        let data = dom.get(nodes[0]).unwrap();
        assert_eq!(data.tag, "button");
        assert!(data.has_attribute("disabled"));
        assert_eq!(data.text.as_deref(), Some("Go"));
    }
}
