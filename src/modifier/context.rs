//! Application context and the scope a modifier mutates through.

use std::rc::Rc;

use crate::dom::{Disposer, Dom, ElementData, Event, ListenerId, NodeId};

use super::Modifier;

/// Fallback component id when none is supplied.
pub const DEFAULT_COMPONENT_ID: &str = "unknown";

/// Where in the component lifecycle an application happens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Creation,
    Update,
}

/// Fully resolved context passed to every modifier.
#[derive(Debug, Clone)]
pub struct ModifierContext {
    pub component_id: String,
    pub phase: Phase,
    /// The element being styled. `None` or a removed node makes every
    /// modifier a no-op.
    pub element: Option<NodeId>,
    pub parent_element: Option<NodeId>,
    /// Type name of the owning component.
    pub component_instance: Option<String>,
    /// Modifiers applied by the previous pass, during updates.
    pub previous_modifiers: Vec<Modifier>,
}

/// Caller-supplied context; missing fields take defaults in [`resolve`].
///
/// [`resolve`]: PartialContext::resolve
#[derive(Debug, Clone, Default)]
pub struct PartialContext {
    pub component_id: Option<String>,
    pub phase: Option<Phase>,
    pub element: Option<NodeId>,
    pub parent_element: Option<NodeId>,
    pub component_instance: Option<String>,
    pub previous_modifiers: Option<Vec<Modifier>>,
}

impl PartialContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn component_id(mut self, id: impl Into<String>) -> Self {
        self.component_id = Some(id.into());
        self
    }

    pub fn phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn element(mut self, element: NodeId) -> Self {
        self.element = Some(element);
        self
    }

    pub fn parent_element(mut self, parent: NodeId) -> Self {
        self.parent_element = Some(parent);
        self
    }

    pub fn component_instance(mut self, type_name: impl Into<String>) -> Self {
        self.component_instance = Some(type_name.into());
        self
    }

    pub fn previous_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.previous_modifiers = Some(modifiers);
        self
    }

    /// Merge with defaults. `element` defaults to `node`, `parent_element` to
    /// the element's parent in `dom`.
    pub fn resolve(self, dom: &Dom, node: NodeId) -> ModifierContext {
        let element = self.element.unwrap_or(node);
        ModifierContext {
            component_id: self
                .component_id
                .unwrap_or_else(|| DEFAULT_COMPONENT_ID.to_owned()),
            phase: self.phase.unwrap_or_default(),
            element: Some(element),
            parent_element: self.parent_element.or_else(|| dom.parent(element)),
            component_instance: self.component_instance,
            previous_modifiers: self.previous_modifiers.unwrap_or_default(),
        }
    }
}

/// Mutable view handed to a modifier during `apply`.
///
/// Every mutation targets the context's element and silently does nothing if
/// that element is missing. Cleanups registered here are chained onto the
/// node's disposal hook by the engine.
pub struct ApplyScope<'a> {
    dom: &'a mut Dom,
    node: NodeId,
    context: &'a ModifierContext,
    cleanups: &'a mut Vec<Disposer>,
}

impl<'a> ApplyScope<'a> {
    pub fn new(
        dom: &'a mut Dom,
        node: NodeId,
        context: &'a ModifierContext,
        cleanups: &'a mut Vec<Disposer>,
    ) -> Self {
        Self {
            dom,
            node,
            context,
            cleanups,
        }
    }

    /// The node currently being processed by the engine.
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn context(&self) -> &ModifierContext {
        self.context
    }

    /// The styled element, if it still exists.
    pub fn element(&self) -> Option<NodeId> {
        self.context.element.filter(|&el| self.dom.contains(el))
    }

    pub fn element_data(&self) -> Option<&ElementData> {
        self.context.element.and_then(|el| self.dom.get(el))
    }

    pub fn element_mut(&mut self) -> Option<&mut ElementData> {
        self.context.element.and_then(|el| self.dom.get_mut(el))
    }

    pub fn dom(&mut self) -> &mut Dom {
        self.dom
    }

    /// Set an inline style by camelCase name.
    pub fn set_style(&mut self, name: &str, value: impl Into<String>) {
        if let Some(el) = self.element_mut() {
            el.style.set(name, value);
        }
    }

    pub fn remove_style(&mut self, name: &str) {
        if let Some(el) = self.element_mut() {
            el.style.remove(name);
        }
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        self.element_data().and_then(|el| el.style.get(name))
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        if let Some(el) = self.element_mut() {
            el.set_attribute(name, value);
        }
    }

    pub fn remove_attribute(&mut self, name: &str) {
        if let Some(el) = self.element_mut() {
            el.remove_attribute(name);
        }
    }

    pub fn add_class(&mut self, class: &str) {
        if let Some(el) = self.element_mut() {
            el.class_list.add(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        if let Some(el) = self.element_mut() {
            el.class_list.remove(class);
        }
    }

    /// Listen for `kind` on the element. The listener is removed when the node
    /// is disposed.
    pub fn on(
        &mut self,
        kind: &str,
        handler: impl Fn(&mut Dom, &Event) + 'static,
    ) -> Option<ListenerId> {
        let element = self.element()?;
        let id = self
            .dom
            .add_event_listener(element, kind, Rc::new(handler))?;
        self.on_cleanup(move |dom| {
            dom.remove_event_listener(element, id);
        });
        Some(id)
    }

    /// Register a cleanup run when the node is disposed or removed.
    pub fn on_cleanup(&mut self, cleanup: impl FnOnce(&mut Dom) + 'static) {
        self.cleanups.push(Box::new(cleanup));
    }

    /// Wrap the element in a new parent element, returning the wrapper.
    ///
    /// Return the wrapper from `apply` to make later modifiers style it.
    pub fn wrap(&mut self, wrapper: ElementData) -> Option<NodeId> {
        let element = self.element()?;
        self.dom.wrap(element, wrapper)
    }
}
