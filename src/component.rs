//! Components and the modifiable wrapper.
//!
//! A [`Component`] renders itself into the element tree. Wrapping one in a
//! [`ModifiableComponent`] gives it a versioned list of modifiers; every
//! render attaches an immutable [`ModifierSnapshot`] of that list to the
//! rendered nodes, which the engine later applies.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::dom::{Dom, NodeId};
use crate::modifier::{Modifier, ModifierBuilder};

// ---------------------------------------------------------------------------
// Component trait
// ---------------------------------------------------------------------------

/// Something that renders elements.
///
/// Object-safe: `ModifiableComponent` and the builder hold components as
/// `Rc<dyn Component>`.
pub trait Component {
    /// Instance id, used as the modifier context's `component_id`.
    fn id(&self) -> &str;

    /// Type name, e.g. `"Button"`.
    fn type_name(&self) -> &str;

    /// Create this component's top-level elements and return them.
    ///
    /// Returned nodes are detached or parented wherever the component chose;
    /// the caller decides where to mount them.
    fn render(&self, dom: &mut Dom) -> Vec<NodeId>;

    /// Called once the rendered nodes are in the tree and styled.
    fn mounted(&self, _dom: &mut Dom, _nodes: &[NodeId]) {}

    /// Called when the component is unmounted, after its nodes are removed.
    fn cleanup(&self) {}

    /// The modifiable wrapper, if this component is one.
    fn as_modifiable(&self) -> Option<&ModifiableComponent> {
        None
    }
}

/// Builder entry point for every component.
pub trait ComponentExt: Component {
    /// Start a modifier chain on this component, using the thread's default
    /// registry.
    fn modifiers(self) -> ModifierBuilder
    where
        Self: Sized + 'static,
    {
        ModifierBuilder::new(Rc::new(self))
    }
}

impl<T: Component> ComponentExt for T {}

// ---------------------------------------------------------------------------
// ModifierSnapshot
// ---------------------------------------------------------------------------

/// The modifiers a component carried when a node was rendered.
#[derive(Clone)]
pub struct ModifierSnapshot {
    pub component_id: String,
    pub component_type: String,
    pub version: u64,
    pub modifiers: Rc<[Modifier]>,
    source: Weak<ModifiableInner>,
}

impl ModifierSnapshot {
    /// A newer snapshot from the same component, if modifiers were appended
    /// since this one was taken and the component still exists.
    pub fn latest(&self) -> Option<ModifierSnapshot> {
        let inner = self.source.upgrade()?;
        let current = ModifiableComponent(inner).snapshot();
        (current.version > self.version).then_some(current)
    }
}

impl fmt::Debug for ModifierSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModifierSnapshot")
            .field("component_id", &self.component_id)
            .field("component_type", &self.component_type)
            .field("version", &self.version)
            .field("modifiers", &self.modifiers)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ModifiableComponent
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ModifierState {
    modifiers: Vec<Modifier>,
    version: u64,
    snapshot: Option<Rc<[Modifier]>>,
}

struct ModifiableInner {
    component: Rc<dyn Component>,
    state: RefCell<ModifierState>,
}

/// A component plus a versioned modifier list. Clones share state.
#[derive(Clone)]
pub struct ModifiableComponent(Rc<ModifiableInner>);

impl ModifiableComponent {
    /// Wrap `component`. An already modifiable component is returned as is.
    pub fn new(component: Rc<dyn Component>) -> Self {
        if let Some(existing) = component.as_modifiable() {
            return existing.clone();
        }
        Self(Rc::new(ModifiableInner {
            component,
            state: RefCell::default(),
        }))
    }

    /// The wrapped component.
    pub fn component(&self) -> &Rc<dyn Component> {
        &self.0.component
    }

    /// The current modifiers, in append order.
    pub fn modifier_list(&self) -> Vec<Modifier> {
        self.0.state.borrow().modifiers.clone()
    }

    /// Bumped by every [`append`](Self::append) that adds something.
    pub fn version(&self) -> u64 {
        self.0.state.borrow().version
    }

    /// Append modifiers not already present (by identity). Returns how many
    /// were added.
    pub fn append(&self, modifiers: impl IntoIterator<Item = Modifier>) -> usize {
        let mut state = self.0.state.borrow_mut();
        let mut added = 0;
        for modifier in modifiers {
            if state.modifiers.iter().any(|m| Modifier::ptr_eq(m, &modifier)) {
                continue;
            }
            state.modifiers.push(modifier);
            added += 1;
        }
        if added > 0 {
            state.version += 1;
            state.snapshot = None;
        }
        added
    }

    /// The current modifier list as an immutable snapshot.
    pub fn snapshot(&self) -> ModifierSnapshot {
        let mut state = self.0.state.borrow_mut();
        let cached = state.snapshot.clone();
        let modifiers = match cached {
            Some(modifiers) => modifiers,
            None => {
                let modifiers: Rc<[Modifier]> = Rc::from(state.modifiers.as_slice());
                state.snapshot = Some(Rc::clone(&modifiers));
                modifiers
            }
        };
        ModifierSnapshot {
            component_id: self.0.component.id().to_owned(),
            component_type: self.0.component.type_name().to_owned(),
            version: state.version,
            modifiers,
            source: Rc::downgrade(&self.0),
        }
    }

    /// Start a builder that appends to this component.
    pub fn modifier_builder(&self) -> ModifierBuilder {
        ModifierBuilder::for_component(self)
    }

    pub fn ptr_eq(a: &ModifiableComponent, b: &ModifiableComponent) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl Component for ModifiableComponent {
    fn id(&self) -> &str {
        self.0.component.id()
    }

    fn type_name(&self) -> &str {
        self.0.component.type_name()
    }

    fn render(&self, dom: &mut Dom) -> Vec<NodeId> {
        let nodes = self.0.component.render(dom);
        let snapshot = self.snapshot();
        for &node in &nodes {
            dom.attach_snapshot(node, snapshot.clone());
        }
        nodes
    }

    fn mounted(&self, dom: &mut Dom, nodes: &[NodeId]) {
        self.0.component.mounted(dom, nodes);
    }

    fn cleanup(&self) {
        self.0.component.cleanup();
    }

    fn as_modifiable(&self) -> Option<&ModifiableComponent> {
        Some(self)
    }
}

impl fmt::Debug for ModifiableComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.state.borrow();
        f.debug_struct("ModifiableComponent")
            .field("id", &self.id())
            .field("type", &self.type_name())
            .field("version", &state.version)
            .field("modifiers", &state.modifiers.len())
            .finish()
    }
}

/// Wrap `component` so it can carry modifiers.
pub fn create_modifiable_component(component: impl Component + 'static) -> ModifiableComponent {
    ModifiableComponent::new(Rc::new(component))
}

/// Wrap `component` and append `initial` to it.
///
/// Wrapping a component that is already modifiable appends to it, skipping
/// modifiers it holds already.
pub fn create_modifiable_component_with(
    component: impl Component + 'static,
    initial: impl IntoIterator<Item = Modifier>,
) -> ModifiableComponent {
    let modifiable = create_modifiable_component(component);
    modifiable.append(initial);
    modifiable
}
