//! Tree operations: create, append, wrap, remove, walk, disposal hooks.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::event::Listener;
use super::node::{ElementData, NodeId};
use crate::component::ModifierSnapshot;
use crate::css::style::StyleDeclaration;

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// A cleanup callback run when a node is disposed or removed.
pub type Disposer = Box<dyn FnOnce(&mut Dom)>;

/// The element tree, backed by a slotmap arena.
///
/// All elements live in a single `SlotMap`. Parent/child relationships,
/// listeners, disposal hooks and attached modifier snapshots are stored in
/// secondary maps so removal is O(subtree size) and lookup is O(1).
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, ElementData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    pub(crate) listeners: SecondaryMap<NodeId, Vec<Listener>>,
    pub(crate) next_listener: u64,
    disposers: SecondaryMap<NodeId, Disposer>,
    snapshots: SecondaryMap<NodeId, ModifierSnapshot>,
    root: Option<NodeId>,
}

impl Dom {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            listeners: SecondaryMap::new(),
            next_listener: 0,
            disposers: SecondaryMap::new(),
            snapshots: SecondaryMap::new(),
            root: None,
        }
    }

    /// Create a detached element (no parent).
    ///
    /// If no root has been set yet, this element becomes the root.
    pub fn create_element(&mut self, data: ElementData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Create an element as the last child of `parent`.
    ///
    /// Returns `None` if `parent` does not exist.
    pub fn append_child(&mut self, parent: NodeId, data: ElementData) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        self.attach(id, parent);
        Some(id)
    }

    /// Move `node` (with its subtree) to become the last child of `new_parent`.
    ///
    /// Returns `false` if either node is missing or if `new_parent` lies inside
    /// `node`'s subtree.
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) -> bool {
        if !self.contains(node) || !self.contains(new_parent) {
            return false;
        }
        if node == new_parent || self.ancestors(new_parent).contains(&node) {
            return false;
        }
        self.detach(node);
        if self.root == Some(node) {
            self.root = self.ancestors(new_parent).last().copied().or(Some(new_parent));
        }
        self.attach(node, new_parent);
        true
    }

    /// Insert a new element in `node`'s place and move `node` under it.
    ///
    /// The wrapper takes over `node`'s slot among its siblings (or the root
    /// slot). Returns `None` if `node` does not exist.
    pub fn wrap(&mut self, node: NodeId, wrapper: ElementData) -> Option<NodeId> {
        if !self.contains(node) {
            return None;
        }
        let wrapper_id = self.nodes.insert(wrapper);
        self.children.insert(wrapper_id, Vec::new());

        match self.parent.remove(node) {
            Some(parent) => {
                if let Some(siblings) = self.children.get_mut(parent) {
                    if let Some(slot) = siblings.iter_mut().find(|c| **c == node) {
                        *slot = wrapper_id;
                    }
                }
                self.parent.insert(wrapper_id, parent);
            }
            None => {
                if self.root == Some(node) {
                    self.root = Some(wrapper_id);
                }
            }
        }
        self.attach(node, wrapper_id);
        Some(wrapper_id)
    }

    /// Remove a node and all its descendants.
    ///
    /// Disposal hooks of every removed node run first (pre-order), while the
    /// subtree is still intact. Returns the removed node's data, or `None` if
    /// it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<ElementData> {
        if !self.nodes.contains_key(id) {
            return None;
        }

        for node in self.walk_depth_first(id) {
            self.dispose(node);
        }

        self.detach(id);
        if self.root == Some(id) {
            self.root = None;
        }

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            self.listeners.remove(current);
            self.disposers.remove(current);
            self.snapshots.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed = data;
            }
        }

        removed
    }

    // -- disposal hooks -----------------------------------------------------

    /// Chain a cleanup onto `id`'s disposal hook. The new cleanup runs before
    /// any cleanup already attached. No-op if `id` does not exist.
    pub fn add_disposer(&mut self, id: NodeId, cleanup: Disposer) {
        if !self.nodes.contains_key(id) {
            return;
        }
        let chained: Disposer = match self.disposers.remove(id) {
            Some(prior) => Box::new(move |dom: &mut Dom| {
                cleanup(dom);
                prior(dom);
            }),
            None => cleanup,
        };
        self.disposers.insert(id, chained);
    }

    /// Run and clear `id`'s disposal hook. Returns `true` if one was attached.
    pub fn dispose(&mut self, id: NodeId) -> bool {
        match self.disposers.remove(id) {
            Some(cleanup) => {
                cleanup(self);
                true
            }
            None => false,
        }
    }

    /// Whether `id` has a pending disposal hook.
    pub fn has_disposer(&self, id: NodeId) -> bool {
        self.disposers.contains_key(id)
    }

    // -- modifier snapshots -------------------------------------------------

    /// Attach a modifier snapshot to a rendered node, replacing any previous one.
    pub fn attach_snapshot(&mut self, id: NodeId, snapshot: ModifierSnapshot) {
        if self.nodes.contains_key(id) {
            self.snapshots.insert(id, snapshot);
        }
    }

    /// The snapshot attached to `id`, if any.
    pub fn snapshot(&self, id: NodeId) -> Option<&ModifierSnapshot> {
        self.snapshots.get(id)
    }

    /// Detach and return `id`'s snapshot.
    pub fn take_snapshot(&mut self, id: NodeId) -> Option<ModifierSnapshot> {
        self.snapshots.remove(id)
    }

    // -- accessors ------------------------------------------------------------

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Empty if the node has none or doesn't exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to the root. Does not include `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Immutable access to an element.
    pub fn get(&self, id: NodeId) -> Option<&ElementData> {
        self.nodes.get(id)
    }

    /// Mutable access to an element.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(id)
    }

    /// An element's inline styles.
    pub fn style(&self, id: NodeId) -> Option<&StyleDeclaration> {
        self.nodes.get(id).map(|el| &el.style)
    }

    /// Mutable access to an element's inline styles.
    pub fn style_mut(&mut self, id: NodeId) -> Option<&mut StyleDeclaration> {
        self.nodes.get_mut(id).map(|el| &mut el.style)
    }

    /// The current root, if set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Explicitly set the root.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the tree contains `id`.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        result
    }

    // -- internal -----------------------------------------------------------

    fn attach(&mut self, node: NodeId, parent: NodeId) {
        self.parent.insert(node, parent);
        if let Some(kids) = self.children.get_mut(parent) {
            kids.push(node);
        }
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(old_parent) = self.parent.remove(node) {
            if let Some(siblings) = self.children.get_mut(old_parent) {
                siblings.retain(|&child| child != node);
            }
        }
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}
