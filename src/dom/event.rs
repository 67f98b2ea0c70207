//! Element event listeners with bubble-phase dispatch.
//!
//! Handlers receive `&mut Dom` so they can restyle elements directly. Dispatch
//! walks the bubble path (`[target, parent, ..., root]`), invoking the
//! listeners registered for the event type on each node.

use std::fmt;
use std::rc::Rc;

use super::node::NodeId;
use super::tree::Dom;

/// A listener callback.
pub type EventHandler = Rc<dyn Fn(&mut Dom, &Event)>;

/// Identifies a registered listener so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// An event being delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event type, e.g. `"click"`, `"mouseenter"`.
    pub kind: String,
    /// The node the event was dispatched on.
    pub target: NodeId,
    /// The node whose listener is currently running.
    pub current_target: NodeId,
}

pub(crate) struct Listener {
    id: ListenerId,
    kind: String,
    handler: EventHandler,
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Events that do not bubble, matching the browser.
const NON_BUBBLING: &[&str] = &["mouseenter", "mouseleave", "focus", "blur"];

impl Dom {
    /// Register `handler` for `kind` events on `node`.
    ///
    /// Returns `None` if `node` does not exist.
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        kind: &str,
        handler: EventHandler,
    ) -> Option<ListenerId> {
        if !self.contains(node) {
            return None;
        }
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        let listener = Listener {
            id,
            kind: kind.to_owned(),
            handler,
        };
        match self.listeners.get_mut(node) {
            Some(list) => list.push(listener),
            None => {
                self.listeners.insert(node, vec![listener]);
            }
        }
        Some(id)
    }

    /// Remove a listener. Returns `true` if it was registered on `node`.
    pub fn remove_event_listener(&mut self, node: NodeId, id: ListenerId) -> bool {
        let Some(list) = self.listeners.get_mut(node) else {
            return false;
        };
        let before = list.len();
        list.retain(|l| l.id != id);
        before != list.len()
    }

    /// Number of listeners for `kind` on `node`.
    pub fn listener_count(&self, node: NodeId, kind: &str) -> usize {
        self.listeners
            .get(node)
            .map(|list| list.iter().filter(|l| l.kind == kind).count())
            .unwrap_or(0)
    }

    /// Compute the bubble path from `start` up to the root (inclusive).
    ///
    /// Empty if `start` does not exist.
    pub fn bubble_path(&self, start: NodeId) -> Vec<NodeId> {
        if !self.contains(start) {
            return Vec::new();
        }
        let mut path = vec![start];
        path.extend(self.ancestors(start));
        path
    }

    /// Dispatch a `kind` event at `target`. Returns the number of handlers run.
    ///
    /// `mouseenter`, `mouseleave`, `focus` and `blur` only reach the target.
    /// Handlers registered or removed during dispatch take effect for the next
    /// event.
    pub fn dispatch_event(&mut self, target: NodeId, kind: &str) -> usize {
        let path = if NON_BUBBLING.contains(&kind) {
            if self.contains(target) {
                vec![target]
            } else {
                Vec::new()
            }
        } else {
            self.bubble_path(target)
        };

        let mut invoked = 0;
        for current in path {
            let handlers: Vec<EventHandler> = self
                .listeners
                .get(current)
                .map(|list| {
                    list.iter()
                        .filter(|l| l.kind == kind)
                        .map(|l| l.handler.clone())
                        .collect()
                })
                .unwrap_or_default();
            let event = Event {
                kind: kind.to_owned(),
                target,
                current_target: current,
            };
            for handler in handlers {
                handler(self, &event);
                invoked += 1;
            }
        }
        invoked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::ElementData;
    use std::cell::RefCell;

    fn tree() -> (Dom, NodeId, NodeId) {
        let mut dom = Dom::new();
        let root = dom.create_element(ElementData::new("div"));
        let child = dom.append_child(root, ElementData::new("button")).unwrap();
        (dom, root, child)
    }

    #[test]
    fn click_bubbles_to_ancestors() {
        let (mut dom, root, child) = tree();
        let log = Rc::new(RefCell::new(Vec::new()));
        for node in [root, child] {
            let log = log.clone();
            dom.add_event_listener(
                node,
                "click",
                Rc::new(move |_: &mut Dom, ev: &Event| log.borrow_mut().push(ev.current_target)),
            );
        }
        assert_eq!(dom.dispatch_event(child, "click"), 2);
        assert_eq!(*log.borrow(), vec![child, root]);
    }

    #[test]
    fn mouseenter_does_not_bubble() {
        let (mut dom, root, child) = tree();
        dom.add_event_listener(root, "mouseenter", Rc::new(|_: &mut Dom, _: &Event| {}));
        assert_eq!(dom.dispatch_event(child, "mouseenter"), 0);
        assert_eq!(dom.dispatch_event(root, "mouseenter"), 1);
    }

    #[test]
    fn handlers_can_mutate_the_tree() {
        let (mut dom, _root, child) = tree();
        dom.add_event_listener(
            child,
            "click",
            Rc::new(|dom: &mut Dom, ev: &Event| {
                if let Some(style) = dom.style_mut(ev.target) {
                    style.set("color", "red");
                }
            }),
        );
        dom.dispatch_event(child, "click");
        assert_eq!(dom.style(child).unwrap().get("color"), Some("red"));
    }

    #[test]
    fn remove_listener() {
        let (mut dom, _root, child) = tree();
        let id = dom
            .add_event_listener(child, "click", Rc::new(|_: &mut Dom, _: &Event| {}))
            .unwrap();
        assert_eq!(dom.listener_count(child, "click"), 1);
        assert!(dom.remove_event_listener(child, id));
        assert!(!dom.remove_event_listener(child, id));
        assert_eq!(dom.dispatch_event(child, "click"), 0);
    }

    #[test]
    fn missing_node() {
        let (mut dom, _root, child) = tree();
        dom.remove(child);
        assert!(dom
            .add_event_listener(child, "click", Rc::new(|_: &mut Dom, _: &Event| {}))
            .is_none());
        assert!(dom.bubble_path(child).is_empty());
        assert_eq!(dom.dispatch_event(child, "click"), 0);
    }
}
