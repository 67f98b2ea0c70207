//! Element tree: slotmap-backed arena with styles, classes, attributes,
//! listeners and disposal hooks.

pub mod node;
pub mod tree;
pub mod event;
pub mod query;

pub use event::{Event, EventHandler, ListenerId};
pub use node::{ClassList, ElementData, NodeId};
pub use tree::{Disposer, Dom};
