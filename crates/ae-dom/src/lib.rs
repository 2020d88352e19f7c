//! a11y-enhancer DOM
//!
//! Minimal arena DOM tree that the widget enhancers operate on.
//!
//! Features:
//! - Element and text nodes with parent/child/sibling links
//! - Attribute maps with boolean attribute helpers
//! - Simple selector queries (`tag`, `#id`, `[attr]`, `[attr="v"]`, lists)
//! - Document focus pointer that honours `inert` subtrees
//! - Widget event queue

mod attributes;
mod node;
mod tree;
mod document;
mod query;
mod events;

pub use attributes::{Attr, NamedNodeMap};
pub use node::{Node, NodeData, ElementData};
pub use tree::{DomTree, Children};
pub use document::{Document, INERT};
pub use query::{Selector, SelectorList};
pub use events::{WidgetEvent, WidgetEventKind, EventQueue, EventDispatcher};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Arena index of this node
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    #[error("Hierarchy request error: {child:?} cannot be inserted into {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}
