//! Isolation collaborators backed by an `ae_dom::Document`
//!
//! Interactivity maps onto the `inert` attribute and the walk stops at
//! `<body>`.

use ae_dom::{Document, NodeId};

use crate::isolation::{FocusSink, InteractivitySink, TreeQuery};

impl TreeQuery for Document {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree().parent(node)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree().element_children(node).collect()
    }

    fn isolation_root(&self) -> NodeId {
        self.body()
    }
}

impl InteractivitySink for Document {
    fn is_interactive(&self, node: NodeId) -> bool {
        !self.has_inert_flag(node)
    }

    fn set_interactive(&mut self, node: NodeId, interactive: bool) {
        if let Err(err) = self.set_inert(node, !interactive) {
            tracing::warn!(node = ?node, %err, "cannot update inert flag");
        }
    }
}

impl FocusSink for Document {
    fn current_focus(&self) -> Option<NodeId> {
        self.active_element()
    }

    fn move_focus_to(&mut self, node: NodeId) -> bool {
        self.focus(node)
    }

    fn is_attached(&self, node: NodeId) -> bool {
        Document::is_attached(self, node)
    }
}
