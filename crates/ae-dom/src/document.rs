//! Document - High-level document API
//!
//! Owns the tree, the focused element and the widget event queue.

use crate::{DomResult, DomTree, EventDispatcher, EventQueue, NodeId, WidgetEvent};

/// Attribute excluding a subtree from focus and pointer interaction
pub const INERT: &str = "inert";

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    tree: DomTree,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
    active_element: Option<NodeId>,
    events: EventQueue,
}

impl Document {
    /// Create a document with `<html><head></head><body></body></html>`
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        let root = tree.root();
        let linked = tree
            .append_child(root, html)
            .and_then(|_| tree.append_child(html, head))
            .and_then(|_| tree.append_child(html, body));
        debug_assert!(linked.is_ok(), "fresh document skeleton must link");

        Self {
            tree,
            html_element: html,
            head_element: head,
            body_element: body,
            active_element: None,
            events: EventQueue::new(),
        }
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    // --- Convenience builders ---

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    /// Create an element and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> DomResult<NodeId> {
        let id = self.tree.create_element(tag);
        self.tree.append_child(parent, id)?;
        Ok(id)
    }

    /// Create a text node and append it to `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> DomResult<NodeId> {
        let id = self.tree.create_text(text);
        self.tree.append_child(parent, id)?;
        Ok(id)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.tree.append_child(parent, child)
    }

    /// Detach a node, blurring it if focus was inside
    pub fn remove(&mut self, id: NodeId) -> DomResult<()> {
        self.tree.detach(id)?;
        if self.active_element.is_some_and(|a| self.tree.contains(id, a)) {
            self.active_element = None;
        }
        Ok(())
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&n| self.tree.attribute(n, "id") == Some(id))
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        self.tree.is_attached(id)
    }

    // --- Inertness ---

    /// Whether the node carries the `inert` attribute itself
    pub fn has_inert_flag(&self, id: NodeId) -> bool {
        self.tree.has_attribute(id, INERT)
    }

    /// Whether the node sits inside an inert subtree (inclusive)
    pub fn is_inert(&self, id: NodeId) -> bool {
        self.has_inert_flag(id) || self.tree.ancestors(id).any(|a| self.has_inert_flag(a))
    }

    pub fn set_inert(&mut self, id: NodeId, inert: bool) -> DomResult<()> {
        if inert {
            self.tree.set_attribute(id, INERT, "")
        } else {
            self.tree.remove_attribute(id, INERT).map(|_| ())
        }
    }

    // --- Focus ---

    /// Focused element, if still attached
    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element.filter(|&id| self.tree.is_attached(id))
    }

    /// Move focus; refused for detached, non-element or inert targets
    pub fn focus(&mut self, id: NodeId) -> bool {
        if !self.tree.is_element(id) || !self.tree.is_attached(id) || self.is_inert(id) {
            tracing::debug!(node = ?id, "focus refused");
            return false;
        }
        self.active_element = Some(id);
        true
    }

    pub fn blur(&mut self) {
        self.active_element = None;
    }

    // --- Events ---

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Take all queued widget events
    pub fn drain_events(&mut self) -> Vec<WidgetEvent> {
        self.events.drain()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl EventDispatcher for Document {
    fn dispatch_event(&mut self, event: WidgetEvent) {
        self.events.dispatch_event(event);
    }
}
