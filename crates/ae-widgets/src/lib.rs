//! a11y-enhancer Widgets
//!
//! Upgrades plain markup into accessible widgets: an accordion, a combo box
//! and a modal/modeless dialog. Each enhancer runs once per container and
//! returns a handle that processes keyboard and pointer input.
//!
//! # Example
//! ```rust,ignore
//! use ae_widgets::{Enhancer, Config, Dialog};
//!
//! let mut enhancer = Enhancer::new(document, Config::default());
//! let mut dialog = Dialog::enhance(&mut enhancer, container)?;
//! dialog.open(&mut enhancer)?;
//! enhancer.settle(); // deferred focus moves into the dialog
//! ```

pub mod accordion;
pub mod combobox;
pub mod config;
pub mod dialog;
mod ids;

pub use accordion::{Accordion, AccordionOptions};
pub use combobox::{Combobox, ComboboxOptions};
pub use config::Config;
pub use dialog::{Dialog, DialogKind};
pub use ids::IdGenerator;

// Re-export sub-crates for embedders
pub use ae_a11y as a11y;
pub use ae_dom as dom;

use ae_a11y::{ModalIsolation, Scheduler};
use ae_dom::{Document, DomError, EventDispatcher, NodeId, WidgetEvent};

/// Widget enhancement error
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("Accessibility error: {0}")]
    A11y(#[from] ae_a11y::A11yError),

    #[error("Node {0:?} is not an attached element")]
    NotAnElement(NodeId),

    #[error("{widget} container has no {part}")]
    MissingPart {
        widget: &'static str,
        part: &'static str,
    },
}

/// Shared state for every widget enhanced on one document
#[derive(Debug)]
pub struct Enhancer {
    pub(crate) doc: Document,
    pub(crate) config: Config,
    pub(crate) ids: IdGenerator,
    pub(crate) isolation: ModalIsolation,
    pub(crate) scheduler: Scheduler<NodeId>,
}

impl Enhancer {
    pub fn new(doc: Document, config: Config) -> Self {
        tracing::info!("a11y-enhancer {} initialized", VERSION);
        Self {
            doc,
            config,
            ids: IdGenerator::new(),
            isolation: ModalIsolation::new(),
            scheduler: Scheduler::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Give the document back
    pub fn into_document(self) -> Document {
        self.doc
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Open modal activations
    pub fn isolation_depth(&self) -> usize {
        self.isolation.depth()
    }

    /// Deferred tasks waiting for the next turn
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Run the next scheduling turn (deferred focus moves)
    pub fn settle(&mut self) -> usize {
        self.scheduler.run_pending(&mut self.doc)
    }

    /// Take all queued widget events
    pub fn drain_events(&mut self) -> Vec<WidgetEvent> {
        self.doc.drain_events()
    }

    // --- Helpers for the widgets ---

    pub(crate) fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.doc.tree().attribute(node, name)
    }

    pub(crate) fn set_attr(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), WidgetError> {
        Ok(self.doc.tree_mut().set_attribute(node, name, value)?)
    }

    pub(crate) fn remove_attr(&mut self, node: NodeId, name: &str) -> Result<(), WidgetError> {
        self.doc.tree_mut().remove_attribute(node, name)?;
        Ok(())
    }

    pub(crate) fn emit(&mut self, event: WidgetEvent) {
        self.doc.dispatch_event(event);
    }

    /// Reject anything that is not an attached element
    pub(crate) fn require_element(&self, node: NodeId) -> Result<(), WidgetError> {
        if self.doc.tree().is_element(node) && self.doc.is_attached(node) {
            Ok(())
        } else {
            Err(WidgetError::NotAnElement(node))
        }
    }
}

impl Default for Enhancer {
    fn default() -> Self {
        Self::new(Document::new(), Config::default())
    }
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
