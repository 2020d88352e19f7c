//! Dialog
//!
//! Modal and modeless dialogs. Opening a modal dialog inerts everything
//! outside its container through the enhancer's `ModalIsolation`; modals
//! opened from inside one another stack and must close innermost first.
//! Focus moves into an opened dialog on the next scheduling turn
//! (`Enhancer::settle`).

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use ae_a11y::aria;
use ae_a11y::{ActivationRecord, AriaRole, DeferredTask, FocusMemory, Key, KeyEvent, TaskHandle};
use ae_dom::{NodeId, WidgetEvent, WidgetEventKind};

use crate::{Enhancer, WidgetError};

/// Dialog type from the container's `type` attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DialogKind {
    /// Inerts the rest of the page while open
    #[default]
    Modal,
    Modeless,
}

impl DialogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modal => "modal",
            Self::Modeless => "modeless",
        }
    }
}

impl FromStr for DialogKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modal" => Ok(Self::Modal),
            "modeless" => Ok(Self::Modeless),
            _ => Err(()),
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const HEADINGS: &str = "h1, h2, h3, h4, h5, h6";

/// Enhanced dialog
#[derive(Debug)]
pub struct Dialog {
    element: NodeId,
    dialog: NodeId,
    kind: DialogKind,
    open: bool,
    /// Open modal activation
    record: Option<ActivationRecord<NodeId>>,
    /// Focus to restore when a modeless dialog closes
    memory: Option<FocusMemory<NodeId>>,
    pending_focus: Option<TaskHandle>,
}

impl Dialog {
    /// Apply dialog semantics to `element`
    pub fn enhance(enhancer: &mut Enhancer, element: NodeId) -> Result<Self, WidgetError> {
        enhancer.require_element(element)?;

        let kind: DialogKind = enhancer
            .attr(element, "type")
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        let tree = enhancer.doc.tree();
        let dialog = if tree.attribute(element, aria::ROLE) == Some(AriaRole::Dialog.as_str()) {
            element
        } else {
            tree.query_selector(element, &AriaRole::Dialog.selector())?
                .ok_or(WidgetError::MissingPart {
                    widget: "dialog",
                    part: "role=\"dialog\" element",
                })?
        };
        let title = tree.query_selector(dialog, HEADINGS)?;

        enhancer.set_attr(dialog, aria::TABINDEX, "-1")?;
        enhancer.set_attr(dialog, aria::ARIA_HIDDEN, "true")?;

        if let Some(title) = title {
            let existing = enhancer.attr(title, "id").map(str::to_string);
            let title_id = match existing {
                Some(id) => id,
                None => {
                    let id = enhancer.ids.next_id(&enhancer.config.dialog_title_prefix);
                    enhancer.set_attr(title, "id", id.as_str())?;
                    id
                }
            };
            if !enhancer.doc.tree().has_attribute(dialog, aria::ARIA_LABELLEDBY) {
                enhancer.set_attr(dialog, aria::ARIA_LABELLEDBY, title_id)?;
            }
        }

        tracing::debug!(?element, ?dialog, %kind, "dialog enhanced");

        Ok(Self {
            element,
            dialog,
            kind,
            open: false,
            record: None,
            memory: None,
            pending_focus: None,
        })
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    /// Node carrying `role="dialog"`
    pub fn dialog_node(&self) -> NodeId {
        self.dialog
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the dialog; returns `false` when it was already open
    pub fn open(&mut self, enhancer: &mut Enhancer) -> Result<bool, WidgetError> {
        if self.open {
            return Ok(false);
        }

        let exempt: HashSet<NodeId> = {
            let selector = format!("[{}]", enhancer.config.inert_exempt_attribute);
            let tree = enhancer.doc.tree();
            tree.query_selector_all(tree.root(), &selector)?.into_iter().collect()
        };
        let target = enhancer
            .doc
            .tree()
            .query_selector(self.dialog, "[autofocus]")?
            .unwrap_or(self.dialog);

        self.open = true;
        self.memory = Some(FocusMemory::capture(&enhancer.doc));
        enhancer.emit(WidgetEvent::new(WidgetEventKind::DialogOpened, self.element));
        enhancer.remove_attr(self.dialog, aria::ARIA_HIDDEN)?;

        if self.kind == DialogKind::Modal {
            let record = enhancer
                .isolation
                .activate(&mut enhancer.doc, self.element, |node| exempt.contains(&node));
            tracing::debug!(
                element = ?self.element,
                activation = %record.id(),
                "modal dialog opened"
            );
            self.record = Some(record);
        }

        self.pending_focus = Some(enhancer.scheduler.defer(DeferredTask::Focus(target)));
        Ok(true)
    }

    /// Close the dialog; returns `false` when it was already closed
    ///
    /// A modal that is not the innermost open one stays open and the
    /// rejection is returned as an error.
    pub fn close(&mut self, enhancer: &mut Enhancer) -> Result<bool, WidgetError> {
        if !self.open {
            return Ok(false);
        }

        if let Some(record) = self.record.take() {
            if let Err(rejected) = enhancer.isolation.deactivate(&mut enhancer.doc, record) {
                tracing::debug!(
                    element = ?self.element,
                    reason = %rejected.reason,
                    "modal close rejected"
                );
                self.record = Some(rejected.record);
                return Err(rejected.reason.into());
            }
        }

        self.open = false;
        enhancer.emit(WidgetEvent::new(WidgetEventKind::DialogClosed, self.element));
        enhancer.set_attr(self.dialog, aria::ARIA_HIDDEN, "true")?;

        if let Some(handle) = self.pending_focus.take() {
            enhancer.scheduler.cancel(handle);
        }

        let memory = self.memory.take();
        if self.kind == DialogKind::Modeless {
            if let Some(memory) = memory {
                memory.restore(&mut enhancer.doc);
            }
        }
        Ok(true)
    }

    /// Handle a keydown; Escape closes an open modal
    pub fn handle_key(
        &mut self,
        enhancer: &mut Enhancer,
        event: &KeyEvent,
    ) -> Result<bool, WidgetError> {
        let closes = self.open
            && self.kind == DialogKind::Modal
            && enhancer.config.modal_escape_closes
            && event.key == Key::Escape
            && enhancer.doc.tree().contains(self.element, event.target);

        if closes { self.close(enhancer) } else { Ok(false) }
    }
}
