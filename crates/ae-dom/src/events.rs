//! Widget Events
//!
//! Notifications emitted by the enhancers. Events are queued on the
//! document and drained by the embedder, in emission order.

use crate::NodeId;

/// Widget event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetEventKind {
    AccordionExpanded,
    AccordionCollapsed,
    AccordionFocused,
    AccordionBlurred,

    ComboboxExpanded,
    ComboboxCollapsed,
    ComboboxOptionFocused,
    ComboboxOptionBlurred,
    ComboboxOptionSelected,

    DialogOpened,
    DialogClosed,
}

impl WidgetEventKind {
    /// DOM event name
    pub fn name(&self) -> &'static str {
        match self {
            Self::AccordionExpanded => "accordion-expanded",
            Self::AccordionCollapsed => "accordion-collapsed",
            Self::AccordionFocused => "accordion-focused",
            Self::AccordionBlurred => "accordion-blurred",
            Self::ComboboxExpanded => "combobox-expanded",
            Self::ComboboxCollapsed => "combobox-collapsed",
            Self::ComboboxOptionFocused => "combobox-option-focused",
            Self::ComboboxOptionBlurred => "combobox-option-blurred",
            Self::ComboboxOptionSelected => "combobox-option-selected",
            Self::DialogOpened => "dialog-opened",
            Self::DialogClosed => "dialog-closed",
        }
    }
}

/// Widget event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetEvent {
    pub kind: WidgetEventKind,
    /// Widget container the event is fired on
    pub target: NodeId,
    /// Element the event is about (heading, option)
    pub detail: Option<NodeId>,
}

impl WidgetEvent {
    pub fn new(kind: WidgetEventKind, target: NodeId) -> Self {
        Self { kind, target, detail: None }
    }

    pub fn with_detail(kind: WidgetEventKind, target: NodeId, detail: NodeId) -> Self {
        Self { kind, target, detail: Some(detail) }
    }
}

/// FIFO event queue
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<WidgetEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: WidgetEvent) {
        self.events.push(event);
    }

    /// Take all queued events
    pub fn drain(&mut self) -> Vec<WidgetEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WidgetEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Event dispatcher trait
pub trait EventDispatcher {
    fn dispatch_event(&mut self, event: WidgetEvent);
}

impl EventDispatcher for EventQueue {
    fn dispatch_event(&mut self, event: WidgetEvent) {
        tracing::trace!(event = event.kind.name(), target = ?event.target, "dispatch");
        self.push(event);
    }
}
