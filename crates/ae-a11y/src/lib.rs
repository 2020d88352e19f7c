//! a11y-enhancer Accessibility
//!
//! Accessibility building blocks shared by the widget enhancers.
//!
//! Features:
//! - ARIA roles and attribute names used by the widgets
//! - Key codes and keyboard events
//! - Roving focus index for tab lists and option lists
//! - Modal isolation (inerting everything outside an active subtree)
//! - Deferred focus continuations

pub mod aria;
pub mod keys;
pub mod focus;
pub mod isolation;
pub mod scheduler;
mod host;

pub use aria::{AriaRole, Autocomplete};
pub use keys::{Key, KeyEvent};
pub use focus::{FocusMove, RovingFocus};
pub use isolation::{
    ActivationId, ActivationRecord, FocusMemory, FocusSink, InteractivitySink, IsolationHost,
    ModalIsolation, Rejected, TreeQuery,
};
pub use scheduler::{DeferredTask, Scheduler, TaskHandle};

/// Accessibility error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum A11yError {
    #[error("Invalid ARIA role: {0}")]
    InvalidRole(String),

    #[error("Invalid autocomplete value: {0}")]
    InvalidAutocomplete(String),

    #[error("Activation {activation} is not the innermost open activation ({innermost})")]
    OutOfOrderDeactivation {
        activation: ActivationId,
        innermost: ActivationId,
    },
}
