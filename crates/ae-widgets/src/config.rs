//! Enhancer Configuration

use serde::{Deserialize, Serialize};

/// Enhancer configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Id prefix for accordion headings
    pub accordion_tab_prefix: String,

    /// Id prefix for accordion panels
    pub accordion_panel_prefix: String,

    /// Id prefix for combo box listboxes
    pub combobox_listbox_prefix: String,

    /// Id prefix for combo box options
    pub combobox_option_prefix: String,

    /// Id prefix for generated dialog headings
    pub dialog_title_prefix: String,

    /// Elements carrying this attribute are never inerted by a modal
    pub inert_exempt_attribute: String,

    /// Escape closes an open modal dialog
    pub modal_escape_closes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            accordion_tab_prefix: "ae_accordion-heading".to_string(),
            accordion_panel_prefix: "ae_accordion-panel".to_string(),
            combobox_listbox_prefix: "ae_combobox-listbox".to_string(),
            combobox_option_prefix: "ae_combobox-option".to_string(),
            dialog_title_prefix: "ae_dialog-heading".to_string(),
            inert_exempt_attribute: "data-inert-exempt".to_string(),
            modal_escape_closes: true,
        }
    }
}
