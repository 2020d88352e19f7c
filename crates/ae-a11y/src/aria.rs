//! ARIA Support
//!
//! The roles, states and properties the enhancers read and write.

use std::fmt;
use std::str::FromStr;

use crate::A11yError;

pub const ROLE: &str = "role";
pub const ARIA_ACTIVEDESCENDANT: &str = "aria-activedescendant";
pub const ARIA_AUTOCOMPLETE: &str = "aria-autocomplete";
pub const ARIA_CONTROLS: &str = "aria-controls";
pub const ARIA_EXPANDED: &str = "aria-expanded";
pub const ARIA_HIDDEN: &str = "aria-hidden";
pub const ARIA_LABELLEDBY: &str = "aria-labelledby";
pub const ARIA_MULTISELECTABLE: &str = "aria-multiselectable";
pub const ARIA_OWNS: &str = "aria-owns";
pub const ARIA_SELECTED: &str = "aria-selected";
pub const TABINDEX: &str = "tabindex";

/// ARIA role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    AlertDialog,
    Button,
    Combobox,
    Dialog,
    Listbox,
    Option,
    Tab,
    TabList,
    TabPanel,
    TextBox,
}

impl AriaRole {
    /// Attribute value for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlertDialog => "alertdialog",
            Self::Button => "button",
            Self::Combobox => "combobox",
            Self::Dialog => "dialog",
            Self::Listbox => "listbox",
            Self::Option => "option",
            Self::Tab => "tab",
            Self::TabList => "tablist",
            Self::TabPanel => "tabpanel",
            Self::TextBox => "textbox",
        }
    }

    /// Attribute selector matching elements with this role
    pub fn selector(&self) -> String {
        format!(r#"[role="{}"]"#, self.as_str())
    }

    /// Check if role is a dialog window
    pub fn is_dialog(&self) -> bool {
        matches!(self, Self::Dialog | Self::AlertDialog)
    }
}

impl FromStr for AriaRole {
    type Err = A11yError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "alertdialog" => Self::AlertDialog,
            "button" => Self::Button,
            "combobox" => Self::Combobox,
            "dialog" => Self::Dialog,
            "listbox" => Self::Listbox,
            "option" => Self::Option,
            "tab" => Self::Tab,
            "tablist" => Self::TabList,
            "tabpanel" => Self::TabPanel,
            "textbox" => Self::TextBox,
            _ => return Err(A11yError::InvalidRole(s.to_string())),
        })
    }
}

impl fmt::Display for AriaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `aria-autocomplete` values supported by the combo box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Autocomplete {
    /// Choices filter as the user types; the field is not auto populated
    #[default]
    List,
    /// The field auto populates with the selected option
    Inline,
    Both,
}

impl Autocomplete {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Inline => "inline",
            Self::Both => "both",
        }
    }

    /// Whether navigating options writes the option text into the field
    pub fn fills_input(&self) -> bool {
        matches!(self, Self::Inline | Self::Both)
    }
}

impl FromStr for Autocomplete {
    type Err = A11yError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(Self::List),
            "inline" => Ok(Self::Inline),
            "both" => Ok(Self::Both),
            _ => Err(A11yError::InvalidAutocomplete(s.to_string())),
        }
    }
}

/// `"true"` / `"false"` attribute value
#[inline]
pub fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
