//! Keyboard Input
//!
//! Commonly used key codes and the key events widgets react to.

use ae_dom::NodeId;

/// Keys the widgets interpret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Tab,
    Enter,
    Escape,
    Space,
    PageUp,
    PageDown,
    End,
    Home,
    Left,
    Up,
    Right,
    Down,
    Other(u32),
}

impl Key {
    /// From a legacy `keyCode` / `which` value
    pub fn from_code(code: u32) -> Self {
        match code {
            9 => Self::Tab,
            13 => Self::Enter,
            27 => Self::Escape,
            32 => Self::Space,
            33 => Self::PageUp,
            34 => Self::PageDown,
            35 => Self::End,
            36 => Self::Home,
            37 => Self::Left,
            38 => Self::Up,
            39 => Self::Right,
            40 => Self::Down,
            other => Self::Other(other),
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            Self::Tab => 9,
            Self::Enter => 13,
            Self::Escape => 27,
            Self::Space => 32,
            Self::PageUp => 33,
            Self::PageDown => 34,
            Self::End => 35,
            Self::Home => 36,
            Self::Left => 37,
            Self::Up => 38,
            Self::Right => 39,
            Self::Down => 40,
            Self::Other(code) => *code,
        }
    }

    /// From a `KeyboardEvent.key` name
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Tab" => Self::Tab,
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            " " | "Spacebar" => Self::Space,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "End" => Self::End,
            "Home" => Self::Home,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowRight" | "Right" => Self::Right,
            "ArrowDown" | "Down" => Self::Down,
            _ => return None,
        })
    }
}

/// Keydown event delivered to a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// Element that had focus when the key was pressed
    pub target: NodeId,
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: Key, target: NodeId) -> Self {
        Self { key, target, alt: false, ctrl: false, shift: false }
    }

    pub fn alt(mut self) -> Self { self.alt = true; self }
    pub fn ctrl(mut self) -> Self { self.ctrl = true; self }
    pub fn shift(mut self) -> Self { self.shift = true; self }

    /// Key pressed without modifiers
    pub fn is_plain(&self, key: Key) -> bool {
        self.key == key && !self.alt && !self.ctrl
    }
}
