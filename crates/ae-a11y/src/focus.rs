//! Focus Management
//!
//! Roving index over an ordered list of focus positions (tab headings,
//! listbox options). Moves clamp at the ends unless wrapping is enabled.

/// A change of the current position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusMove {
    pub from: usize,
    pub to: usize,
}

/// Roving focus index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RovingFocus {
    len: usize,
    current: usize,
    wrap: bool,
}

impl RovingFocus {
    pub fn new(len: usize, wrap: bool) -> Self {
        Self { len, current: 0, wrap }
    }

    /// Start at `index` (clamped into range)
    pub fn with_current(mut self, index: usize) -> Self {
        self.current = index.min(self.len.saturating_sub(1));
        self
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn wraps(&self) -> bool {
        self.wrap
    }

    fn last_index(&self) -> usize {
        self.len.saturating_sub(1)
    }

    /// Move to the next position
    pub fn next(&mut self) -> Option<FocusMove> {
        let to = if self.current == self.last_index() {
            if self.wrap { 0 } else { self.current }
        } else {
            self.current + 1
        };
        self.set(to)
    }

    /// Move to the previous position
    pub fn prev(&mut self) -> Option<FocusMove> {
        let to = if self.current == 0 {
            if self.wrap { self.last_index() } else { 0 }
        } else {
            self.current - 1
        };
        self.set(to)
    }

    pub fn first(&mut self) -> Option<FocusMove> {
        self.set(0)
    }

    pub fn last(&mut self) -> Option<FocusMove> {
        self.set(self.last_index())
    }

    /// Jump to `index`; `None` when out of range or unchanged
    pub fn set(&mut self, index: usize) -> Option<FocusMove> {
        if index >= self.len || index == self.current {
            return None;
        }
        let from = std::mem::replace(&mut self.current, index);
        Some(FocusMove { from, to: index })
    }
}
