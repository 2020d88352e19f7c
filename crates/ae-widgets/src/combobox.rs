//! Combo box
//!
//! An autocomplete text field (`role="combobox"`) driving a popup
//! `role="listbox"`. Every direct element child of the listbox is an option.
//! The field keeps DOM focus; the current option is tracked through
//! `aria-activedescendant`.

use ae_a11y::aria::{self, bool_str};
use ae_a11y::{AriaRole, Autocomplete, FocusMove, Key, KeyEvent, RovingFocus};
use ae_dom::{NodeId, WidgetEvent, WidgetEventKind};

use crate::{Enhancer, WidgetError};

/// Options read from the container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComboboxOptions {
    /// `autocomplete="list|inline|both"`; anything else means `list`
    pub autocomplete: Autocomplete,
    /// `wrap-focus`: the text field becomes a stop between the last and first option
    pub wrap_focus: bool,
}

impl ComboboxOptions {
    fn read(enhancer: &Enhancer, element: NodeId) -> Self {
        let autocomplete = match enhancer.attr(element, "autocomplete") {
            Some(value) => value.parse().unwrap_or_else(|err| {
                tracing::debug!(%err, "falling back to list autocomplete");
                Autocomplete::List
            }),
            None => Autocomplete::List,
        };
        Self {
            autocomplete,
            wrap_focus: enhancer.doc.tree().has_attribute(element, "wrap-focus"),
        }
    }
}

/// Enhanced combo box
#[derive(Debug, Clone)]
pub struct Combobox {
    element: NodeId,
    input: NodeId,
    listbox: NodeId,
    /// Roving positions: the options, preceded by the input when focus wraps
    positions: Vec<NodeId>,
    options: ComboboxOptions,
    focus: RovingFocus,
}

impl Combobox {
    /// Apply combo box semantics to `element`
    pub fn enhance(enhancer: &mut Enhancer, element: NodeId) -> Result<Self, WidgetError> {
        enhancer.require_element(element)?;
        let options = ComboboxOptions::read(enhancer, element);

        let tree = enhancer.doc.tree();
        let input = tree
            .query_selector(element, &AriaRole::Combobox.selector())?
            .ok_or(WidgetError::MissingPart {
                widget: "combobox",
                part: "role=\"combobox\" field",
            })?;
        let listbox = tree
            .query_selector(element, &AriaRole::Listbox.selector())?
            .ok_or(WidgetError::MissingPart { widget: "combobox", part: "role=\"listbox\" list" })?;
        let items: Vec<NodeId> = tree.element_children(listbox).collect();

        let listbox_id = enhancer.ids.next_id(&enhancer.config.combobox_listbox_prefix);
        let option_prefix = enhancer.config.combobox_option_prefix.clone();
        let option_uid = enhancer.ids.reserve(&option_prefix, items.len() as u32);

        if !items.is_empty() {
            let first = format!("{option_prefix}{option_uid}");
            enhancer.set_attr(input, aria::ARIA_ACTIVEDESCENDANT, first)?;
        }
        enhancer.set_attr(input, aria::ARIA_AUTOCOMPLETE, options.autocomplete.as_str())?;
        enhancer.set_attr(input, aria::ARIA_EXPANDED, "false")?;
        enhancer.set_attr(input, aria::ARIA_OWNS, listbox_id.as_str())?;
        enhancer.set_attr(input, aria::ARIA_CONTROLS, listbox_id.as_str())?;

        enhancer.set_attr(listbox, aria::ARIA_HIDDEN, "true")?;
        enhancer.set_attr(listbox, "id", listbox_id)?;

        for (i, &item) in items.iter().enumerate() {
            enhancer.set_attr(item, aria::ARIA_SELECTED, "false")?;
            enhancer.set_attr(item, "id", format!("{option_prefix}{}", option_uid + i as u32))?;
            enhancer.set_attr(item, aria::ROLE, AriaRole::Option.as_str())?;
        }

        let mut positions = items;
        let mut start = 0;
        if options.wrap_focus {
            positions.insert(0, input);
            start = 1;
        }
        let focus = RovingFocus::new(positions.len(), options.wrap_focus).with_current(start);

        tracing::debug!(?element, options = positions.len() - start, ?options, "combobox enhanced");

        Ok(Self { element, input, listbox, positions, options, focus })
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn input(&self) -> NodeId {
        self.input
    }

    pub fn listbox(&self) -> NodeId {
        self.listbox
    }

    pub fn options(&self) -> ComboboxOptions {
        self.options
    }

    /// Listbox options in document order
    pub fn option_nodes(&self) -> &[NodeId] {
        let skip = usize::from(self.options.wrap_focus);
        &self.positions[skip.min(self.positions.len())..]
    }

    /// Current roving position (an option, or the field itself when focus wraps)
    pub fn current(&self) -> Option<NodeId> {
        self.positions.get(self.focus.current()).copied()
    }

    pub fn is_expanded(&self, enhancer: &Enhancer) -> bool {
        enhancer.attr(self.input, aria::ARIA_EXPANDED) == Some("true")
    }

    /// Handle a keydown; returns whether the key was consumed
    pub fn handle_key(
        &mut self,
        enhancer: &mut Enhancer,
        event: &KeyEvent,
    ) -> Result<bool, WidgetError> {
        if !enhancer.doc.tree().contains(self.element, event.target) {
            return Ok(false);
        }

        if event.alt && matches!(event.key, Key::Up | Key::Down) {
            let expand = !self.is_expanded(enhancer);
            self.set_expanded(enhancer, expand)?;
            return Ok(true);
        }

        if !self.is_expanded(enhancer) {
            return Ok(false);
        }

        match event.key {
            Key::Up => {
                if let Some(step) = self.focus.prev() {
                    self.move_focus(enhancer, step)?;
                }
            }
            Key::Down => {
                if let Some(step) = self.focus.next() {
                    self.move_focus(enhancer, step)?;
                }
            }
            Key::Enter => self.select_current(enhancer)?,
            Key::Escape => self.set_expanded(enhancer, false)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Open or close the listbox
    pub fn set_expanded(&self, enhancer: &mut Enhancer, expanded: bool) -> Result<(), WidgetError> {
        if self.is_expanded(enhancer) == expanded {
            return Ok(());
        }
        enhancer.set_attr(self.input, aria::ARIA_EXPANDED, bool_str(expanded))?;
        enhancer.set_attr(self.listbox, aria::ARIA_HIDDEN, bool_str(!expanded))?;

        let kind = if expanded {
            WidgetEventKind::ComboboxExpanded
        } else {
            WidgetEventKind::ComboboxCollapsed
        };
        tracing::debug!(element = ?self.element, expanded, "combobox listbox toggled");
        enhancer.emit(WidgetEvent::new(kind, self.element));
        Ok(())
    }

    fn select_current(&self, enhancer: &mut Enhancer) -> Result<(), WidgetError> {
        if let Some(option) = self.current().filter(|&node| node != self.input) {
            if self.options.autocomplete.fills_input() {
                self.fill_input(enhancer, option)?;
            }
            enhancer.emit(WidgetEvent::with_detail(
                WidgetEventKind::ComboboxOptionSelected,
                self.element,
                option,
            ));
        }
        self.set_expanded(enhancer, false)
    }

    fn move_focus(&self, enhancer: &mut Enhancer, step: FocusMove) -> Result<(), WidgetError> {
        let (from, to) = (self.positions[step.from], self.positions[step.to]);

        if from != self.input {
            enhancer.set_attr(from, aria::ARIA_SELECTED, "false")?;
        }
        enhancer.emit(WidgetEvent::with_detail(
            WidgetEventKind::ComboboxOptionBlurred,
            self.element,
            from,
        ));

        if to == self.input {
            enhancer.remove_attr(self.input, aria::ARIA_ACTIVEDESCENDANT)?;
        } else {
            enhancer.set_attr(to, aria::ARIA_SELECTED, "true")?;
            let id = enhancer.attr(to, "id").unwrap_or_default().to_string();
            enhancer.set_attr(self.input, aria::ARIA_ACTIVEDESCENDANT, id)?;
            if self.options.autocomplete.fills_input() {
                self.fill_input(enhancer, to)?;
            }
        }
        enhancer.emit(WidgetEvent::with_detail(
            WidgetEventKind::ComboboxOptionFocused,
            self.element,
            to,
        ));
        Ok(())
    }

    fn fill_input(&self, enhancer: &mut Enhancer, option: NodeId) -> Result<(), WidgetError> {
        let text = enhancer.doc.tree().text_content(option);
        enhancer.set_attr(self.input, "value", text.trim())
    }
}
