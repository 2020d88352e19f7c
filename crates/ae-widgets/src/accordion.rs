//! Accordion
//!
//! A container of `role="tab"` headings, each controlling a
//! `role="tabpanel"`. Headings share one roving tab stop.

use ae_a11y::aria::{self, bool_str};
use ae_a11y::{AriaRole, FocusMove, Key, KeyEvent, RovingFocus};
use ae_dom::{NodeId, WidgetEvent, WidgetEventKind};

use crate::{Enhancer, WidgetError};

/// Options read from the container's boolean attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccordionOptions {
    /// `wrap-focus`: arrow keys wrap past the first and last heading
    pub wrap_focus: bool,
    /// `expanded`: every panel starts expanded
    pub expanded: bool,
    /// `multiple`: more than one panel may be expanded
    pub multiple: bool,
}

impl AccordionOptions {
    fn read(enhancer: &Enhancer, element: NodeId) -> Self {
        let tree = enhancer.doc.tree();
        Self {
            wrap_focus: tree.has_attribute(element, "wrap-focus"),
            expanded: tree.has_attribute(element, "expanded"),
            multiple: tree.has_attribute(element, "multiple"),
        }
    }
}

/// Enhanced accordion
#[derive(Debug, Clone)]
pub struct Accordion {
    element: NodeId,
    tabs: Vec<NodeId>,
    panels: Vec<NodeId>,
    options: AccordionOptions,
    focus: RovingFocus,
}

impl Accordion {
    /// Apply accordion semantics to `element`
    pub fn enhance(enhancer: &mut Enhancer, element: NodeId) -> Result<Self, WidgetError> {
        enhancer.require_element(element)?;
        let options = AccordionOptions::read(enhancer, element);

        let tree = enhancer.doc.tree();
        let tabs = tree.query_selector_all(element, &AriaRole::Tab.selector())?;
        let panels = tree.query_selector_all(element, &AriaRole::TabPanel.selector())?;

        let tab_prefix = enhancer.config.accordion_tab_prefix.clone();
        let panel_prefix = enhancer.config.accordion_panel_prefix.clone();
        let count = tabs.len().max(panels.len()) as u32;
        let uid = enhancer.ids.reserve(&tab_prefix, count);

        enhancer.set_attr(element, aria::ROLE, AriaRole::TabList.as_str())?;
        enhancer.set_attr(element, aria::ARIA_MULTISELECTABLE, bool_str(options.multiple))?;

        for (i, &tab) in tabs.iter().enumerate() {
            let n = uid + i as u32;
            enhancer.set_attr(tab, aria::ARIA_EXPANDED, bool_str(options.expanded))?;
            enhancer.set_attr(tab, aria::ARIA_SELECTED, bool_str(i == 0))?;
            enhancer.set_attr(tab, aria::ARIA_CONTROLS, format!("{panel_prefix}{n}"))?;
            enhancer.set_attr(tab, aria::TABINDEX, if i == 0 { "0" } else { "-1" })?;
            enhancer.set_attr(tab, "id", format!("{tab_prefix}{n}"))?;
        }

        for (i, &panel) in panels.iter().enumerate() {
            let n = uid + i as u32;
            enhancer.set_attr(panel, aria::ARIA_LABELLEDBY, format!("{tab_prefix}{n}"))?;
            enhancer.set_attr(panel, aria::ARIA_HIDDEN, bool_str(!options.expanded))?;
            enhancer.set_attr(panel, "id", format!("{panel_prefix}{n}"))?;
        }

        tracing::debug!(?element, tabs = tabs.len(), ?options, "accordion enhanced");

        Ok(Self {
            element,
            focus: RovingFocus::new(tabs.len(), options.wrap_focus),
            tabs,
            panels,
            options,
        })
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn tabs(&self) -> &[NodeId] {
        &self.tabs
    }

    pub fn panels(&self) -> &[NodeId] {
        &self.panels
    }

    pub fn options(&self) -> AccordionOptions {
        self.options
    }

    /// Heading holding the tab stop
    pub fn current_tab(&self) -> Option<NodeId> {
        self.tabs.get(self.focus.current()).copied()
    }

    pub fn is_expanded(&self, enhancer: &Enhancer, tab: NodeId) -> bool {
        enhancer.attr(tab, aria::ARIA_EXPANDED) == Some("true")
    }

    /// Handle a keydown; returns whether the key was consumed
    pub fn handle_key(
        &mut self,
        enhancer: &mut Enhancer,
        event: &KeyEvent,
    ) -> Result<bool, WidgetError> {
        if !self.tabs.contains(&event.target) {
            return Ok(false);
        }

        let step = match event.key {
            Key::Left | Key::Up => self.focus.prev(),
            Key::Right | Key::Down => self.focus.next(),
            Key::Home => self.focus.first(),
            Key::End => self.focus.last(),
            Key::Enter | Key::Space => {
                if let Some(tab) = self.current_tab() {
                    self.toggle(enhancer, tab)?;
                }
                return Ok(true);
            }
            _ => return Ok(false),
        };

        self.move_focus(enhancer, step.unwrap_or_else(|| self.stay()))?;
        Ok(true)
    }

    /// Pointer-down on a heading makes it current and toggles its panel
    pub fn handle_pointer_down(
        &mut self,
        enhancer: &mut Enhancer,
        target: NodeId,
    ) -> Result<bool, WidgetError> {
        let Some(index) = self.tabs.iter().position(|&tab| tab == target) else {
            return Ok(false);
        };

        let step = self.focus.set(index).unwrap_or_else(|| self.stay());
        self.move_focus(enhancer, step)?;
        self.toggle(enhancer, target)?;
        Ok(true)
    }

    /// Expand or collapse the panel controlled by `tab`
    pub fn toggle(&mut self, enhancer: &mut Enhancer, tab: NodeId) -> Result<(), WidgetError> {
        if self.is_expanded(enhancer, tab) {
            self.set_expanded(enhancer, tab, false)
        } else {
            if !self.options.multiple {
                let open = self
                    .tabs
                    .iter()
                    .copied()
                    .find(|&t| t != tab && self.is_expanded(enhancer, t));
                if let Some(open) = open {
                    self.set_expanded(enhancer, open, false)?;
                }
            }
            self.set_expanded(enhancer, tab, true)
        }
    }

    fn set_expanded(
        &self,
        enhancer: &mut Enhancer,
        tab: NodeId,
        expanded: bool,
    ) -> Result<(), WidgetError> {
        enhancer.set_attr(tab, aria::ARIA_EXPANDED, bool_str(expanded))?;
        if let Some(panel) = self.panel_for(enhancer, tab) {
            enhancer.set_attr(panel, aria::ARIA_HIDDEN, bool_str(!expanded))?;
        }

        let kind = if expanded {
            WidgetEventKind::AccordionExpanded
        } else {
            WidgetEventKind::AccordionCollapsed
        };
        tracing::debug!(element = ?self.element, ?tab, expanded, "accordion panel toggled");
        enhancer.emit(WidgetEvent::with_detail(kind, self.element, tab));
        Ok(())
    }

    fn panel_for(&self, enhancer: &Enhancer, tab: NodeId) -> Option<NodeId> {
        let controls = enhancer.attr(tab, aria::ARIA_CONTROLS)?;
        self.panels
            .iter()
            .copied()
            .find(|&panel| enhancer.attr(panel, "id") == Some(controls))
    }

    /// Unchanged position; the current tab is re-announced and re-focused
    fn stay(&self) -> FocusMove {
        let current = self.focus.current();
        FocusMove {
            from: current,
            to: current,
        }
    }

    fn move_focus(&self, enhancer: &mut Enhancer, step: FocusMove) -> Result<(), WidgetError> {
        let (from, to) = (self.tabs[step.from], self.tabs[step.to]);

        enhancer.set_attr(from, aria::ARIA_SELECTED, "false")?;
        enhancer.set_attr(from, aria::TABINDEX, "-1")?;
        enhancer.emit(WidgetEvent::with_detail(
            WidgetEventKind::AccordionBlurred,
            self.element,
            from,
        ));

        enhancer.set_attr(to, aria::ARIA_SELECTED, "true")?;
        enhancer.set_attr(to, aria::TABINDEX, "0")?;
        enhancer.doc.focus(to);
        enhancer.emit(WidgetEvent::with_detail(
            WidgetEventKind::AccordionFocused,
            self.element,
            to,
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(attrs: &[&str], count: usize) -> (Enhancer, NodeId) {
        let mut enhancer = Enhancer::default();
        let doc = enhancer.document_mut();
        let body = doc.body();
        let element = doc.append_element(body, "div").unwrap();
        for attr in attrs {
            doc.tree_mut().set_attribute(element, attr, "").unwrap();
        }
        for _ in 0..count {
            let tab = doc.append_element(element, "h3").unwrap();
            doc.tree_mut().set_attribute(tab, "role", "tab").unwrap();
            let panel = doc.append_element(element, "div").unwrap();
            doc.tree_mut().set_attribute(panel, "role", "tabpanel").unwrap();
        }
        (enhancer, element)
    }

    #[test]
    fn test_options_from_attributes() {
        let (mut enhancer, element) = setup(&["multiple", "wrap-focus"], 1);
        let accordion = Accordion::enhance(&mut enhancer, element).unwrap();
        assert_eq!(
            accordion.options(),
            AccordionOptions { wrap_focus: true, expanded: false, multiple: true }
        );
    }

    #[test]
    fn test_ids_continue_across_accordions() {
        let (mut enhancer, first) = setup(&[], 2);
        let doc = enhancer.document_mut();
        let body = doc.body();
        let second = doc.append_element(body, "div").unwrap();
        let tab = doc.append_element(second, "h3").unwrap();
        doc.tree_mut().set_attribute(tab, "role", "tab").unwrap();

        Accordion::enhance(&mut enhancer, first).unwrap();
        Accordion::enhance(&mut enhancer, second).unwrap();
        assert_eq!(enhancer.attr(tab, "id"), Some("ae_accordion-heading3"));
    }

    #[test]
    fn test_no_tabs_ignores_input() {
        let (mut enhancer, element) = setup(&[], 0);
        let mut accordion = Accordion::enhance(&mut enhancer, element).unwrap();
        assert_eq!(accordion.current_tab(), None);
        let event = KeyEvent::new(Key::Down, element);
        assert!(!accordion.handle_key(&mut enhancer, &event).unwrap());
        assert!(enhancer.drain_events().is_empty());
    }

    #[test]
    fn test_detached_container_rejected() {
        let mut enhancer = Enhancer::default();
        let loose = enhancer.document_mut().create_element("div");
        assert!(matches!(
            Accordion::enhance(&mut enhancer, loose),
            Err(WidgetError::NotAnElement(_))
        ));
    }
}
