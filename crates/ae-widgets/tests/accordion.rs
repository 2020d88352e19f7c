//! Accordion keyboard, pointer and ARIA behaviour

use ae_a11y::{Key, KeyEvent};
use ae_dom::{NodeId, WidgetEventKind};
use ae_widgets::{Accordion, Enhancer};

/// Container with three heading/panel pairs
fn fixture(attrs: &[&str]) -> (Enhancer, Accordion) {
    let mut enhancer = Enhancer::default();
    let doc = enhancer.document_mut();
    let body = doc.body();
    let element = doc.append_element(body, "div").unwrap();
    for attr in attrs {
        doc.tree_mut().set_attribute(element, attr, "").unwrap();
    }
    for i in 0..3 {
        let tab = doc.append_element(element, "h3").unwrap();
        doc.tree_mut().set_attribute(tab, "role", "tab").unwrap();
        doc.append_text(tab, &format!("Heading {}", i + 1)).unwrap();
        let panel = doc.append_element(element, "div").unwrap();
        doc.tree_mut().set_attribute(panel, "role", "tabpanel").unwrap();
    }
    let accordion = Accordion::enhance(&mut enhancer, element).unwrap();
    (enhancer, accordion)
}

fn attr<'a>(enhancer: &'a Enhancer, node: NodeId, name: &str) -> Option<&'a str> {
    enhancer.document().tree().attribute(node, name)
}

fn press(enhancer: &mut Enhancer, accordion: &mut Accordion, key: Key) {
    let target = accordion.tabs()[0];
    accordion.handle_key(enhancer, &KeyEvent::new(key, target)).unwrap();
}

fn assert_current(enhancer: &Enhancer, accordion: &Accordion, index: usize) {
    for (i, &tab) in accordion.tabs().iter().enumerate() {
        let current = i == index;
        assert_eq!(attr(enhancer, tab, "tabindex"), Some(if current { "0" } else { "-1" }));
        let selected = if current { "true" } else { "false" };
        assert_eq!(attr(enhancer, tab, "aria-selected"), Some(selected));
    }
}

// ============================================================================
// ARIA
// ============================================================================

#[test]
fn test_container_becomes_tablist() {
    let (enhancer, accordion) = fixture(&[]);
    assert_eq!(attr(&enhancer, accordion.element(), "role"), Some("tablist"));
    assert_eq!(attr(&enhancer, accordion.element(), "aria-multiselectable"), Some("false"));
}

#[test]
fn test_heading_attributes() {
    let (enhancer, accordion) = fixture(&[]);
    let (tab, panel) = (accordion.tabs()[0], accordion.panels()[0]);
    assert_eq!(attr(&enhancer, tab, "aria-controls"), attr(&enhancer, panel, "id"));
    assert_eq!(attr(&enhancer, tab, "aria-expanded"), Some("false"));
    assert_eq!(attr(&enhancer, tab, "aria-selected"), Some("true"));
    assert_eq!(attr(&enhancer, tab, "id"), Some("ae_accordion-heading1"));
}

#[test]
fn test_panel_attributes() {
    let (enhancer, accordion) = fixture(&[]);
    let (tab, panel) = (accordion.tabs()[0], accordion.panels()[0]);
    assert_eq!(attr(&enhancer, panel, "aria-hidden"), Some("true"));
    assert_eq!(attr(&enhancer, panel, "aria-labelledby"), attr(&enhancer, tab, "id"));
    assert_eq!(attr(&enhancer, panel, "id"), Some("ae_accordion-panel1"));
}

#[test]
fn test_expanded_option_opens_every_panel() {
    let (enhancer, accordion) = fixture(&["expanded"]);
    for (&tab, &panel) in accordion.tabs().iter().zip(accordion.panels()) {
        assert_eq!(attr(&enhancer, tab, "aria-expanded"), Some("true"));
        assert_eq!(attr(&enhancer, panel, "aria-hidden"), Some("false"));
    }
}

// ============================================================================
// KEYBOARD
// ============================================================================

#[test]
fn test_right_and_down_move_to_next_heading() {
    let (mut enhancer, mut accordion) = fixture(&[]);

    press(&mut enhancer, &mut accordion, Key::Right);
    assert_current(&enhancer, &accordion, 1);
    assert_eq!(enhancer.document().active_element(), Some(accordion.tabs()[1]));

    press(&mut enhancer, &mut accordion, Key::Down);
    assert_current(&enhancer, &accordion, 2);
}

#[test]
fn test_left_and_up_move_to_previous_heading() {
    let (mut enhancer, mut accordion) = fixture(&[]);
    press(&mut enhancer, &mut accordion, Key::Down);
    press(&mut enhancer, &mut accordion, Key::Down);

    press(&mut enhancer, &mut accordion, Key::Left);
    assert_current(&enhancer, &accordion, 1);

    press(&mut enhancer, &mut accordion, Key::Up);
    assert_current(&enhancer, &accordion, 0);
}

#[test]
fn test_end_and_home_jump_to_last_and_first() {
    let (mut enhancer, mut accordion) = fixture(&[]);

    press(&mut enhancer, &mut accordion, Key::End);
    assert_current(&enhancer, &accordion, 2);

    press(&mut enhancer, &mut accordion, Key::Home);
    assert_current(&enhancer, &accordion, 0);
}

#[test]
fn test_moves_clamp_without_wrap_focus() {
    let (mut enhancer, mut accordion) = fixture(&[]);
    let tab = accordion.tabs()[0];
    press(&mut enhancer, &mut accordion, Key::Up);
    assert_current(&enhancer, &accordion, 0);
    assert_eq!(enhancer.document().active_element(), Some(tab));

    let events = enhancer.drain_events();
    let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, [WidgetEventKind::AccordionBlurred, WidgetEventKind::AccordionFocused]);
    assert!(events.iter().all(|e| e.detail == Some(tab)));
}

#[test]
fn test_home_on_first_heading_refocuses_it() {
    let (mut enhancer, mut accordion) = fixture(&[]);
    let tab = accordion.tabs()[0];
    let elsewhere = enhancer.document().body();
    enhancer.document_mut().focus(elsewhere);

    press(&mut enhancer, &mut accordion, Key::Home);
    assert_eq!(enhancer.document().active_element(), Some(tab));
}

#[test]
fn test_wrap_focus_wraps_at_the_ends() {
    let (mut enhancer, mut accordion) = fixture(&["wrap-focus"]);
    press(&mut enhancer, &mut accordion, Key::Up);
    assert_current(&enhancer, &accordion, 2);
    press(&mut enhancer, &mut accordion, Key::Down);
    assert_current(&enhancer, &accordion, 0);
}

#[test]
fn test_enter_and_space_toggle_current_panel() {
    let (mut enhancer, mut accordion) = fixture(&[]);
    let (tab, panel) = (accordion.tabs()[0], accordion.panels()[0]);

    press(&mut enhancer, &mut accordion, Key::Enter);
    assert_eq!(attr(&enhancer, tab, "aria-expanded"), Some("true"));
    assert_eq!(attr(&enhancer, panel, "aria-hidden"), Some("false"));

    press(&mut enhancer, &mut accordion, Key::Space);
    assert_eq!(attr(&enhancer, tab, "aria-expanded"), Some("false"));
    assert_eq!(attr(&enhancer, panel, "aria-hidden"), Some("true"));
}

#[test]
fn test_keys_ignored_outside_headings() {
    let (mut enhancer, mut accordion) = fixture(&[]);
    let panel = accordion.panels()[0];
    let event = KeyEvent::new(Key::Down, panel);
    assert!(!accordion.handle_key(&mut enhancer, &event).unwrap());
    assert_current(&enhancer, &accordion, 0);
}

// ============================================================================
// POINTER
// ============================================================================

#[test]
fn test_pointer_down_toggles_panel() {
    let (mut enhancer, mut accordion) = fixture(&[]);
    let (tab, panel) = (accordion.tabs()[0], accordion.panels()[0]);

    accordion.handle_pointer_down(&mut enhancer, tab).unwrap();
    assert_eq!(attr(&enhancer, tab, "aria-expanded"), Some("true"));
    assert_eq!(attr(&enhancer, panel, "aria-hidden"), Some("false"));

    accordion.handle_pointer_down(&mut enhancer, tab).unwrap();
    assert_eq!(attr(&enhancer, tab, "aria-expanded"), Some("false"));
    assert_eq!(attr(&enhancer, panel, "aria-hidden"), Some("true"));
}

#[test]
fn test_pointer_down_makes_heading_current() {
    let (mut enhancer, mut accordion) = fixture(&[]);
    let tab = accordion.tabs()[2];
    assert!(accordion.handle_pointer_down(&mut enhancer, tab).unwrap());
    assert_current(&enhancer, &accordion, 2);
    assert_eq!(accordion.current_tab(), Some(tab));
}

#[test]
fn test_pointer_down_on_current_heading_refocuses_it() {
    let (mut enhancer, mut accordion) = fixture(&[]);
    let tab = accordion.tabs()[0];

    accordion.handle_pointer_down(&mut enhancer, tab).unwrap();
    assert_eq!(enhancer.document().active_element(), Some(tab));

    let kinds: Vec<_> = enhancer.drain_events().iter().map(|e| e.kind).collect();
    let expected = [
        WidgetEventKind::AccordionBlurred,
        WidgetEventKind::AccordionFocused,
        WidgetEventKind::AccordionExpanded,
    ];
    assert_eq!(kinds, expected);
}

#[test]
fn test_single_expansion_collapses_other_panel() {
    let (mut enhancer, mut accordion) = fixture(&[]);
    let tabs = accordion.tabs().to_vec();

    accordion.handle_pointer_down(&mut enhancer, tabs[0]).unwrap();
    accordion.handle_pointer_down(&mut enhancer, tabs[1]).unwrap();
    assert_eq!(attr(&enhancer, tabs[0], "aria-expanded"), Some("false"));
    assert_eq!(attr(&enhancer, tabs[1], "aria-expanded"), Some("true"));
}

#[test]
fn test_multiple_keeps_other_panels_open() {
    let (mut enhancer, mut accordion) = fixture(&["multiple"]);
    let tabs = accordion.tabs().to_vec();

    accordion.handle_pointer_down(&mut enhancer, tabs[0]).unwrap();
    accordion.handle_pointer_down(&mut enhancer, tabs[1]).unwrap();
    assert_eq!(attr(&enhancer, tabs[0], "aria-expanded"), Some("true"));
    assert_eq!(attr(&enhancer, tabs[1], "aria-expanded"), Some("true"));
}

// ============================================================================
// EVENTS
// ============================================================================

#[test]
fn test_expanded_and_collapsed_events_carry_the_heading() {
    let (mut enhancer, mut accordion) = fixture(&[]);
    let tab = accordion.tabs()[0];

    press(&mut enhancer, &mut accordion, Key::Enter);
    press(&mut enhancer, &mut accordion, Key::Enter);

    let events = enhancer.drain_events();
    let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, [WidgetEventKind::AccordionExpanded, WidgetEventKind::AccordionCollapsed]);
    assert!(events.iter().all(|e| e.detail == Some(tab) && e.target == accordion.element()));
}

#[test]
fn test_blurred_then_focused_events() {
    let (mut enhancer, mut accordion) = fixture(&[]);
    let tabs = accordion.tabs().to_vec();

    press(&mut enhancer, &mut accordion, Key::Down);

    let events = enhancer.drain_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, WidgetEventKind::AccordionBlurred);
    assert_eq!(events[0].detail, Some(tabs[0]));
    assert_eq!(events[1].kind, WidgetEventKind::AccordionFocused);
    assert_eq!(events[1].detail, Some(tabs[1]));
    assert_eq!(events[1].kind.name(), "accordion-focused");
}
