//! Example: Enhance a page with an accordion and a modal dialog

use ae_a11y::{Key, KeyEvent};
use ae_dom::Document;
use ae_widgets::{Accordion, Config, Dialog, Enhancer, WidgetError};

fn main() -> Result<(), WidgetError> {
    // Initialize logging (RUST_LOG=debug shows every state change)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new();
    let body = doc.body();

    let faq = doc.append_element(body, "section")?;
    for question in ["What is it?", "Who is it for?"] {
        let tab = doc.append_element(faq, "h3")?;
        doc.tree_mut().set_attribute(tab, "role", "tab")?;
        doc.append_text(tab, question)?;
        let panel = doc.append_element(faq, "div")?;
        doc.tree_mut().set_attribute(panel, "role", "tabpanel")?;
    }

    let opener = doc.append_element(body, "button")?;
    let modal = doc.append_element(body, "div")?;
    doc.tree_mut().set_attribute(modal, "role", "dialog")?;
    let title = doc.append_element(modal, "h2")?;
    doc.append_text(title, "Sign in")?;

    let mut enhancer = Enhancer::new(doc, Config::default());
    let mut accordion = Accordion::enhance(&mut enhancer, faq)?;
    let mut dialog = Dialog::enhance(&mut enhancer, modal)?;

    let first = accordion.tabs()[0];
    accordion.handle_key(&mut enhancer, &KeyEvent::new(Key::Enter, first))?;

    enhancer.document_mut().focus(opener);
    dialog.open(&mut enhancer)?;
    enhancer.settle();
    println!("focus inside dialog: {:?}", enhancer.document().active_element());
    println!("accordion inert while modal is open: {}", enhancer.document().is_inert(faq));

    dialog.handle_key(&mut enhancer, &KeyEvent::new(Key::Escape, modal))?;
    println!("focus restored to opener: {}", enhancer.document().active_element() == Some(opener));

    for event in enhancer.drain_events() {
        println!("{} on {:?}", event.kind.name(), event.target);
    }
    Ok(())
}
