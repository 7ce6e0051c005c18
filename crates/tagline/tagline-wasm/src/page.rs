//! Page wiring: menu, anchor scrolling, contact form, nav highlighting and the
//! tagline. Every feature is skipped silently when its elements are absent.
//! Listeners live for the page's lifetime.

use anyhow::{anyhow, Result};
use log::info;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use tagline_core::page::{
    active_section, anchor_target, should_close_menu_on_resize, validate_contact,
    visibility_message, ContactSubmission, SectionBox, CONTACT_THANKS,
};

use crate::driver::window;
use crate::{init_logging, TaglineAnimator};

const MENU_OPEN_CLASS: &str = "active";
const ACTIVE_LINK_CLASS: &str = "active-link";

/// Bind the page behaviors and start the tagline when its container exists.
/// Call once the document is parsed (e.g. from a `DOMContentLoaded` handler).
/// The returned handle may be ignored; the tagline runs until disposed.
/// `config` is the optional tagline config object, as for `new TaglineAnimator`.
#[wasm_bindgen]
pub fn init_page(config: JsValue) -> Result<Option<TaglineAnimator>, JsError> {
    init_logging();
    let document = bind_page().map_err(|e| JsError::new(&format!("{e:#}")))?;
    match query(&document, ".animated-tagline-container") {
        Some(container) => TaglineAnimator::new(&container, config).map(Some),
        None => Ok(None),
    }
}

fn bind_page() -> Result<Document> {
    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| anyhow!("window has no document"))?;

    let nav_links = query(&document, ".nav-links");
    bind_menu_toggle(&document, nav_links.clone())?;
    let links = query_all(&document, ".nav-links a")?;
    bind_anchor_links(&document, &links, nav_links.clone())?;
    bind_get_started(&document)?;
    bind_contact_form(&window, &document)?;
    bind_nav_highlight(&window, &document, links)?;
    bind_menu_collapse(&window, nav_links)?;
    bind_visibility_logging(&document)?;

    if let Some(card) = query(&document, ".welcome-card-container") {
        let _ = card.class_list().add_1("fade-in");
    }
    Ok(document)
}

fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    let list = document
        .query_selector_all(selector)
        .map_err(|e| anyhow!("bad selector {selector}: {e:?}"))?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Attach a page-lifetime listener.
fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow!("failed to add {event} listener: {e:?}"))?;
    closure.forget();
    Ok(())
}

fn close_menu(nav_links: &Option<Element>) {
    if let Some(nav) = nav_links {
        let classes = nav.class_list();
        if classes.contains(MENU_OPEN_CLASS) {
            let _ = classes.remove_1(MENU_OPEN_CLASS);
        }
    }
}

fn smooth_scroll_to(element: &Element) {
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    opts.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&opts);
}

fn bind_menu_toggle(document: &Document, nav_links: Option<Element>) -> Result<()> {
    let (Some(toggle), Some(nav)) = (query(document, ".menu-toggle"), nav_links) else {
        return Ok(());
    };
    listen(&toggle, "click", move |_| {
        let _ = nav.class_list().toggle(MENU_OPEN_CLASS);
    })
}

fn bind_anchor_links(
    document: &Document,
    links: &[Element],
    nav_links: Option<Element>,
) -> Result<()> {
    for link in links {
        let (link_el, document, nav_links) = (link.clone(), document.clone(), nav_links.clone());
        listen(link, "click", move |event| {
            let Some(href) = link_el.get_attribute("href") else {
                return;
            };
            if !href.starts_with('#') {
                return;
            }
            event.prevent_default();
            let Some(target) = anchor_target(&href).and_then(|id| document.get_element_by_id(id))
            else {
                return;
            };
            smooth_scroll_to(&target);
            close_menu(&nav_links);
        })?;
    }
    Ok(())
}

fn bind_get_started(document: &Document) -> Result<()> {
    let Some(button) = document.get_element_by_id("getStartedBtn") else {
        return Ok(());
    };
    let document = document.clone();
    listen(&button, "click", move |_| {
        if let Some(contact) = document.get_element_by_id("contact") {
            smooth_scroll_to(&contact);
        }
    })
}

fn field_value(document: &Document, id: &str) -> String {
    let Some(el) = document.get_element_by_id(id) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    el.dyn_ref::<HtmlTextAreaElement>()
        .map(|area| area.value())
        .unwrap_or_default()
}

fn bind_contact_form(window: &Window, document: &Document) -> Result<()> {
    let Some(form) = document.get_element_by_id("contactForm") else {
        return Ok(());
    };
    let (window, document, form_el) = (window.clone(), document.clone(), form.clone());
    listen(&form, "submit", move |event| {
        event.prevent_default();
        let submission = ContactSubmission {
            name: field_value(&document, "name"),
            email: field_value(&document, "email"),
            message: field_value(&document, "message"),
        };
        if let Err(err) = validate_contact(&submission) {
            let _ = window.alert_with_message(&err.to_string());
            return;
        }
        // No backend yet; the submission is only logged.
        if let Ok(value) = swb::to_value(&submission) {
            web_sys::console::log_2(&JsValue::from_str("Form submitted:"), &value);
        }
        let _ = window.alert_with_message(CONTACT_THANKS);
        if let Some(form) = form_el.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    })
}

fn bind_nav_highlight(window: &Window, document: &Document, links: Vec<Element>) -> Result<()> {
    let sections: Vec<HtmlElement> = query_all(document, "section[id]")?
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    let scroll_window = window.clone();
    listen(window, "scroll", move |_| {
        let scroll_y = scroll_window.scroll_y().unwrap_or(0.0);
        let boxes: Vec<SectionBox> = sections
            .iter()
            .map(|s| SectionBox {
                id: s.id(),
                offset_top: s.offset_top() as f64,
                height: s.offset_height() as f64,
            })
            .collect();
        let Some(id) = active_section(scroll_y, &boxes) else {
            return;
        };
        let wanted = format!("#{id}");
        for link in &links {
            let classes = link.class_list();
            let _ = classes.remove_1(ACTIVE_LINK_CLASS);
            if link.get_attribute("href").as_deref() == Some(wanted.as_str()) {
                let _ = classes.add_1(ACTIVE_LINK_CLASS);
            }
        }
    })
}

fn bind_menu_collapse(window: &Window, nav_links: Option<Element>) -> Result<()> {
    let resize_window = window.clone();
    listen(window, "resize", move |_| {
        let width = resize_window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0);
        let open = nav_links
            .as_ref()
            .is_some_and(|nav| nav.class_list().contains(MENU_OPEN_CLASS));
        if should_close_menu_on_resize(width, open) {
            close_menu(&nav_links);
        }
    })
}

fn bind_visibility_logging(document: &Document) -> Result<()> {
    let doc = document.clone();
    listen(document, "visibilitychange", move |_| {
        info!("{}", visibility_message(doc.hidden()));
    })
}
