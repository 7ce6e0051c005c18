//! DOM-backed container: measures with layout queries and applies render frames
//! as inline styles.

use tagline_core::{LayoutProbe, Measurement, RenderFrame, RenderTarget};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

pub const TEXT_SELECTOR: &str = ".animated-tagline-text";
pub const CURSOR_SELECTOR: &str = ".animated-tagline-cursor";
pub const MASK_SELECTOR: &str = ".animated-tagline-mask";

/// The tagline container and its three styled children.
#[derive(Debug)]
pub struct DomSurface {
    container: Element,
    text: HtmlElement,
    cursor: HtmlElement,
    mask: HtmlElement,
}

fn child(container: &Element, selector: &str) -> Option<HtmlElement> {
    container
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn translate_x(offset_px: f32) -> String {
    format!("translateX(calc(-50% + {offset_px}px))")
}

impl DomSurface {
    /// `None` when any required child is missing.
    pub fn bind(container: &Element) -> Option<Self> {
        Some(Self {
            container: container.clone(),
            text: child(container, TEXT_SELECTOR)?,
            cursor: child(container, CURSOR_SELECTOR)?,
            mask: child(container, MASK_SELECTOR)?,
        })
    }
}

impl LayoutProbe for DomSurface {
    fn measure_container(&self) -> f32 {
        self.container.get_bounding_client_rect().width() as f32
    }

    fn measure_label(&self) -> Measurement {
        if !self.text.is_connected() {
            return Measurement::Pending;
        }
        // offsetWidth forces a reflow of the committed text.
        Measurement::Ready(self.text.offset_width() as f32)
    }
}

impl RenderTarget for DomSurface {
    fn set_label_text(&mut self, text: &str) {
        self.text.set_text_content(Some(text));
    }

    fn apply(&mut self, frame: &RenderFrame) {
        let _ = self
            .cursor
            .style()
            .set_property("transform", &translate_x(frame.cursor_offset_px));
        let mask = self.mask.style();
        let _ = mask.set_property("width", &format!("{}px", frame.mask_width_px));
        let _ = mask.set_property("transform", "translateX(0)");
        let _ = self
            .text
            .style()
            .set_property("transform", &translate_x(frame.label_offset_px));
    }
}
