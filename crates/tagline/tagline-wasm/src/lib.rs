use std::rc::Rc;

use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use tagline_core::{AnimationConfig, Animator};

mod driver;
mod page;
pub mod surface;

pub use page::init_page;
pub use surface::DomSurface;

use driver::Driver;

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Parse an optional JS config object; undefined/null means defaults.
fn parse_config(config: JsValue) -> Result<AnimationConfig, JsError> {
    let cfg: AnimationConfig = if jsvalue_is_undefined_or_null(&config) {
        AnimationConfig::default()
    } else {
        swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
    };
    Ok(cfg)
}

/// Most verbose level forwarded to the browser console.
pub const CONSOLE_LOG_LEVEL: log::Level = log::Level::Info;

pub(crate) fn init_logging() {
    console_error_panic_hook::set_once();
    // A logger may already be installed by the embedding page.
    let _ = console_log::init_with_level(CONSOLE_LOG_LEVEL);
}

#[wasm_bindgen]
pub struct TaglineAnimator {
    driver: Rc<Driver>,
}

#[wasm_bindgen]
impl TaglineAnimator {
    /// Bind an animator to a `.animated-tagline-container` element and start it.
    /// Pass a config object or undefined/null for defaults, e.g.
    ///   new TaglineAnimator(el, { labels: ["Fast", "Quiet"], return_delay_ms: 1500 })
    /// A container without its text/cursor/mask children yields a static label.
    #[wasm_bindgen(constructor)]
    pub fn new(container: &Element, config: JsValue) -> Result<TaglineAnimator, JsError> {
        init_logging();
        let cfg = parse_config(config)?;
        let anim = Animator::new(cfg, DomSurface::bind(container))
            .map_err(|e| JsError::new(&format!("config error: {e}")))?;
        let driver = Driver::spawn(anim).map_err(|e| JsError::new(&format!("{e:#}")))?;
        Ok(TaglineAnimator { driver })
    }

    /// Stop animating and release the tagline. Dropping the JS handle does not stop
    /// it; this is the only teardown.
    #[wasm_bindgen]
    pub fn dispose(&self) {
        self.driver.dispose();
    }

    /// Current phase name, e.g. "advancing_to_end".
    #[wasm_bindgen]
    pub fn phase(&self) -> String {
        self.driver.with_animator(|a| a.phase().name().to_string())
    }

    #[wasm_bindgen(js_name = current_index)]
    pub fn current_index(&self) -> u32 {
        self.driver
            .with_animator(|a| a.state().current_index as u32)
    }

    /// Latest render outputs as `{ cursor_offset_px, mask_width_px, label_offset_px }`.
    #[wasm_bindgen(js_name = render_frame)]
    pub fn render_frame(&self) -> Result<JsValue, JsError> {
        let frame = self.driver.with_animator(|a| a.render_frame());
        swb::to_value(&frame).map_err(|e| JsError::new(&format!("render frame error: {e}")))
    }
}

/// Taglines started and not yet disposed.
#[wasm_bindgen]
pub fn running_taglines() -> u32 {
    driver::running_count() as u32
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
