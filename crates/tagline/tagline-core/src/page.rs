//! Decision helpers for the rest of the page script.
//!
//! These are the pure parts of the menu, anchor scrolling, contact form and nav
//! highlighting behaviors; the wasm adapter does the DOM plumbing around them.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// Above this viewport width the mobile menu is closed on resize.
pub const MENU_COLLAPSE_BREAKPOINT_PX: f64 = 768.0;

/// Sections count as reached this many px before their top edge.
pub const SECTION_SCROLL_OFFSET_PX: f64 = 100.0;

/// Shown after a successful contact form submission.
pub const CONTACT_THANKS: &str = "Thank you for your message! We will get back to you soon.";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern should compile"));

/// Whether a resize to `inner_width` should close an open mobile menu.
#[inline]
pub fn should_close_menu_on_resize(inner_width: f64, menu_open: bool) -> bool {
    menu_open && inner_width > MENU_COLLAPSE_BREAKPOINT_PX
}

/// Console line for a document visibility change.
pub fn visibility_message(hidden: bool) -> &'static str {
    if hidden {
        "Page is now hidden"
    } else {
        "Page is now visible"
    }
}

/// Element id targeted by an in-page anchor (`"#features"` -> `"features"`).
/// Non-anchor links and a bare `"#"` yield `None`.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Vertical extent of a `section[id]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionBox {
    pub id: String,
    pub offset_top: f64,
    pub height: f64,
}

/// Section whose band contains `scroll_y`. Each band is
/// `(offset_top - 100, offset_top - 100 + height]`; the last match wins.
pub fn active_section(scroll_y: f64, sections: &[SectionBox]) -> Option<&str> {
    sections
        .iter()
        .filter(|s| {
            let top = s.offset_top - SECTION_SCROLL_OFFSET_PX;
            scroll_y > top && scroll_y <= top + s.height
        })
        .last()
        .map(|s| s.id.as_str())
}

/// Field values read from the contact form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Every field must be non-empty and the email must look like `a@b.c`.
pub fn validate_contact(form: &ContactSubmission) -> Result<(), FormError> {
    if form.name.is_empty() || form.email.is_empty() || form.message.is_empty() {
        return Err(FormError::MissingFields);
    }
    if !EMAIL_RE.is_match(&form.email) {
        return Err(FormError::InvalidEmail);
    }
    Ok(())
}
