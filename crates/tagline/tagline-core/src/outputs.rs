//! Output contracts from the animator.
//!
//! [`RenderFrame`] carries the three styling values the host applies each tick;
//! [`Wake`] tells the host when to call back.

use serde::{Deserialize, Serialize};

use crate::interp::functions::lerp_f32;
use crate::state::AnimatorState;

/// Styling values derived from the animator state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    /// Cursor translation relative to its centered dock anchor.
    pub cursor_offset_px: f32,
    /// Reveal mask width measured from the container's left edge.
    pub mask_width_px: f32,
    /// Label translation relative to its centered anchor.
    pub label_offset_px: f32,
}

impl RenderFrame {
    /// Derive the frame for `state`. `docked_offset_px` is the label nudge at rest.
    pub fn from_state(state: &AnimatorState, docked_offset_px: f32) -> Self {
        Self {
            cursor_offset_px: state.current_x - state.center_x,
            // +1 closes the one pixel seam at the caret edge
            mask_width_px: (state.current_x + 1.0).max(0.0),
            label_offset_px: label_offset(state, docked_offset_px),
        }
    }
}

/// Label offset tracks the caret linearly (not eased) from the docked nudge to
/// `-label_width / 2`, using where the caret sits in [center, center + label_width / 2].
fn label_offset(state: &AnimatorState, docked_offset_px: f32) -> f32 {
    let half = state.label_width / 2.0;
    if state.phase.is_docked() || half <= 0.0 {
        return docked_offset_px;
    }
    let t = ((state.current_x - state.center_x) / half).clamp(0.0, 1.0);
    lerp_f32(docked_offset_px, -half, t)
}

/// When the host should call [`crate::Animator::poll`] next.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Wake {
    /// On the next rendering opportunity (animation frame).
    NextFrame,
    /// After the given number of milliseconds.
    After(f64),
    /// Nothing pending; the animator is idle for good or disposed.
    Never,
}
