use serde::{Deserialize, Serialize};

/// Cycle phase of the animator. The phase is the single source of truth for
/// what may run next; there is no separate "animating" flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Constructed, container not measured yet
    Idle,
    /// Label text committed, waiting for its rendered width
    AwaitingLayout,
    /// Caret docked at the center
    AtStart,
    /// Caret easing toward the label end
    AdvancingToEnd,
    /// Caret parked past the label end
    AtEnd,
    /// Caret easing back to the center
    ReturningToStart,
}

impl Phase {
    /// Get the name of this phase
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingLayout => "awaiting_layout",
            Self::AtStart => "at_start",
            Self::AdvancingToEnd => "advancing_to_end",
            Self::AtEnd => "at_end",
            Self::ReturningToStart => "returning_to_start",
        }
    }

    /// An interpolation driver is active
    #[inline]
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::AdvancingToEnd | Self::ReturningToStart)
    }

    /// Caret sits at the start position; resize re-centers it
    #[inline]
    pub fn is_docked(&self) -> bool {
        matches!(self, Self::Idle | Self::AwaitingLayout | Self::AtStart)
    }
}

/// Mutable animator state. Widths and offsets are px, offsets measured from the
/// container's left edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimatorState {
    pub current_index: usize,
    pub container_width: f32,
    /// Padded width of the current label; 0 until measured.
    pub label_width: f32,
    /// Always `container_width / 2`.
    pub center_x: f32,
    pub current_x: f32,
    pub phase: Phase,
    /// At least one container measurement has completed.
    pub layout_ready: bool,
}

impl Default for AnimatorState {
    fn default() -> Self {
        Self {
            current_index: 0,
            container_width: 0.0,
            label_width: 0.0,
            center_x: 0.0,
            current_x: 0.0,
            phase: Phase::Idle,
            layout_ready: false,
        }
    }
}

impl AnimatorState {
    /// Store a fresh container width and the derived center.
    #[inline]
    pub fn set_container_width(&mut self, width: f32) {
        self.container_width = width.max(0.0);
        self.center_x = self.container_width / 2.0;
    }

    /// Offset of the extended (end) position for the current label.
    #[inline]
    pub fn end_x(&self) -> f32 {
        self.center_x + self.label_width / 2.0
    }

    #[inline]
    pub fn dock(&mut self) {
        self.current_x = self.center_x;
    }
}
