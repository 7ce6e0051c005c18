//! Animator: owns the tagline cycle and drives it from host time.
//!
//! Methods:
//! - new, start (arm first layout), poll (run whatever is due), on_resize,
//!   request_advance / request_return (guarded transitions), dispose
//!
//! Every entry point takes the host's monotonic clock in milliseconds and returns a
//! [`Wake`]. The host keeps one pending callback per animator and replaces it with
//! each new `Wake`. Polling early is harmless: nothing changes until the single
//! deadline passes, and frame ticks recompute position from elapsed time.

use log::{debug, trace, warn};

use crate::config::AnimationConfig;
use crate::error::ConfigError;
use crate::interp::functions::{position, progress};
use crate::outputs::{RenderFrame, Wake};
use crate::probe::{LayoutProbe, Measurement, RenderTarget};
use crate::state::{AnimatorState, Phase};

/// The active interpolation. Endpoints are captured when it starts; resize
/// notifications do not rewrite them.
#[derive(Clone, Copy, Debug)]
struct Flight {
    start_x: f32,
    target_x: f32,
    started_ms: f64,
    duration_ms: f64,
}

/// Tagline animator bound to one container surface.
#[derive(Debug)]
pub struct Animator<S> {
    cfg: AnimationConfig,
    surface: Option<S>,
    state: AnimatorState,
    // Single pending timer; what it triggers depends on `state.phase`.
    deadline: Option<f64>,
    flight: Option<Flight>,
    alive: bool,
}

impl<S: LayoutProbe + RenderTarget> Animator<S> {
    /// Create an animator. `surface` is `None` when the container lacks its
    /// text/cursor/mask children; such an animator stays `Idle` forever.
    pub fn new(cfg: AnimationConfig, surface: Option<S>) -> Result<Self, ConfigError> {
        cfg.validate()?;
        if surface.is_none() {
            warn!("tagline container is missing its text/cursor/mask nodes; staying idle");
        }
        Ok(Self {
            cfg,
            surface,
            state: AnimatorState::default(),
            deadline: None,
            flight: None,
            alive: true,
        })
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.cfg
    }

    pub fn state(&self) -> &AnimatorState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Label for the current index.
    pub fn current_label(&self) -> &str {
        &self.cfg.labels[self.state.current_index]
    }

    /// Styling values for the current state.
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame::from_state(&self.state, self.cfg.center_offset_px)
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn is_disposed(&self) -> bool {
        !self.alive
    }

    #[inline]
    fn is_live(&self) -> bool {
        self.alive && self.surface.is_some()
    }

    /// Arm the first layout pass after `initial_layout_delay_ms`. Calling it again
    /// only reports the pending wake.
    pub fn start(&mut self, now_ms: f64) -> Wake {
        if !self.is_live() {
            return Wake::Never;
        }
        if self.state.phase == Phase::Idle && self.deadline.is_none() {
            debug!(
                "tagline start: first layout in {}ms",
                self.cfg.initial_layout_delay_ms
            );
            self.deadline = Some(now_ms + self.cfg.initial_layout_delay_ms);
        }
        self.next_wake(now_ms)
    }

    /// Run whatever is due at `now_ms`: the first layout, a label measurement, a
    /// delayed phase transition or an interpolation tick.
    pub fn poll(&mut self, now_ms: f64) -> Wake {
        if !self.is_live() {
            return Wake::Never;
        }
        if self.flight.is_some() {
            self.step_flight(now_ms);
            return self.next_wake(now_ms);
        }
        let due = match self.deadline.map(|d| now_ms >= d) {
            Some(false) => return self.next_wake(now_ms),
            Some(true) => {
                self.deadline = None;
                true
            }
            None => false,
        };
        match self.state.phase {
            Phase::Idle => {
                if due {
                    self.layout();
                }
            }
            // A timer just fired; the committed text is measured on the following frame.
            Phase::AwaitingLayout => {
                if !due {
                    self.measure_label(now_ms);
                }
            }
            Phase::AtStart => {
                if due {
                    return self.request_advance(now_ms);
                }
            }
            Phase::AtEnd => {
                if due {
                    return self.request_return(now_ms);
                }
            }
            Phase::AdvancingToEnd | Phase::ReturningToStart => {}
        }
        self.next_wake(now_ms)
    }

    /// Fold a new container width into the geometry. Docked phases snap back to the
    /// exact center; later phases keep their in-flight endpoints.
    pub fn on_resize(&mut self, now_ms: f64) -> Wake {
        if !self.is_live() {
            return Wake::Never;
        }
        let width = match self.surface.as_ref() {
            Some(surface) => surface.measure_container(),
            None => return Wake::Never,
        };
        self.state.set_container_width(width);
        if self.state.phase.is_docked() {
            self.state.dock();
        }
        trace!(
            "tagline resize: width={} center={} phase={}",
            self.state.container_width,
            self.state.center_x,
            self.state.phase.name()
        );
        self.render();
        self.next_wake(now_ms)
    }

    /// Start easing toward the label end. Ignored while an interpolation is in
    /// flight or outside `AtStart`; deferred by the backoff while the label is unmeasured.
    pub fn request_advance(&mut self, now_ms: f64) -> Wake {
        self.request(Phase::AdvancingToEnd, now_ms)
    }

    /// Start easing back to the center. Same guards as [`Self::request_advance`],
    /// from `AtEnd`.
    pub fn request_return(&mut self, now_ms: f64) -> Wake {
        self.request(Phase::ReturningToStart, now_ms)
    }

    /// Stop for good. Pending timers and frames become no-ops and the surface is
    /// never touched again.
    pub fn dispose(&mut self) {
        if self.alive {
            debug!("tagline disposed in phase {}", self.state.phase.name());
        }
        self.alive = false;
        self.flight = None;
        self.deadline = None;
    }

    fn request(&mut self, to: Phase, now_ms: f64) -> Wake {
        if !self.is_live() {
            return Wake::Never;
        }
        if self.state.phase.is_in_flight() {
            trace!(
                "{} request ignored while {}",
                to.name(),
                self.state.phase.name()
            );
            return self.next_wake(now_ms);
        }
        let from = match to {
            Phase::AdvancingToEnd => Phase::AtStart,
            _ => Phase::AtEnd,
        };
        if !self.state.layout_ready || self.state.label_width <= 0.0 {
            trace!("{} request deferred: label not measured", to.name());
            // Outside `from` the layout/measure pipeline leads back here on its own.
            if self.state.phase == from {
                self.deadline = Some(now_ms + self.cfg.retry_backoff_ms);
            }
            return self.next_wake(now_ms);
        }
        if self.state.phase != from {
            trace!(
                "{} request ignored in {}",
                to.name(),
                self.state.phase.name()
            );
            return self.next_wake(now_ms);
        }

        let (target_x, duration_ms) = match to {
            Phase::AdvancingToEnd => (self.state.end_x(), self.cfg.advance_duration_ms),
            _ => (self.state.center_x, self.cfg.return_duration_ms),
        };
        self.deadline = None;
        self.flight = Some(Flight {
            start_x: self.state.current_x,
            target_x,
            started_ms: now_ms,
            duration_ms,
        });
        self.enter(to);
        self.step_flight(now_ms);
        self.next_wake(now_ms)
    }

    fn layout(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let width = surface.measure_container();
        self.state.set_container_width(width);
        self.state.dock();
        self.state.layout_ready = true;
        self.state.label_width = 0.0;
        surface.set_label_text(&self.cfg.labels[self.state.current_index]);
        self.enter(Phase::AwaitingLayout);
        self.render();
    }

    fn measure_label(&mut self, now_ms: f64) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        let measurement = surface.measure_label();
        match measurement {
            Measurement::Pending => trace!("label width pending; retrying next frame"),
            Measurement::Ready(raw) => {
                let padded = raw + self.cfg.label_padding_px;
                if !(raw.is_finite() && raw > 0.0 && padded > 0.0) {
                    trace!(
                        "label measured {}px; retrying in {}ms",
                        raw,
                        self.cfg.retry_backoff_ms
                    );
                    self.deadline = Some(now_ms + self.cfg.retry_backoff_ms);
                    return;
                }
                self.state.label_width = padded;
                self.state.dock();
                self.enter(Phase::AtStart);
                self.deadline = Some(now_ms + self.cfg.advance_delay_ms);
                self.render();
            }
        }
    }

    fn step_flight(&mut self, now_ms: f64) {
        let Some(flight) = self.flight else {
            return;
        };
        let elapsed = now_ms - flight.started_ms;
        self.state.current_x =
            position(flight.start_x, flight.target_x, elapsed, flight.duration_ms);
        if progress(elapsed, flight.duration_ms) < 1.0 {
            self.render();
            return;
        }

        self.flight = None;
        if self.state.phase == Phase::AdvancingToEnd {
            self.enter(Phase::AtEnd);
            self.deadline = Some(now_ms + self.cfg.return_delay_ms);
            self.render();
        } else {
            self.rotate(now_ms);
        }
    }

    /// Return finished: move to the next label, commit its text, wait out the gap and
    /// then one frame before measuring it.
    fn rotate(&mut self, now_ms: f64) {
        self.state.current_index = self.cfg.next_index(self.state.current_index);
        self.state.label_width = 0.0;
        self.state.dock();
        if let Some(surface) = self.surface.as_mut() {
            surface.set_label_text(&self.cfg.labels[self.state.current_index]);
        }
        debug!(
            "tagline rotated to #{} {:?}",
            self.state.current_index,
            self.current_label()
        );
        self.enter(Phase::AwaitingLayout);
        self.deadline = Some(now_ms + self.cfg.inter_label_gap_ms);
        self.render();
    }

    fn enter(&mut self, phase: Phase) {
        debug!(
            "tagline phase {} -> {}",
            self.state.phase.name(),
            phase.name()
        );
        self.state.phase = phase;
    }

    fn render(&mut self) {
        let frame = RenderFrame::from_state(&self.state, self.cfg.center_offset_px);
        if let Some(surface) = self.surface.as_mut() {
            surface.apply(&frame);
        }
    }

    fn next_wake(&self, now_ms: f64) -> Wake {
        if !self.is_live() {
            return Wake::Never;
        }
        if self.flight.is_some() {
            return Wake::NextFrame;
        }
        if let Some(d) = self.deadline {
            return Wake::After((d - now_ms).max(0.0));
        }
        if self.state.phase == Phase::AwaitingLayout {
            return Wake::NextFrame;
        }
        Wake::Never
    }
}
