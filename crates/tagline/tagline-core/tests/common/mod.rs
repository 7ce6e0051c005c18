#![allow(dead_code)]
//! Scripted surface and clock helpers shared by the animator tests.

use std::cell::Cell;
use std::collections::HashMap;

use tagline_core::{AnimationConfig, Animator, LayoutProbe, Measurement, RenderFrame, RenderTarget, Wake};

/// Host frame interval used when a test honors `Wake::NextFrame`.
pub const FRAME_MS: f64 = 16.0;

pub fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

/// In-memory container: fixed raw label widths per text, optional pending frames
/// after each commit, and a log of everything the animator applied.
#[derive(Debug, Default)]
pub struct FakeSurface {
    pub container_width: f32,
    pub widths: HashMap<String, f32>,
    /// `Pending` answers handed out after each text commit.
    pub pending_frames: u32,
    pending_left: Cell<u32>,
    pub measure_calls: Cell<u32>,
    pub text: String,
    pub commits: Vec<String>,
    pub frames: Vec<RenderFrame>,
}

impl FakeSurface {
    pub fn new(container_width: f32) -> Self {
        Self {
            container_width,
            ..Self::default()
        }
    }

    pub fn with_width(mut self, text: &str, raw: f32) -> Self {
        self.widths.insert(text.to_string(), raw);
        self
    }

    pub fn with_pending_frames(mut self, frames: u32) -> Self {
        self.pending_frames = frames;
        self
    }
}

impl LayoutProbe for FakeSurface {
    fn measure_container(&self) -> f32 {
        self.container_width
    }

    fn measure_label(&self) -> Measurement {
        self.measure_calls.set(self.measure_calls.get() + 1);
        let left = self.pending_left.get();
        if left > 0 {
            self.pending_left.set(left - 1);
            return Measurement::Pending;
        }
        Measurement::Ready(self.widths.get(&self.text).copied().unwrap_or(0.0))
    }
}

impl RenderTarget for FakeSurface {
    fn set_label_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.commits.push(text.to_string());
        self.pending_left.set(self.pending_frames);
    }

    fn apply(&mut self, frame: &RenderFrame) {
        self.frames.push(*frame);
    }
}

/// Zero delays, 100ms transitions, immediate first layout.
pub fn fast_cfg(labels: &[&str]) -> AnimationConfig {
    AnimationConfig {
        labels: labels.iter().map(|s| s.to_string()).collect(),
        advance_delay_ms: 0.0,
        advance_duration_ms: 100.0,
        return_delay_ms: 0.0,
        return_duration_ms: 100.0,
        inter_label_gap_ms: 0.0,
        center_offset_px: 4.0,
        initial_layout_delay_ms: 0.0,
        retry_backoff_ms: 100.0,
        label_padding_px: 4.0,
    }
}

/// Follow the animator's wake requests like a host would until `done` holds.
pub fn run_until<F>(
    anim: &mut Animator<FakeSurface>,
    now: &mut f64,
    mut wake: Wake,
    done: F,
) -> Wake
where
    F: Fn(&Animator<FakeSurface>) -> bool,
{
    for _ in 0..100_000 {
        if done(anim) {
            return wake;
        }
        match wake {
            Wake::NextFrame => *now += FRAME_MS,
            Wake::After(ms) => *now += ms,
            Wake::Never => panic!("animator went quiet at t={now} before condition held"),
        }
        wake = anim.poll(*now);
    }
    panic!("condition not reached by t={now}");
}

/// Follow wake requests until the clock passes `until`, returning the last wake.
pub fn run_for(anim: &mut Animator<FakeSurface>, now: &mut f64, mut wake: Wake, until: f64) -> Wake {
    while *now < until {
        match wake {
            Wake::NextFrame => *now += FRAME_MS,
            Wake::After(ms) => *now += ms.max(1.0),
            Wake::Never => return wake,
        }
        wake = anim.poll(*now);
    }
    wake
}
