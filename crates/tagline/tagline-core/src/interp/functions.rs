//! Interpolation helpers:
//! - lerp_f32 (linear blend)
//! - progress (elapsed / duration, clamped)
//! - ease_in_out (symmetric quadratic ease)
//! - position (eased blend between two offsets at a point in time)

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Normalized progress of a timed transition, clamped to [0, 1].
/// A zero (or negative) duration is complete immediately.
#[inline]
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f32 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0) as f32
}

/// Ease-in-out: 2p² for the first half, 1 - (-2p + 2)² / 2 for the second.
#[inline]
pub fn ease_in_out(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    if p < 0.5 {
        2.0 * p * p
    } else {
        let q = -2.0 * p + 2.0;
        1.0 - q * q / 2.0
    }
}

/// Eased position between `start_x` and `target_x` after `elapsed_ms` of a
/// `duration_ms` transition. Returns exactly `target_x` once elapsed >= duration.
#[inline]
pub fn position(start_x: f32, target_x: f32, elapsed_ms: f64, duration_ms: f64) -> f32 {
    let p = progress(elapsed_ms, duration_ms);
    if p >= 1.0 {
        return target_x;
    }
    lerp_f32(start_x, target_x, ease_in_out(p))
}
