//! Animator configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Labels shown when the host does not supply its own.
pub const DEFAULT_LABELS: [&str; 5] = [
    "Your AI personal trainer",
    "Learns how you train",
    "Coaches you in real time",
    "Plans that evolve",
    "Accountability, automated",
];

/// Pacing and geometry knobs for one animated tagline.
///
/// All durations are milliseconds. Every field may be omitted from serialized input;
/// missing fields take the [`Default`] value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Cycled in order, wrapping back to the first after the last.
    pub labels: Vec<String>,
    /// Wait while docked before the caret starts moving.
    pub advance_delay_ms: f64,
    pub advance_duration_ms: f64,
    /// Hold at the label end before returning.
    pub return_delay_ms: f64,
    pub return_duration_ms: f64,
    /// Pause between committing the next label and measuring it.
    pub inter_label_gap_ms: f64,
    /// Label nudge (px) while docked at the start position.
    pub center_offset_px: f32,
    /// Wait before the very first container measurement.
    pub initial_layout_delay_ms: f64,
    /// Backoff for deferred transitions and zero-width measurements.
    pub retry_backoff_ms: f64,
    /// Added to the rendered label width to form `label_width`.
    pub label_padding_px: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
            advance_delay_ms: 2000.0,
            advance_duration_ms: 1200.0,
            return_delay_ms: 2500.0,
            return_duration_ms: 1200.0,
            inter_label_gap_ms: 150.0,
            center_offset_px: 4.0,
            initial_layout_delay_ms: 100.0,
            retry_backoff_ms: 100.0,
            label_padding_px: 4.0,
        }
    }
}

impl AnimationConfig {
    /// Default pacing with caller-provided labels.
    pub fn with_labels<I, T>(labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parse a JSON object; absent fields fall back to defaults. The result is validated.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the invariants the animator relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.labels.is_empty() {
            return Err(ConfigError::EmptyLabels);
        }
        let durations = [
            ("advance_delay_ms", self.advance_delay_ms),
            ("advance_duration_ms", self.advance_duration_ms),
            ("return_delay_ms", self.return_delay_ms),
            ("return_duration_ms", self.return_duration_ms),
            ("inter_label_gap_ms", self.inter_label_gap_ms),
            ("initial_layout_delay_ms", self.initial_layout_delay_ms),
            ("retry_backoff_ms", self.retry_backoff_ms),
        ];
        for (field, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDuration { field, value });
            }
        }
        let offsets = [
            ("center_offset_px", self.center_offset_px),
            ("label_padding_px", self.label_padding_px),
        ];
        for (field, value) in offsets {
            if !value.is_finite() {
                return Err(ConfigError::InvalidOffset { field, value });
            }
        }
        Ok(())
    }

    /// Index following `index`, wrapping to 0.
    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.labels.len().max(1)
    }
}
