//! Error types for tagline-core.
//!
//! Runtime animation never fails; only construction (config validation) and the
//! contact form helpers return errors.

use thiserror::Error;

/// Rejected animator configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("tagline config needs at least one label")]
    EmptyLabels,
    #[error("invalid {field}: {value} (durations must be finite and non-negative)")]
    InvalidDuration { field: &'static str, value: f64 },
    #[error("invalid {field}: {value} (must be finite)")]
    InvalidOffset { field: &'static str, value: f32 },
    #[error("tagline config parse error: {0}")]
    Parse(String),
}

/// Contact form validation failures. The display text is what the page shows the user.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}
