//! Tagline Core (host-agnostic)
//!
//! Drives the animated tagline: a caret and reveal mask that slide between the
//! centered start position and the end of the current label, then rotate to the
//! next label forever. The crate never touches a document tree or a clock; hosts
//! implement [`LayoutProbe`] and [`RenderTarget`], pass their monotonic time into
//! every call and honor the returned [`Wake`].
//!
//! [`page`] holds the small decision helpers used by the rest of the page script
//! (menu collapse, anchor targets, contact form validation, nav highlighting).

pub mod animator;
pub mod config;
pub mod error;
pub mod interp;
pub mod outputs;
pub mod page;
pub mod probe;
pub mod state;

// Re-exports for consumers (adapters)
pub use animator::Animator;
pub use config::AnimationConfig;
pub use error::{ConfigError, FormError};
pub use interp::functions::{ease_in_out, lerp_f32, position, progress};
pub use outputs::{RenderFrame, Wake};
pub use probe::{LayoutProbe, Measurement, RenderTarget};
pub use state::{AnimatorState, Phase};
