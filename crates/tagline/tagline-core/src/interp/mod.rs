//! Interpolation helpers.
//!
//! Positions are always recomputed from elapsed wall-clock time, never accumulated
//! tick over tick, so a throttled host resumes at the right place.

pub mod functions;
