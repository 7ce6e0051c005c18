//! Host seams: geometry queries and render application.
//!
//! Hosts (DOM/wasm, native test doubles) implement both traits on the type that
//! owns the container and hand it to [`crate::Animator::new`].

/// Result of measuring the rendered label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Measurement {
    /// Rendered width in px, without padding.
    Ready(f32),
    /// The committed text has not been through a rendering pass yet.
    Pending,
}

/// Geometry queries against the animation container.
pub trait LayoutProbe {
    /// Current container width in px. Callable at any time.
    fn measure_container(&self) -> f32;

    /// Rendered width of the label text last passed to [`RenderTarget::set_label_text`].
    /// Only meaningful after at least one rendering pass since that commit.
    fn measure_label(&self) -> Measurement;
}

/// Render outputs applied by the host.
pub trait RenderTarget {
    /// Commit a new label to the render tree.
    fn set_label_text(&mut self, text: &str);

    /// Apply cursor offset, mask width and label offset.
    fn apply(&mut self, frame: &crate::RenderFrame);
}
