#![forbid(unsafe_code)]

//! Scrollable surface abstraction.
//!
//! [`Viewport`] is the thin capability the engine needs from a scrollable
//! element: read and write the horizontal offset, read its geometry, and ask
//! the platform for a native smooth scroll. Implementations are expected to
//! clamp offsets the way the platform does; the engine never clamps.

/// Read/write access to one horizontally scrollable surface.
pub trait Viewport {
    /// Current horizontal offset (`scrollLeft`).
    fn scroll_left(&self) -> f64;

    /// Set the horizontal offset immediately.
    fn set_scroll_left(&mut self, offset: f64);

    /// Visible width (`clientWidth`).
    fn client_width(&self) -> f64;

    /// Total scrollable content width (`scrollWidth`).
    fn scroll_width(&self) -> f64;

    /// Animated scroll relative to the current offset.
    fn smooth_scroll_by(&mut self, delta: f64);

    /// Animated scroll to an absolute offset.
    fn smooth_scroll_to(&mut self, offset: f64);

    /// Add `delta` to the live offset immediately.
    fn scroll_left_by(&mut self, delta: f64) {
        let offset = self.scroll_left();
        self.set_scroll_left(offset + delta);
    }

    /// Capture the current geometry.
    fn snapshot(&self) -> ViewportSnapshot {
        ViewportSnapshot {
            scroll_left: self.scroll_left(),
            client_width: self.client_width(),
            scroll_width: self.scroll_width(),
        }
    }
}

/// Immutable copy of a viewport's geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSnapshot {
    pub scroll_left: f64,
    pub client_width: f64,
    pub scroll_width: f64,
}

impl ViewportSnapshot {
    /// Largest offset the platform will accept.
    #[must_use]
    pub fn max_scroll_left(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    #[must_use]
    pub fn is_at_start(&self) -> bool {
        self.scroll_left <= 0.0
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.scroll_left >= self.max_scroll_left()
    }
}

/// Wheel-driven offset adjustment awaiting the next display frame.
///
/// The delta is added to the offset observed at flush time, not to the
/// offset observed when the sample arrived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingScrollDelta {
    delta: f64,
}

impl PendingScrollDelta {
    #[must_use]
    pub const fn new(delta: f64) -> Self {
        Self { delta }
    }

    #[must_use]
    pub const fn delta(&self) -> f64 {
        self.delta
    }

    /// Apply to the live offset of `viewport`.
    pub fn apply<V: Viewport + ?Sized>(self, viewport: &mut V) {
        viewport.scroll_left_by(self.delta);
    }
}
