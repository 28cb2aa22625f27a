#![forbid(unsafe_code)]

//! Axis disambiguation for raw gesture samples.
//!
//! A sample is redirected to horizontal scrolling only when its vertical
//! magnitude strictly exceeds its horizontal magnitude. Ties and
//! horizontal-dominant samples keep their native behavior, so a trackpad
//! swipe that is already horizontal scrolls the surface natively.

/// Dominant axis of a 2-D delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Whether `(dx, dy)` should be redirected to horizontal scrolling.
///
/// NaN components compare false and therefore never redirect.
#[inline]
#[must_use]
pub fn is_vertical_dominant(dx: f64, dy: f64) -> bool {
    dy.abs() > dx.abs()
}

/// Classify a delta by its dominant axis.
///
/// Returns `None` for ties (including the zero vector) and NaN input.
#[must_use]
pub fn dominant_axis(dx: f64, dy: f64) -> Option<Axis> {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay > ax {
        Some(Axis::Vertical)
    } else if ax > ay {
        Some(Axis::Horizontal)
    } else {
        None
    }
}
