#![forbid(unsafe_code)]

//! Normalized input schema consumed by the engine.
//!
//! The host (a browser binding or a test harness) converts raw platform
//! events into these types:
//! - wheel deltas with their DOM delta mode ([`WheelInput`]),
//! - touch phases with the full list of active points ([`TouchInput`]),
//! - key phases with a normalized [`KeyCode`] ([`KeyInput`]).
//!
//! Positions and deltas are CSS pixels as `f64`, matching what the DOM
//! reports.

use crate::axis::{self, Axis};

/// One raw 2-D observation, consumed within a single handling step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub dx: f64,
    pub dy: f64,
}

impl GestureSample {
    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Delta between two successive pointer positions.
    #[must_use]
    pub fn between(from: (f64, f64), to: (f64, f64)) -> Self {
        Self::new(to.0 - from.0, to.1 - from.1)
    }

    #[inline]
    #[must_use]
    pub fn is_vertical_dominant(&self) -> bool {
        axis::is_vertical_dominant(self.dx, self.dy)
    }

    #[must_use]
    pub fn dominant_axis(&self) -> Option<Axis> {
        axis::dominant_axis(self.dx, self.dy)
    }
}

// ---------------------------------------------------------------------------
// Wheel
// ---------------------------------------------------------------------------

/// Unit of a wheel delta (`WheelEvent.deltaMode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    /// Map the DOM constant (`0` pixel, `1` line, `2` page).
    ///
    /// Unknown values are treated as pixels.
    #[must_use]
    pub const fn from_dom(mode: u32) -> Self {
        match mode {
            1 => Self::Line,
            2 => Self::Page,
            _ => Self::Pixel,
        }
    }
}

/// Wheel or trackpad scroll sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelInput {
    pub dx: f64,
    pub dy: f64,
    pub mode: DeltaMode,
}

impl WheelInput {
    #[must_use]
    pub const fn new(dx: f64, dy: f64, mode: DeltaMode) -> Self {
        Self { dx, dy, mode }
    }

    /// Pixel-mode sample, the common case for trackpads and modern mice.
    #[must_use]
    pub const fn pixels(dx: f64, dy: f64) -> Self {
        Self::new(dx, dy, DeltaMode::Pixel)
    }

    /// Convert to a pixel-space sample.
    ///
    /// Line deltas scale by `line_height`, page deltas by `page_width`
    /// (the viewport's client width).
    #[must_use]
    pub fn normalized(&self, line_height: f64, page_width: f64) -> GestureSample {
        let scale = match self.mode {
            DeltaMode::Pixel => 1.0,
            DeltaMode::Line => line_height,
            DeltaMode::Page => page_width,
        };
        GestureSample::new(self.dx * scale, self.dy * scale)
    }
}

// ---------------------------------------------------------------------------
// Touch
// ---------------------------------------------------------------------------

/// Phase for touch events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: i32,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    #[must_use]
    pub const fn new(id: i32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// Touch event with every point currently on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchInput {
    pub phase: TouchPhase,
    pub touches: Vec<TouchPoint>,
}

impl TouchInput {
    #[must_use]
    pub fn new(phase: TouchPhase, touches: Vec<TouchPoint>) -> Self {
        Self { phase, touches }
    }

    /// Single-finger event at `(x, y)`.
    #[must_use]
    pub fn single(phase: TouchPhase, x: f64, y: f64) -> Self {
        Self::new(phase, vec![TouchPoint::new(0, x, y)])
    }

    /// Event with no remaining points (typical for `touchend`).
    #[must_use]
    pub fn released(phase: TouchPhase) -> Self {
        Self::new(phase, Vec::new())
    }
}

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

/// Phase for key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPhase {
    Down,
    Up,
}

/// Normalized key code.
///
/// Only the keys the engine acts on get dedicated variants; printable keys
/// become [`KeyCode::Char`] and everything else keeps its DOM name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Other(Box<str>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub phase: KeyPhase,
    pub code: KeyCode,
}

impl KeyInput {
    #[must_use]
    pub const fn new(phase: KeyPhase, code: KeyCode) -> Self {
        Self { phase, code }
    }

    /// Key-down for a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn down(dom_key: &str) -> Self {
        Self::new(KeyPhase::Down, normalize_dom_key(dom_key))
    }
}

/// Map a DOM `KeyboardEvent.key` value onto a [`KeyCode`].
#[must_use]
pub fn normalize_dom_key(dom_key: &str) -> KeyCode {
    let mut chars = dom_key.chars();
    if let Some(first) = chars.next()
        && chars.next().is_none()
    {
        return KeyCode::Char(first);
    }

    match dom_key {
        "ArrowLeft" | "Left" => KeyCode::Left,
        "ArrowRight" | "Right" => KeyCode::Right,
        "ArrowUp" | "Up" => KeyCode::Up,
        "ArrowDown" | "Down" => KeyCode::Down,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        // Legacy IE/Edge name for the space bar.
        "Spacebar" => KeyCode::Char(' '),
        other => KeyCode::Other(other.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_between_points() {
        let sample = GestureSample::between((100.0, 200.0), (100.0, 160.0));
        assert_eq!(sample, GestureSample::new(0.0, -40.0));
        assert!(sample.is_vertical_dominant());
        assert_eq!(sample.dominant_axis(), Some(Axis::Vertical));
    }

    #[test]
    fn delta_mode_from_dom() {
        assert_eq!(DeltaMode::from_dom(0), DeltaMode::Pixel);
        assert_eq!(DeltaMode::from_dom(1), DeltaMode::Line);
        assert_eq!(DeltaMode::from_dom(2), DeltaMode::Page);
        assert_eq!(DeltaMode::from_dom(7), DeltaMode::Pixel);
    }

    #[test]
    fn wheel_normalization_scales_by_mode() {
        let px = WheelInput::pixels(1.0, 3.0).normalized(16.0, 800.0);
        assert_eq!(px, GestureSample::new(1.0, 3.0));

        let lines = WheelInput::new(0.0, 3.0, DeltaMode::Line).normalized(16.0, 800.0);
        assert_eq!(lines, GestureSample::new(0.0, 48.0));

        let pages = WheelInput::new(0.0, -1.0, DeltaMode::Page).normalized(16.0, 800.0);
        assert_eq!(pages, GestureSample::new(0.0, -800.0));
    }

    #[test]
    fn dom_keys_normalize() {
        assert_eq!(normalize_dom_key("ArrowRight"), KeyCode::Right);
        assert_eq!(normalize_dom_key("ArrowLeft"), KeyCode::Left);
        assert_eq!(normalize_dom_key("PageDown"), KeyCode::PageDown);
        assert_eq!(normalize_dom_key("PageUp"), KeyCode::PageUp);
        assert_eq!(normalize_dom_key("Home"), KeyCode::Home);
        assert_eq!(normalize_dom_key("End"), KeyCode::End);
        assert_eq!(normalize_dom_key(" "), KeyCode::Char(' '));
        assert_eq!(normalize_dom_key("Spacebar"), KeyCode::Char(' '));
        assert_eq!(normalize_dom_key("a"), KeyCode::Char('a'));
        assert_eq!(normalize_dom_key("Escape"), KeyCode::Other("Escape".into()));
    }

    #[test]
    fn touch_constructors() {
        let start = TouchInput::single(TouchPhase::Start, 10.0, 20.0);
        assert_eq!(start.touches, vec![TouchPoint::new(0, 10.0, 20.0)]);
        assert!(TouchInput::released(TouchPhase::End).touches.is_empty());
    }
}
