#![forbid(unsafe_code)]

//! Raw DOM event fields to engine input.
//!
//! The DOM layer extracts plain numbers and strings from `WheelEvent`,
//! `TouchEvent` and `KeyboardEvent`; everything here is plain Rust so it
//! runs under native tests.

use sidescroll_core::input::{DeltaMode, KeyInput, TouchInput, TouchPoint, WheelInput};
use sidescroll_core::listener::DomEvent;

/// `WheelEvent.deltaX`, `deltaY`, `deltaMode`.
#[must_use]
pub fn wheel_input(delta_x: f64, delta_y: f64, delta_mode: u32) -> WheelInput {
    WheelInput::new(delta_x, delta_y, DeltaMode::from_dom(delta_mode))
}

/// Touch event of type `kind` with its `touches` list as
/// `(identifier, clientX, clientY)`.
///
/// Returns `None` when `kind` is not a touch event.
pub fn touch_input<I>(kind: DomEvent, points: I) -> Option<TouchInput>
where
    I: IntoIterator<Item = (i32, f64, f64)>,
{
    let phase = kind.touch_phase()?;
    let touches = points
        .into_iter()
        .map(|(id, x, y)| TouchPoint::new(id, x, y))
        .collect();
    Some(TouchInput::new(phase, touches))
}

/// `keydown` with `KeyboardEvent.key`.
#[must_use]
pub fn key_down(dom_key: &str) -> KeyInput {
    KeyInput::down(dom_key)
}
