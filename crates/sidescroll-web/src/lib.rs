#![forbid(unsafe_code)]

//! `sidescroll-web` binds the gesture translation engine to a browser DOM.
//!
//! Design goals:
//! - **Correct listener flags**: `wheel`, `touchmove` and `keydown` are
//!   registered non-passive so suppression actually cancels the native
//!   scroll; observation-only listeners stay passive.
//! - **One frame request in flight**: wheel writes ride a single
//!   `requestAnimationFrame` slot that is replaced, never stacked.
//! - **Scoped teardown**: [`dom::attach`] returns an [`dom::Attachment`]
//!   owning every listener; dropping it removes them and cancels the
//!   pending frame.
//!
//! DOM code only compiles for `wasm32`. Option parsing and event conversion
//! are platform-independent so they can be tested natively.

pub mod convert;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::HorizontalScroll;

pub use sidescroll_core::{OptionsError, ScrollOptions};

/// Parse options JSON handed over by the host page.
///
/// `None`, empty input and JSON `null` all mean "use the defaults".
pub fn parse_options(json: Option<&str>) -> Result<ScrollOptions, OptionsError> {
    match json.map(str::trim) {
        None | Some("" | "null") => Ok(ScrollOptions::default()),
        Some(json) => ScrollOptions::from_json(json),
    }
}
