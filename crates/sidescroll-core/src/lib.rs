#![forbid(unsafe_code)]

//! Core: translation of vertical input gestures into horizontal scrolling.
//!
//! # Role in sidescroll
//! `sidescroll-core` owns every decision the engine makes. It never touches a
//! DOM directly: the scrollable surface, the focused element and the display
//! refresh signal are injected as capabilities ([`viewport::Viewport`],
//! [`focus::FocusProbe`], [`coalescer::FrameScheduler`]). `sidescroll-web`
//! provides the browser implementations; [`sim`] provides deterministic ones
//! for tests and host-side replay.
//!
//! # Primary responsibilities
//! - **Axis disambiguation**: decide whether a sample is vertical-dominant.
//! - **Frame coalescing**: at most one wheel-driven offset write per frame,
//!   last request wins.
//! - **Touch panning**: incremental single-finger pan sessions.
//! - **Keyboard paging**: arrow/page/space/home/end, suppressed while typing.
//!
//! # Usage
//!
//! ```
//! use sidescroll_core::engine::GestureTranslationEngine;
//! use sidescroll_core::input::WheelInput;
//! use sidescroll_core::sim::{ManualFrameScheduler, SimViewport, StaticFocus};
//! use sidescroll_core::ScrollOptions;
//!
//! let viewport = SimViewport::new(800.0, 4000.0);
//! let frames = ManualFrameScheduler::new();
//! let mut engine = GestureTranslationEngine::new(
//!     viewport.clone(),
//!     frames.clone(),
//!     StaticFocus::new(),
//!     ScrollOptions::default(),
//! );
//!
//! let disposition = engine.on_wheel(&WheelInput::pixels(0.0, 120.0));
//! assert!(disposition.is_suppressed());
//!
//! for token in frames.advance_frame() {
//!     engine.on_frame(token);
//! }
//! assert_eq!(viewport.scroll_left(), 120.0);
//! ```

pub mod axis;
pub mod coalescer;
pub mod config;
pub mod engine;
pub mod focus;
pub mod input;
pub mod listener;
pub mod sim;
pub mod viewport;

pub use config::{OptionsError, ScrollOptions};
pub use engine::{EventDisposition, GestureTranslationEngine};
