#![forbid(unsafe_code)]

//! Gesture translation: vertical input in, horizontal scrolling out.
//!
//! [`GestureTranslationEngine`] is a stateful processor attached to one
//! scrollable surface. The host forwards wheel, touch and key events to it
//! and honors the returned [`EventDisposition`] by cancelling the platform
//! default action when asked.
//!
//! # Input paths
//!
//! - **Wheel**: vertical-dominant samples are suppressed and their `dy` is
//!   scheduled through a [`FrameCoalescer`]; the frame flush adds it to the
//!   live offset. Last request per frame wins.
//! - **Touch**: a single-finger pan session tracks the previous pointer
//!   position. Vertical-dominant moves are suppressed and `-dy` is applied
//!   to the offset immediately. Touch deltas are not coalesced.
//! - **Keyboard**: arrow/page/space/home/end drive the platform smooth
//!   scroll, unless the focused element accepts text.
//!
//! # Invariants
//!
//! 1. At most one frame request is pending per engine.
//! 2. At most one pan session exists; it never survives a multi-touch event.
//! 3. Pan deltas are incremental: the anchor moves on every move event,
//!    whichever axis dominated.
//! 4. After [`detach`](GestureTranslationEngine::detach) no entry point
//!    mutates the viewport, including a frame callback that was already
//!    queued.

use tracing::{debug, trace};

use crate::coalescer::{CoalescerStats, FrameCoalescer, FrameScheduler, FrameToken};
use crate::config::ScrollOptions;
use crate::focus::{FocusProbe, InputContextGuard};
use crate::input::{GestureSample, KeyCode, KeyInput, KeyPhase, TouchInput, TouchPhase, WheelInput};
use crate::viewport::{PendingScrollDelta, Viewport};

/// What the host should do with the platform event after the engine saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventDisposition {
    /// Leave the event alone; native behavior proceeds.
    PassThrough,
    /// Cancel the default action (`preventDefault`).
    Suppress,
}

impl EventDisposition {
    #[inline]
    #[must_use]
    pub const fn is_suppressed(self) -> bool {
        matches!(self, Self::Suppress)
    }
}

/// Keyboard paging actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    PageForward,
    PageBackward,
    Start,
    End,
}

impl KeyAction {
    #[must_use]
    pub fn from_key_code(code: &KeyCode) -> Option<Self> {
        match code {
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char(' ') => Some(Self::PageForward),
            KeyCode::Left | KeyCode::PageUp => Some(Self::PageBackward),
            KeyCode::Home => Some(Self::Start),
            KeyCode::End => Some(Self::End),
            _ => None,
        }
    }
}

/// In-progress single-finger pan.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PanSession {
    last_x: f64,
    last_y: f64,
}

impl PanSession {
    /// Delta from the previous position; the anchor moves to `(x, y)`.
    fn advance(&mut self, x: f64, y: f64) -> GestureSample {
        let sample = GestureSample::between((self.last_x, self.last_y), (x, y));
        self.last_x = x;
        self.last_y = y;
        sample
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PanState {
    Idle,
    Panning(PanSession),
}

/// Why a pan session ended.
#[derive(Debug, Clone, Copy)]
enum PanEnd {
    Released,
    Canceled,
    MultiTouch,
    Detached,
}

/// Translates vertical gestures on one viewport into horizontal scrolling.
pub struct GestureTranslationEngine<V: Viewport, S: FrameScheduler, P: FocusProbe> {
    viewport: V,
    coalescer: FrameCoalescer<S, PendingScrollDelta>,
    guard: InputContextGuard<P>,
    options: ScrollOptions,
    pan: PanState,
    attached: bool,
}

impl<V: Viewport, S: FrameScheduler, P: FocusProbe> std::fmt::Debug
    for GestureTranslationEngine<V, S, P>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureTranslationEngine")
            .field("attached", &self.attached)
            .field("panning", &self.is_panning())
            .field("frame_pending", &self.coalescer.is_pending())
            .field("options", &self.options)
            .finish()
    }
}

impl<V: Viewport, S: FrameScheduler, P: FocusProbe> GestureTranslationEngine<V, S, P> {
    /// Attach to `viewport`.
    pub fn new(viewport: V, scheduler: S, probe: P, options: ScrollOptions) -> Self {
        debug!(
            keyboard = options.keyboard_redirection,
            touch = options.touch_redirection,
            "gesture engine attached"
        );
        Self {
            viewport,
            coalescer: FrameCoalescer::new(scheduler),
            guard: InputContextGuard::new(probe),
            options,
            pan: PanState::Idle,
            attached: true,
        }
    }

    // -----------------------------------------------------------------------
    // Wheel
    // -----------------------------------------------------------------------

    /// Handle one wheel sample.
    pub fn on_wheel(&mut self, wheel: &WheelInput) -> EventDisposition {
        if !self.attached {
            return EventDisposition::PassThrough;
        }
        let sample = wheel.normalized(self.options.line_height, self.viewport.client_width());
        if !sample.is_vertical_dominant() {
            return EventDisposition::PassThrough;
        }

        self.coalescer.schedule(PendingScrollDelta::new(sample.dy));
        trace!(dy = sample.dy, dx = sample.dx, "wheel redirected");
        EventDisposition::Suppress
    }

    /// Display refresh callback for a token issued by this engine's scheduler.
    pub fn on_frame(&mut self, token: FrameToken) {
        if !self.attached {
            return;
        }
        if let Some(delta) = self.coalescer.take_due(token) {
            delta.apply(&mut self.viewport);
            trace!(
                delta = delta.delta(),
                offset = self.viewport.scroll_left(),
                "frame flush"
            );
        }
    }

    // -----------------------------------------------------------------------
    // Touch
    // -----------------------------------------------------------------------

    /// Handle one touch event.
    pub fn on_touch(&mut self, touch: &TouchInput) -> EventDisposition {
        if !self.attached || !self.options.touch_redirection {
            return EventDisposition::PassThrough;
        }

        match touch.phase {
            TouchPhase::Start => {
                if let [point] = touch.touches.as_slice() {
                    self.pan = PanState::Panning(PanSession {
                        last_x: point.x,
                        last_y: point.y,
                    });
                    debug!(x = point.x, y = point.y, "pan session started");
                } else {
                    self.end_pan(PanEnd::MultiTouch);
                }
                EventDisposition::PassThrough
            }
            TouchPhase::Move => self.on_touch_move(touch),
            TouchPhase::End => {
                self.end_pan(PanEnd::Released);
                EventDisposition::PassThrough
            }
            TouchPhase::Cancel => {
                self.end_pan(PanEnd::Canceled);
                EventDisposition::PassThrough
            }
        }
    }

    fn on_touch_move(&mut self, touch: &TouchInput) -> EventDisposition {
        if !self.is_panning() {
            return EventDisposition::PassThrough;
        }
        let [point] = touch.touches.as_slice() else {
            self.end_pan(PanEnd::MultiTouch);
            return EventDisposition::PassThrough;
        };
        let PanState::Panning(session) = &mut self.pan else {
            return EventDisposition::PassThrough;
        };

        let sample = session.advance(point.x, point.y);
        if !sample.is_vertical_dominant() {
            trace!(axis = ?sample.dominant_axis(), "pan sample passed through");
            return EventDisposition::PassThrough;
        }

        self.viewport.scroll_left_by(-sample.dy);
        trace!(
            dy = sample.dy,
            offset = self.viewport.scroll_left(),
            "pan redirected"
        );
        EventDisposition::Suppress
    }

    fn end_pan(&mut self, reason: PanEnd) {
        if matches!(self.pan, PanState::Panning(_)) {
            debug!(?reason, "pan session ended");
        }
        self.pan = PanState::Idle;
    }

    // -----------------------------------------------------------------------
    // Keyboard
    // -----------------------------------------------------------------------

    /// Handle one key event.
    pub fn on_key(&mut self, key: &KeyInput) -> EventDisposition {
        if !self.attached || !self.options.keyboard_redirection || key.phase != KeyPhase::Down {
            return EventDisposition::PassThrough;
        }
        let Some(action) = KeyAction::from_key_code(&key.code) else {
            return EventDisposition::PassThrough;
        };
        if self.guard.is_typing_context() {
            trace!(?action, "typing context, key passed through");
            return EventDisposition::PassThrough;
        }

        let page = self.viewport.client_width();
        match action {
            KeyAction::PageForward => self.viewport.smooth_scroll_by(page),
            KeyAction::PageBackward => self.viewport.smooth_scroll_by(-page),
            KeyAction::Start => self.viewport.smooth_scroll_to(0.0),
            KeyAction::End => {
                let end = self.viewport.scroll_width();
                self.viewport.smooth_scroll_to(end);
            }
        }
        trace!(?action, page, "keyboard scroll");
        EventDisposition::Suppress
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Stop reacting to input and withdraw any pending frame request.
    ///
    /// Idempotent.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        let canceled_frame = self.coalescer.cancel();
        self.end_pan(PanEnd::Detached);
        debug!(canceled_frame, "gesture engine detached");
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self.pan, PanState::Panning(_))
    }

    /// Last pointer position of the active pan session.
    #[must_use]
    pub fn pan_anchor(&self) -> Option<(f64, f64)> {
        match self.pan {
            PanState::Panning(session) => Some((session.last_x, session.last_y)),
            PanState::Idle => None,
        }
    }

    #[must_use]
    pub fn is_frame_pending(&self) -> bool {
        self.coalescer.is_pending()
    }

    #[must_use]
    pub fn coalescer_stats(&self) -> CoalescerStats {
        self.coalescer.stats()
    }

    #[must_use]
    pub fn options(&self) -> &ScrollOptions {
        &self.options
    }

    #[must_use]
    pub fn viewport(&self) -> &V {
        &self.viewport
    }
}
