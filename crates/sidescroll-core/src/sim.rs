#![forbid(unsafe_code)]

//! Deterministic host capabilities.
//!
//! The engine only sees the platform through [`Viewport`], [`FrameScheduler`]
//! and [`FocusProbe`]. This module implements all three without a browser:
//! - [`SimViewport`] clamps offsets like the DOM and records smooth-scroll
//!   requests,
//! - [`ManualFrameScheduler`] queues frame requests until the caller
//!   advances a frame,
//! - [`StaticFocus`] reports whatever element the caller says is focused.
//!
//! Each type is a cheap handle over shared state: clone it, hand one clone
//! to the engine and keep the other to observe and drive the simulation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::coalescer::{FrameScheduler, FrameToken};
use crate::focus::{FocusProbe, FocusedElement};
use crate::viewport::Viewport;

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// Smooth-scroll request observed by a [`SimViewport`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmoothScroll {
    By(f64),
    To(f64),
}

#[derive(Debug)]
struct ViewportState {
    scroll_left: f64,
    client_width: f64,
    scroll_width: f64,
    smooth_requests: Vec<SmoothScroll>,
    writes: usize,
}

impl ViewportState {
    fn max_scroll_left(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    fn write(&mut self, offset: f64) {
        self.scroll_left = offset.clamp(0.0, self.max_scroll_left());
        self.writes += 1;
    }
}

/// In-memory scrollable surface.
///
/// Smooth scrolls complete instantly: the request is recorded and the
/// clamped target offset applied.
#[derive(Debug, Clone)]
pub struct SimViewport {
    state: Rc<RefCell<ViewportState>>,
}

impl SimViewport {
    #[must_use]
    pub fn new(client_width: f64, scroll_width: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(ViewportState {
                scroll_left: 0.0,
                client_width,
                scroll_width,
                smooth_requests: Vec::new(),
                writes: 0,
            })),
        }
    }

    /// Start at `offset` (clamped) without counting it as a write.
    #[must_use]
    pub fn with_scroll_left(self, offset: f64) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state.scroll_left = offset.clamp(0.0, state.max_scroll_left());
        }
        self
    }

    #[must_use]
    pub fn scroll_left(&self) -> f64 {
        self.state.borrow().scroll_left
    }

    #[must_use]
    pub fn max_scroll_left(&self) -> f64 {
        self.state.borrow().max_scroll_left()
    }

    /// Resize the surface, re-clamping the offset.
    pub fn resize(&self, client_width: f64, scroll_width: f64) {
        let mut state = self.state.borrow_mut();
        state.client_width = client_width;
        state.scroll_width = scroll_width;
        state.scroll_left = state.scroll_left.clamp(0.0, state.max_scroll_left());
    }

    /// Immediate offset writes so far (smooth scrolls excluded).
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes
    }

    #[must_use]
    pub fn smooth_requests(&self) -> Vec<SmoothScroll> {
        self.state.borrow().smooth_requests.clone()
    }

    #[must_use]
    pub fn last_smooth_request(&self) -> Option<SmoothScroll> {
        self.state.borrow().smooth_requests.last().copied()
    }
}

impl Viewport for SimViewport {
    fn scroll_left(&self) -> f64 {
        self.state.borrow().scroll_left
    }

    fn set_scroll_left(&mut self, offset: f64) {
        self.state.borrow_mut().write(offset);
    }

    fn client_width(&self) -> f64 {
        self.state.borrow().client_width
    }

    fn scroll_width(&self) -> f64 {
        self.state.borrow().scroll_width
    }

    fn smooth_scroll_by(&mut self, delta: f64) {
        let mut state = self.state.borrow_mut();
        state.smooth_requests.push(SmoothScroll::By(delta));
        let max = state.max_scroll_left();
        state.scroll_left = (state.scroll_left + delta).clamp(0.0, max);
    }

    fn smooth_scroll_to(&mut self, offset: f64) {
        let mut state = self.state.borrow_mut();
        state.smooth_requests.push(SmoothScroll::To(offset));
        let max = state.max_scroll_left();
        state.scroll_left = offset.clamp(0.0, max);
    }
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct FrameQueue {
    next_id: u64,
    queued: Vec<FrameToken>,
    requested: u64,
    canceled: u64,
}

/// Frame scheduler driven by explicit [`advance_frame`](Self::advance_frame)
/// calls.
#[derive(Debug, Clone, Default)]
pub struct ManualFrameScheduler {
    queue: Rc<RefCell<FrameQueue>>,
}

impl ManualFrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the next display refresh: returns every request queued so far,
    /// oldest first, and clears the queue.
    #[must_use]
    pub fn advance_frame(&self) -> Vec<FrameToken> {
        std::mem::take(&mut self.queue.borrow_mut().queued)
    }

    /// Requests waiting for the next frame.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.queue.borrow().queued.len()
    }

    #[must_use]
    pub fn pending_tokens(&self) -> Vec<FrameToken> {
        self.queue.borrow().queued.clone()
    }

    #[must_use]
    pub fn requested_count(&self) -> u64 {
        self.queue.borrow().requested
    }

    #[must_use]
    pub fn canceled_count(&self) -> u64 {
        self.queue.borrow().canceled
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&mut self) -> FrameToken {
        let mut queue = self.queue.borrow_mut();
        queue.next_id += 1;
        queue.requested += 1;
        let token = FrameToken::new(queue.next_id);
        queue.queued.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let mut queue = self.queue.borrow_mut();
        let before = queue.queued.len();
        queue.queued.retain(|queued| *queued != token);
        if queue.queued.len() != before {
            queue.canceled += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

/// Focus probe whose answer is set by the caller.
#[derive(Debug, Clone, Default)]
pub struct StaticFocus {
    focused: Rc<RefCell<Option<FocusedElement>>>,
}

impl StaticFocus {
    /// Nothing focused.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self, element: FocusedElement) {
        *self.focused.borrow_mut() = Some(element);
    }

    pub fn blur(&self) {
        *self.focused.borrow_mut() = None;
    }
}

impl FocusProbe for StaticFocus {
    fn focused_element(&self) -> Option<FocusedElement> {
        self.focused.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_clamps_like_the_dom() {
        let mut viewport = SimViewport::new(1000.0, 3000.0);
        viewport.set_scroll_left(-50.0);
        assert_eq!(viewport.scroll_left(), 0.0);
        viewport.set_scroll_left(9999.0);
        assert_eq!(viewport.scroll_left(), 2000.0);
        assert_eq!(viewport.write_count(), 2);
    }

    #[test]
    fn smooth_requests_are_recorded() {
        let mut viewport = SimViewport::new(1000.0, 3000.0);
        viewport.smooth_scroll_by(1000.0);
        viewport.smooth_scroll_to(3000.0);
        assert_eq!(
            viewport.smooth_requests(),
            vec![SmoothScroll::By(1000.0), SmoothScroll::To(3000.0)]
        );
        assert_eq!(viewport.scroll_left(), 2000.0);
        assert_eq!(viewport.write_count(), 0);
    }

    #[test]
    fn resize_reclamps() {
        let viewport = SimViewport::new(1000.0, 3000.0).with_scroll_left(1800.0);
        viewport.resize(1000.0, 2000.0);
        assert_eq!(viewport.scroll_left(), 1000.0);
    }

    #[test]
    fn frames_queue_until_advanced() {
        let frames = ManualFrameScheduler::new();
        let mut handle = frames.clone();
        let a = handle.request_frame();
        let b = handle.request_frame();
        handle.cancel_frame(a);
        handle.cancel_frame(a);

        assert_eq!(frames.pending_tokens(), vec![b]);
        assert_eq!(frames.requested_count(), 2);
        assert_eq!(frames.canceled_count(), 1);
        assert_eq!(frames.advance_frame(), vec![b]);
        assert!(frames.advance_frame().is_empty());
    }
}
