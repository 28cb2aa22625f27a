#![forbid(unsafe_code)]

//! Frame coalescing for high-frequency scroll writes.
//!
//! Trackpads can fire a dozen wheel events between two display refreshes.
//! Applying each one as its own layout mutation causes jank, so wheel-driven
//! offset writes go through a [`FrameCoalescer`]:
//!
//! - [`schedule`](FrameCoalescer::schedule) cancels any request that has not
//!   run yet and requests a fresh frame carrying the new mutation,
//! - the host calls [`take_due`](FrameCoalescer::take_due) when a frame
//!   fires and applies whatever comes back,
//! - [`cancel`](FrameCoalescer::cancel) drops the pending request on
//!   teardown.
//!
//! # Design
//!
//! The coalescer uses a "latest wins" strategy. Mutations are not summed: a
//! request scheduled after an unflushed one replaces it entirely. At most one
//! frame request is in flight per coalescer.
//!
//! The display refresh signal is injected through [`FrameScheduler`], so the
//! coalescer runs unchanged against `requestAnimationFrame` or a manual test
//! clock.
//!
//! # Usage
//!
//! ```
//! use sidescroll_core::coalescer::FrameCoalescer;
//! use sidescroll_core::sim::ManualFrameScheduler;
//!
//! let frames = ManualFrameScheduler::new();
//! let mut coalescer = FrameCoalescer::new(frames.clone());
//!
//! coalescer.schedule(50);
//! coalescer.schedule(30);
//! assert_eq!(frames.pending_count(), 1);
//!
//! let due: Vec<i32> = frames
//!     .advance_frame()
//!     .into_iter()
//!     .filter_map(|token| coalescer.take_due(token))
//!     .collect();
//! assert_eq!(due, vec![30]);
//! ```

/// Identifies one frame request issued by a [`FrameScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(u64);

impl FrameToken {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Display refresh capability.
///
/// `request_frame` arranges for the host to report the returned token back
/// on the next repaint; `cancel_frame` withdraws a request that has not
/// fired. Cancelling an unknown or already-fired token is a no-op.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameToken;

    fn cancel_frame(&mut self, token: FrameToken);
}

/// Lifetime counters for one coalescer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoalescerStats {
    /// Calls to `schedule`.
    pub scheduled: u64,
    /// Scheduled mutations dropped because a newer one replaced them.
    pub replaced: u64,
    /// Mutations handed back by `take_due`.
    pub flushed: u64,
    /// Pending mutations dropped by `cancel`.
    pub canceled: u64,
    /// Frame callbacks whose token was no longer live.
    pub stale: u64,
}

/// Batches mutation requests so at most one runs per display frame.
///
/// # Thread Safety
///
/// Not thread-safe; intended for the single UI thread.
#[derive(Debug)]
pub struct FrameCoalescer<S: FrameScheduler, M> {
    scheduler: S,
    pending: Option<(FrameToken, M)>,
    stats: CoalescerStats,
}

impl<S: FrameScheduler, M> FrameCoalescer<S, M> {
    #[must_use]
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            stats: CoalescerStats::default(),
        }
    }

    /// Replace any pending mutation with `mutation` and request a new frame.
    pub fn schedule(&mut self, mutation: M) {
        if let Some((token, _)) = self.pending.take() {
            self.scheduler.cancel_frame(token);
            self.stats.replaced += 1;
        }
        let token = self.scheduler.request_frame();
        self.pending = Some((token, mutation));
        self.stats.scheduled += 1;
    }

    /// Hand back the pending mutation if `token` is the live request.
    ///
    /// Stale tokens (canceled or superseded requests the host fired anyway)
    /// yield `None` and leave the live request untouched.
    pub fn take_due(&mut self, token: FrameToken) -> Option<M> {
        match self.pending.take() {
            Some((live, mutation)) if live == token => {
                self.stats.flushed += 1;
                Some(mutation)
            }
            other => {
                self.pending = other;
                self.stats.stale += 1;
                None
            }
        }
    }

    /// Withdraw the pending request. Returns whether one existed.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some((token, _)) => {
                self.scheduler.cancel_frame(token);
                self.stats.canceled += 1;
                true
            }
            None => false,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Token of the in-flight request, if any.
    #[must_use]
    pub fn pending_token(&self) -> Option<FrameToken> {
        self.pending.as_ref().map(|(token, _)| *token)
    }

    #[must_use]
    pub fn stats(&self) -> CoalescerStats {
        self.stats
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<S: FrameScheduler, M> Drop for FrameCoalescer<S, M> {
    fn drop(&mut self) {
        if let Some((token, _)) = self.pending.take() {
            self.scheduler.cancel_frame(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ManualFrameScheduler;

    fn flush(
        frames: &ManualFrameScheduler,
        coalescer: &mut FrameCoalescer<ManualFrameScheduler, i32>,
    ) -> Vec<i32> {
        frames
            .advance_frame()
            .into_iter()
            .filter_map(|token| coalescer.take_due(token))
            .collect()
    }

    #[test]
    fn latest_request_wins() {
        let frames = ManualFrameScheduler::new();
        let mut coalescer = FrameCoalescer::new(frames.clone());

        coalescer.schedule(50);
        coalescer.schedule(30);

        assert_eq!(frames.pending_count(), 1);
        assert_eq!(flush(&frames, &mut coalescer), vec![30]);
        assert!(!coalescer.is_pending());

        let stats = coalescer.stats();
        assert_eq!(stats.scheduled, 2);
        assert_eq!(stats.replaced, 1);
        assert_eq!(stats.flushed, 1);
    }

    #[test]
    fn one_mutation_per_frame() {
        let frames = ManualFrameScheduler::new();
        let mut coalescer = FrameCoalescer::new(frames.clone());

        coalescer.schedule(1);
        assert_eq!(flush(&frames, &mut coalescer), vec![1]);
        assert_eq!(flush(&frames, &mut coalescer), Vec::<i32>::new());

        coalescer.schedule(2);
        assert_eq!(flush(&frames, &mut coalescer), vec![2]);
    }

    #[test]
    fn cancel_withdraws_frame_request() {
        let frames = ManualFrameScheduler::new();
        let mut coalescer = FrameCoalescer::new(frames.clone());

        coalescer.schedule(7);
        assert!(coalescer.cancel());
        assert!(!coalescer.cancel());
        assert_eq!(frames.pending_count(), 0);
        assert_eq!(flush(&frames, &mut coalescer), Vec::<i32>::new());
        assert_eq!(coalescer.stats().canceled, 1);
    }

    #[test]
    fn stale_token_is_ignored() {
        let frames = ManualFrameScheduler::new();
        let mut coalescer = FrameCoalescer::new(frames.clone());

        coalescer.schedule(1);
        let Some(old) = coalescer.pending_token() else {
            panic!("schedule must leave a pending token");
        };
        coalescer.schedule(2);

        assert_eq!(coalescer.take_due(old), None);
        assert!(coalescer.is_pending());
        assert_eq!(coalescer.stats().stale, 1);
        assert_eq!(flush(&frames, &mut coalescer), vec![2]);
    }

    #[test]
    fn drop_cancels_pending_request() {
        let frames = ManualFrameScheduler::new();
        {
            let mut coalescer = FrameCoalescer::new(frames.clone());
            coalescer.schedule(9);
            assert_eq!(frames.pending_count(), 1);
        }
        assert_eq!(frames.pending_count(), 0);
    }
}
