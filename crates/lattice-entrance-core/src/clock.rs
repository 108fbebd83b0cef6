//! Headless frame clock.
//!
//! [`FrameClock`] implements [`FrameScheduler`] on a virtual timeline that only
//! moves when the host calls [`FrameClock::advance`]. A real frame loop calls
//! `advance` with the measured frame delta; tests call it with fixed steps.
//!
//! # Example
//!
//! ```
//! use lattice_entrance_core::{FrameClock, FrameScheduler};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::time::Duration;
//!
//! let clock = FrameClock::new();
//! let fired = Arc::new(AtomicBool::new(false));
//! let fired_clone = fired.clone();
//! clock.run_after(
//!     Duration::from_millis(100),
//!     Box::new(move || fired_clone.store(true, Ordering::SeqCst)),
//! );
//!
//! clock.advance(Duration::from_millis(99));
//! assert!(!fired.load(Ordering::SeqCst));
//! clock.advance(Duration::from_millis(1));
//! assert!(fired.load(Ordering::SeqCst));
//! ```

use std::time::Duration;

use parking_lot::Mutex;
use slotmap::SlotMap;

use crate::logging::targets;
use crate::scheduler::{FrameScheduler, TickCallback, TickerId};
use crate::timer::{TimerCallback, TimerId, TimerQueue};

struct ClockState {
    /// Current position on the timeline.
    now: Duration,
    /// Pending one-shot callbacks.
    timers: TimerQueue,
    /// Active tick subscriptions.
    tickers: SlotMap<TickerId, TickCallback>,
    /// Number of frames delivered so far.
    frames: u64,
}

/// A manually advanced [`FrameScheduler`].
pub struct FrameClock {
    inner: Mutex<ClockState>,
}

impl FrameClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ClockState {
                now: Duration::ZERO,
                timers: TimerQueue::new(),
                tickers: SlotMap::with_key(),
                frames: 0,
            }),
        }
    }

    /// Advance the timeline by `dt` and deliver one frame.
    ///
    /// Timers due within the step fire first, in deadline order, each with
    /// the clock set to its own deadline. Then every tick subscriber receives
    /// the new timestamp. The timeline saturates at [`Duration::MAX`].
    #[tracing::instrument(skip(self), target = "lattice_entrance_core::clock", level = "trace")]
    pub fn advance(&self, dt: Duration) {
        let target = self.inner.lock().now.saturating_add(dt);

        loop {
            let due = {
                let mut state = self.inner.lock();
                let due = state.timers.pop_due(target);
                if let Some(due) = &due {
                    state.now = state.now.max(due.fire_at);
                }
                due
            };
            let Some(due) = due else { break };
            tracing::trace!(target: targets::CLOCK, id = ?due.id, "running timer");
            (due.callback)();
        }

        let subscribers: Vec<(TickerId, TickCallback)> = {
            let mut state = self.inner.lock();
            state.now = target;
            state.frames += 1;
            state
                .tickers
                .iter()
                .map(|(id, callback)| (id, callback.clone()))
                .collect()
        };

        tracing::trace!(
            target: targets::CLOCK,
            now = ?target,
            subscribers = subscribers.len(),
            "delivering frame"
        );

        for (id, callback) in subscribers {
            // An earlier subscriber may have removed this one during the frame.
            if self.inner.lock().tickers.contains_key(id) {
                callback(target);
            }
        }
    }

    /// Deliver `count` frames of `frame` length each.
    pub fn run_frames(&self, count: usize, frame: Duration) {
        for _ in 0..count {
            self.advance(frame);
        }
    }

    /// Number of pending delayed callbacks.
    pub fn pending_timers(&self) -> usize {
        self.inner.lock().timers.len()
    }

    /// Number of active tick subscriptions.
    pub fn tick_subscribers(&self) -> usize {
        self.inner.lock().tickers.len()
    }

    /// Number of frames delivered since creation.
    pub fn frame_count(&self) -> u64 {
        self.inner.lock().frames
    }

    /// Deadline of the earliest pending delayed callback.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner.lock().timers.next_deadline()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for FrameClock {
    fn now(&self) -> Duration {
        self.inner.lock().now
    }

    fn subscribe_ticks(&self, callback: TickCallback) -> TickerId {
        let id = self.inner.lock().tickers.insert(callback);
        tracing::trace!(target: targets::CLOCK, ?id, "tick subscription added");
        id
    }

    fn unsubscribe_ticks(&self, id: TickerId) -> bool {
        let removed = self.inner.lock().tickers.remove(id).is_some();
        tracing::trace!(target: targets::CLOCK, ?id, removed, "tick subscription removed");
        removed
    }

    fn run_after(&self, delay: Duration, callback: TimerCallback) -> TimerId {
        let mut state = self.inner.lock();
        let fire_at = state.now.saturating_add(delay);
        state.timers.schedule(fire_at, callback)
    }

    fn cancel(&self, id: TimerId) -> bool {
        self.inner.lock().timers.cancel(id).is_ok()
    }
}

static_assertions::assert_impl_all!(FrameClock: Send, Sync);
