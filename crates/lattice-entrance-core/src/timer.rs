//! One-shot timer queue on a virtual timeline.
//!
//! Deadlines are expressed as offsets from the owning clock's origin rather
//! than wall-clock instants, so the queue can be driven by a real frame loop
//! or stepped deterministically.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a scheduled timer.
    pub struct TimerId;
}

/// A boxed one-shot timer callback.
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Internal timer data.
struct TimerData {
    /// Deadline on the clock's timeline.
    fire_at: Duration,
    /// The callback, taken when the timer fires.
    callback: Option<TimerCallback>,
}

/// An entry in the timer queue (min-heap by deadline, then insertion order).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_at: Duration,
    seq: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other
            .fire_at
            .cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A timer that has come due and been removed from the queue.
pub struct DueTimer {
    /// The timer that fired.
    pub id: TimerId,
    /// Its deadline.
    pub fire_at: Duration,
    /// The callback to run.
    pub callback: TimerCallback,
}

/// Priority queue of pending one-shot timers.
pub struct TimerQueue {
    /// All pending timers.
    timers: SlotMap<TimerId, TimerData>,
    /// Deadline-ordered heap; may contain entries for cancelled timers.
    queue: BinaryHeap<TimerQueueEntry>,
    /// Tie-breaker so timers with equal deadlines fire in FIFO order.
    next_seq: u64,
}

impl TimerQueue {
    /// Create an empty timer queue.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Schedule `callback` to fire at `fire_at`.
    pub fn schedule(&mut self, fire_at: Duration, callback: TimerCallback) -> TimerId {
        let id = self.timers.insert(TimerData {
            fire_at,
            callback: Some(callback),
        });
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(TimerQueueEntry { id, fire_at, seq });
        id
    }

    /// Cancel a pending timer.
    ///
    /// Returns an error if the timer has already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> Result<()> {
        // Heap entries for removed timers are skipped lazily in `pop_due`.
        self.timers
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| TimerError::InvalidTimerId.into())
    }

    /// Check if a timer is still pending.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// The earliest pending deadline, if any.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.discard_stale();
        self.queue.peek().map(|entry| entry.fire_at)
    }

    /// Remove and return the earliest timer whose deadline is at or before `until`.
    #[tracing::instrument(skip(self), target = "lattice_entrance_core::timer", level = "trace")]
    pub fn pop_due(&mut self, until: Duration) -> Option<DueTimer> {
        self.discard_stale();
        let entry = *self.queue.peek()?;
        if entry.fire_at > until {
            return None;
        }
        self.queue.pop();

        let mut data = self.timers.remove(entry.id)?;
        let callback = data.callback.take()?;
        tracing::trace!(target: targets::TIMER, id = ?entry.id, fire_at = ?data.fire_at, "timer due");
        Some(DueTimer {
            id: entry.id,
            fire_at: data.fire_at,
            callback,
        })
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    fn discard_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}
