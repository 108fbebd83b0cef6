//! Frame scheduling capability consumed by animation controllers.
//!
//! Animations never own a thread or a timer loop. Instead the embedding
//! framework supplies an implementation of [`FrameScheduler`] that provides
//! two things:
//!
//! - **Ticks**: a callback invoked once per rendered frame while subscribed,
//!   receiving the frame timestamp.
//! - **Delayed callbacks**: one-shot callbacks that run after a delay and can
//!   be cancelled before they fire.
//!
//! Timestamps are offsets from an arbitrary origin chosen by the scheduler;
//! only differences between them are meaningful.
//!
//! [`FrameClock`](crate::FrameClock) is the headless implementation used by
//! tests and by hosts that drive frames manually.

use std::sync::Arc;
use std::time::Duration;

use slotmap::new_key_type;

use crate::timer::{TimerCallback, TimerId};

new_key_type! {
    /// A unique identifier for a tick subscription.
    pub struct TickerId;
}

/// A per-frame callback receiving the frame timestamp.
pub type TickCallback = Arc<dyn Fn(Duration) + Send + Sync + 'static>;

/// The scheduling services an animation needs from its host.
///
/// Implementations must not hold internal locks while invoking callbacks;
/// callbacks are allowed to subscribe, unsubscribe, schedule and cancel
/// re-entrantly.
pub trait FrameScheduler: Send + Sync {
    /// The current timestamp on the scheduler's timeline.
    fn now(&self) -> Duration;

    /// Start delivering ticks to `callback` until unsubscribed.
    fn subscribe_ticks(&self, callback: TickCallback) -> TickerId;

    /// Stop delivering ticks. Returns `false` if the subscription was unknown.
    fn unsubscribe_ticks(&self, id: TickerId) -> bool;

    /// Run `callback` once after `delay` has elapsed.
    fn run_after(&self, delay: Duration, callback: TimerCallback) -> TimerId;

    /// Cancel a pending delayed callback. Returns `false` if it already ran
    /// or was never scheduled.
    fn cancel(&self, id: TimerId) -> bool;
}
