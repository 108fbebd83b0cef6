//! Core systems for Lattice Entrance.
//!
//! This crate provides the host-facing plumbing that entrance animations are
//! built on:
//!
//! - **Frame scheduling**: the [`FrameScheduler`] capability (per-frame ticks
//!   plus cancellable delayed callbacks) that an embedding framework supplies
//! - **Frame clock**: [`FrameClock`], a manually advanced scheduler for
//!   headless hosts and deterministic tests
//! - **Timers**: a deadline-ordered one-shot [`TimerQueue`]
//! - **Signal/Slot System**: [`Signal`] for render notifications
//! - **Logging**: `tracing` targets and the [`PerfSpan`] guard
//!
//! # Example
//!
//! ```
//! use lattice_entrance_core::{FrameClock, FrameScheduler};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::time::Duration;
//!
//! let clock = FrameClock::new();
//! let frames = Arc::new(AtomicUsize::new(0));
//! let frames_clone = frames.clone();
//! let ticker = clock.subscribe_ticks(Arc::new(move |_now| {
//!     frames_clone.fetch_add(1, Ordering::SeqCst);
//! }));
//!
//! clock.run_frames(3, Duration::from_millis(16));
//! clock.unsubscribe_ticks(ticker);
//! assert_eq!(frames.load(Ordering::SeqCst), 3);
//! ```

mod clock;
mod error;
pub mod logging;
mod scheduler;
pub mod signal;
mod timer;

pub use clock::FrameClock;
pub use error::{LatticeError, Result, TimerError};
pub use logging::PerfSpan;
pub use scheduler::{FrameScheduler, TickCallback, TickerId};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{DueTimer, TimerCallback, TimerId, TimerQueue};
