//! Entrance animation controller.
//!
//! [`EntranceController`] owns a normalized progress value and moves it
//! linearly toward 1.0 (forward, "fade in") or 0.0 (backward, "fade out")
//! using ticks from an injected [`FrameScheduler`]. Every change is announced
//! through [`EntranceController::render_requested`] so the embedder can
//! repaint.
//!
//! # Lifecycle
//!
//! ```text
//!  [construct] -> Idle(progress = 0.0 for Enter, 1.0 for Exit)
//!  Idle    --play--> Running
//!  Running --progress reaches target--> Settled
//!  Settled --play--> Running        (supersede)
//!  any     --backward wait elapses with dismount--> erased
//!  any     --teardown--> detached
//! ```
//!
//! # Completion timing
//!
//! A play returns a [`PlayCompletion`] that resolves after a wait computed
//! when the play starts: the remaining distance times the duration, rounded
//! up to whole milliseconds. The wait is independent of the trajectory. If a
//! later play supersedes the trajectory, the earlier completion still
//! resolves on its original schedule, and a superseded `play_backward` with
//! `dismount` still erases the child when its wait elapses.
//!
//! # Example
//!
//! ```
//! use lattice_entrance::animation::{AnimationConfig, EntranceController};
//! use lattice_entrance_core::FrameClock;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let clock = Arc::new(FrameClock::new());
//! let controller = EntranceController::new(AnimationConfig::default(), clock.clone());
//!
//! // The default config enters immediately over 333 ms.
//! clock.run_frames(21, Duration::from_millis(16));
//! assert_eq!(controller.progress(), 1.0);
//! ```

use std::sync::{Arc, Weak};
use std::time::Duration;

use lattice_entrance_core::logging::targets;
use lattice_entrance_core::{FrameScheduler, Signal, TickerId, TimerId};
use parking_lot::Mutex;

use super::channels::{Channels, RenderState};
use super::completion::{PlayCompletion, completion_pair};
use super::config::{AnimationConfig, Direction};

/// Whether a play operation is currently driving progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationPhase {
    /// Constructed, no play has started yet.
    #[default]
    Idle,
    /// A play is moving progress toward its target.
    Running,
    /// The last play reached its target or was stopped by teardown.
    Settled,
}

/// Direction of a single play operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayDirection {
    /// Toward progress 1.0.
    Forward,
    /// Toward progress 0.0.
    Backward,
}

impl PlayDirection {
    /// The progress bound this direction settles at.
    #[inline]
    pub fn target(self) -> f32 {
        match self {
            PlayDirection::Forward => 1.0,
            PlayDirection::Backward => 0.0,
        }
    }
}

/// Wait before a play's completion resolves.
///
/// `distance` is the progress still to travel; the result is rounded up to
/// the next whole millisecond.
pub fn settle_wait(distance: f32, duration: Duration) -> Duration {
    let duration_ms = duration.as_micros() as f64 / 1000.0;
    let wait_ms = (f64::from(distance.abs()) * duration_ms).ceil();
    Duration::from_millis(wait_ms as u64)
}

/// A linear path from `origin` to `target`, started at `anchor`.
#[derive(Debug, Clone, Copy)]
struct Trajectory {
    origin: f32,
    target: f32,
    anchor: Duration,
}

impl Trajectory {
    fn sample(&self, now: Duration, duration: Duration) -> f32 {
        if duration.is_zero() {
            return self.target;
        }
        let travelled = now.saturating_sub(self.anchor).as_secs_f64() / duration.as_secs_f64();
        let origin = f64::from(self.origin);
        let target = f64::from(self.target);
        let progress = if target >= origin {
            (origin + travelled).min(target)
        } else {
            (origin - travelled).max(target)
        };
        progress as f32
    }
}

struct ControllerState {
    progress: f32,
    phase: AnimationPhase,
    erased: bool,
    attached: bool,
    duration: Duration,
    trajectory: Option<Trajectory>,
    ticker: Option<TickerId>,
    auto_play: Option<TimerId>,
}

struct Shared {
    config: AnimationConfig,
    scheduler: Arc<dyn FrameScheduler>,
    state: Mutex<ControllerState>,
    render_requested: Signal<RenderState>,
}

/// Drives one entrance/exit animation.
///
/// Dropping the controller tears it down.
pub struct EntranceController {
    shared: Arc<Shared>,
}

impl EntranceController {
    /// Create a controller and start its automatic play.
    ///
    /// With a zero delay the automatic play starts before this returns;
    /// otherwise it is scheduled on `scheduler` and cancelled by
    /// [`teardown`](Self::teardown). With `skip_animation` nothing is
    /// scheduled at all.
    pub fn new(config: AnimationConfig, scheduler: Arc<dyn FrameScheduler>) -> Self {
        let state = ControllerState {
            progress: config.initial_direction.initial_progress(),
            phase: AnimationPhase::Idle,
            erased: false,
            attached: true,
            duration: config.duration,
            trajectory: None,
            ticker: None,
            auto_play: None,
        };
        let shared = Arc::new(Shared {
            config,
            scheduler,
            state: Mutex::new(state),
            render_requested: Signal::new(),
        });

        if shared.config.skip_animation {
            tracing::debug!(target: targets::CONTROLLER, "animation skipped; rendering settled state");
        } else if shared.config.delay.is_zero() {
            shared.auto_play();
        } else {
            let weak = Arc::downgrade(&shared);
            let id = shared.scheduler.run_after(
                shared.config.delay,
                Box::new(move || {
                    if let Some(shared) = weak.upgrade() {
                        shared.state.lock().auto_play = None;
                        shared.auto_play();
                    }
                }),
            );
            shared.state.lock().auto_play = Some(id);
            tracing::debug!(target: targets::CONTROLLER, delay = ?shared.config.delay, "automatic play scheduled");
        }

        Self { shared }
    }

    /// Play toward progress 1.0, optionally jumping to `from` first.
    ///
    /// Clears the erased flag if set.
    pub fn play_forward(&self, from: Option<f32>) -> PlayCompletion {
        self.shared.play(PlayDirection::Forward, from, false)
    }

    /// Play toward progress 0.0, optionally jumping to `from` first.
    ///
    /// When `dismount` is true the child is erased once the returned
    /// completion's wait elapses.
    pub fn play_backward(&self, from: Option<f32>, dismount: bool) -> PlayCompletion {
        self.shared.play(PlayDirection::Backward, from, dismount)
    }

    /// Change the duration used from now on.
    ///
    /// A running play keeps its current position and continues at the new
    /// rate. Completions already handed out keep their original wait.
    pub fn set_duration(&self, duration: Duration) {
        self.shared.set_duration(duration);
    }

    /// Release the tick subscription and cancel a pending automatic play.
    ///
    /// Idempotent. Pending completions still resolve on schedule but no
    /// longer affect this controller.
    pub fn teardown(&self) {
        self.shared.teardown();
    }

    /// Signal emitted whenever progress changes or the erased flag flips.
    pub fn render_requested(&self) -> &Signal<RenderState> {
        &self.shared.render_requested
    }

    /// What to draw right now.
    pub fn render_state(&self) -> RenderState {
        self.shared.state.lock().render_state(&self.shared.config)
    }

    /// Current channel values, ignoring the erased flag.
    pub fn channels(&self) -> Channels {
        let state = self.shared.state.lock();
        state.channels(&self.shared.config)
    }

    /// Current progress in [0.0, 1.0].
    pub fn progress(&self) -> f32 {
        self.shared.state.lock().progress
    }

    /// Current phase.
    ///
    /// A run interrupted by teardown reports [`AnimationPhase::Settled`].
    pub fn phase(&self) -> AnimationPhase {
        self.shared.state.lock().phase
    }

    /// Whether the child has been erased by a dismounting exit.
    pub fn is_erased(&self) -> bool {
        self.shared.state.lock().erased
    }

    /// Whether the controller is still attached (not torn down).
    pub fn is_attached(&self) -> bool {
        self.shared.state.lock().attached
    }

    /// The duration currently in effect.
    pub fn duration(&self) -> Duration {
        self.shared.state.lock().duration
    }

    /// The configuration, with the duration currently in effect.
    pub fn config(&self) -> AnimationConfig {
        let mut config = self.shared.config.clone();
        config.duration = self.duration();
        config
    }
}

impl Drop for EntranceController {
    fn drop(&mut self) {
        self.shared.teardown();
    }
}

impl std::fmt::Debug for EntranceController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("EntranceController")
            .field("progress", &state.progress)
            .field("phase", &state.phase)
            .field("erased", &state.erased)
            .field("attached", &state.attached)
            .field("duration", &state.duration)
            .finish()
    }
}

static_assertions::assert_impl_all!(EntranceController: Send, Sync);

impl ControllerState {
    fn channels(&self, config: &AnimationConfig) -> Channels {
        if config.skip_animation {
            Channels::SETTLED
        } else {
            Channels::at(config, self.progress)
        }
    }

    fn render_state(&self, config: &AnimationConfig) -> RenderState {
        if self.erased {
            RenderState::Placeholder
        } else {
            RenderState::Visible(self.channels(config))
        }
    }
}

impl Shared {
    fn auto_play(self: &Arc<Self>) {
        // Fire and forget: nobody awaits the automatic play.
        let _ = match self.config.initial_direction {
            Direction::Enter => self.play(PlayDirection::Forward, None, false),
            Direction::Exit => {
                self.play(PlayDirection::Backward, None, self.config.dismount_after_exit)
            }
        };
    }

    fn play(
        self: &Arc<Self>,
        direction: PlayDirection,
        from: Option<f32>,
        dismount: bool,
    ) -> PlayCompletion {
        let mut state = self.state.lock();
        if !state.attached {
            if cfg!(debug_assertions) {
                tracing::debug!(target: targets::CONTROLLER, ?direction, "play on a detached controller ignored");
            }
            return PlayCompletion::ready();
        }
        if self.config.skip_animation {
            return PlayCompletion::ready();
        }

        let mut changed = false;
        if direction == PlayDirection::Forward && state.erased {
            state.erased = false;
            changed = true;
        }

        let origin = from.map_or(state.progress, |p| p.clamp(0.0, 1.0));
        if origin != state.progress {
            state.progress = origin;
            changed = true;
        }

        let target = direction.target();
        let wait = settle_wait(target - origin, state.duration);

        if origin == target || state.duration.is_zero() {
            changed |= state.progress != target;
            state.progress = target;
            state.phase = AnimationPhase::Settled;
            state.trajectory = None;
            if let Some(id) = state.ticker.take() {
                self.scheduler.unsubscribe_ticks(id);
            }
        } else {
            state.trajectory = Some(Trajectory {
                origin,
                target,
                anchor: self.scheduler.now(),
            });
            state.phase = AnimationPhase::Running;
            if state.ticker.is_none() {
                let weak = Arc::downgrade(self);
                let id = self.scheduler.subscribe_ticks(Arc::new(move |now| {
                    if let Some(shared) = Weak::upgrade(&weak) {
                        shared.on_tick(now);
                    }
                }));
                state.ticker = Some(id);
            }
        }

        tracing::debug!(
            target: targets::CONTROLLER,
            ?direction,
            origin,
            ?wait,
            dismount,
            "play started"
        );

        let render = state.render_state(&self.config);
        drop(state);
        if changed {
            self.render_requested.emit(render);
        }

        let (handle, completion) = completion_pair();
        let weak = Arc::downgrade(self);
        self.scheduler.run_after(
            wait,
            Box::new(move || {
                if dismount {
                    if let Some(shared) = weak.upgrade() {
                        shared.dismount();
                    }
                }
                handle.complete();
            }),
        );
        completion
    }

    fn on_tick(&self, now: Duration) {
        let mut state = self.state.lock();
        let Some(trajectory) = state.trajectory else {
            return;
        };

        let progress = trajectory.sample(now, state.duration);
        let changed = progress != state.progress;
        state.progress = progress;

        if progress == trajectory.target {
            state.phase = AnimationPhase::Settled;
            state.trajectory = None;
            if let Some(id) = state.ticker.take() {
                self.scheduler.unsubscribe_ticks(id);
            }
            tracing::debug!(target: targets::CONTROLLER, progress, "animation settled");
        }

        let render = state.render_state(&self.config);
        drop(state);
        if changed {
            self.render_requested.emit(render);
        }
    }

    fn dismount(&self) {
        let mut state = self.state.lock();
        if !state.attached || state.erased {
            return;
        }
        state.erased = true;
        drop(state);
        tracing::debug!(target: targets::CONTROLLER, "child erased after exit");
        self.render_requested.emit(RenderState::Placeholder);
    }

    fn set_duration(&self, duration: Duration) {
        let mut state = self.state.lock();
        if state.duration == duration {
            return;
        }

        let mut changed = false;
        if let Some(trajectory) = state.trajectory {
            let now = self.scheduler.now();
            let progress = trajectory.sample(now, state.duration);
            changed = progress != state.progress;
            state.progress = progress;
            state.trajectory = Some(Trajectory {
                origin: progress,
                target: trajectory.target,
                anchor: now,
            });
        }
        tracing::debug!(target: targets::CONTROLLER, old = ?state.duration, new = ?duration, "duration updated");
        state.duration = duration;

        let render = state.render_state(&self.config);
        drop(state);
        if changed {
            self.render_requested.emit(render);
        }
    }

    fn teardown(&self) {
        let mut state = self.state.lock();
        if !state.attached {
            return;
        }
        state.attached = false;
        state.trajectory = None;
        if state.phase == AnimationPhase::Running {
            state.phase = AnimationPhase::Settled;
        }
        let ticker = state.ticker.take();
        let auto_play = state.auto_play.take();
        drop(state);

        if let Some(id) = ticker {
            self.scheduler.unsubscribe_ticks(id);
        }
        if let Some(id) = auto_play {
            self.scheduler.cancel(id);
            tracing::debug!(target: targets::CONTROLLER, "pending automatic play cancelled");
        }
        tracing::debug!(target: targets::CONTROLLER, "controller torn down");
    }
}
