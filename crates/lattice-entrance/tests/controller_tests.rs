//! Tests for the entrance controller driven by a manual frame clock.

use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use parking_lot::Mutex;

use lattice_entrance::animation::settle_wait;
use lattice_entrance::{
    AnimationConfig, AnimationPhase, Channels, Direction, EntranceController, Offset, RenderState,
};
use lattice_entrance_core::FrameClock;

const FRAME: Duration = Duration::from_millis(16);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// A config whose automatic play never fires within a test.
fn idle_config() -> AnimationConfig {
    AnimationConfig::default().with_delay(Duration::from_secs(3600))
}

fn record_renders(controller: &EntranceController) -> Arc<Mutex<Vec<RenderState>>> {
    let frames = Arc::new(Mutex::new(Vec::new()));
    let frames_clone = frames.clone();
    controller
        .render_requested()
        .connect(move |state| frames_clone.lock().push(*state));
    frames
}

#[test]
fn test_render_at_bounds() {
    let clock = Arc::new(FrameClock::new());
    let config = idle_config()
        .with_start_offset(Offset::new(8.0, 24.0))
        .with_start_opacity(0.5)
        .with_start_scale(0.75);
    let controller = EntranceController::new(config, clock.clone());

    assert_eq!(
        controller.render_state(),
        RenderState::Visible(Channels {
            dx: 8.0,
            dy: 24.0,
            opacity: 0.5,
            scale: 0.75,
        })
    );

    let _done = controller.play_forward(None);
    clock.run_frames(30, FRAME);
    assert_eq!(controller.render_state(), RenderState::Visible(Channels::SETTLED));
}

#[test]
fn test_forward_play_resolves_after_duration() {
    init_tracing();
    let clock = Arc::new(FrameClock::new());
    let controller = EntranceController::new(idle_config(), clock.clone());

    let done = controller.play_forward(None);
    clock.advance(ms(332));
    assert!(!done.is_complete());
    assert!(controller.progress() < 1.0);

    clock.advance(ms(1));
    assert!(done.is_complete());
    assert_eq!(controller.progress(), 1.0);
    assert_eq!(controller.phase(), AnimationPhase::Settled);
    assert_eq!(done.now_or_never(), Some(()));
}

#[test]
fn test_completion_awaited_on_another_thread() {
    let clock = Arc::new(FrameClock::new());
    let controller = EntranceController::new(idle_config(), clock.clone());

    let done = controller.play_forward(None);
    let waiter = std::thread::spawn(move || pollster::block_on(done));

    clock.run_frames(25, FRAME);
    waiter.join().expect("waiter thread panicked");
    assert_eq!(controller.progress(), 1.0);
}

#[test]
fn test_backward_play_with_dismount_erases() {
    init_tracing();
    let clock = Arc::new(FrameClock::new());
    let controller = EntranceController::new(
        idle_config().with_initial_direction(Direction::Exit),
        clock.clone(),
    );
    let renders = record_renders(&controller);

    let done = controller.play_backward(None, true);
    clock.advance(ms(332));
    assert!(!done.is_complete());
    assert!(!controller.is_erased());

    clock.advance(ms(1));
    assert!(done.is_complete());
    assert!(controller.is_erased());
    assert_eq!(controller.progress(), 0.0);
    assert_eq!(controller.render_state(), RenderState::Placeholder);
    assert_eq!(renders.lock().last(), Some(&RenderState::Placeholder));
}

#[test]
fn test_backward_play_without_dismount_keeps_child() {
    let clock = Arc::new(FrameClock::new());
    let controller = EntranceController::new(
        idle_config().with_initial_direction(Direction::Exit),
        clock.clone(),
    );

    let done = controller.play_backward(None, false);
    clock.run_frames(30, FRAME);
    assert!(done.is_complete());
    assert!(!controller.is_erased());
    assert_eq!(controller.channels(), Channels::at(&AnimationConfig::default(), 0.0));
}

#[test]
fn test_supersede_keeps_original_completion() {
    let clock = Arc::new(FrameClock::new());
    let controller = EntranceController::new(idle_config(), clock.clone());

    let forward = controller.play_forward(None);
    clock.advance(ms(100));
    let midway = controller.progress();
    assert!(midway > 0.0 && midway < 0.5);

    let backward = controller.play_backward(Some(0.5), false);
    assert_eq!(controller.progress(), 0.5);

    clock.advance(ms(50));
    let falling = controller.progress();
    assert!(falling < 0.5);
    clock.advance(ms(50));
    assert!(controller.progress() < falling);

    // The backward wait covers half the duration from t = 100 ms.
    let backward_at = ms(100) + settle_wait(0.5, AnimationConfig::default().duration);
    assert_eq!(backward_at, ms(267));
    clock.advance(backward_at - ms(200));
    assert!(backward.is_complete());
    assert!(!forward.is_complete());

    clock.advance(ms(333) - backward_at - ms(1));
    assert!(!forward.is_complete());
    clock.advance(ms(1));
    assert!(forward.is_complete());
    assert_eq!(controller.progress(), 0.0);
}

#[test]
fn test_superseded_dismount_still_erases() {
    let clock = Arc::new(FrameClock::new());
    let controller = EntranceController::new(
        idle_config().with_initial_direction(Direction::Exit),
        clock.clone(),
    );

    let exit = controller.play_backward(None, true);
    clock.advance(ms(100));
    let _enter = controller.play_forward(None);
    clock.advance(ms(233));

    assert!(exit.is_complete());
    assert!(controller.is_erased());
}

#[test]
fn test_play_forward_restores_erased_child() {
    let clock = Arc::new(FrameClock::new());
    let controller = EntranceController::new(
        idle_config().with_initial_direction(Direction::Exit),
        clock.clone(),
    );
    let _exit = controller.play_backward(None, true);
    clock.run_frames(30, FRAME);
    assert!(controller.is_erased());

    let renders = record_renders(&controller);
    let _enter = controller.play_forward(None);
    assert!(!controller.is_erased());
    assert!(matches!(renders.lock().first(), Some(RenderState::Visible(_))));
}

#[test]
fn test_skip_animation_schedules_nothing() {
    let clock = Arc::new(FrameClock::new());
    let controller = EntranceController::new(
        AnimationConfig::default()
            .with_skip_animation(true)
            .with_delay(ms(500)),
        clock.clone(),
    );

    assert_eq!(clock.pending_timers(), 0);
    assert_eq!(clock.tick_subscribers(), 0);
    assert_eq!(controller.render_state(), RenderState::Visible(Channels::SETTLED));

    let done = controller.play_backward(None, true);
    assert!(done.is_complete());
    assert_eq!(clock.pending_timers(), 0);
    assert!(!controller.is_erased());
}

#[test]
fn test_set_duration_preserves_position() {
    let clock = Arc::new(FrameClock::new());
    let controller = EntranceController::new(idle_config().with_duration(ms(400)), clock.clone());

    let done = controller.play_forward(None);
    clock.advance(ms(100));
    assert_eq!(controller.progress(), 0.25);

    controller.set_duration(ms(800));
    assert_eq!(controller.progress(), 0.25);
    assert_eq!(controller.duration(), ms(800));

    clock.advance(ms(100));
    assert!((controller.progress() - 0.375).abs() < 1e-6);

    // The completion keeps the wait computed at play time.
    clock.advance(ms(200));
    assert!(done.is_complete());
    assert!(controller.progress() < 1.0);

    clock.advance(ms(300));
    assert!((controller.progress() - 1.0).abs() < 1e-6);
}

#[test]
fn test_teardown_cancels_delayed_auto_play() {
    init_tracing();
    let clock = Arc::new(FrameClock::new());
    let controller = EntranceController::new(AnimationConfig::default().with_delay(ms(500)), clock.clone());
    assert_eq!(clock.pending_timers(), 1);

    clock.advance(ms(200));
    controller.teardown();
    assert_eq!(clock.pending_timers(), 0);

    clock.run_frames(100, FRAME);
    assert_eq!(controller.progress(), 0.0);
    assert_eq!(controller.phase(), AnimationPhase::Idle);
}

#[test]
fn test_play_after_teardown_is_noop() {
    let clock = Arc::new(FrameClock::new());
    let controller = EntranceController::new(idle_config(), clock.clone());
    controller.teardown();

    let done = controller.play_forward(Some(0.5));
    assert!(done.is_complete());
    assert_eq!(controller.progress(), 0.0);
    assert_eq!(clock.tick_subscribers(), 0);
}

#[test]
fn test_pending_completion_survives_teardown() {
    let clock = Arc::new(FrameClock::new());
    let controller = EntranceController::new(
        idle_config().with_initial_direction(Direction::Exit),
        clock.clone(),
    );

    let done = controller.play_backward(None, true);
    clock.advance(ms(100));
    controller.teardown();
    let frozen = controller.progress();

    clock.advance(ms(300));
    assert!(done.is_complete());
    assert!(!controller.is_erased());
    assert_eq!(controller.progress(), frozen);
}

#[test]
fn test_auto_exit_dismounts() {
    let clock = Arc::new(FrameClock::new());
    let controller = EntranceController::new(
        AnimationConfig::default()
            .with_initial_direction(Direction::Exit)
            .with_dismount_after_exit(true)
            .with_delay(ms(50)),
        clock.clone(),
    );
    assert_eq!(controller.progress(), 1.0);

    clock.advance(ms(50));
    assert_eq!(controller.phase(), AnimationPhase::Running);
    clock.run_frames(30, FRAME);
    assert!(controller.is_erased());
    assert_eq!(controller.render_state(), RenderState::Placeholder);
}

#[test]
fn test_unbounded_delay_after_frames() {
    let clock = Arc::new(FrameClock::new());
    clock.advance(FRAME);

    let controller = EntranceController::new(
        AnimationConfig::default().with_delay(Duration::MAX),
        clock.clone(),
    );
    assert_eq!(clock.pending_timers(), 1);

    clock.run_frames(100, FRAME);
    assert_eq!(controller.progress(), 0.0);
    assert_eq!(controller.phase(), AnimationPhase::Idle);
}
