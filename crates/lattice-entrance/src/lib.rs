//! Lattice Entrance - fade, slide and scale entrance animations.
//!
//! This is the umbrella crate. It holds the entrance controller, its
//! configuration, and the widget adapter that composes a child with the
//! animated transform and opacity. Frame scheduling and the signal system
//! come from `lattice-entrance-core`; geometry from `lattice-entrance-render`.
//!
//! # Example
//!
//! ```
//! use lattice_entrance::prelude::*;
//! use lattice_entrance_core::FrameClock;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let clock = Arc::new(FrameClock::new());
//! let config = AnimationConfig::default().with_delay(Duration::from_millis(100));
//! let toast = AnimatedEntrance::new("Saved", config, clock.clone());
//!
//! // Nothing moves until the delay elapses.
//! clock.advance(Duration::from_millis(99));
//! assert_eq!(toast.controller().progress(), 0.0);
//!
//! clock.run_frames(40, Duration::from_millis(16));
//! assert_eq!(toast.controller().progress(), 1.0);
//!
//! let exit = toast.fade_out(true);
//! clock.run_frames(40, Duration::from_millis(16));
//! assert!(exit.is_complete());
//! assert!(toast.compose(Size::new(120.0, 32.0)).is_placeholder());
//! ```

pub mod animation;
mod error;
pub mod prelude;
pub mod widget;

pub use animation::{
    AnimationConfig, AnimationPhase, Channels, Direction, EntranceController, Offset,
    PlayCompletion, PlayDirection, RenderState,
};
pub use error::{ConfigError, Result};
pub use widget::{AnimatedEntrance, Composed, EntranceVersion};

/// Geometry types used when composing an animated child.
pub mod render {
    pub use lattice_entrance_render::*;
}
