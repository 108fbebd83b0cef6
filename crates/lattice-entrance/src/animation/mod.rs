//! Entrance animation core.
//!
//! One controller, one progress value, four channels:
//!
//! ```text
//! dx      = lerp(start_offset.dx, 0.0, progress)
//! dy      = lerp(start_offset.dy, 0.0, progress)
//! opacity = lerp(start_opacity,   1.0, progress)
//! scale   = lerp(start_scale,     1.0, progress)
//! ```
//!
//! Interpolation is linear; there are no easing curves.

mod channels;
mod completion;
mod config;
mod controller;

pub use channels::{Channels, RenderState, lerp};
pub use completion::PlayCompletion;
pub use config::{
    AnimationConfig, DEFAULT_DURATION, DEFAULT_START_OFFSET, DEFAULT_START_OPACITY,
    DEFAULT_START_SCALE, Direction, Offset,
};
pub use controller::{AnimationPhase, EntranceController, PlayDirection, settle_wait};
