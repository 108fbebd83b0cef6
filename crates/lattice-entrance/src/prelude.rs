//! Prelude module for Lattice Entrance.
//!
//! ```
//! use lattice_entrance::prelude::*;
//! ```

// ============================================================================
// Animation
// ============================================================================

pub use crate::animation::{
    AnimationConfig, AnimationPhase, Channels, Direction, EntranceController, Offset,
    PlayCompletion, PlayDirection, RenderState,
};

// ============================================================================
// Widget
// ============================================================================

pub use crate::widget::{AnimatedEntrance, Composed, EntranceVersion};

// ============================================================================
// Scheduling and Geometry
// ============================================================================

pub use lattice_entrance_core::{FrameScheduler, Signal};
pub use lattice_entrance_render::{Point, Size, Transform2D};

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::ConfigError;
