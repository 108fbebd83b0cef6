//! The animated entrance widget adapter.
//!
//! [`AnimatedEntrance`] wraps an opaque child together with an
//! [`EntranceController`] and turns the controller's channel values into a
//! placement the host can paint: a [`Transform2D`] (translate by the offset,
//! scale around the child's center) plus an opacity multiplier. Once an exit
//! has erased the child, it composes to a zero-size placeholder instead.

use std::sync::Arc;

use lattice_entrance_core::logging::targets;
use lattice_entrance_core::{ConnectionGuard, FrameScheduler, PerfSpan};
use lattice_entrance_render::{Size, Transform2D};

use crate::animation::{
    AnimationConfig, Channels, Direction, EntranceController, PlayCompletion, RenderState,
};

/// Which historical behavior the widget follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntranceVersion {
    /// Entrance only: always starts hidden and fades in; `fade_out` is ignored.
    EnterOnly,
    /// Entrance and exit, including the initial exit direction and dismount.
    #[default]
    EnterExit,
}

/// The result of composing the widget for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Composed<'a, W> {
    /// The child was erased; occupy no space and draw nothing.
    Placeholder {
        /// Always [`Size::ZERO`].
        size: Size,
    },
    /// Draw the child with this transform and opacity.
    Child {
        /// The wrapped child.
        child: &'a W,
        /// Offset translation applied after scaling around the child's center.
        transform: Transform2D,
        /// Opacity multiplier for the child's paint.
        opacity: f32,
    },
}

impl<W> Composed<'_, W> {
    /// Whether this frame is the erased placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Composed::Placeholder { .. })
    }
}

/// An opaque child that fades, slides and scales into place.
///
/// # Example
///
/// ```
/// use lattice_entrance::prelude::*;
/// use lattice_entrance_core::FrameClock;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let clock = Arc::new(FrameClock::new());
/// let card = AnimatedEntrance::new("card", AnimationConfig::default(), clock.clone());
///
/// clock.run_frames(30, Duration::from_millis(16));
/// match card.compose(Size::new(200.0, 80.0)) {
///     Composed::Child { child, transform, opacity } => {
///         assert_eq!(*child, "card");
///         assert!(transform.is_identity());
///         assert_eq!(opacity, 1.0);
///     }
///     Composed::Placeholder { .. } => unreachable!(),
/// }
/// ```
pub struct AnimatedEntrance<W> {
    child: W,
    controller: EntranceController,
    version: EntranceVersion,
}

impl<W> AnimatedEntrance<W> {
    /// Mount `child` with full entrance and exit support.
    pub fn new(child: W, config: AnimationConfig, scheduler: Arc<dyn FrameScheduler>) -> Self {
        Self::with_version(child, config, scheduler, EntranceVersion::EnterExit)
    }

    /// Mount `child` following a specific widget version.
    pub fn with_version(
        child: W,
        mut config: AnimationConfig,
        scheduler: Arc<dyn FrameScheduler>,
        version: EntranceVersion,
    ) -> Self {
        if version == EntranceVersion::EnterOnly && config.initial_direction == Direction::Exit {
            tracing::debug!(target: targets::WIDGET, "entrance-only widget ignores the exit direction");
            config.initial_direction = Direction::Enter;
        }
        tracing::debug!(target: targets::WIDGET, ?version, skip = config.skip_animation, "mounting animated entrance");
        Self {
            child,
            controller: EntranceController::new(config, scheduler),
            version,
        }
    }

    /// The widget version.
    pub fn version(&self) -> EntranceVersion {
        self.version
    }

    /// The wrapped child.
    pub fn child(&self) -> &W {
        &self.child
    }

    /// Mutable access to the wrapped child.
    pub fn child_mut(&mut self) -> &mut W {
        &mut self.child
    }

    /// The controller driving this widget.
    pub fn controller(&self) -> &EntranceController {
        &self.controller
    }

    /// Play the entrance (again), restoring an erased child.
    pub fn fade_in(&self) -> PlayCompletion {
        self.controller.play_forward(None)
    }

    /// Play the exit, erasing the child afterwards when `dismount` is set.
    ///
    /// Entrance-only widgets log and resolve immediately.
    pub fn fade_out(&self, dismount: bool) -> PlayCompletion {
        if self.version == EntranceVersion::EnterOnly {
            tracing::debug!(target: targets::WIDGET, "fade_out on an entrance-only widget ignored");
            return PlayCompletion::ready();
        }
        self.controller.play_backward(None, dismount)
    }

    /// Apply a new configuration from the owner.
    ///
    /// Only the duration is taken over; every other field keeps the value the
    /// widget was mounted with.
    pub fn update_config(&self, config: &AnimationConfig) {
        if config.duration != self.controller.duration() {
            self.controller.set_duration(config.duration);
        }
    }

    /// Call `repaint` whenever the widget needs to be drawn again.
    ///
    /// The connection lasts as long as the returned guard.
    pub fn on_render_requested<F>(&self, repaint: F) -> ConnectionGuard<'_, RenderState>
    where
        F: Fn(&RenderState) + Send + Sync + 'static,
    {
        self.controller.render_requested().connect_scoped(repaint)
    }

    /// Compose the child for a frame, given the child's laid-out size.
    pub fn compose(&self, child_size: Size) -> Composed<'_, W> {
        let _span = PerfSpan::new("entrance_compose");
        match self.controller.render_state() {
            RenderState::Placeholder => Composed::Placeholder { size: Size::ZERO },
            RenderState::Visible(channels) => Composed::Child {
                child: &self.child,
                transform: transform_for(&channels, child_size),
                opacity: channels.opacity,
            },
        }
    }

    /// The size this widget occupies for a child of `child_size`.
    ///
    /// Transforms do not affect layout, so this is the child's own size until
    /// the child is erased.
    pub fn size_hint(&self, child_size: Size) -> Size {
        if self.controller.is_erased() {
            Size::ZERO
        } else {
            child_size
        }
    }

    /// Tear down the controller. The widget keeps its child but stops animating.
    pub fn unmount(&self) {
        tracing::debug!(target: targets::WIDGET, "unmounting animated entrance");
        self.controller.teardown();
    }
}

/// Placement for a child of `size`: scale around its center, then offset.
pub fn transform_for(channels: &Channels, size: Size) -> Transform2D {
    Transform2D::translate(channels.dx, channels.dy)
        .then(&Transform2D::scale_around(channels.scale, size.center()))
}
