//! Channel interpolation.
//!
//! A single normalized progress value drives four independent channels:
//! horizontal offset, vertical offset, opacity and scale. Each channel is a
//! plain linear interpolation from its configured start value to its resting
//! value.

use super::config::AnimationConfig;

/// Linearly interpolate between `start` and `end`.
///
/// `t` is not clamped; callers keep progress in range.
///
/// # Example
///
/// ```
/// use lattice_entrance::animation::lerp;
///
/// assert_eq!(lerp(100.0, 200.0, 0.0), 100.0);
/// assert_eq!(lerp(100.0, 200.0, 0.5), 150.0);
/// assert_eq!(lerp(100.0, 200.0, 1.0), 200.0);
/// ```
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// Interpolated channel values for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channels {
    /// Horizontal displacement.
    pub dx: f32,
    /// Vertical displacement.
    pub dy: f32,
    /// Opacity multiplier.
    pub opacity: f32,
    /// Uniform scale.
    pub scale: f32,
}

impl Channels {
    /// The resting state every channel animates toward.
    pub const SETTLED: Self = Self {
        dx: 0.0,
        dy: 0.0,
        opacity: 1.0,
        scale: 1.0,
    };

    /// Channel values at `progress` for `config`.
    pub fn at(config: &AnimationConfig, progress: f32) -> Self {
        Self {
            dx: lerp(config.start_offset.dx, Self::SETTLED.dx, progress),
            dy: lerp(config.start_offset.dy, Self::SETTLED.dy, progress),
            opacity: lerp(config.start_opacity, Self::SETTLED.opacity, progress),
            scale: lerp(config.start_scale, Self::SETTLED.scale, progress),
        }
    }

    /// Whether these values equal the resting state.
    pub fn is_settled(&self) -> bool {
        *self == Self::SETTLED
    }
}

/// What the embedder should draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderState {
    /// The child was erased after an exit; draw a zero-size placeholder.
    Placeholder,
    /// Draw the child with these channel values.
    Visible(Channels),
}

impl RenderState {
    /// Whether the child has been erased.
    pub fn is_erased(&self) -> bool {
        matches!(self, RenderState::Placeholder)
    }

    /// The channel values, if the child is visible.
    pub fn channels(&self) -> Option<Channels> {
        match self {
            RenderState::Placeholder => None,
            RenderState::Visible(channels) => Some(*channels),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::config::Offset;

    #[test]
    fn test_start_values_at_zero() {
        let config = AnimationConfig::default();
        let channels = Channels::at(&config, 0.0);
        assert_eq!(
            channels,
            Channels {
                dx: 0.0,
                dy: 32.0,
                opacity: 0.0,
                scale: 0.9,
            }
        );
    }

    #[test]
    fn test_end_values_at_one() {
        let config = AnimationConfig::default()
            .with_start_offset(Offset::new(-12.0, 40.0))
            .with_start_opacity(0.25)
            .with_start_scale(1.4);
        assert!(Channels::at(&config, 1.0).is_settled());
    }

    #[test]
    fn test_channels_interpolate_independently() {
        let config = AnimationConfig::default()
            .with_start_offset(Offset::new(20.0, -40.0))
            .with_start_opacity(0.5)
            .with_start_scale(0.5);

        for step in 0..=10 {
            let t = step as f32 / 10.0;
            let channels = Channels::at(&config, t);
            assert_eq!(channels.dx, 20.0 + (0.0 - 20.0) * t);
            assert_eq!(channels.dy, -40.0 + (0.0 + 40.0) * t);
            assert_eq!(channels.opacity, 0.5 + 0.5 * t);
            assert_eq!(channels.scale, 0.5 + 0.5 * t);
        }
    }

    #[test]
    fn test_out_of_range_start_is_not_clamped() {
        let config = AnimationConfig::default().with_start_opacity(2.0);
        assert_eq!(Channels::at(&config, 0.0).opacity, 2.0);
        assert_eq!(Channels::at(&config, 0.5).opacity, 1.5);
    }

    #[test]
    fn test_render_state_accessors() {
        assert!(RenderState::Placeholder.is_erased());
        assert_eq!(RenderState::Placeholder.channels(), None);

        let visible = RenderState::Visible(Channels::SETTLED);
        assert!(!visible.is_erased());
        assert_eq!(visible.channels(), Some(Channels::SETTLED));
    }
}
