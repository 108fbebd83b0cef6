//! Entrance animation configuration.
//!
//! [`AnimationConfig`] is supplied once when a controller is constructed. Only
//! the duration may change afterwards (see
//! [`EntranceController::set_duration`](super::EntranceController::set_duration)).
//!
//! Configurations can be written in TOML. Durations are integer milliseconds
//! and every field is optional:
//!
//! ```toml
//! start_offset = { dx = 0.0, dy = 48.0 }
//! start_opacity = 0.0
//! start_scale = 0.85
//! duration_ms = 250
//! delay_ms = 100
//! initial_direction = "exit"
//! dismount_after_exit = true
//! ```

use std::path::Path;
use std::time::Duration;

use lattice_entrance_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default starting offset: 32 logical pixels below the resting position.
pub const DEFAULT_START_OFFSET: Offset = Offset::new(0.0, 32.0);
/// Default starting opacity.
pub const DEFAULT_START_OPACITY: f32 = 0.0;
/// Default starting scale.
pub const DEFAULT_START_SCALE: f32 = 0.9;
/// Default time to traverse the full progress range.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(333);

/// A 2D displacement in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f32,
    pub dy: f32,
}

impl Offset {
    /// No displacement.
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    /// Create a new offset.
    #[inline]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

impl From<(f32, f32)> for Offset {
    fn from((dx, dy): (f32, f32)) -> Self {
        Self { dx, dy }
    }
}

/// Which way the automatic play runs after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Start hidden (progress 0.0) and play forward.
    #[default]
    Enter,
    /// Start visible (progress 1.0) and play backward.
    Exit,
}

impl Direction {
    /// The progress value a controller starts at for this direction.
    #[inline]
    pub fn initial_progress(self) -> f32 {
        match self {
            Direction::Enter => 0.0,
            Direction::Exit => 1.0,
        }
    }
}

/// Parameters of an entrance (and optional exit) animation.
///
/// Start values animate toward the resting state: offset (0, 0), opacity 1.0
/// and scale 1.0. Start values are used as given; an opacity above 1.0, for
/// example, simply produces out-of-range intermediate values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Opacity at progress 0.0.
    pub start_opacity: f32,
    /// Scale at progress 0.0.
    pub start_scale: f32,
    /// Time to traverse progress 0.0 to 1.0 (or back).
    #[serde(rename = "duration_ms", with = "millis")]
    pub duration: Duration,
    /// Wait before the automatic play begins.
    #[serde(rename = "delay_ms", with = "millis")]
    pub delay: Duration,
    /// Render the resting state immediately and never run.
    pub skip_animation: bool,
    /// Direction of the automatic play.
    pub initial_direction: Direction,
    /// Erase the child once an automatic exit finishes.
    pub dismount_after_exit: bool,
    /// Displacement at progress 0.0.
    ///
    /// Kept last so TOML output places the table after the plain values.
    pub start_offset: Offset,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            start_offset: DEFAULT_START_OFFSET,
            start_opacity: DEFAULT_START_OPACITY,
            start_scale: DEFAULT_START_SCALE,
            duration: DEFAULT_DURATION,
            delay: Duration::ZERO,
            skip_animation: false,
            initial_direction: Direction::Enter,
            dismount_after_exit: false,
        }
    }
}

impl AnimationConfig {
    /// Create a configuration with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting displacement.
    pub fn with_start_offset(mut self, offset: impl Into<Offset>) -> Self {
        self.start_offset = offset.into();
        self
    }

    /// Set the starting opacity.
    pub fn with_start_opacity(mut self, opacity: f32) -> Self {
        self.start_opacity = opacity;
        self
    }

    /// Set the starting scale.
    pub fn with_start_scale(mut self, scale: f32) -> Self {
        self.start_scale = scale;
        self
    }

    /// Set the duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the delay before the automatic play.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Enable or disable the skip path.
    pub fn with_skip_animation(mut self, skip: bool) -> Self {
        self.skip_animation = skip;
        self
    }

    /// Set the direction of the automatic play.
    pub fn with_initial_direction(mut self, direction: Direction) -> Self {
        self.initial_direction = direction;
        self
    }

    /// Erase the child after the automatic exit completes.
    pub fn with_dismount_after_exit(mut self, dismount: bool) -> Self {
        self.dismount_after_exit = dismount;
        self
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        tracing::debug!(target: targets::CONFIG, ?config, "parsed animation config");
        Ok(config)
    }

    /// Read a configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Serialize the configuration to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Write the configuration to a TOML file.
    pub fn write_toml_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        std::fs::write(path, text).map_err(|e| ConfigError::io(path, e))
    }

    fn validate(&self) -> Result<()> {
        if self.duration.is_zero() {
            return Err(ConfigError::invalid_value(
                "duration_ms",
                "duration must be positive",
            ));
        }
        Ok(())
    }
}

/// Serde adapter storing a [`Duration`] as whole milliseconds.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
