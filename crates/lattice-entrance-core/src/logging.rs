//! Logging and profiling facilities for Lattice Entrance.
//!
//! All crates in the workspace log through the `tracing` crate. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("lattice_entrance=debug")
//!         .init();
//! }
//! ```
//!
//! Use the constants in [`targets`] to filter by subsystem.

/// Target names for log filtering.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "lattice_entrance_core";
    /// Frame clock target.
    pub const CLOCK: &str = "lattice_entrance_core::clock";
    /// Timer queue target.
    pub const TIMER: &str = "lattice_entrance_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "lattice_entrance_core::signal";
    /// Entrance controller target.
    pub const CONTROLLER: &str = "lattice_entrance::controller";
    /// Widget adapter target.
    pub const WIDGET: &str = "lattice_entrance::widget";
    /// Configuration loading target.
    pub const CONFIG: &str = "lattice_entrance::config";
}

/// A guard for performance tracing spans.
///
/// Creates a span on construction that is exited when dropped.
///
/// # Example
///
/// ```
/// use lattice_entrance_core::PerfSpan;
///
/// fn compose_frame() {
///     let _span = PerfSpan::new("compose_frame");
///     // ... work ...
/// } // span exits here
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "lattice_entrance::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_are_scoped() {
        for target in [targets::CLOCK, targets::TIMER, targets::SIGNAL] {
            assert!(target.starts_with(targets::CORE));
        }
        assert!(targets::CONTROLLER.starts_with("lattice_entrance::"));
    }

    #[test]
    fn test_perf_span_with_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let _span = PerfSpan::new("test_operation");
            tracing::trace!(target: targets::CLOCK, step = 1, "inside span");
        });
    }
}
