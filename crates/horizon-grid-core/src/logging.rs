//! Logging facilities for Horizon Grid.
//!
//! Horizon Grid uses the `tracing` crate for instrumentation and never
//! installs a subscriber itself. To see logs, install one in your
//! application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_grid=debug")
//!     .init();
//! ```

/// Span names used throughout Horizon Grid for tracing.
pub mod span_names {
    /// Filter pass plus selection reconciliation.
    pub const APPLY_FILTERS: &str = "horizon_grid::apply_filters";
    /// Column rebuild.
    pub const CREATE_COLUMNS: &str = "horizon_grid::create_columns";
    /// Deferred task processing.
    pub const DEFERRED: &str = "horizon_grid::deferred";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_grid_core::signal";
    /// Deferred task queue target.
    pub const TASK: &str = "horizon_grid_core::task";
    /// Host-facing behavior target.
    pub const BEHAVIOR: &str = "horizon_grid::behavior";
    /// Column derivation target.
    pub const COLUMNS: &str = "horizon_grid::columns";
    /// Filter engine target.
    pub const FILTER: &str = "horizon_grid::filter";
    /// Selection store and reconciliation target.
    pub const SELECTION: &str = "horizon_grid::selection";
    /// Group and visibility projection target.
    pub const GROUPS: &str = "horizon_grid::groups";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing a whole operation with a subscriber that records span
/// durations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_grid::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new(span_names::APPLY_FILTERS);
        tracing::debug!(target: targets::BEHAVIOR, "inside perf span");
    }

    #[test]
    fn test_targets_share_crate_prefix() {
        for target in [targets::BEHAVIOR, targets::FILTER, targets::SELECTION] {
            assert!(target.starts_with("horizon_grid::"));
        }
        for target in [targets::SIGNAL, targets::TASK] {
            assert!(target.starts_with("horizon_grid_core::"));
        }
    }
}
