//! Build metrics.
//!
//! Counts and timings for one build, returned by
//! [`Builder::run_with_metrics`](super::Builder::run_with_metrics) and
//! [`load_with_metrics`](crate::load_with_metrics). Collection is cheap
//! (a handful of counters and `Instant`s), so the plain `run` path simply
//! discards them.

use crate::Calendar;
use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildMetrics {
    /// Number of per-year files in the feed.
    pub files: usize,
    /// Raw lines across all files.
    pub lines: usize,
    /// Lines that became days.
    pub rows: usize,
    /// Lines skipped as non-data (blank, header, wrong arity).
    pub skipped: usize,
    /// Time spent reading files (zero for in-memory feeds).
    pub read: Duration,
    /// Time spent normalizing and resolving rows.
    pub resolve: Duration,
    /// Time spent building the lookup tables.
    pub index: Duration,
    /// Total elapsed time, including `read`.
    pub total: Duration,
}

/// A built calendar bundled with its metrics.
#[derive(Debug)]
pub struct BuildResult {
    pub calendar: Calendar,
    pub metrics: BuildMetrics,
}
