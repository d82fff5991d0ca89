//! Feed-to-calendar build engine.
//!
//! Building a calendar is a strictly sequential pipeline:
//!
//! ```text
//! <dir>/<year>.txt ── read_span ──> RawFeed           (reader.rs)
//!                                     │
//!                          for each line, in order
//!                                     │
//!                        normalize_line ──> Row        (normalize.rs)
//!                         - skip non-data lines
//!                         - solar date, weekday, term
//!                                     │
//!                   LunarState::resolve ──> LunarDate  (tracker.rs)
//!                         - carries year/month/leap
//!                                     │
//!                                  Vec<Day>
//!                                     │
//!                               index ──> Calendar      (indexer.rs)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `reader.rs`: loads the per-year files of a span into a `RawFeed`,
//!   remembering the file and line number of every line.
//! - `normalize.rs`: splits a line into typed fields and decides whether it
//!   is a data row at all.
//! - `tracker.rs`: the lunar state machine. Only month-boundary rows name
//!   their month, so the current year/month/leap must be carried across
//!   rows (and across files).
//! - `indexer.rs`: derives every lookup table from the ordered day sequence.
//! - `metrics.rs`: optional counts and timings for a build.
//!
//! Order matters: the tracker state after row *n* depends on every row
//! before it, so nothing here may be reordered or parallelized.

#[path = "engine/indexer.rs"]
mod indexer;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/normalize.rs"]
mod normalize;
#[path = "engine/reader.rs"]
mod reader;
#[path = "engine/tracker.rs"]
mod tracker;


pub use metrics::{BuildMetrics, BuildResult};
pub use reader::{RawFeed, SourceLine, read_span, year_file};

pub use tracker::{LunarState, LunarToken, SEED_MONTH, resolve_tokens};

use normalize::normalize_line;

use crate::config::YearSpan;
use crate::error::CalendarError;
use crate::{Calendar, Day};
use std::time::Instant;
use tracing::{debug, info};

/// Runs the normalize → resolve → index stages over a loaded feed.
///
/// Usage: `Builder::new(&feed, span).run()`.
#[derive(Debug)]
pub struct Builder<'a> {
    feed: &'a RawFeed,
    span: YearSpan,
    state: LunarState,
}

impl<'a> Builder<'a> {
    pub fn new(feed: &'a RawFeed, span: YearSpan) -> Self {
        Self { feed, span, state: LunarState::seeded(span) }
    }

    /// Start from an explicit tracker state instead of the span's seed.
    pub fn with_state(mut self, state: LunarState) -> Self {
        self.state = state;
        self
    }

    pub fn run(self) -> Result<Calendar, CalendarError> {
        self.run_with_metrics().map(|result| result.calendar)
    }

    pub fn run_with_metrics(self) -> Result<BuildResult, CalendarError> {
        let started = Instant::now();
        let mut metrics = BuildMetrics { files: self.feed.files().len(), lines: self.feed.len(), ..Default::default() };

        let span = self.span;
        let days = self.resolve_days(&mut metrics)?;
        metrics.resolve = started.elapsed();

        let index_started = Instant::now();
        let calendar = indexer::index(days, span);
        metrics.index = index_started.elapsed();
        metrics.total = started.elapsed();

        info!(
            days = calendar.len(),
            years = calendar.years().count(),
            elapsed = ?metrics.total,
            "calendar built"
        );
        Ok(BuildResult { calendar, metrics })
    }

    fn resolve_days(mut self, metrics: &mut BuildMetrics) -> Result<Vec<Day>, CalendarError> {
        let mut days = Vec::with_capacity(self.feed.len());

        for line in self.feed.lines() {
            let located = |source| CalendarError::Format {
                path: self.feed.path_of(line).to_path_buf(),
                line: line.number,
                source,
            };

            let Some(row) = normalize_line(&line.text).map_err(located)? else {
                metrics.skipped += 1;
                continue;
            };
            let lunar = self.state.resolve(row.lunar_token).map_err(located)?;

            days.push(Day {
                solar: row.solar,
                lunar,
                weekday: row.weekday,
                solar_term: row.solar_term.to_string(),
            });
        }

        metrics.rows = days.len();
        debug!(rows = metrics.rows, skipped = metrics.skipped, "feed resolved");
        Ok(days)
    }
}
