//! Error types for calendar construction.
//!
//! Lookups never fail: a key that is absent from the calendar is simply
//! outside the covered span. Everything here is raised while *building*
//! the calendar and is fatal for the build.

use std::path::PathBuf;

/// A row field that does not belong to its fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("malformed solar date `{0}` (expected <year>年<month>月<day>日)")]
    SolarDate(String),

    #[error("unknown weekday name `{0}`")]
    Weekday(String),

    #[error("unknown lunar day token `{0}`")]
    LunarToken(String),
}

/// Error type for [`load`](crate::load) and the other build entry points.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// A per-year file of the span is missing or unreadable.
    #[error("cannot read calendar data {}: {source}", path.display())]
    DataSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data row failed to normalize or resolve.
    #[error("{}:{line}: {source}", path.display())]
    Format {
        path: PathBuf,
        /// 1-based line number within `path`.
        line: usize,
        #[source]
        source: FormatError,
    },

    /// The configured span contains no years.
    #[error("invalid year span {start}..{end} (start must be before end)")]
    InvalidSpan { start: i32, end: i32 },
}
