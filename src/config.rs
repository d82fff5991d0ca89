//! Build configuration: where the feed lives and which years it covers.

use std::path::PathBuf;

use crate::error::CalendarError;

/// Environment variable consulted by [`CalendarConfig::from_env`].
pub const DATA_DIR_ENV: &str = "NONGLI_DATA_DIR";

/// Half-open range of solar years `[start, end)`, one feed file per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearSpan {
    pub start: i32,
    pub end: i32,
}

impl YearSpan {
    pub const DEFAULT_START: i32 = 1901;
    pub const DEFAULT_END: i32 = 2101;

    pub fn new(start: i32, end: i32) -> Result<Self, CalendarError> {
        if start >= end {
            return Err(CalendarError::InvalidSpan { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn years(self) -> std::ops::Range<i32> {
        self.start..self.end
    }

    pub fn contains(self, year: i32) -> bool {
        self.years().contains(&year)
    }

    /// Lunar year the feed opens in.
    ///
    /// The first rows of `start.txt` are the tail of the previous lunar
    /// year (its eleventh month), so tracking starts one year early.
    pub fn seed_year(self) -> i32 {
        self.start - 1
    }
}

impl Default for YearSpan {
    fn default() -> Self {
        Self { start: Self::DEFAULT_START, end: Self::DEFAULT_END }
    }
}

/// Everything needed to locate and load the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarConfig {
    /// Directory holding `<year>.txt` files.
    pub data_dir: PathBuf,
    pub span: YearSpan,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("data/rawdata"), span: YearSpan::default() }
    }
}

impl CalendarConfig {
    /// Default configuration with the data directory taken from
    /// `NONGLI_DATA_DIR` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_span(mut self, span: YearSpan) -> Self {
        self.span = span;
        self
    }
}
