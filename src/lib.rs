//! Lunisolar calendar index built from a per-year text feed.
//!
//! The feed has one row per solar day (`1902年12月15日,初一,星期日[,冬至]`).
//! Only the first day of each lunar month names its month, so the lunar
//! year/month/leap of every other row has to be carried forward while
//! walking the rows in order. The result is an immutable [`Calendar`] with
//! lookup tables in both directions.
//!
//! ```no_run
//! use nongli::{CalendarConfig, SolarDate, load};
//!
//! let calendar = load(&CalendarConfig::default().with_data_dir("data/rawdata"))?;
//! let day = calendar.find_solar(SolarDate::new(2020, 1, 25)).unwrap();
//! assert_eq!((day.lunar.year, day.lunar.month, day.lunar.day), (2020, 1, 1));
//! # Ok::<(), nongli::CalendarError>(())
//! ```

mod api;
mod calendar;
mod config;
mod engine;
mod error;
pub mod tables;

#[cfg(test)]
mod fixture;

use chrono::{Datelike, NaiveDate, Weekday};

pub use api::{
    DayInfo, LunarInfo, MonthInfo, SolarInfo, YearInfo, list_days, list_months, list_years, load, load_feed,
    load_with_metrics, lunar_to_solar, solar_to_lunar,
};
pub use calendar::Calendar;
pub use config::{CalendarConfig, DATA_DIR_ENV, YearSpan};
pub use engine::{
    BuildMetrics, BuildResult, Builder, LunarState, LunarToken, RawFeed, SEED_MONTH, SourceLine, read_span, resolve_tokens,
    year_file,
};
pub use error::{CalendarError, FormatError};

// --- Core types --------------------------------------------------------------

/// A Gregorian date exactly as the feed spells it.
///
/// No range validation is done; use [`SolarDate::to_naive`] for a checked
/// `chrono` date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SolarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl SolarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for SolarDate {
    fn from(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month(), day: date.day() }
    }
}

impl std::fmt::Display for SolarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// An absolute lunar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LunarDate {
    pub year: i32,
    /// 1..=12
    pub month: u8,
    /// Set for days of an intercalary (leap) month.
    pub leap: bool,
    /// 1..=30
    pub day: u8,
}

impl LunarDate {
    pub fn new(year: i32, month: u8, leap: bool, day: u8) -> Self {
        Self { year, month, leap, day }
    }

    pub fn month_key(self) -> MonthKey {
        MonthKey { year: self.year, month: self.month, leap: self.leap }
    }

    pub fn marker(self) -> MonthMarker {
        MonthMarker { month: self.month, leap: self.leap }
    }
}

impl std::fmt::Display for LunarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let leap = if self.leap { "L" } else { "" };
        write!(f, "{}-{:02}{leap}-{:02}", self.year, self.month, self.day)
    }
}

/// One lunar month instance: `(year, month, leap)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u8,
    pub leap: bool,
}

/// A month within a lunar year, in the order the months occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthMarker {
    pub month: u8,
    pub leap: bool,
}

/// Cyclic names of a lunar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSummary {
    pub year: i32,
    pub stem: &'static str,
    pub branch: &'static str,
    pub zodiac: &'static str,
}

impl YearSummary {
    pub fn for_year(year: i32) -> Self {
        Self { year, stem: tables::stem(year), branch: tables::branch(year), zodiac: tables::zodiac(year) }
    }
}

/// A single calendar day: one feed row, fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Day {
    pub solar: SolarDate,
    pub lunar: LunarDate,
    pub weekday: Weekday,
    /// Simplified solar-term name, empty when the day has none.
    pub solar_term: String,
}

impl Day {
    /// Monday = 1 … Sunday = 7.
    pub fn weekday_ordinal(&self) -> u8 {
        self.weekday.number_from_monday() as u8
    }

    pub fn solar_term(&self) -> Option<&str> {
        (!self.solar_term.is_empty()).then_some(self.solar_term.as_str())
    }
}
