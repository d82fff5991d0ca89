//! Field normalizer.
//!
//! Turns one raw feed line into typed fields:
//!
//! ```text
//! 1902年12月15日,初一,星期日,冬至
//! └── solar ───┘ └lunar┘ └weekday┘ └term┘
//! ```
//!
//! The lunar token is passed through untouched: what it means depends on
//! the tracker state built up by earlier rows.

use crate::error::FormatError;
use crate::tables::{day_number, month_number, simplify_solar_term, weekday_from_name};
use crate::SolarDate;
use chrono::Weekday;
use once_cell::sync::Lazy;
use regex::Regex;

static SOLAR_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,6})年(\d{1,2})月(\d{1,2})日$").expect("solar date pattern is valid"));

/// A data row with every field but the lunar token resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    pub solar: SolarDate,
    pub lunar_token: &'a str,
    pub weekday: Weekday,
    /// Simplified solar-term name, empty when absent.
    pub solar_term: &'a str,
}

/// Normalize one line.
///
/// Returns `Ok(None)` for lines that are not data rows: anything without 3
/// or 4 comma-separated fields, and header lines whose lunar token and
/// weekday are both outside the vocabulary. Every other line is a data row,
/// so a bad date or weekday in it is an error.
pub fn normalize_line(line: &str) -> Result<Option<Row<'_>>, FormatError> {
    let line = line.trim_start_matches('\u{feff}').trim();
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if !(3..=4).contains(&fields.len()) || is_header(fields[1], fields[2]) {
        return Ok(None);
    }

    let solar = parse_solar_date(fields[0])?;
    let weekday = parse_weekday(fields[2])?;
    let solar_term = fields.get(3).map_or("", |term| simplify_solar_term(term));

    Ok(Some(Row { solar, lunar_token: fields[1], weekday, solar_term }))
}

/// Parse `"<year>年<month>月<day>日"`.
pub fn parse_solar_date(raw: &str) -> Result<SolarDate, FormatError> {
    let malformed = || FormatError::SolarDate(raw.to_string());
    let caps = SOLAR_DATE.captures(raw).ok_or_else(malformed)?;

    let year = caps[1].parse().map_err(|_| malformed())?;
    let month = caps[2].parse().map_err(|_| malformed())?;
    let day = caps[3].parse().map_err(|_| malformed())?;
    Ok(SolarDate { year, month, day })
}

fn is_header(lunar_token: &str, weekday: &str) -> bool {
    let known_token = day_number(lunar_token).is_some() || month_number(lunar_token).is_some();
    !known_token && weekday_from_name(weekday).is_none()
}

pub fn parse_weekday(raw: &str) -> Result<Weekday, FormatError> {
    weekday_from_name(raw).ok_or_else(|| FormatError::Weekday(raw.to_string()))
}
