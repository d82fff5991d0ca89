//! Lunar state tracker.
//!
//! The feed names a lunar month only on its first day; every other row
//! carries a bare day name. The tracker holds the current lunar
//! year/month/leap and updates it on month-boundary tokens:
//!
//! ```text
//! token      kind          state after           resolved
//! 廿九       Day(29)       1999-12               1999-12-29
//! 正月       Month(1)      2000-01  (year + 1)   2000-01-01
//! 初二       Day(2)        2000-01               2000-01-02
//! 閏四月     Month(4, L)   2000-04L              2000-04L-01
//! 五月       Month(5)      2000-05  (leap off)   2000-05-01
//! ```
//!
//! The year rolls over only on a plain `正月`; a leap first month stays in
//! the year its ordinary `正月` opened.

use crate::config::YearSpan;
use crate::error::FormatError;
use crate::tables::{day_number, month_number};
use crate::LunarDate;
use tracing::{trace, warn};

/// Month the feed opens in: files start on 1 January, which always falls in
/// the eleventh or twelfth lunar month of the previous year.
pub const SEED_MONTH: u8 = 11;

/// A classified lunar-day token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LunarToken {
    /// An ordinary day name, `初一` … `三十`.
    Day(u8),
    /// A month name: the first day of that month.
    MonthStart { month: u8, leap: bool },
}

impl LunarToken {
    pub fn classify(token: &str) -> Result<Self, FormatError> {
        if let Some(day) = day_number(token) {
            return Ok(Self::Day(day));
        }
        month_number(token)
            .map(|(month, leap)| Self::MonthStart { month, leap })
            .ok_or_else(|| FormatError::LunarToken(token.to_string()))
    }
}

/// Carried lunar position while walking the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarState {
    pub year: i32,
    pub month: u8,
    pub leap: bool,
}

impl LunarState {
    pub fn new(year: i32, month: u8, leap: bool) -> Self {
        Self { year, month, leap }
    }

    /// Starting state for a feed covering `span`.
    pub fn seeded(span: YearSpan) -> Self {
        Self::new(span.seed_year(), SEED_MONTH, false)
    }

    /// Resolve the next token in feed order.
    pub fn resolve(&mut self, token: &str) -> Result<LunarDate, FormatError> {
        let day = match LunarToken::classify(token)? {
            LunarToken::Day(day) => day,
            LunarToken::MonthStart { month, leap } => {
                self.enter_month(month, leap);
                1
            }
        };
        Ok(LunarDate { year: self.year, month: self.month, leap: self.leap, day })
    }

    fn enter_month(&mut self, month: u8, leap: bool) {
        if leap && self.leap {
            // Two leap months back to back never happens in a sound feed; keep going.
            warn!(year = self.year, from = self.month, to = month, "leap month follows a leap month");
        }
        if month == 1 && !leap {
            self.year += 1;
        }
        self.month = month;
        self.leap = leap;
        trace!(year = self.year, month, leap, "entered lunar month");
    }
}

/// Resolve a whole token sequence from `state`, returning the dates and the
/// final state.
pub fn resolve_tokens<'t>(
    mut state: LunarState,
    tokens: impl IntoIterator<Item = &'t str>,
) -> Result<(Vec<LunarDate>, LunarState), FormatError> {
    let dates = tokens.into_iter().map(|token| state.resolve(token)).collect::<Result<Vec<_>, _>>()?;
    Ok((dates, state))
}
