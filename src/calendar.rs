//! The finished, read-only calendar.
//!
//! A [`Calendar`] is built once (see [`load`](crate::load)) and never
//! mutated afterwards. Hold it by value or behind an `Arc` and hand out
//! references; every accessor is a plain map or slice read, so concurrent
//! readers need no locking.

use crate::config::YearSpan;
use crate::{Day, LunarDate, MonthKey, MonthMarker, SolarDate, YearSummary};
use std::collections::{BTreeMap, HashMap};

/// Lookup tables over the day sequence, filled by the indexer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Indices {
    pub years: BTreeMap<i32, YearSummary>,
    pub months: BTreeMap<i32, Vec<MonthMarker>>,
    pub month_days: HashMap<MonthKey, Vec<usize>>,
    pub by_solar: HashMap<SolarDate, usize>,
    pub by_lunar: HashMap<LunarDate, usize>,
}

impl Indices {
    pub fn with_capacity(days: usize) -> Self {
        Self { by_solar: HashMap::with_capacity(days), by_lunar: HashMap::with_capacity(days), ..Self::default() }
    }
}

/// Bidirectional solar/lunar calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    days: Vec<Day>,
    indices: Indices,
    span: YearSpan,
}

impl Calendar {
    pub(crate) fn from_parts(days: Vec<Day>, indices: Indices, span: YearSpan) -> Self {
        Self { days, indices, span }
    }

    /// Every day in feed (chronological) order.
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Solar years whose files this calendar was built from.
    pub fn span(&self) -> YearSpan {
        self.span
    }

    /// First and last solar dates covered.
    pub fn solar_range(&self) -> Option<(SolarDate, SolarDate)> {
        Some((self.days.first()?.solar, self.days.last()?.solar))
    }

    pub fn year(&self, year: i32) -> Option<&YearSummary> {
        self.indices.years.get(&year)
    }

    /// Summaries of every lunar year seen, in ascending order.
    ///
    /// This includes the partial years at either end of the feed.
    pub fn years(&self) -> impl Iterator<Item = &YearSummary> {
        self.indices.years.values()
    }

    /// Months of a lunar year in the order they occur.
    pub fn months(&self, year: i32) -> Option<&[MonthMarker]> {
        self.indices.months.get(&year).map(Vec::as_slice)
    }

    /// Days of one lunar month, in order.
    pub fn month_days(&self, year: i32, month: u8, leap: bool) -> Option<impl ExactSizeIterator<Item = &Day>> {
        self.month_days_by_key(MonthKey { year, month, leap })
    }

    pub fn month_days_by_key(&self, key: MonthKey) -> Option<impl ExactSizeIterator<Item = &Day>> {
        let positions = self.indices.month_days.get(&key)?;
        let days = &self.days;
        Some(positions.iter().map(move |&pos| &days[pos]))
    }

    pub fn find_solar(&self, date: SolarDate) -> Option<&Day> {
        self.indices.by_solar.get(&date).map(|&pos| &self.days[pos])
    }

    pub fn solar(&self, year: i32, month: u32, day: u32) -> Option<&Day> {
        self.find_solar(SolarDate { year, month, day })
    }

    pub fn find_lunar(&self, date: LunarDate) -> Option<&Day> {
        self.indices.by_lunar.get(&date).map(|&pos| &self.days[pos])
    }

    pub fn lunar(&self, year: i32, month: u8, leap: bool, day: u8) -> Option<&Day> {
        self.find_lunar(LunarDate { year, month, leap, day })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;

    #[test]
    fn calendar_is_shareable() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<Calendar>();
    }

    #[test]
    fn lookups_on_fixture() {
        let calendar = fixture::calendar();

        let first = &calendar.days()[0];
        assert_eq!(calendar.find_solar(first.solar), Some(first));
        assert_eq!(calendar.find_lunar(first.lunar), Some(first));

        let new_year = calendar.lunar(2001, 1, false, 1).unwrap();
        assert_eq!(calendar.find_solar(new_year.solar), Some(new_year));
        assert_eq!(calendar.solar(new_year.solar.year, new_year.solar.month, new_year.solar.day), Some(new_year));
    }

    #[test]
    fn absent_keys_are_none() {
        let calendar = fixture::calendar();

        assert!(calendar.solar(1800, 1, 1).is_none());
        assert!(calendar.solar(2001, 2, 30).is_none());
        assert!(calendar.lunar(2000, 4, true, 1).is_none());
        assert!(calendar.lunar(2001, 4, true, 30).is_none());
        assert!(calendar.year(1800).is_none());
        assert!(calendar.months(1800).is_none());
        assert!(calendar.month_days(2002, 4, true).is_none());
    }

    #[test]
    fn solar_range_spans_the_feed() {
        let calendar = fixture::calendar();
        let (first, last) = calendar.solar_range().unwrap();
        assert_eq!(first, SolarDate::new(2000, 1, 1));
        assert_eq!(Some(last), calendar.days().last().map(|d| d.solar));
        assert_eq!(calendar.span(), fixture::span());
    }

    #[test]
    fn empty_calendar() {
        let calendar = crate::engine::Builder::new(&crate::RawFeed::new(), fixture::span()).run().unwrap();
        assert!(calendar.is_empty());
        assert_eq!(calendar.solar_range(), None);
        assert_eq!(calendar.years().count(), 0);
    }
}
