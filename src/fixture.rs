//! Synthetic feed for tests.
//!
//! Produces a few lunar years of rows with real Gregorian dates and
//! weekdays (via `chrono`), alternating 30/29-day months and one leap month
//! (閏四月 of 2001). Lunar month lengths are made up; only the shape of the
//! feed matters here.

use crate::tables::{DAY_NAMES, FEED_LEAP_MARKER, MONTH_NAMES, WEEKDAY_NAMES};
use crate::{Calendar, CalendarConfig, LunarDate, RawFeed, YearSpan, load_feed};
use chrono::{Datelike, Duration, NaiveDate};
use std::path::Path;

/// One lunar month of the fixture: `(year, month, leap, length)`.
pub type FixtureMonth = (i32, u8, bool, u8);

/// Solar years covered by the fixture files.
pub fn span() -> YearSpan {
    YearSpan { start: 2000, end: 2004 }
}

pub fn months() -> Vec<FixtureMonth> {
    let mut months = vec![(1999, 11, false, 30), (1999, 12, false, 29)];
    for year in 2000..=2002 {
        for month in 1..=12u8 {
            months.push((year, month, false, if month % 2 == 1 { 30 } else { 29 }));
            if year == 2001 && month == 4 {
                months.push((year, 4, true, 29));
            }
        }
    }
    months.push((2003, 1, false, 30));
    months
}

fn month_token(month: u8, leap: bool) -> String {
    let name = MONTH_NAMES[usize::from(month) - 1];
    if leap { format!("{FEED_LEAP_MARKER}{name}") } else { name.to_string() }
}

fn solar_term(date: NaiveDate) -> &'static str {
    match (date.month(), date.day()) {
        (3, 6) => "驚蟄",
        (4, 20) => "穀雨",
        (12, 22) => "冬至",
        _ => "",
    }
}

/// Every fixture row as `(solar date, expected lunar date, feed line)`.
pub fn rows() -> Vec<(NaiveDate, LunarDate, String)> {
    let mut date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let mut rows = Vec::new();

    for (year, month, leap, len) in months() {
        for day in 1..=len {
            let token = if day == 1 { month_token(month, leap) } else { DAY_NAMES[usize::from(day) - 1].to_string() };
            let weekday = WEEKDAY_NAMES[date.weekday().num_days_from_monday() as usize];
            let mut line = format!("{}年{}月{}日,{token},{weekday}", date.year(), date.month(), date.day());
            let term = solar_term(date);
            if !term.is_empty() {
                line.push(',');
                line.push_str(term);
            }
            rows.push((date, LunarDate::new(year, month, leap, day), line));
            date += Duration::days(1);
        }
    }
    rows
}

/// File contents per solar year, each with a header line and a trailing
/// blank line the way the upstream files look.
pub fn files() -> Vec<(i32, String)> {
    span()
        .years()
        .map(|year| {
            let mut contents = String::from("公曆日期,農曆日期,星期,節氣\n");
            for (_, _, line) in rows().into_iter().filter(|(date, _, _)| date.year() == year) {
                contents.push_str(&line);
                contents.push('\n');
            }
            contents.push('\n');
            (year, contents)
        })
        .collect()
}

pub fn feed() -> RawFeed {
    let mut feed = RawFeed::new();
    for (year, contents) in files() {
        feed.push_file(format!("{year}.txt"), &contents);
    }
    feed
}

pub fn write_files(dir: &Path) {
    for (year, contents) in files() {
        std::fs::write(dir.join(format!("{year}.txt")), contents).unwrap();
    }
}

pub fn calendar() -> Calendar {
    load_feed(&feed(), span()).unwrap()
}

pub fn config(dir: &Path) -> CalendarConfig {
    CalendarConfig::default().with_data_dir(dir).with_span(span())
}
