use crate::engine::{self, BuildResult, Builder, RawFeed};
use crate::tables::{day_name, month_name, weekday_name};
use crate::{Calendar, CalendarConfig, CalendarError, Day, LunarDate, SolarDate, YearSpan};
use serde::Serialize;
use std::time::Instant;
use tracing::info;

/// Read the feed described by `config` and build the calendar.
///
/// This is an all-or-nothing startup step: any missing file or malformed
/// row fails the whole build.
///
/// # Example
/// ```no_run
/// use nongli::{CalendarConfig, load};
///
/// let calendar = load(&CalendarConfig::from_env())?;
/// println!("{} days", calendar.len());
/// # Ok::<(), nongli::CalendarError>(())
/// ```
pub fn load(config: &CalendarConfig) -> Result<Calendar, CalendarError> {
    load_with_metrics(config).map(|result| result.calendar)
}

/// Like [`load`], but also returns counts and timings for the build.
pub fn load_with_metrics(config: &CalendarConfig) -> Result<BuildResult, CalendarError> {
    let started = Instant::now();
    let feed = engine::read_span(&config.data_dir, config.span)?;
    let read = started.elapsed();
    info!(dir = %config.data_dir.display(), files = feed.files().len(), lines = feed.len(), "feed loaded");

    let mut result = Builder::new(&feed, config.span).run_with_metrics()?;
    result.metrics.read = read;
    result.metrics.total = started.elapsed();
    Ok(result)
}

/// Build a calendar from an already loaded (or in-memory) feed.
pub fn load_feed(feed: &RawFeed, span: YearSpan) -> Result<Calendar, CalendarError> {
    Builder::new(feed, span).run()
}

// --- Views -------------------------------------------------------------------
//
// Flat, serializable shapes for callers that render or ship results.

/// Cyclic names of one lunar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearInfo {
    pub num: i32,
    pub stem: &'static str,
    pub branch: &'static str,
    pub zodiac: &'static str,
}

/// One month of a lunar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthInfo {
    pub num: u8,
    pub leap: bool,
    /// e.g. `"闰四月"`
    pub name: String,
}

/// One day within a lunar month listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayInfo {
    pub num: u8,
    pub name: &'static str,
    pub weekday: &'static str,
    #[serde(rename = "solarterm")]
    pub solar_term: String,
}

/// Full lunar description of a solar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LunarInfo {
    pub year_num: i32,
    pub year_stem: &'static str,
    pub year_branch: &'static str,
    pub year_zodiac: &'static str,
    pub month_num: u8,
    pub month_leap: bool,
    pub month_name: String,
    pub day_num: u8,
    pub day_name: &'static str,
    pub weekday: &'static str,
    #[serde(rename = "solarterm")]
    pub solar_term: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolarInfo {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Year summaries for every year of the calendar's span, in order.
///
/// Partial lunar years at the edges of the feed that fall outside the span
/// are left out.
pub fn list_years(calendar: &Calendar) -> Vec<YearInfo> {
    let span = calendar.span();
    calendar
        .years()
        .filter(|summary| span.contains(summary.year))
        .map(|summary| YearInfo {
            num: summary.year,
            stem: summary.stem,
            branch: summary.branch,
            zodiac: summary.zodiac,
        })
        .collect()
}

/// Months of `year` in order, or `None` when the year is outside the span.
pub fn list_months(calendar: &Calendar, year: i32) -> Option<Vec<MonthInfo>> {
    if !calendar.span().contains(year) {
        return None;
    }
    let markers = calendar.months(year)?;
    markers
        .iter()
        .map(|marker| Some(MonthInfo { num: marker.month, leap: marker.leap, name: month_name(marker.month, marker.leap)? }))
        .collect()
}

pub fn list_days(calendar: &Calendar, year: i32, month: u8, leap: bool) -> Option<Vec<DayInfo>> {
    calendar
        .month_days(year, month, leap)?
        .map(|day| {
            Some(DayInfo {
                num: day.lunar.day,
                name: day_name(day.lunar.day)?,
                weekday: weekday_name(day.weekday),
                solar_term: day.solar_term.clone(),
            })
        })
        .collect()
}

pub fn solar_to_lunar(calendar: &Calendar, date: SolarDate) -> Option<LunarInfo> {
    let day = calendar.find_solar(date)?;
    describe(calendar, day)
}

pub fn lunar_to_solar(calendar: &Calendar, date: LunarDate) -> Option<SolarInfo> {
    let solar = calendar.find_lunar(date)?.solar;
    Some(SolarInfo { year: solar.year, month: solar.month, day: solar.day })
}

fn describe(calendar: &Calendar, day: &Day) -> Option<LunarInfo> {
    let lunar = day.lunar;
    let year = calendar.year(lunar.year)?;

    Some(LunarInfo {
        year_num: lunar.year,
        year_stem: year.stem,
        year_branch: year.branch,
        year_zodiac: year.zodiac,
        month_num: lunar.month,
        month_leap: lunar.leap,
        month_name: month_name(lunar.month, lunar.leap)?,
        day_num: lunar.day,
        day_name: day_name(lunar.day)?,
        weekday: weekday_name(day.weekday),
        solar_term: day.solar_term.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fixture::write_files(dir.path());

        let result = load_with_metrics(&fixture::config(dir.path())).unwrap();
        let rows = fixture::rows();
        assert_eq!(result.calendar.len(), rows.len());
        assert_eq!(result.metrics.files, 4);
        assert_eq!(result.metrics.rows, rows.len());
        // One header and one blank line per file.
        assert_eq!(result.metrics.skipped, 8);
        assert_eq!(result.metrics.lines, rows.len() + 8);
        assert!(result.metrics.total >= result.metrics.read);
    }

    #[test]
    fn load_fails_without_partial_result() {
        let dir = tempfile::tempdir().unwrap();
        fixture::write_files(dir.path());
        std::fs::remove_file(dir.path().join("2002.txt")).unwrap();

        let err = load(&fixture::config(dir.path())).unwrap_err();
        assert!(matches!(err, CalendarError::DataSource { path, .. } if path.ends_with("2002.txt")));
    }

    #[test]
    fn list_years_stays_inside_span() {
        let calendar = fixture::calendar();
        let years = list_years(&calendar);

        let nums: Vec<_> = years.iter().map(|y| y.num).collect();
        assert_eq!(nums, vec![2000, 2001, 2002, 2003]);
        assert_eq!(years[0], YearInfo { num: 2000, stem: "庚", branch: "辰", zodiac: "龙" });
        // The seed year is indexed but not listed.
        assert!(calendar.year(1999).is_some());
    }

    #[test]
    fn list_months_rejects_partial_years_outside_span() {
        let calendar = fixture::calendar();

        assert!(calendar.months(1999).is_some());
        assert!(list_months(&calendar, 1999).is_none());
        assert!(list_months(&calendar, 2004).is_none());
        assert_eq!(list_months(&calendar, 2000).map(|m| m.len()), Some(12));
    }

    #[test]
    fn list_months_names_leap_months() {
        let calendar = fixture::calendar();
        let months = list_months(&calendar, 2001).unwrap();

        assert_eq!(months.len(), 13);
        assert_eq!(months[3], MonthInfo { num: 4, leap: false, name: "四月".into() });
        assert_eq!(months[4], MonthInfo { num: 4, leap: true, name: "闰四月".into() });
        assert_eq!(months[5], MonthInfo { num: 5, leap: false, name: "五月".into() });
        assert!(list_months(&calendar, 1800).is_none());
    }

    #[test]
    fn list_days_of_leap_month() {
        let calendar = fixture::calendar();
        let days = list_days(&calendar, 2001, 4, true).unwrap();

        assert_eq!(days.len(), 29);
        assert_eq!(days[0].num, 1);
        assert_eq!(days[0].name, "初一");
        assert_eq!(days[28].name, "廿九");
        assert!(list_days(&calendar, 2001, 5, true).is_none());
    }

    #[test]
    fn solar_to_lunar_describes_the_day() {
        let calendar = fixture::calendar();
        let (date, lunar, _) = fixture::rows().into_iter().find(|(_, l, _)| l.leap && l.day == 3).unwrap();

        let info = solar_to_lunar(&calendar, SolarDate::from(date)).unwrap();
        assert_eq!(info.year_num, lunar.year);
        assert_eq!((info.year_stem, info.year_branch, info.year_zodiac), ("辛", "巳", "蛇"));
        assert_eq!(info.month_name, "闰四月");
        assert!(info.month_leap);
        assert_eq!(info.day_name, "初三");
        assert_eq!(info.weekday, weekday_name(chrono::Datelike::weekday(&date)));

        assert!(solar_to_lunar(&calendar, SolarDate::new(1999, 12, 31)).is_none());
    }

    #[test]
    fn lunar_to_solar_inverts() {
        let calendar = fixture::calendar();
        for (date, lunar, _) in fixture::rows().into_iter().step_by(37) {
            let solar = lunar_to_solar(&calendar, lunar).unwrap();
            assert_eq!(SolarDate::new(solar.year, solar.month, solar.day), SolarDate::from(date));
        }
        assert!(lunar_to_solar(&calendar, LunarDate::new(2002, 4, true, 1)).is_none());
    }

    #[test]
    fn views_serialize_with_wire_names() {
        let info = DayInfo { num: 6, name: "初六", weekday: "星期一", solar_term: "惊蛰".into() };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json, serde_json::json!({"num": 6, "name": "初六", "weekday": "星期一", "solarterm": "惊蛰"}));
    }
}
