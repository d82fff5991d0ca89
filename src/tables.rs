//! Fixed vocabularies used by the feed and by display output.
//!
//! Every token the feed may contain is enumerated here. Lookups are exact
//! string matches: the feed is produced by a controlled upstream script, so
//! there is no fuzzy matching or case folding.

use chrono::Weekday;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Day-of-month names, index `n - 1` for day `n`.
pub const DAY_NAMES: [&str; 30] = [
    "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十", "十一", "十二", "十三", "十四", "十五",
    "十六", "十七", "十八", "十九", "二十", "廿一", "廿二", "廿三", "廿四", "廿五", "廿六", "廿七", "廿八", "廿九", "三十",
];

/// Month names, index `n - 1` for month `n`.
pub const MONTH_NAMES: [&str; 12] =
    ["正月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "十一月", "十二月"];

/// Leap marker as it appears in the (traditional script) feed.
pub const FEED_LEAP_MARKER: char = '閏';

/// Leap marker used in rendered month names.
pub const DISPLAY_LEAP_MARKER: &str = "闰";

/// Weekday names, Monday first.
pub const WEEKDAY_NAMES: [&str; 7] = ["星期一", "星期二", "星期三", "星期四", "星期五", "星期六", "星期日"];

/// The ten celestial stems.
///
/// The sixth stem is 己. The upstream web service printed the look-alike 已
/// here, so its year names differ from ours for years ending in 9.
pub const STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

/// The twelve terrestrial branches.
pub const BRANCHES: [&str; 12] = ["子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥"];

/// The twelve zodiac animals, aligned with [`BRANCHES`].
pub const ZODIAC: [&str; 12] = ["鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪"];

/// Solar-term names that the feed spells with traditional characters.
const SOLAR_TERM_VARIANTS: [(&str, &str); 5] =
    [("驚蟄", "惊蛰"), ("穀雨", "谷雨"), ("小滿", "小满"), ("芒種", "芒种"), ("處暑", "处暑")];

static DAY_BY_NAME: Lazy<HashMap<&'static str, u8>> =
    Lazy::new(|| DAY_NAMES.iter().zip(1u8..).map(|(name, n)| (*name, n)).collect());

static MONTH_BY_NAME: Lazy<HashMap<&'static str, u8>> =
    Lazy::new(|| MONTH_NAMES.iter().zip(1u8..).map(|(name, n)| (*name, n)).collect());

/// Day number (1..=30) for a day-name token such as `"廿三"`.
pub fn day_number(token: &str) -> Option<u8> {
    DAY_BY_NAME.get(token).copied()
}

/// Month number and leap flag for a month token such as `"十一月"` or `"閏四月"`.
pub fn month_number(token: &str) -> Option<(u8, bool)> {
    match token.strip_prefix(FEED_LEAP_MARKER) {
        Some(rest) => MONTH_BY_NAME.get(rest).map(|&n| (n, true)),
        None => MONTH_BY_NAME.get(token).map(|&n| (n, false)),
    }
}

pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name {
        "星期一" => Some(Weekday::Mon),
        "星期二" => Some(Weekday::Tue),
        "星期三" => Some(Weekday::Wed),
        "星期四" => Some(Weekday::Thu),
        "星期五" => Some(Weekday::Fri),
        "星期六" => Some(Weekday::Sat),
        "星期日" => Some(Weekday::Sun),
        _ => None,
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday.num_days_from_monday() as usize]
}

/// Map a traditional-script solar-term name to its simplified spelling.
///
/// Names that are already simplified (and the empty "no term" value) pass
/// through unchanged.
pub fn simplify_solar_term(raw: &str) -> &str {
    SOLAR_TERM_VARIANTS.iter().find(|(traditional, _)| *traditional == raw).map_or(raw, |(_, simplified)| *simplified)
}

pub fn day_name(day: u8) -> Option<&'static str> {
    DAY_NAMES.get(usize::from(day).checked_sub(1)?).copied()
}

/// Display name of a lunar month, e.g. `"四月"` or `"闰四月"`.
pub fn month_name(month: u8, leap: bool) -> Option<String> {
    let base = MONTH_NAMES.get(usize::from(month).checked_sub(1)?)?;
    Some(if leap { format!("{DISPLAY_LEAP_MARKER}{base}") } else { (*base).to_string() })
}

fn cycle_index(year: i32, len: usize) -> usize {
    // The sexagenary cycle is anchored at 4 CE (甲子).
    (year - 4).rem_euclid(len as i32) as usize
}

pub fn stem(year: i32) -> &'static str {
    STEMS[cycle_index(year, STEMS.len())]
}

pub fn branch(year: i32) -> &'static str {
    BRANCHES[cycle_index(year, BRANCHES.len())]
}

pub fn zodiac(year: i32) -> &'static str {
    ZODIAC[cycle_index(year, ZODIAC.len())]
}
