//! Calendar indexer.
//!
//! Every lookup table is derived from the ordered day sequence in a single
//! pass. The tables store positions into that sequence, never copies, so a
//! day found through any of them is the same `Day`.
//!
//! ## Invariants
//!
//! - Each day lands in exactly one month bucket, one solar slot and one
//!   lunar slot.
//! - A year's month markers follow the order months first appear in the
//!   feed; a marker is only appended when `(month, leap)` changes, so a
//!   29- or 30-day run yields one marker.

use crate::calendar::{Calendar, Indices};
use crate::config::YearSpan;
use crate::{Day, YearSummary};

pub fn index(days: Vec<Day>, span: YearSpan) -> Calendar {
    let mut indices = Indices::with_capacity(days.len());

    for (pos, day) in days.iter().enumerate() {
        let lunar = day.lunar;

        indices.years.entry(lunar.year).or_insert_with(|| YearSummary::for_year(lunar.year));

        let markers = indices.months.entry(lunar.year).or_default();
        if markers.last() != Some(&lunar.marker()) {
            markers.push(lunar.marker());
        }

        indices.month_days.entry(lunar.month_key()).or_default().push(pos);
        indices.by_solar.insert(day.solar, pos);
        indices.by_lunar.insert(lunar, pos);
    }

    Calendar::from_parts(days, indices, span)
}
