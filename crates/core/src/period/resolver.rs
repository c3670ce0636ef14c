//! Date-range resolver.
//!
//! Pure mapping from a mode and its selection onto calendar dates. Every
//! computation is done on naive (local calendar) dates; nothing here passes
//! through a UTC timestamp, so a range never shifts by a day near midnight.

use chrono::{Months, NaiveDate};

use super::types::{DailySelection, DateRange, FilterMode, MonthlySelection, YearlySelection};

// Well inside chrono's representable years so month arithmetic never overflows.
const MIN_YEAR: i64 = -262_000;
const MAX_YEAR: i64 = 262_000;

/// Resolves the active mode's selection into a date range.
///
/// Only the selection matching `mode` is read.
#[must_use]
pub fn resolve(
    mode: FilterMode,
    daily: &DailySelection,
    monthly: &MonthlySelection,
    yearly: &YearlySelection,
) -> DateRange {
    match mode {
        FilterMode::Daily => DateRange {
            from: first_day_of_month(daily.year, daily.month),
            to: last_day_of_month(daily.year, daily.month),
        },
        FilterMode::Monthly => DateRange {
            from: first_day_of_month(monthly.year, 1),
            to: last_day_of_month(monthly.year, 12),
        },
        FilterMode::Yearly => DateRange {
            from: first_day_of_month(yearly.start_year(), 1),
            to: last_day_of_month(yearly.end_year(), 12),
        },
    }
}

/// First day of `month` in `year`.
///
/// Months outside 1-12 roll into the neighbouring years (13 is January of
/// the next year, 0 is December of the previous one).
#[must_use]
pub fn first_day_of_month(year: i32, month: u32) -> NaiveDate {
    month_start(year, i64::from(month))
}

/// Last day of `month` in `year`: the day before the first of the next month.
#[must_use]
pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let start = month_start(year, i64::from(month));
    start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(start)
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn month_start(year: i32, month: i64) -> NaiveDate {
    let index = i64::from(year) * 12 + (month - 1);
    let year = index.div_euclid(12).clamp(MIN_YEAR, MAX_YEAR);
    let month = index.rem_euclid(12) + 1;

    NaiveDate::from_ymd_opt(year as i32, month as u32, 1).unwrap_or_default()
}
