//! Human-readable filter labels.

use std::fmt::Write;

use crate::params::DimensionSelections;
use crate::period::{
    DailySelection, DateRange, FilterMode, MonthlySelection, YearlySelection, first_day_of_month,
};

/// Short label of the active selection, e.g. "Daily · January 2025".
#[must_use]
pub fn summarize(
    mode: FilterMode,
    daily: &DailySelection,
    monthly: &MonthlySelection,
    yearly: &YearlySelection,
) -> String {
    let detail = match mode {
        FilterMode::Daily => first_day_of_month(daily.year, daily.month)
            .format("%B %Y")
            .to_string(),
        FilterMode::Monthly => monthly.year.to_string(),
        FilterMode::Yearly if yearly.start_year() == yearly.end_year() => {
            yearly.start_year().to_string()
        }
        FilterMode::Yearly => format!("{} - {}", yearly.start_year(), yearly.end_year()),
    };

    format!("{} · {detail}", mode.label())
}

/// Range plus any active dimension filters, e.g.
/// "January 1, 2025 to January 31, 2025 · Customer: Acme".
#[must_use]
pub fn describe_range(range: &DateRange, dimensions: &DimensionSelections) -> String {
    let mut text = format!(
        "{} to {}",
        range.from.format("%B %-d, %Y"),
        range.to.format("%B %-d, %Y")
    );

    for (dimension, value) in dimensions.active() {
        let _ = write!(text, " · {}: {}", dimension.label(), value.trim());
    }

    text
}
