//! Period selection types.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use pulseboard_shared::AppError;
use serde::{Deserialize, Serialize};

use super::resolver::format_iso;

/// Granularity of the date filter. Decides which selection is authoritative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// A single calendar month.
    #[default]
    Daily,
    /// A full calendar year.
    Monthly,
    /// An inclusive span of calendar years.
    Yearly,
}

impl FilterMode {
    /// All modes in display order.
    pub const ALL: [Self; 3] = [Self::Daily, Self::Monthly, Self::Yearly];

    /// Wire value sent as the `period` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Capitalized label used in summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(AppError::Validation(format!("unknown period mode: {other}"))),
        }
    }
}

/// Month picker state for daily mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySelection {
    /// Month, 1-12. Not validated here.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

impl DailySelection {
    /// Selection for the month containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }
}

/// Year picker state for monthly mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlySelection {
    /// Calendar year.
    pub year: i32,
}

/// Year span for yearly mode.
///
/// `start_year <= end_year` always holds: moving one bound past the other
/// drags the other bound along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearlySelection {
    start_year: i32,
    end_year: i32,
}

impl YearlySelection {
    /// Creates a span, ordering the bounds if given reversed.
    #[must_use]
    pub fn new(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year: start_year.min(end_year),
            end_year: start_year.max(end_year),
        }
    }

    /// First year of the span.
    #[must_use]
    pub const fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Last year of the span.
    #[must_use]
    pub const fn end_year(&self) -> i32 {
        self.end_year
    }

    /// Moves the start bound, raising the end bound if it would fall behind.
    pub fn set_start_year(&mut self, year: i32) {
        self.start_year = year;
        if self.end_year < year {
            self.end_year = year;
        }
    }

    /// Moves the end bound, lowering the start bound if it would overtake.
    pub fn set_end_year(&mut self, year: i32) {
        self.end_year = year;
        if self.start_year > year {
            self.start_year = year;
        }
    }
}

/// Concrete inclusive calendar interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day, inclusive.
    pub from: NaiveDate,
    /// Last day, inclusive.
    pub to: NaiveDate,
}

impl DateRange {
    /// `from` as `YYYY-MM-DD`.
    #[must_use]
    pub fn from_iso(&self) -> String {
        format_iso(self.from)
    }

    /// `to` as `YYYY-MM-DD`.
    #[must_use]
    pub fn to_iso(&self) -> String {
        format_iso(self.to)
    }

    /// Returns true if `date` falls within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Number of calendar days covered, both ends included.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}
