//! Period selection and calendar date-range resolution.
//!
//! A dashboard filter is in one of three modes. Each mode owns its own
//! selection and the resolver maps the active one onto a concrete
//! `[from, to]` calendar interval.

pub mod resolver;
pub mod types;


pub use resolver::{first_day_of_month, format_iso, last_day_of_month, resolve};
pub use types::{DailySelection, DateRange, FilterMode, MonthlySelection, YearlySelection};
