//! The filter state machine.

use chrono::{Datelike, Local, NaiveDate};

use super::scope::{DashboardScope, ScopedParams};
use super::summary::{describe_range, summarize};
use crate::params::{Dimension, DimensionSelections, RequestParams};
use crate::period::{
    DailySelection, DateRange, FilterMode, MonthlySelection, YearlySelection, resolve,
};

/// Today's date on the local calendar.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Active filter of one dashboard.
///
/// The mode is the top-level discriminator. Every mode keeps its own
/// selection, and switching modes leaves the others untouched so toggling
/// back restores the last values used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    scope: DashboardScope,
    mode: FilterMode,
    daily: DailySelection,
    monthly: MonthlySelection,
    yearly: YearlySelection,
    dimensions: DimensionSelections,
}

impl FilterState {
    /// Creates the default filter relative to `today`.
    #[must_use]
    pub fn new(scope: DashboardScope, today: NaiveDate) -> Self {
        let year = today.year();
        Self {
            scope,
            mode: FilterMode::Daily,
            daily: DailySelection::containing(today),
            monthly: MonthlySelection { year },
            yearly: YearlySelection::new(year - 1, year),
            dimensions: DimensionSelections::default(),
        }
    }

    /// Creates the default filter for the current local date.
    #[must_use]
    pub fn for_today(scope: DashboardScope) -> Self {
        Self::new(scope, today())
    }

    /// Dashboard this filter belongs to.
    #[must_use]
    pub const fn scope(&self) -> &DashboardScope {
        &self.scope
    }

    /// Active mode.
    #[must_use]
    pub const fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Daily-mode selection.
    #[must_use]
    pub const fn daily(&self) -> DailySelection {
        self.daily
    }

    /// Monthly-mode selection.
    #[must_use]
    pub const fn monthly(&self) -> MonthlySelection {
        self.monthly
    }

    /// Yearly-mode selection.
    #[must_use]
    pub const fn yearly(&self) -> YearlySelection {
        self.yearly
    }

    /// Dimension filter values.
    #[must_use]
    pub const fn dimensions(&self) -> &DimensionSelections {
        &self.dimensions
    }

    /// Current value of one dimension filter.
    #[must_use]
    pub fn dimension(&self, dimension: Dimension) -> &str {
        self.dimensions.get(dimension)
    }

    /// Moves the filter to another dashboard scope.
    ///
    /// Dimension values belong to the old scope, so a real move clears them.
    /// Date selections are kept. Returns true if the scope changed.
    pub fn set_scope(&mut self, scope: DashboardScope) -> bool {
        if self.scope == scope {
            return false;
        }
        self.scope = scope;
        self.dimensions = DimensionSelections::default();
        true
    }

    /// Switches the active mode.
    pub fn set_mode(&mut self, mode: FilterMode) {
        self.mode = mode;
    }

    /// Replaces the daily selection.
    pub fn set_daily(&mut self, month: u32, year: i32) {
        self.daily = DailySelection { month, year };
    }

    /// Sets the daily month.
    pub fn set_daily_month(&mut self, month: u32) {
        self.daily.month = month;
    }

    /// Sets the daily year.
    pub fn set_daily_year(&mut self, year: i32) {
        self.daily.year = year;
    }

    /// Sets the monthly-mode year.
    pub fn set_monthly_year(&mut self, year: i32) {
        self.monthly.year = year;
    }

    /// Sets the first year of the yearly span, dragging the end along if needed.
    pub fn set_yearly_start_year(&mut self, year: i32) {
        self.yearly.set_start_year(year);
    }

    /// Sets the last year of the yearly span, dragging the start along if needed.
    pub fn set_yearly_end_year(&mut self, year: i32) {
        self.yearly.set_end_year(year);
    }

    /// Sets a dimension filter. Blank or `"all"` clears it.
    pub fn set_dimension(&mut self, dimension: Dimension, value: impl Into<String>) {
        self.dimensions.set(dimension, value);
    }

    /// Restores every selection to its default relative to `today`. The scope is kept.
    pub fn reset_filters_at(&mut self, today: NaiveDate) {
        *self = Self::new(self.scope.clone(), today);
    }

    /// Restores every selection to its default for the current local date.
    pub fn reset_filters(&mut self) {
        self.reset_filters_at(today());
    }

    /// Date range of the active mode.
    #[must_use]
    pub fn resolved_range(&self) -> DateRange {
        resolve(self.mode, &self.daily, &self.monthly, &self.yearly)
    }

    /// Query parameters for filter-aware endpoints.
    #[must_use]
    pub fn request_params(&self) -> RequestParams {
        RequestParams::builder(self.mode, self.resolved_range())
            .dimensions(&self.dimensions)
            .build()
    }

    /// Request parameters paired with the scope.
    #[must_use]
    pub fn scoped_params(&self) -> ScopedParams {
        ScopedParams::new(self.scope.clone(), self.request_params())
    }

    /// JSON identity of [`Self::request_params`].
    #[must_use]
    pub fn request_key(&self) -> String {
        self.request_params().request_key()
    }

    /// Short label, e.g. "Daily · January 2025".
    #[must_use]
    pub fn summary(&self) -> String {
        summarize(self.mode, &self.daily, &self.monthly, &self.yearly)
    }

    /// Longer description of the range and active dimension filters.
    #[must_use]
    pub fn description(&self) -> String {
        describe_range(&self.resolved_range(), &self.dimensions)
    }
}
