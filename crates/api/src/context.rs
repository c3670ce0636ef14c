//! Shared filter context of one dashboard.
//!
//! A [`FilterContext`] is an explicit handle: the dashboard creates one and
//! passes clones to its widgets. There is no process-wide default.

use std::sync::Arc;

use pulseboard_core::options::OptionSet;
use pulseboard_core::params::{Dimension, ParamsMemo, RequestParams};
use pulseboard_core::period::{DailySelection, DateRange, FilterMode, MonthlySelection, YearlySelection};
use pulseboard_core::{DashboardScope, FilterState, ScopedParams};
use tokio::sync::{RwLock, watch};

use crate::options::DimensionOptionLoader;
use crate::source::DataSource;

/// Handle to the filter state of one dashboard.
///
/// Every setter recomputes the request parameters and publishes them, paired
/// with the scope, on a `watch` channel when, and only when, either changed.
#[derive(Clone)]
pub struct FilterContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    state: RwLock<Published>,
    params: watch::Sender<ScopedParams>,
    customers: DimensionOptionLoader,
    group_types: DimensionOptionLoader,
}

struct Published {
    filter: FilterState,
    memo: ParamsMemo,
}

impl FilterContext {
    /// Creates a context with today's defaults and starts both option loads
    /// in the background.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(source: Arc<dyn DataSource>, scope: DashboardScope) -> Self {
        Self::with_state(source, FilterState::for_today(scope))
    }

    /// Creates a context around an existing filter state and starts both
    /// option loads in the background.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn with_state(source: Arc<dyn DataSource>, filter: FilterState) -> Self {
        let context = Self::with_state_unloaded(source, filter);
        context.spawn_option_refresh();
        context
    }

    /// Creates a context around an existing filter state without loading
    /// options. Call [`Self::refresh_options`] to load them.
    pub fn with_state_unloaded(source: Arc<dyn DataSource>, filter: FilterState) -> Self {
        let scope = filter.scope().clone();
        let published = filter.scoped_params();

        let mut memo = ParamsMemo::new();
        memo.observe_key(published.request_key());
        let (sender, _) = watch::channel(published);

        Self {
            inner: Arc::new(ContextInner {
                state: RwLock::new(Published { filter, memo }),
                params: sender,
                customers: DimensionOptionLoader::new(
                    Arc::clone(&source),
                    Dimension::Customer,
                    scope.clone(),
                ),
                group_types: DimensionOptionLoader::new(source, Dimension::GroupType, scope),
            }),
        }
    }

    /// Receiver of the scope and assembled request parameters.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ScopedParams> {
        self.inner.params.subscribe()
    }

    /// Copy of the current filter state.
    pub async fn snapshot(&self) -> FilterState {
        self.inner.state.read().await.filter.clone()
    }

    /// Dashboard scope.
    pub async fn scope(&self) -> DashboardScope {
        self.inner.state.read().await.filter.scope().clone()
    }

    /// Active mode.
    pub async fn mode(&self) -> FilterMode {
        self.inner.state.read().await.filter.mode()
    }

    /// Stored daily selection.
    pub async fn daily(&self) -> DailySelection {
        self.inner.state.read().await.filter.daily()
    }

    /// Stored monthly selection.
    pub async fn monthly(&self) -> MonthlySelection {
        self.inner.state.read().await.filter.monthly()
    }

    /// Stored yearly selection.
    pub async fn yearly(&self) -> YearlySelection {
        self.inner.state.read().await.filter.yearly()
    }

    /// Selected value of `dimension`, `"all"` when unfiltered.
    pub async fn dimension(&self, dimension: Dimension) -> String {
        self.inner.state.read().await.filter.dimension(dimension).to_string()
    }

    /// Current scope and request parameters.
    #[must_use]
    pub fn scoped_params(&self) -> ScopedParams {
        self.inner.params.borrow().clone()
    }

    /// Current request parameters.
    #[must_use]
    pub fn request_params(&self) -> RequestParams {
        self.inner.params.borrow().params().clone()
    }

    /// Stable identity of the current request parameters.
    #[must_use]
    pub fn request_key(&self) -> String {
        self.inner.params.borrow().params().request_key()
    }

    /// Resolved date range of the active mode.
    #[must_use]
    pub fn resolved_range(&self) -> DateRange {
        self.inner.params.borrow().params().range()
    }

    /// Short label, e.g. "Daily · January 2025".
    pub async fn summary(&self) -> String {
        self.inner.state.read().await.filter.summary()
    }

    /// Longer description of the range and active dimension filters.
    pub async fn description(&self) -> String {
        self.inner.state.read().await.filter.description()
    }

    /// Applies `change` to the filter and publishes the new scope and
    /// parameters if they differ. Returns true if subscribers were notified.
    pub async fn update(&self, change: impl FnOnce(&mut FilterState)) -> bool {
        let mut state = self.inner.state.write().await;
        change(&mut state.filter);

        let published = state.filter.scoped_params();
        if !state.memo.observe_key(published.request_key()) {
            return false;
        }

        self.inner.params.send_replace(published);
        true
    }

    /// Switches the active mode.
    pub async fn set_mode(&self, mode: FilterMode) -> bool {
        self.update(|filter| filter.set_mode(mode)).await
    }

    /// Sets month and year of the daily selection.
    pub async fn set_daily(&self, month: u32, year: i32) -> bool {
        self.update(|filter| filter.set_daily(month, year)).await
    }

    /// Sets the month of the daily selection.
    pub async fn set_daily_month(&self, month: u32) -> bool {
        self.update(|filter| filter.set_daily_month(month)).await
    }

    /// Sets the year of the daily selection.
    pub async fn set_daily_year(&self, year: i32) -> bool {
        self.update(|filter| filter.set_daily_year(year)).await
    }

    /// Sets the year of the monthly selection.
    pub async fn set_monthly_year(&self, year: i32) -> bool {
        self.update(|filter| filter.set_monthly_year(year)).await
    }

    /// Sets the first year of the yearly range, clamping the last.
    pub async fn set_yearly_start_year(&self, year: i32) -> bool {
        self.update(|filter| filter.set_yearly_start_year(year)).await
    }

    /// Sets the last year of the yearly range, clamping the first.
    pub async fn set_yearly_end_year(&self, year: i32) -> bool {
        self.update(|filter| filter.set_yearly_end_year(year)).await
    }

    /// Selects a value of `dimension`. Blank or `"all"` clears it.
    pub async fn set_dimension(&self, dimension: Dimension, value: impl Into<String>) -> bool {
        let value = value.into();
        self.update(|filter| filter.set_dimension(dimension, value)).await
    }

    /// Restores every selection to today's defaults.
    pub async fn reset_filters(&self) -> bool {
        self.update(FilterState::reset_filters).await
    }

    /// Moves the context to another scope, clears the dimension filters,
    /// publishes the change and reloads both option lists.
    pub async fn set_scope(&self, scope: DashboardScope) -> bool {
        let changed = self
            .update(|filter| {
                filter.set_scope(scope.clone());
            })
            .await;

        if changed {
            tokio::join!(
                self.inner.customers.set_scope(scope.clone()),
                self.inner.group_types.set_scope(scope),
            );
            self.refresh_options().await;
        }

        changed
    }

    /// Shortcut for [`Self::set_scope`] with an inventory scope.
    pub async fn set_warehouse(&self, warehouse: impl Into<String>) -> bool {
        self.set_scope(DashboardScope::inventory(warehouse)).await
    }

    /// Option set of `dimension`.
    pub async fn options(&self, dimension: Dimension) -> OptionSet {
        self.loader(dimension).options().await
    }

    /// Reloads both option lists and waits for them.
    pub async fn refresh_options(&self) -> (OptionSet, OptionSet) {
        tokio::join!(
            self.inner.customers.refresh(),
            self.inner.group_types.refresh()
        )
    }

    fn spawn_option_refresh(&self) {
        let customers = self.inner.customers.clone();
        let group_types = self.inner.group_types.clone();
        tokio::spawn(async move {
            tokio::join!(customers.refresh(), group_types.refresh());
        });
    }

    fn loader(&self, dimension: Dimension) -> &DimensionOptionLoader {
        match dimension {
            Dimension::Customer => &self.inner.customers,
            Dimension::GroupType => &self.inner.group_types,
        }
    }
}

impl std::fmt::Debug for FilterContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterContext")
            .field("published", &*self.inner.params.borrow())
            .finish_non_exhaustive()
    }
}
