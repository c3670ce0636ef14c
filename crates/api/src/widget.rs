//! Controller of one paginated table widget.
//!
//! Wires the pure table contract from `pulseboard_core::table` to a
//! [`DataSource`], the search debouncer and the filter context channel.

use std::sync::{Arc, MutexGuard, PoisonError};
use std::time::Duration;

use pulseboard_core::ScopedParams;
use pulseboard_core::params::ParamsMemo;
use pulseboard_core::table::{Envelope, TableQueryState, TableState};
use pulseboard_shared::AppResult;
use pulseboard_shared::config::TableConfig;
use pulseboard_shared::types::PaginationInfo;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{debug, warn};

use crate::debounce::Debouncer;
use crate::source::DataSource;

/// Default quiet period before a typed search term is promoted.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

/// Predicate applied to decoded rows before they are stored.
pub type RowFilter<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Query and result state of a widget at one point in time.
#[derive(Debug, Clone)]
pub struct WidgetSnapshot<T> {
    /// Search, page, page size and sort.
    pub query: TableQueryState,
    /// Rows, pagination, error and loading.
    pub table: TableState<T>,
}

/// Handle to one table widget. Clones share the same state.
pub struct TableWidget<T> {
    inner: Arc<WidgetInner<T>>,
}

impl<T> Clone for TableWidget<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

type PromotedSlot = std::sync::Mutex<Option<mpsc::UnboundedReceiver<String>>>;

struct WidgetInner<T> {
    source: Arc<dyn DataSource>,
    path: String,
    scoped: bool,
    row_filter: Option<RowFilter<T>>,
    state: Mutex<WidgetState<T>>,
    promoted: PromotedSlot,
}

struct WidgetState<T> {
    query: TableQueryState,
    table: TableState<T>,
    filter: Option<ScopedParams>,
    memo: ParamsMemo,
    search: Debouncer<String>,
}

/// Lends the promoted-search receiver to one driver and puts it back when
/// the driver ends, including when its task is aborted.
struct DriverLease<'a> {
    slot: &'a PromotedSlot,
    receiver: Option<mpsc::UnboundedReceiver<String>>,
}

impl<'a> DriverLease<'a> {
    fn claim(slot: &'a PromotedSlot) -> Option<Self> {
        let receiver = lock_slot(slot).take()?;
        Some(Self {
            slot,
            receiver: Some(receiver),
        })
    }
}

impl Drop for DriverLease<'_> {
    fn drop(&mut self) {
        if let Some(receiver) = self.receiver.take() {
            *lock_slot(self.slot) = Some(receiver);
        }
    }
}

fn lock_slot(slot: &PromotedSlot) -> MutexGuard<'_, Option<mpsc::UnboundedReceiver<String>>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Builder for [`TableWidget`].
pub struct TableWidgetBuilder<T> {
    source: Arc<dyn DataSource>,
    path: String,
    scoped: bool,
    per_page: u32,
    debounce: Duration,
    row_filter: Option<RowFilter<T>>,
    filter: Option<ScopedParams>,
}

impl<T> TableWidgetBuilder<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// Rows per page.
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Search debounce delay.
    #[must_use]
    pub fn debounce(mut self, delay: Duration) -> Self {
        self.debounce = delay;
        self
    }

    /// Page size and debounce delay from configuration.
    #[must_use]
    pub fn table_config(self, config: &TableConfig) -> Self {
        self.per_page(config.per_page)
            .debounce(Duration::from_millis(config.search_debounce_ms))
    }

    /// Keeps only rows matching `keep`.
    #[must_use]
    pub fn row_filter(mut self, keep: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.row_filter = Some(Arc::new(keep));
        self
    }

    /// Initial scope and filter parameters. Without them only table
    /// parameters are sent.
    #[must_use]
    pub fn filter(mut self, filter: ScopedParams) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Resolves the path under the filter's scope, so `stock` is fetched
    /// from `inventory/WH-01/stock` and follows warehouse changes.
    #[must_use]
    pub fn scoped(mut self) -> Self {
        self.scoped = true;
        self
    }

    /// Builds the widget. Nothing is fetched yet.
    #[must_use]
    pub fn build(self) -> TableWidget<T> {
        let (search, promoted) = Debouncer::new(self.debounce);

        let mut memo = ParamsMemo::new();
        if let Some(filter) = &self.filter {
            memo.observe_key(filter.request_key());
        }

        TableWidget {
            inner: Arc::new(WidgetInner {
                source: self.source,
                path: self.path,
                scoped: self.scoped,
                row_filter: self.row_filter,
                state: Mutex::new(WidgetState {
                    query: TableQueryState::new(self.per_page),
                    table: TableState::new(),
                    filter: self.filter,
                    memo,
                    search,
                }),
                promoted: std::sync::Mutex::new(Some(promoted)),
            }),
        }
    }
}

impl<T> TableWidget<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// Starts building a widget that lists `path`.
    pub fn builder(source: Arc<dyn DataSource>, path: impl Into<String>) -> TableWidgetBuilder<T> {
        TableWidgetBuilder {
            source,
            path: path.into(),
            scoped: false,
            per_page: TableQueryState::default().per_page(),
            debounce: DEFAULT_SEARCH_DEBOUNCE,
            row_filter: None,
            filter: None,
        }
    }

    /// Path this widget was built with. Scoped widgets resolve it against
    /// the current scope, see [`Self::endpoint`].
    #[must_use]
    pub fn path(&self) -> &str {
        &self.inner.path
    }

    /// Endpoint the next fetch goes to.
    pub async fn endpoint(&self) -> String {
        let state = self.inner.state.lock().await;
        self.endpoint_for(state.filter.as_ref())
    }

    fn endpoint_for(&self, filter: Option<&ScopedParams>) -> String {
        match filter {
            Some(filter) if self.inner.scoped => filter.scope().endpoint(&self.inner.path),
            _ => self.inner.path.clone(),
        }
    }

    /// Fetches the current page.
    ///
    /// Returns false if a newer fetch was issued meanwhile, in which case the
    /// response was discarded.
    pub async fn refresh(&self) -> bool {
        let (ticket, path, query) = {
            let mut state = self.inner.state.lock().await;
            let path = self.endpoint_for(state.filter.as_ref());
            let mut query = state
                .filter
                .as_ref()
                .map(|filter| filter.params().to_query_pairs())
                .unwrap_or_default();
            query.extend(state.query.to_query_pairs());
            (state.table.begin_fetch(), path, query)
        };

        let outcome = self.fetch(&path, &query).await;
        if let Err(err) = &outcome {
            warn!(path = %path, error = %err, "table fetch failed");
        }

        let applied = self.inner.state.lock().await.table.finish_fetch(ticket, outcome);
        if !applied {
            debug!(
                path = %path,
                sequence = ticket.sequence(),
                "discarding stale table response"
            );
        }
        applied
    }

    async fn fetch(&self, path: &str, query: &[(String, String)]) -> AppResult<Envelope<T>> {
        let body = self.inner.source.fetch(path, query).await?;
        let mut envelope = Envelope::decode(body)?;
        if let Some(keep) = &self.inner.row_filter {
            envelope.retain(|row| keep(row));
        }
        Ok(envelope)
    }

    /// Applies a new scope and filter parameters. Unchanged ones are
    /// ignored, otherwise the page goes back to 1 and the table is re-fetched.
    pub async fn apply_filter(&self, filter: ScopedParams) -> bool {
        {
            let mut state = self.inner.state.lock().await;
            if !state.memo.observe_key(filter.request_key()) {
                return false;
            }
            state.filter = Some(filter);
            state.query.reset_page();
        }

        self.refresh().await;
        true
    }

    /// Records typed search text and restarts the debounce timer.
    ///
    /// The debounced term is promoted by [`Self::drive`]. Terms that settle
    /// while no driver runs are collapsed to the latest one when a driver
    /// starts.
    pub async fn type_search(&self, input: impl Into<String>) {
        let input = input.into();
        let mut state = self.inner.state.lock().await;
        state.query.set_search_input(input.clone());
        state.search.push(input);
    }

    /// Promotes a search term. A changed term resets the page and re-fetches.
    pub async fn promote_search(&self, term: &str) -> bool {
        let changed = self.inner.state.lock().await.query.promote_search(term);
        if changed {
            self.refresh().await;
        }
        changed
    }

    /// Changes the page size. A changed size resets the page and re-fetches.
    pub async fn set_per_page(&self, per_page: u32) -> bool {
        let changed = self.inner.state.lock().await.query.set_per_page(per_page);
        if changed {
            self.refresh().await;
        }
        changed
    }

    /// Moves to the next page if there is one.
    pub async fn next_page(&self) -> bool {
        self.navigate(|query, pagination| query.next_page(pagination))
            .await
    }

    /// Moves to the previous page if there is one.
    pub async fn previous_page(&self) -> bool {
        self.navigate(|query, pagination| query.previous_page(pagination))
            .await
    }

    /// Moves to `page` if it is within the server's page range.
    pub async fn go_to_page(&self, page: u32) -> bool {
        self.navigate(|query, pagination| query.go_to_page(page, pagination))
            .await
    }

    async fn navigate(
        &self,
        step: impl FnOnce(&mut TableQueryState, Option<&PaginationInfo>) -> bool,
    ) -> bool {
        let moved = {
            let mut guard = self.inner.state.lock().await;
            let state = &mut *guard;
            step(&mut state.query, state.table.pagination())
        };
        if moved {
            self.refresh().await;
        }
        moved
    }

    /// Clicks a sort column and re-fetches from page 1.
    pub async fn toggle_sort(&self, column: &str) {
        self.inner.state.lock().await.query.toggle_sort(column);
        self.refresh().await;
    }

    /// Closes the error panel.
    pub async fn dismiss_error(&self) {
        self.inner.state.lock().await.table.dismiss_error();
    }

    /// Runs the widget against a filter channel until the channel closes.
    ///
    /// Fetches once with the current filter, then re-fetches on every scope
    /// or filter change and every promoted search term. Only one driver can
    /// run at a time; a second call returns immediately. Dropping or aborting
    /// the driver frees the widget for the next one.
    pub async fn drive(&self, mut filters: watch::Receiver<ScopedParams>) {
        let Some(mut lease) = DriverLease::claim(&self.inner.promoted) else {
            warn!(path = %self.inner.path, "table widget is already being driven");
            return;
        };
        let Some(promoted) = lease.receiver.as_mut() else {
            return;
        };

        let mut settled = None;
        while let Ok(term) = promoted.try_recv() {
            settled = Some(term);
        }
        if let Some(term) = settled {
            self.inner.state.lock().await.query.promote_search(&term);
        }

        let initial = filters.borrow_and_update().clone();
        if !self.apply_filter(initial).await {
            self.refresh().await;
        }

        loop {
            tokio::select! {
                changed = filters.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let filter = filters.borrow_and_update().clone();
                    self.apply_filter(filter).await;
                }
                Some(term) = promoted.recv() => {
                    self.promote_search(&term).await;
                }
            }
        }
    }
}

impl<T: Clone> TableWidget<T> {
    /// Copy of the current query and result state.
    pub async fn snapshot(&self) -> WidgetSnapshot<T> {
        let state = self.inner.state.lock().await;
        WidgetSnapshot {
            query: state.query.clone(),
            table: state.table.clone(),
        }
    }
}

impl<T> std::fmt::Debug for TableWidget<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableWidget")
            .field("path", &self.inner.path)
            .field("scoped", &self.inner.scoped)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "widget_tests.rs"]
mod tests;
