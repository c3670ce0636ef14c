//! Rows, pagination, error and loading of one table widget.

use pulseboard_shared::AppResult;
use pulseboard_shared::types::PaginationInfo;

use super::envelope::Envelope;

/// Identifies one issued fetch. Tickets increase monotonically per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    /// Sequence number of this fetch.
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// What the widget should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView<'a, T> {
    /// Skeleton while a request is in flight.
    Loading,
    /// Inline error panel.
    Error(&'a str),
    /// "No data available" panel.
    Empty,
    /// Table body.
    Rows(&'a [T]),
}

/// Result state of a table widget.
#[derive(Debug, Clone)]
pub struct TableState<T> {
    rows: Vec<T>,
    pagination: Option<PaginationInfo>,
    error: Option<String>,
    loading: bool,
    issued: u64,
}

impl<T> Default for TableState<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            pagination: None,
            error: None,
            loading: false,
            issued: 0,
        }
    }
}

impl<T> TableState<T> {
    /// Creates an empty, idle table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a fetch as started and returns its ticket.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        FetchTicket(self.issued)
    }

    /// Returns true if `ticket` is the latest issued one.
    #[must_use]
    pub const fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Applies the outcome of the fetch identified by `ticket`.
    ///
    /// On success rows and pagination are replaced and any previous error is
    /// cleared. On failure the message is kept and rows are cleared. Loading
    /// ends either way. A stale ticket changes nothing and returns false.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, outcome: AppResult<Envelope<T>>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        match outcome {
            Ok(envelope) => {
                let (rows, pagination) = envelope.into_parts();
                self.rows = rows;
                self.pagination = pagination;
                self.error = None;
            }
            Err(err) => {
                self.rows.clear();
                self.pagination = None;
                self.error = Some(err.to_string());
            }
        }

        self.loading = false;
        true
    }

    /// Current rows.
    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Server pagination of the current rows.
    #[must_use]
    pub const fn pagination(&self) -> Option<&PaginationInfo> {
        self.pagination.as_ref()
    }

    /// Message of the last failed fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while the latest fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Closes the error panel without re-fetching.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// What to render right now.
    #[must_use]
    pub fn view(&self) -> TableView<'_, T> {
        if self.loading {
            TableView::Loading
        } else if let Some(message) = &self.error {
            TableView::Error(message)
        } else if self.rows.is_empty() {
            TableView::Empty
        } else {
            TableView::Rows(&self.rows)
        }
    }
}
