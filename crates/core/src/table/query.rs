//! Per-widget query state: search, pagination and sort.

use std::fmt;

use pulseboard_shared::types::{PageRequest, PaginationInfo};
use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending. The default for a newly selected column.
    #[default]
    Desc,
}

impl SortOrder {
    /// Wire value sent as `sort_order`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortState {
    /// Column key sent as `sort_by`.
    pub column: String,
    /// Direction sent as `sort_order`.
    pub order: SortOrder,
}

/// Search, pagination and sort of one table widget.
///
/// The page goes back to 1 whenever the promoted search term, the page size,
/// the sort, or an upstream filter changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQueryState {
    search_input: String,
    search_term: String,
    page: PageRequest,
    sort: Option<SortState>,
}

impl Default for TableQueryState {
    fn default() -> Self {
        Self::new(PageRequest::default().per_page)
    }
}

impl TableQueryState {
    /// Creates a query on page 1 with `per_page` rows.
    #[must_use]
    pub fn new(per_page: u32) -> Self {
        Self {
            search_input: String::new(),
            search_term: String::new(),
            page: PageRequest::first(per_page),
            sort: None,
        }
    }

    /// Raw text currently typed into the search box.
    #[must_use]
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Search term actually sent with requests.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Current page (1-indexed).
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.page.page
    }

    /// Rows per page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.page.per_page
    }

    /// Active sort, if any.
    #[must_use]
    pub const fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Records a keystroke. Has no effect on the query until promoted.
    pub fn set_search_input(&mut self, input: impl Into<String>) {
        self.search_input = input.into();
    }

    /// Promotes a debounced term. Returns true if the query changed, in which
    /// case the page is back to 1.
    pub fn promote_search(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term == self.search_term {
            return false;
        }
        self.search_term = term.to_string();
        self.page.page = 1;
        true
    }

    /// Changes the page size and returns to page 1.
    pub fn set_per_page(&mut self, per_page: u32) -> bool {
        let per_page = per_page.max(1);
        if per_page == self.page.per_page {
            return false;
        }
        self.page = PageRequest::first(per_page);
        true
    }

    /// Returns to page 1 after an upstream filter change.
    pub fn reset_page(&mut self) -> bool {
        let changed = self.page.page != 1;
        self.page.page = 1;
        changed
    }

    /// Jumps to `page`, clamped into `[1, last_page]`.
    ///
    /// Without server pagination only page 1 exists.
    pub fn go_to_page(&mut self, page: u32, pagination: Option<&PaginationInfo>) -> bool {
        let target = pagination.map_or(1, |meta| meta.clamp_page(page));
        if target == self.page.page {
            return false;
        }
        self.page.page = target;
        true
    }

    /// Advances one page. A no-op on the last page.
    pub fn next_page(&mut self, pagination: Option<&PaginationInfo>) -> bool {
        self.go_to_page(self.page.page.saturating_add(1), pagination)
    }

    /// Goes back one page. A no-op on the first page.
    pub fn previous_page(&mut self, pagination: Option<&PaginationInfo>) -> bool {
        self.go_to_page(self.page.page.saturating_sub(1).max(1), pagination)
    }

    /// Header click: flips the direction of the active column, or activates a
    /// new column in descending order.
    pub fn toggle_sort(&mut self, column: &str) {
        self.sort = Some(match self.sort.take() {
            Some(active) if active.column == column => SortState {
                column: active.column,
                order: active.order.toggled(),
            },
            _ => SortState {
                column: column.to_string(),
                order: SortOrder::default(),
            },
        });
        self.page.page = 1;
    }

    /// `page`, `per_page`, and when set `search`, `sort_by`, `sort_order`.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.page.to_string()),
            ("per_page".to_string(), self.page.per_page.to_string()),
        ];

        if !self.search_term.is_empty() {
            pairs.push(("search".to_string(), self.search_term.clone()));
        }

        if let Some(sort) = &self.sort {
            pairs.push(("sort_by".to_string(), sort.column.clone()));
            pairs.push(("sort_order".to_string(), sort.order.as_str().to_string()));
        }

        pairs
    }
}
