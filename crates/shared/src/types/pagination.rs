//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Client-owned page position sent as `page` / `per_page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    /// Creates a request for the first page.
    #[must_use]
    pub fn first(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
        }
    }
}

/// Pagination metadata owned by the server.
///
/// Read-only on the client: it drives navigation controls and the range text,
/// never the request itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    /// Total number of rows across all pages.
    #[serde(default)]
    pub total: u64,
    /// Rows per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Current page number (1-indexed).
    #[serde(default = "default_page")]
    pub current_page: u32,
    /// Last page number.
    #[serde(default = "default_page")]
    pub last_page: u32,
    /// 1-based index of the first row on this page, `null` when empty.
    #[serde(default)]
    pub from: Option<u64>,
    /// 1-based index of the last row on this page, `null` when empty.
    #[serde(default)]
    pub to: Option<u64>,
}

impl PaginationInfo {
    /// Returns true if a previous page exists.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Returns true if a next page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    /// Clamps a page number into `[1, last_page]`.
    #[must_use]
    pub fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.last_page.max(1))
    }

    /// Human-readable range text, e.g. "Showing 21 to 40 of 95 results".
    #[must_use]
    pub fn range_text(&self) -> String {
        if self.total == 0 {
            return "No results".to_string();
        }

        let offset = u64::from(self.current_page.saturating_sub(1)) * u64::from(self.per_page);
        let from = self.from.unwrap_or(offset + 1);
        let to = self
            .to
            .unwrap_or_else(|| (offset + u64::from(self.per_page)).min(self.total));

        format!("Showing {from} to {to} of {} results", self.total)
    }

    /// Page numbers to render as buttons, at most `max_buttons` wide and
    /// centered on the current page where possible.
    #[must_use]
    pub fn page_window(&self, max_buttons: u32) -> Vec<u32> {
        let last = self.last_page.max(1);
        let width = max_buttons.clamp(1, last);
        let current = self.clamp_page(self.current_page);

        let start = current
            .saturating_sub(width / 2)
            .max(1)
            .min(last - width + 1);

        (start..start + width).collect()
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
