//! Dashboard scope.

use std::fmt;

use serde::Serialize;

use crate::params::{Dimension, RequestParams};

/// Which dashboard a filter belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DashboardScope {
    /// Inventory dashboard of one warehouse.
    Inventory {
        /// Warehouse code.
        warehouse: String,
    },
    /// Company-wide sales dashboard.
    Sales,
}

impl DashboardScope {
    /// Inventory scope for `warehouse`.
    pub fn inventory(warehouse: impl Into<String>) -> Self {
        Self::Inventory {
            warehouse: warehouse.into(),
        }
    }

    /// Endpoint prefix for everything under this scope.
    #[must_use]
    pub fn path_prefix(&self) -> String {
        match self {
            Self::Inventory { warehouse } => format!("inventory/{}", warehouse.trim()),
            Self::Sales => "sales".to_string(),
        }
    }

    /// Endpoint `path` under this scope, e.g. `inventory/WH-01/stock`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.path_prefix(), path.trim_start_matches('/'))
    }

    /// Collection endpoint listing the known values of `dimension`.
    #[must_use]
    pub fn options_path(&self, dimension: Dimension) -> String {
        self.endpoint(dimension.collection_path())
    }
}

impl fmt::Display for DashboardScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inventory { warehouse } => write!(f, "Inventory ({warehouse})"),
            Self::Sales => f.write_str("Sales"),
        }
    }
}

/// Request parameters together with the scope they apply to.
///
/// This is what a filter publishes to its widgets: a scope change moves
/// scoped endpoints even when the query parameters stay the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ScopedParams {
    scope: DashboardScope,
    params: RequestParams,
}

impl ScopedParams {
    /// Pairs `params` with `scope`.
    #[must_use]
    pub const fn new(scope: DashboardScope, params: RequestParams) -> Self {
        Self { scope, params }
    }

    /// Dashboard scope.
    #[must_use]
    pub const fn scope(&self) -> &DashboardScope {
        &self.scope
    }

    /// Query parameters.
    #[must_use]
    pub const fn params(&self) -> &RequestParams {
        &self.params
    }

    /// Stable identity of scope and params together.
    #[must_use]
    pub fn request_key(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
