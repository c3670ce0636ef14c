//! Dimension filters layered on top of the date range.

use serde::{Deserialize, Serialize};

/// Reserved dimension value meaning "no filter applied".
pub const ALL_SENTINEL: &str = "all";

/// A categorical filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Customer name.
    Customer,
    /// Product group type description.
    GroupType,
}

impl Dimension {
    /// All dimensions in display order.
    pub const ALL: [Self; 2] = [Self::Customer, Self::GroupType];

    /// Query parameter name.
    #[must_use]
    pub const fn query_key(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::GroupType => "group_type_desc",
        }
    }

    /// Field read from each row of the option collection.
    #[must_use]
    pub const fn row_field(self) -> &'static str {
        self.query_key()
    }

    /// Collection endpoint listing the known values, relative to the scope.
    #[must_use]
    pub const fn collection_path(self) -> &'static str {
        match self {
            Self::Customer => "customers",
            Self::GroupType => "group-types",
        }
    }

    /// Singular label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::GroupType => "Group Type",
        }
    }

    /// Plural label.
    #[must_use]
    pub const fn plural_label(self) -> &'static str {
        match self {
            Self::Customer => "Customers",
            Self::GroupType => "Group Types",
        }
    }

    /// Label of the sentinel option, e.g. "All Customers".
    #[must_use]
    pub fn all_label(self) -> String {
        format!("All {}", self.plural_label())
    }
}

/// Returns true if `value` narrows the query (non-blank and not the sentinel).
#[must_use]
pub fn is_active_value(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != ALL_SENTINEL
}

/// Current value of every dimension filter. Defaults to the sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionSelections {
    customer: String,
    group_type: String,
}

impl Default for DimensionSelections {
    fn default() -> Self {
        Self {
            customer: ALL_SENTINEL.to_string(),
            group_type: ALL_SENTINEL.to_string(),
        }
    }
}

impl DimensionSelections {
    /// Current value of `dimension`.
    #[must_use]
    pub fn get(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Customer => &self.customer,
            Dimension::GroupType => &self.group_type,
        }
    }

    /// Sets `dimension`. A blank value is stored as the sentinel.
    pub fn set(&mut self, dimension: Dimension, value: impl Into<String>) {
        let value = value.into();
        let value = if value.trim().is_empty() {
            ALL_SENTINEL.to_string()
        } else {
            value
        };

        match dimension {
            Dimension::Customer => self.customer = value,
            Dimension::GroupType => self.group_type = value,
        }
    }

    /// Returns true if `dimension` currently narrows the query.
    #[must_use]
    pub fn is_filtered(&self, dimension: Dimension) -> bool {
        is_active_value(self.get(dimension))
    }

    /// Dimensions that currently narrow the query, with their values.
    pub fn active(&self) -> impl Iterator<Item = (Dimension, &str)> {
        Dimension::ALL
            .into_iter()
            .map(|dimension| (dimension, self.get(dimension)))
            .filter(|(_, value)| is_active_value(value))
    }
}
