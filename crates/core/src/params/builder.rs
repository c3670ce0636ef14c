//! Request parameters and their builder.

use chrono::NaiveDate;
use serde::Serialize;

use super::dimension::{Dimension, DimensionSelections, is_active_value};
use crate::period::{DateRange, FilterMode, format_iso};

/// Canonical query-parameter set for filter-aware endpoints.
///
/// Only constructible through [`RequestParamsBuilder`], so an optional field
/// is either absent or holds a real value: never blank, never `"all"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RequestParams {
    period: FilterMode,
    date_from: NaiveDate,
    date_to: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group_type_desc: Option<String>,
}

impl RequestParams {
    /// Starts a builder for the given mode and resolved range.
    #[must_use]
    pub fn builder(period: FilterMode, range: DateRange) -> RequestParamsBuilder {
        RequestParamsBuilder {
            period,
            range,
            customer: None,
            group_type_desc: None,
        }
    }

    /// Mode tag.
    #[must_use]
    pub const fn period(&self) -> FilterMode {
        self.period
    }

    /// Resolved date range.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        DateRange {
            from: self.date_from,
            to: self.date_to,
        }
    }

    /// Value sent for `dimension`, if any.
    #[must_use]
    pub fn dimension(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Customer => self.customer.as_deref(),
            Dimension::GroupType => self.group_type_desc.as_deref(),
        }
    }

    /// Flat `(key, value)` pairs ready for a query string.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("period".to_string(), self.period.as_str().to_string()),
            ("date_from".to_string(), format_iso(self.date_from)),
            ("date_to".to_string(), format_iso(self.date_to)),
        ];

        for dimension in Dimension::ALL {
            if let Some(value) = self.dimension(dimension) {
                pairs.push((dimension.query_key().to_string(), value.to_string()));
            }
        }

        pairs
    }

    /// Stable identity of these params: their JSON serialization.
    #[must_use]
    pub fn request_key(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Builder for [`RequestParams`].
#[derive(Debug, Clone)]
pub struct RequestParamsBuilder {
    period: FilterMode,
    range: DateRange,
    customer: Option<String>,
    group_type_desc: Option<String>,
}

impl RequestParamsBuilder {
    /// Sets a dimension filter. Blank values and the sentinel clear it.
    #[must_use]
    pub fn dimension(mut self, dimension: Dimension, value: &str) -> Self {
        let value = value.trim();
        let slot = match dimension {
            Dimension::Customer => &mut self.customer,
            Dimension::GroupType => &mut self.group_type_desc,
        };
        *slot = is_active_value(value).then(|| value.to_string());
        self
    }

    /// Copies every active dimension from `selections`.
    #[must_use]
    pub fn dimensions(self, selections: &DimensionSelections) -> Self {
        Dimension::ALL.into_iter().fold(self, |builder, dimension| {
            builder.dimension(dimension, selections.get(dimension))
        })
    }

    /// Finishes the params.
    #[must_use]
    pub fn build(self) -> RequestParams {
        RequestParams {
            period: self.period,
            date_from: self.range.from,
            date_to: self.range.to,
            customer: self.customer,
            group_type_desc: self.group_type_desc,
        }
    }
}
