//! Reduction of raw collection rows into dropdown options.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::params::{ALL_SENTINEL, Dimension};

/// One entry of a filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionOption {
    /// Value sent as the query parameter.
    pub value: String,
    /// Text shown to the user.
    pub label: String,
}

impl DimensionOption {
    /// The synthetic "no filter" entry, e.g. `{all, "All Customers"}`.
    #[must_use]
    pub fn all(dimension: Dimension) -> Self {
        Self {
            value: ALL_SENTINEL.to_string(),
            label: dimension.all_label(),
        }
    }

    /// Returns true for the sentinel entry.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        self.value == ALL_SENTINEL
    }
}

/// Builds the option list for `dimension` from collection rows.
///
/// Reads the dimension's field from every row, drops missing or falsy values,
/// deduplicates, sorts ascending and puts the sentinel first.
#[must_use]
pub fn build_options(dimension: Dimension, rows: &[Value]) -> Vec<DimensionOption> {
    let distinct: BTreeSet<String> = rows
        .iter()
        .filter_map(|row| field_value(row, dimension.row_field()))
        .filter(|value| value != ALL_SENTINEL)
        .collect();

    std::iter::once(DimensionOption::all(dimension))
        .chain(distinct.into_iter().map(|value| DimensionOption {
            label: value.clone(),
            value,
        }))
        .collect()
}

fn field_value(row: &Value, field: &str) -> Option<String> {
    match row.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Loaded options of one dimension plus the outcome of the last load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSet {
    /// Dimension these options belong to.
    pub dimension: Dimension,
    /// Options, sentinel first. Never empty.
    pub options: Vec<DimensionOption>,
    /// True while a load is in flight.
    pub loading: bool,
    /// Message of the last failed load.
    pub error: Option<String>,
}

impl OptionSet {
    /// Set shown before the first load completes.
    #[must_use]
    pub fn pending(dimension: Dimension) -> Self {
        Self {
            dimension,
            options: vec![DimensionOption::all(dimension)],
            loading: true,
            error: None,
        }
    }

    /// Set built from successfully fetched rows.
    #[must_use]
    pub fn loaded(dimension: Dimension, rows: &[Value]) -> Self {
        Self {
            dimension,
            options: build_options(dimension, rows),
            loading: false,
            error: None,
        }
    }

    /// Degraded set after a failed load: the sentinel alone plus the message.
    #[must_use]
    pub fn failed(dimension: Dimension, message: impl Into<String>) -> Self {
        Self {
            dimension,
            options: vec![DimensionOption::all(dimension)],
            loading: false,
            error: Some(message.into()),
        }
    }

    /// Option values, sentinel included.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|option| option.value.as_str())
    }

    /// Returns true if `value` is one of the options.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values().any(|v| v == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_sorted_deduplicated_with_sentinel_first() {
        let rows = vec![
            json!({"customer": "Globex"}),
            json!({"customer": "Acme"}),
            json!({"customer": "Globex"}),
            json!({"customer": "Initech"}),
        ];

        let options = build_options(Dimension::Customer, &rows);
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();

        assert_eq!(values, vec!["all", "Acme", "Globex", "Initech"]);
        assert_eq!(options[0].label, "All Customers");
        assert_eq!(options[1].label, "Acme");
    }

    #[test]
    fn test_falsy_and_missing_values_dropped() {
        let rows = vec![
            json!({"group_type_desc": ""}),
            json!({"group_type_desc": null}),
            json!({"group_type_desc": false}),
            json!({"group_type_desc": 0}),
            json!({"other": "x"}),
            json!("not an object"),
            json!({"group_type_desc": "Packaging"}),
        ];

        let options = build_options(Dimension::GroupType, &rows);
        assert_eq!(options.len(), 2);
        assert!(options[0].is_sentinel());
        assert_eq!(options[1].value, "Packaging");
    }

    #[test]
    fn test_numeric_values_are_stringified() {
        let rows = vec![json!({"customer": 1042}), json!({"customer": 17})];
        let options = build_options(Dimension::Customer, &rows);
        // Lexicographic, not numeric.
        assert_eq!(options[1].value, "1042");
        assert_eq!(options[2].value, "17");
    }

    #[test]
    fn test_literal_sentinel_in_data_not_duplicated() {
        let rows = vec![json!({"customer": "all"}), json!({"customer": "Acme"})];
        let options = build_options(Dimension::Customer, &rows);
        assert_eq!(options.iter().filter(|o| o.is_sentinel()).count(), 1);
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn test_empty_rows_yield_sentinel_only() {
        let options = build_options(Dimension::GroupType, &[]);
        assert_eq!(options, vec![DimensionOption::all(Dimension::GroupType)]);
    }

    #[test]
    fn test_option_set_states() {
        let pending = OptionSet::pending(Dimension::Customer);
        assert!(pending.loading);
        assert!(pending.contains("all"));

        let failed = OptionSet::failed(Dimension::Customer, "Network error: refused");
        assert!(!failed.loading);
        assert_eq!(failed.options.len(), 1);
        assert_eq!(failed.error.as_deref(), Some("Network error: refused"));

        let loaded = OptionSet::loaded(Dimension::Customer, &[json!({"customer": "Acme"})]);
        assert!(loaded.error.is_none());
        assert!(loaded.contains("Acme"));
        assert_eq!(loaded.values().collect::<Vec<_>>(), vec!["all", "Acme"]);
    }
}
