//! Response envelope normalization.
//!
//! The API is not uniform about how it wraps result rows. Shapes are probed in
//! this order:
//!
//! 1. a bare array: `[...]`
//! 2. a wrapped array: `{"data": [...]}`
//! 3. a doubly wrapped array: `{"data": {"data": [...], "pagination": {...}}}`,
//!    with `pagination` also accepted next to the outer `data`
//!
//! Anything else is kept as [`Envelope::Object`] and yields no rows.

use pulseboard_shared::AppResult;
use pulseboard_shared::types::PaginationInfo;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    /// `[...]`
    Bare(Vec<T>),
    /// `{"data": [...]}`
    Wrapped(Vec<T>),
    /// `{"data": {"data": [...]}}`, with optional pagination.
    DoublyWrapped(Vec<T>, Option<PaginationInfo>),
    /// A domain object with named fields (e.g. `{stages, conversion_rates}`),
    /// or any other body that carries no row list.
    Object(Value),
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decodes a JSON body.
    ///
    /// An unrecognized shape is not an error. Rows that do not deserialize
    /// into `T` are.
    pub fn decode(body: Value) -> AppResult<Self> {
        match body {
            Value::Array(items) => Ok(Self::Bare(decode_rows(items)?)),
            Value::Object(map) => Self::decode_object(map),
            other => Ok(Self::Object(other)),
        }
    }

    fn decode_object(mut map: Map<String, Value>) -> AppResult<Self> {
        if map.get("data").is_some_and(Value::is_array)
            && let Some(Value::Array(items)) = map.remove("data")
        {
            return Ok(Self::Wrapped(decode_rows(items)?));
        }

        let nested = map
            .get("data")
            .and_then(|data| data.get("data"))
            .is_some_and(Value::is_array);

        if nested
            && let Some(Value::Object(mut inner)) = map.remove("data")
            && let Some(Value::Array(items)) = inner.remove("data")
        {
            let pagination = inner
                .remove("pagination")
                .or_else(|| map.remove("pagination"))
                .and_then(decode_pagination);
            return Ok(Self::DoublyWrapped(decode_rows(items)?, pagination));
        }

        Ok(Self::Object(Value::Object(map)))
    }
}

impl<T> Envelope<T> {
    /// Rows carried by this envelope; empty for [`Envelope::Object`].
    #[must_use]
    pub fn rows(&self) -> &[T] {
        match self {
            Self::Bare(rows) | Self::Wrapped(rows) | Self::DoublyWrapped(rows, _) => rows,
            Self::Object(_) => &[],
        }
    }

    /// Pagination metadata, only present on the doubly wrapped shape.
    #[must_use]
    pub fn pagination(&self) -> Option<&PaginationInfo> {
        match self {
            Self::DoublyWrapped(_, pagination) => pagination.as_ref(),
            _ => None,
        }
    }

    /// Keeps only the rows matching `keep`.
    pub fn retain(&mut self, keep: impl Fn(&T) -> bool) {
        match self {
            Self::Bare(rows) | Self::Wrapped(rows) | Self::DoublyWrapped(rows, _) => {
                rows.retain(|row| keep(row));
            }
            Self::Object(_) => {}
        }
    }

    /// Splits into rows and pagination.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<PaginationInfo>) {
        match self {
            Self::Bare(rows) | Self::Wrapped(rows) => (rows, None),
            Self::DoublyWrapped(rows, pagination) => (rows, pagination),
            Self::Object(_) => (Vec::new(), None),
        }
    }

    /// Name of the decoded shape, for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bare(_) => "bare",
            Self::Wrapped(_) => "wrapped",
            Self::DoublyWrapped(..) => "doubly_wrapped",
            Self::Object(_) => "object",
        }
    }
}

/// Row predicate keeping rows whose `field` is null or missing.
pub fn field_is_null(field: &str) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    let field = field.to_string();
    move |row| row.get(&field).is_none_or(Value::is_null)
}

fn decode_rows<T: DeserializeOwned>(items: Vec<Value>) -> AppResult<Vec<T>> {
    Ok(serde_json::from_value(Value::Array(items))?)
}

fn decode_pagination(value: Value) -> Option<PaginationInfo> {
    serde_json::from_value(value).ok()
}
