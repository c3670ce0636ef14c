//! Remote loader for dimension dropdown options.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use pulseboard_core::DashboardScope;
use pulseboard_core::options::OptionSet;
use pulseboard_core::params::Dimension;
use pulseboard_core::table::Envelope;
use pulseboard_shared::AppResult;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::source::DataSource;

/// Loads and holds the option list of one dimension.
///
/// The list is global: it is fetched without date or dimension parameters so
/// it contains every historical value. Failures never escape the loader; the
/// list degrades to the sentinel and keeps the message.
#[derive(Clone)]
pub struct DimensionOptionLoader {
    inner: Arc<LoaderInner>,
}

struct LoaderInner {
    source: Arc<dyn DataSource>,
    dimension: Dimension,
    scope: RwLock<DashboardScope>,
    options: RwLock<OptionSet>,
    generation: AtomicU64,
}

impl DimensionOptionLoader {
    /// Creates a loader in the pending state. Nothing is fetched yet.
    pub fn new(source: Arc<dyn DataSource>, dimension: Dimension, scope: DashboardScope) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                source,
                dimension,
                scope: RwLock::new(scope),
                options: RwLock::new(OptionSet::pending(dimension)),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Dimension this loader serves.
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.inner.dimension
    }

    /// Current option set.
    pub async fn options(&self) -> OptionSet {
        self.inner.options.read().await.clone()
    }

    /// Points the loader at another scope. Call [`Self::refresh`] afterwards.
    pub async fn set_scope(&self, scope: DashboardScope) {
        *self.inner.scope.write().await = scope;
    }

    /// Fetches the option list again and returns the resulting set.
    ///
    /// When refreshes overlap, only the most recently started one is stored.
    pub async fn refresh(&self) -> OptionSet {
        let inner = &self.inner;
        let generation = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        inner.options.write().await.loading = true;

        let path = inner.scope.read().await.options_path(inner.dimension);
        let outcome = match self.load(&path).await {
            Ok(rows) => OptionSet::loaded(inner.dimension, &rows),
            Err(err) => {
                warn!(
                    dimension = inner.dimension.query_key(),
                    path = %path,
                    error = %err,
                    "failed to load filter options"
                );
                OptionSet::failed(inner.dimension, err.to_string())
            }
        };

        if inner.generation.load(Ordering::SeqCst) == generation {
            *inner.options.write().await = outcome.clone();
        } else {
            debug!(
                dimension = inner.dimension.query_key(),
                "discarding superseded option load"
            );
        }

        outcome
    }

    async fn load(&self, path: &str) -> AppResult<Vec<Value>> {
        let body = self.inner.source.fetch(path, &[]).await?;
        let (rows, _) = Envelope::<Value>::decode(body)?.into_parts();
        Ok(rows)
    }
}

impl std::fmt::Debug for DimensionOptionLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DimensionOptionLoader")
            .field("dimension", &self.inner.dimension)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSource;
    use pulseboard_shared::AppError;
    use serde_json::json;

    #[tokio::test]
    async fn test_refresh_builds_sorted_options_from_wrapped_rows() {
        let source = FakeSource::new().route(
            "sales/customers",
            Ok(json!({"data": [
                {"customer": "Zenith"},
                {"customer": "Acme"},
                {"customer": ""},
                {"customer": "Acme"},
                {"customer": null}
            ]})),
        );
        let loader = DimensionOptionLoader::new(source.clone(), Dimension::Customer, DashboardScope::Sales);

        assert!(loader.options().await.loading);
        let set = loader.refresh().await;

        assert!(!set.loading);
        assert!(set.error.is_none());
        assert_eq!(set.values().collect::<Vec<_>>(), vec!["all", "Acme", "Zenith"]);
        assert_eq!(set.options[0].label, "All Customers");
        assert_eq!(loader.options().await, set);
        assert!(source.queries().iter().all(Vec::is_empty));
    }

    #[tokio::test]
    async fn test_failure_degrades_to_sentinel() {
        let source = FakeSource::new().route(
            "inventory/WH-01/group-types",
            Err(AppError::status(503, "Service Unavailable")),
        );
        let loader = DimensionOptionLoader::new(
            source,
            Dimension::GroupType,
            DashboardScope::inventory("WH-01"),
        );

        let set = loader.refresh().await;
        assert_eq!(set.values().collect::<Vec<_>>(), vec!["all"]);
        assert_eq!(set.options[0].label, "All Group Types");
        assert_eq!(
            set.error.as_deref(),
            Some("Request failed with status 503: Service Unavailable")
        );
    }

    #[tokio::test]
    async fn test_refresh_after_scope_change_uses_new_prefix() {
        let source = FakeSource::new()
            .route("inventory/WH-01/customers", Ok(json!([{"customer": "North"}])))
            .route("inventory/WH-02/customers", Ok(json!([{"customer": "South"}])));
        let loader = DimensionOptionLoader::new(
            source.clone(),
            Dimension::Customer,
            DashboardScope::inventory("WH-01"),
        );

        loader.refresh().await;
        assert!(loader.options().await.contains("North"));

        loader.set_scope(DashboardScope::inventory("WH-02")).await;
        loader.refresh().await;

        let set = loader.options().await;
        assert!(set.contains("South"));
        assert!(!set.contains("North"));
        assert_eq!(
            source.paths(),
            vec!["inventory/WH-01/customers", "inventory/WH-02/customers"]
        );
    }

    #[tokio::test]
    async fn test_object_envelope_yields_sentinel_only() {
        let source = FakeSource::new().route("sales/customers", Ok(json!({"total": 3})));
        let loader = DimensionOptionLoader::new(source, Dimension::Customer, DashboardScope::Sales);

        let set = loader.refresh().await;
        assert_eq!(set.options.len(), 1);
        assert!(set.error.is_none());
    }
}
