//! Data source seam between widgets and the network.

use async_trait::async_trait;
use pulseboard_shared::AppResult;
use serde_json::Value;

use crate::client::ApiClient;

/// Anything that can answer a GET with a JSON body.
///
/// Widgets and loaders depend on this trait rather than on [`ApiClient`] so
/// they can be exercised without a server.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches `path` with the given query parameters.
    async fn fetch(&self, path: &str, query: &[(String, String)]) -> AppResult<Value>;
}

#[async_trait]
impl DataSource for ApiClient {
    async fn fetch(&self, path: &str, query: &[(String, String)]) -> AppResult<Value> {
        self.get_json(path, query).await
    }
}
