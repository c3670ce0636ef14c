//! HTTP client for the metrics API.

use std::time::Duration;

use pulseboard_shared::config::ApiConfig;
use pulseboard_shared::{AppError, AppResult};
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, warn};

/// Longest response body echoed into a status error.
const MAX_ERROR_BODY: usize = 200;

/// Thin `reqwest` wrapper that turns every failure into an [`AppError`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client from configuration.
    pub fn from_config(config: &ApiConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(e.to_string()))?;

        Ok(Self::with_client(http, &config.base_url))
    }

    /// Creates a client around an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of `path`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GETs `path` with `query` and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// - [`AppError::Transport`] if no response arrived
    /// - [`AppError::Status`] for any non-2xx status
    /// - [`AppError::Decode`] if the body is not JSON
    pub async fn get_json(&self, path: &str, query: &[(String, String)]) -> AppResult<Value> {
        let url = self.endpoint(path);
        debug!(url = %url, params = query.len(), "GET");

        let response = self
            .http
            .get(&url)
            .query(query)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = %url, status = status.as_u16(), "request failed");
            return Err(AppError::status(status.as_u16(), status_message(status, &body)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(AppError::from)
    }
}

/// Message for a failed response: the API's `message` field, else the body,
/// else the reason phrase.
fn status_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body)
        && let Some(Value::String(message)) = map.get("message")
        && !message.trim().is_empty()
    {
        return message.trim().to_string();
    }

    let body = body.trim();
    if body.is_empty() {
        return status.canonical_reason().unwrap_or("Unknown status").to_string();
    }

    body.chars().take(MAX_ERROR_BODY).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn client(base: &str) -> ApiClient {
        ApiClient::with_client(reqwest::Client::new(), base)
    }

    #[rstest]
    #[case("http://bi.local/api", "sales/customers", "http://bi.local/api/sales/customers")]
    #[case("http://bi.local/api/", "/sales/customers", "http://bi.local/api/sales/customers")]
    #[case(" http://bi.local ", "inventory/WH1/stock", "http://bi.local/inventory/WH1/stock")]
    fn test_endpoint_joining(#[case] base: &str, #[case] path: &str, #[case] expected: &str) {
        assert_eq!(client(base).endpoint(path), expected);
    }

    #[test]
    fn test_from_config() {
        let config = ApiConfig {
            base_url: "https://bi.example.com/api/".into(),
            timeout_secs: 5,
        };
        let client = ApiClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "https://bi.example.com/api");
    }

    #[test]
    fn test_status_message_prefers_api_message() {
        let body = r#"{"message":"Warehouse not found"}"#;
        assert_eq!(
            status_message(StatusCode::NOT_FOUND, body),
            "Warehouse not found"
        );
    }

    #[test]
    fn test_status_message_falls_back_to_body_then_reason() {
        assert_eq!(
            status_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
        assert_eq!(
            status_message(StatusCode::SERVICE_UNAVAILABLE, ""),
            "Service Unavailable"
        );
        assert_eq!(
            status_message(StatusCode::INTERNAL_SERVER_ERROR, &"x".repeat(500)).len(),
            MAX_ERROR_BODY
        );
    }
}
