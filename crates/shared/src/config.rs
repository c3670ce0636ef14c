//! Application configuration management.

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Metrics API configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// Table widget defaults.
    #[serde(default)]
    pub table: TableConfig,
    /// Dashboard selection used by the probe binary.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Metrics API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Table widget defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    /// Rows requested per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Quiet period before a typed search term is promoted.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

fn default_per_page() -> u32 {
    20
}

fn default_search_debounce_ms() -> u64 {
    400
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}

/// Dashboard selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardConfig {
    /// Warehouse code. When set the dashboard is inventory-scoped, otherwise sales.
    pub warehouse: Option<String>,
    /// Endpoint path of a table to fetch once with the resolved filter.
    pub table_path: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PULSEBOARD").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Rejects values the client cannot work with.
    pub fn validate(&self) -> AppResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::Configuration("api.base_url is empty".into()));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "api.timeout_secs must be positive".into(),
            ));
        }
        if self.table.per_page == 0 {
            return Err(AppError::Configuration(
                "table.per_page must be positive".into(),
            ));
        }
        Ok(())
    }
}
