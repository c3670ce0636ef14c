//! Pulseboard probe
//!
//! Resolves the default dashboard filter, loads the dimension options and
//! optionally fetches one table endpoint with the resulting parameters.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulseboard_api::{ApiClient, FilterContext, TableWidget};
use pulseboard_core::{DashboardScope, FilterState};
use pulseboard_core::table::TableView;
use pulseboard_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulseboard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    config.validate()?;

    let client = Arc::new(ApiClient::from_config(&config.api)?);
    info!(base_url = %client.base_url(), "API client configured");

    let scope = config
        .dashboard
        .warehouse
        .as_deref()
        .map_or(DashboardScope::Sales, DashboardScope::inventory);
    let context =
        FilterContext::with_state_unloaded(client.clone(), FilterState::for_today(scope.clone()));

    info!(
        scope = %scope,
        summary = %context.summary().await,
        description = %context.description().await,
        "Filter resolved"
    );
    println!("{}", context.request_key());

    let (customers, group_types) = context.refresh_options().await;
    for set in [&customers, &group_types] {
        match &set.error {
            Some(message) => warn!(dimension = set.dimension.query_key(), %message, "Options unavailable"),
            None => info!(
                dimension = set.dimension.query_key(),
                count = set.options.len().saturating_sub(1),
                "Options loaded"
            ),
        }
    }

    let Some(path) = config.dashboard.table_path.as_deref() else {
        return Ok(());
    };

    let widget = TableWidget::<Value>::builder(client, path)
        .table_config(&config.table)
        .filter(context.scoped_params())
        .build();
    widget.refresh().await;

    let snapshot = widget.snapshot().await;
    match snapshot.table.view() {
        TableView::Rows(rows) => {
            if let Some(pagination) = snapshot.table.pagination() {
                info!(path, "{}", pagination.range_text());
            }
            for row in rows {
                println!("{row}");
            }
        }
        TableView::Empty => info!(path, "No data available"),
        TableView::Error(message) => anyhow::bail!("{path}: {message}"),
        TableView::Loading => warn!(path, "Fetch still in flight"),
    }

    Ok(())
}
