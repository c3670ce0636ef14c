//! Integration tests for the HTTP client.
//!
//! A local axum router stands in for the metrics API so the client is
//! exercised over a real socket.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use pulseboard_api::{ApiClient, DataSource, FilterContext, TableWidget};
use pulseboard_core::params::Dimension;
use pulseboard_core::table::TableView;
use pulseboard_core::{DashboardScope, FilterState};
use pulseboard_shared::AppError;
use pulseboard_shared::config::ApiConfig;

async fn echo_query(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({ "data": { "data": [params], "pagination": {
        "total": 1, "per_page": 20, "current_page": 1, "last_page": 1, "from": 1, "to": 1
    }}}))
}

async fn customers() -> Json<Value> {
    Json(json!({ "data": [
        {"customer": "Globex"},
        {"customer": "Acme"},
        {"customer": "Globex"},
        {"customer": ""}
    ]}))
}

async fn group_types() -> Json<Value> {
    Json(json!([{"group_type_desc": "Retail"}, {"group_type_desc": "Wholesale"}]))
}

async fn failing() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "Database unavailable"})),
    )
}

async fn not_json() -> &'static str {
    "<html>maintenance</html>"
}

async fn spawn_api() -> ApiClient {
    let app = Router::new()
        .route("/api/sales/orders", get(echo_query))
        .route("/api/sales/customers", get(customers))
        .route("/api/sales/group-types", get(group_types))
        .route("/api/sales/broken", get(failing))
        .route("/api/sales/maintenance", get(not_json));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ApiClient::from_config(&ApiConfig {
        base_url: format!("http://{addr}/api/"),
        timeout_secs: 5,
    })
    .unwrap()
}

fn jan_2025() -> FilterState {
    FilterState::new(
        DashboardScope::Sales,
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
    )
}

#[tokio::test]
async fn test_query_params_reach_the_server() {
    let client = spawn_api().await;
    let mut filter = jan_2025();
    filter.set_dimension(Dimension::Customer, "Acme");
    filter.set_dimension(Dimension::GroupType, "all");

    let body = client
        .get_json("sales/orders", &filter.request_params().to_query_pairs())
        .await
        .unwrap();

    let echoed = &body["data"]["data"][0];
    assert_eq!(echoed["period"], "daily");
    assert_eq!(echoed["date_from"], "2025-01-01");
    assert_eq!(echoed["date_to"], "2025-01-31");
    assert_eq!(echoed["customer"], "Acme");
    assert!(echoed.get("group_type_desc").is_none());
}

#[tokio::test]
async fn test_non_success_status_carries_code_and_message() {
    let client = spawn_api().await;

    let err = client.get_json("sales/broken", &[]).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(
        err.to_string(),
        "Request failed with status 500: Database unavailable"
    );

    let err = client.get_json("sales/missing", &[]).await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let client = spawn_api().await;

    let err = client.get_json("sales/maintenance", &[]).await.unwrap_err();
    assert!(matches!(err, AppError::Decode(_)));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::with_client(reqwest::Client::new(), &format!("http://{addr}"));
    let err = client.fetch("sales/orders", &[]).await.unwrap_err();
    assert_eq!(err.error_code(), "TRANSPORT_ERROR");
}

#[tokio::test]
async fn test_context_and_widget_over_http() {
    let client = Arc::new(spawn_api().await);
    let context = FilterContext::with_state_unloaded(client.clone(), jan_2025());

    let (customers, group_types) = context.refresh_options().await;
    assert_eq!(
        customers.values().collect::<Vec<_>>(),
        vec!["all", "Acme", "Globex"]
    );
    assert_eq!(
        group_types.values().collect::<Vec<_>>(),
        vec!["all", "Retail", "Wholesale"]
    );

    let widget = TableWidget::<Value>::builder(client.clone(), "sales/orders")
        .filter(context.scoped_params())
        .build();
    assert!(widget.refresh().await);

    let snapshot = widget.snapshot().await;
    let TableView::Rows(rows) = snapshot.table.view() else {
        panic!("expected rows");
    };
    assert_eq!(rows[0]["page"], "1");
    assert_eq!(rows[0]["per_page"], "20");
    assert_eq!(snapshot.table.pagination().unwrap().range_text(), "Showing 1 to 1 of 1 results");

    let broken = TableWidget::<Value>::builder(client, "sales/broken").build();
    broken.refresh().await;
    assert_eq!(
        broken.snapshot().await.table.error(),
        Some("Request failed with status 500: Database unavailable")
    );
}
