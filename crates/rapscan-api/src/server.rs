//! Routes, handlers, and the serve loop.

use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tracing::info;

use rapscan_core::{InventoryQuery, ItemFilter, SortKey};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{HealthStatus, InventorySummary, SellableSummary};

/// Raw query parameters as strings. Conversion is lenient: anything
/// unparseable falls back to its default, matching the legacy service.
#[derive(Debug, Default, Deserialize)]
struct InventoryParams {
    page: Option<String>,
    limit: Option<String>,
    #[serde(rename = "sortBy")]
    sort_by: Option<String>,
    filter: Option<String>,
    #[serde(rename = "minValue")]
    min_value: Option<String>,
}

impl InventoryParams {
    fn to_query(&self) -> InventoryQuery {
        let defaults = InventoryQuery::default();
        InventoryQuery {
            filter: self
                .filter
                .as_deref()
                .map(ItemFilter::parse)
                .unwrap_or(defaults.filter),
            sort: self
                .sort_by
                .as_deref()
                .map(SortKey::parse)
                .unwrap_or(defaults.sort),
            page: parse_or(self.page.as_deref(), defaults.page),
            limit: parse_or(self.limit.as_deref(), defaults.limit),
            min_value: parse_or(self.min_value.as_deref(), 0),
        }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// Create the axum router. CORS is wide open, the data served is public.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/inventory/{user_id}", get(get_inventory))
        .route("/sellable/{user_id}", get(get_sellable))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Full aggregate summary with filter/sort/pagination parameters.
async fn get_inventory(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
    Query(params): Query<InventoryParams>,
) -> Result<Json<InventorySummary>, ApiError> {
    let query = params.to_query();
    info!(user_id, filter = %query.filter, sort = %query.sort, "inventory request");

    let aggregated = state.provider.scan(user_id).await?;
    Ok(Json(InventorySummary::build(aggregated, &query)))
}

/// Compact value-sorted listing of the whole sellable set.
async fn get_sellable(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
    Query(params): Query<InventoryParams>,
) -> Result<Json<SellableSummary>, ApiError> {
    let query = params.to_query();
    info!(user_id, "sellable request");

    let aggregated = state.provider.scan(user_id).await?;
    Ok(Json(SellableSummary::build(aggregated, query.page, query.limit)))
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::now())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}

/// Run the API server until the listener fails or ctrl-c arrives.
pub async fn run_server(
    state: AppState,
    config: ApiConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(state);
    let addr = config.bind_addr();
    info!(addr = %addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use rapscan_core::{InventoryItem, ItemSource};
    use rapscan_inventory::{AggregatedInventory, SourceReport};
    use rapscan_roblox::SourceOutcome;

    use crate::state::InventoryProvider;

    struct FixedProvider {
        result: AggregatedInventory,
    }

    #[async_trait]
    impl InventoryProvider for FixedProvider {
        async fn scan(&self, _user_id: u64) -> Result<AggregatedInventory, ApiError> {
            Ok(self.result.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl InventoryProvider for FailingProvider {
        async fn scan(&self, _user_id: u64) -> Result<AggregatedInventory, ApiError> {
            Err(ApiError::scan("scan task aborted"))
        }
    }

    fn limited(id: u64, name: &str, price: u64) -> InventoryItem {
        let mut item = InventoryItem::new(id, ItemSource::Assets);
        item.name = name.to_string();
        item.recent_average_price = price;
        item.is_limited = true;
        item
    }

    fn state_with(items: Vec<InventoryItem>) -> AppState {
        let total_fetched = items.len();
        let result = AggregatedInventory {
            items,
            total_fetched,
            reports: vec![SourceReport {
                source: ItemSource::Assets,
                label: "assets".to_string(),
                outcome: SourceOutcome::Complete,
                entries: total_fetched,
                pages: 1,
            }],
        };
        AppState::new(Arc::new(FixedProvider { result }))
    }

    fn params(pairs: &[(&str, &str)]) -> InventoryParams {
        let mut p = InventoryParams::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "page" => p.page = value,
                "limit" => p.limit = value,
                "sortBy" => p.sort_by = value,
                "filter" => p.filter = value,
                "minValue" => p.min_value = value,
                other => panic!("unknown param {other}"),
            }
        }
        p
    }

    #[test]
    fn test_params_parse_leniently() {
        let query = params(&[
            ("page", "abc"),
            ("limit", "-5"),
            ("sortBy", "NAME"),
            ("filter", "garbage"),
            ("minValue", "100"),
        ])
        .to_query();

        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 50);
        assert_eq!(query.sort, SortKey::Name);
        assert_eq!(query.filter, ItemFilter::All);
        assert_eq!(query.min_value, 100);
    }

    #[test]
    fn test_params_defaults_when_absent() {
        let query = InventoryParams::default().to_query();
        assert_eq!(query, InventoryQuery::default());
    }

    #[tokio::test]
    async fn test_inventory_handler_shapes_scan() {
        let state = state_with(vec![
            limited(1, "Fedora", 900),
            limited(2, "Valkyrie Helm", 50_000),
        ]);

        let Json(summary) = get_inventory(
            State(state),
            Path(261),
            Query(params(&[("sortBy", "value")])),
        )
        .await
        .unwrap();

        assert!(summary.success);
        assert_eq!(summary.total_count, 2);
        assert_eq!(summary.items[0].asset_id, 2, "value sort descends");
        assert_eq!(summary.debug.source_outcomes["assets"], "complete");
    }

    #[tokio::test]
    async fn test_sellable_handler_pages_by_value() {
        let state = state_with(vec![
            limited(1, "Fedora", 900),
            limited(2, "Valkyrie Helm", 50_000),
            limited(3, "Bucket", 10),
        ]);

        let Json(summary) = get_sellable(
            State(state),
            Path(261),
            Query(params(&[("page", "2"), ("limit", "2")])),
        )
        .await
        .unwrap();

        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.total_pages, 2);
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.items[0].asset_id, 3, "cheapest lands on page 2");
    }

    #[tokio::test]
    async fn test_failing_provider_renders_legacy_500() {
        let state = AppState::new(Arc::new(FailingProvider));

        let err = get_inventory(State(state), Path(1), Query(InventoryParams::default()))
            .await
            .unwrap_err();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let Json(status) = health().await;
        assert_eq!(status.status, "OK");
    }
}
