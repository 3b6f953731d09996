//! Response payloads.
//!
//! The wire shape is the legacy one downstream consumers already parse:
//! PascalCase summary fields, camelCase item objects, and a `debug`
//! block describing how the scan went.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use rapscan_core::{shape, InventoryItem, InventoryQuery};
use rapscan_inventory::AggregatedInventory;

/// Scan diagnostics attached to the full summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    /// Sellable items found by the scan, before query filtering.
    pub total_fetched: usize,
    pub limited_items: usize,
    pub limited_unique_items: usize,
    /// Sellable items per source tag.
    pub source_breakdown: BTreeMap<String, usize>,
    /// Walk outcome per fetch task label.
    pub source_outcomes: BTreeMap<String, String>,
    pub filter_applied: String,
}

impl DebugInfo {
    fn collect(aggregated: &AggregatedInventory, filter: &str) -> Self {
        let mut source_breakdown = BTreeMap::new();
        for item in &aggregated.items {
            *source_breakdown.entry(item.source.to_string()).or_insert(0) += 1;
        }
        let source_outcomes = aggregated
            .reports
            .iter()
            .map(|r| (r.label.clone(), r.outcome.to_string()))
            .collect();
        Self {
            total_fetched: aggregated.items.len(),
            limited_items: aggregated.limited_count(),
            limited_unique_items: aggregated.limited_unique_count(),
            source_breakdown,
            source_outcomes,
            filter_applied: filter.to_string(),
        }
    }
}

/// Full aggregate summary for `GET /inventory/{userId}`.
#[derive(Debug, Clone, Serialize)]
pub struct InventorySummary {
    pub success: bool,
    pub message: String,
    pub debug: DebugInfo,
    #[serde(rename = "TotalCount")]
    pub total_count: usize,
    #[serde(rename = "TotalValue")]
    pub total_value: u64,
    #[serde(rename = "ItemsWithValue")]
    pub items_with_value: usize,
    #[serde(rename = "MostExpensiveName")]
    pub most_expensive_name: String,
    #[serde(rename = "MostExpensiveImage")]
    pub most_expensive_image: String,
    #[serde(rename = "MostExpensiveValue")]
    pub most_expensive_value: u64,
    #[serde(rename = "Page")]
    pub page: u32,
    #[serde(rename = "Limit")]
    pub limit: u32,
    #[serde(rename = "TotalPages")]
    pub total_pages: u32,
    #[serde(rename = "SortBy")]
    pub sort_by: String,
    #[serde(rename = "Filter")]
    pub filter: String,
    #[serde(rename = "Items")]
    pub items: Vec<InventoryItem>,
}

impl InventorySummary {
    /// Shape a scan result for the wire.
    ///
    /// An empty sellable set is still `success: true`; the message and
    /// the per-source outcomes tell a private inventory apart from an
    /// empty one. A filter that matches nothing keeps the success
    /// message, the zeroes speak for themselves.
    pub fn build(aggregated: AggregatedInventory, query: &InventoryQuery) -> Self {
        let debug = DebugInfo::collect(&aggregated, query.filter.as_str());
        let message = if aggregated.items.is_empty() {
            if aggregated.all_private() {
                "Inventory is private"
            } else {
                "No sellable items found"
            }
        } else {
            "Inventory fetched successfully"
        }
        .to_string();

        let shaped = shape(aggregated.items, query);
        let (top_name, top_image, top_value) = match shaped.most_expensive {
            Some(top) => (top.name, top.image_url, top.value),
            None => ("N/A".to_string(), String::new(), 0),
        };

        Self {
            success: true,
            message,
            debug,
            total_count: shaped.total_count,
            total_value: shaped.total_value,
            items_with_value: shaped.items_with_value,
            most_expensive_name: top_name,
            most_expensive_image: top_image,
            most_expensive_value: top_value,
            page: shaped.page,
            limit: shaped.limit,
            total_pages: shaped.total_pages,
            sort_by: shaped.sort.as_str().to_string(),
            filter: shaped.filter.as_str().to_string(),
            items: shaped.items,
        }
    }
}

/// Reduced item object for the `/sellable` endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellableItem {
    pub asset_id: u64,
    pub name: String,
    pub recent_average_price: u64,
    pub is_limited: bool,
    pub is_limited_unique: bool,
    pub image_url: String,
}

impl From<&InventoryItem> for SellableItem {
    fn from(item: &InventoryItem) -> Self {
        Self {
            asset_id: item.asset_id,
            name: item.name.clone(),
            recent_average_price: item.recent_average_price,
            is_limited: item.is_limited,
            is_limited_unique: item.is_limited_unique,
            image_url: item.image_url.clone(),
        }
    }
}

/// Compact summary for `GET /sellable/{userId}`: the whole sellable set,
/// value-sorted, no filter or sort parameters.
#[derive(Debug, Clone, Serialize)]
pub struct SellableSummary {
    pub success: bool,
    #[serde(rename = "TotalCount")]
    pub total_count: usize,
    #[serde(rename = "TotalValue")]
    pub total_value: u64,
    #[serde(rename = "Page")]
    pub page: u32,
    #[serde(rename = "Limit")]
    pub limit: u32,
    #[serde(rename = "TotalPages")]
    pub total_pages: u32,
    #[serde(rename = "Items")]
    pub items: Vec<SellableItem>,
}

impl SellableSummary {
    pub fn build(aggregated: AggregatedInventory, page: u32, limit: u32) -> Self {
        let query = InventoryQuery {
            page,
            limit,
            ..InventoryQuery::default()
        };
        let shaped = shape(aggregated.items, &query);
        Self {
            success: true,
            total_count: shaped.total_count,
            total_value: shaped.total_value,
            page: shaped.page,
            limit: shaped.limit,
            total_pages: shaped.total_pages,
            items: shaped.items.iter().map(SellableItem::from).collect(),
        }
    }
}

/// Body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

impl HealthStatus {
    pub fn now() -> Self {
        Self {
            status: "OK",
            timestamp: Utc::now(),
        }
    }
}
