//! Raw payload shapes for the Roblox endpoints.
//!
//! Field coverage differs per endpoint, so everything that is not needed
//! for identity is optional with a default. A record missing its asset id
//! entirely is unusable and gets dropped during conversion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rapscan_core::{AssetTypeRef, InventoryItem, ItemSource, SaleStatus};

/// One page of any cursor-paginated inventory endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPage {
    #[serde(default)]
    pub data: Vec<RawInventoryEntry>,
    #[serde(default)]
    pub next_page_cursor: Option<String>,
}

impl ItemPage {
    /// Cursor for the next page; an absent or empty cursor is terminal.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_page_cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// Inventory entry as any of the three endpoints reports it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInventoryEntry {
    #[serde(default)]
    pub asset_id: Option<u64>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub recent_average_price: Option<u64>,
    #[serde(default)]
    pub is_limited: Option<bool>,
    #[serde(default)]
    pub is_limited_unique: Option<bool>,
    #[serde(default)]
    pub sale_status: Option<String>,
    #[serde(default)]
    pub serial_number: Option<u32>,
    #[serde(default)]
    pub asset_type: Option<AssetTypeRef>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
}

impl RawInventoryEntry {
    /// The collectibles endpoint reports `assetId`, the generic ones `id`.
    pub fn resolved_id(&self) -> Option<u64> {
        self.asset_id.or(self.id)
    }

    /// Convert into the domain record, tagged with its source endpoint.
    ///
    /// Returns None when the entry carries no usable asset id.
    pub fn into_item(self, source: ItemSource) -> Option<InventoryItem> {
        let asset_id = self.resolved_id()?;
        let mut item = InventoryItem::new(asset_id, source);
        if let Some(name) = self.name {
            item.name = name;
        }
        item.recent_average_price = self.recent_average_price.unwrap_or(0);
        item.is_limited = self.is_limited.unwrap_or(false);
        item.is_limited_unique = self.is_limited_unique.unwrap_or(false);
        item.sale_status = SaleStatus::parse(self.sale_status.as_deref());
        item.serial_number = self.serial_number;
        item.asset_type = self.asset_type;
        item.created = self.created;
        item.updated = self.updated;
        Some(item)
    }
}

/// Body of the catalog details batch POST.
#[derive(Debug, Serialize)]
pub struct CatalogDetailsRequest {
    pub items: Vec<CatalogRequestEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRequestEntry {
    pub item_type: &'static str,
    pub id: u64,
}

impl CatalogDetailsRequest {
    pub fn for_assets(ids: &[u64]) -> Self {
        Self {
            items: ids
                .iter()
                .map(|id| CatalogRequestEntry {
                    item_type: "Asset",
                    id: *id,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CatalogDetailsResponse {
    #[serde(default)]
    pub data: Vec<RawCatalogDetail>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCatalogDetail {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub price_status: Option<String>,
    #[serde(default)]
    pub lowest_price: Option<u64>,
    #[serde(default)]
    pub units_available_for_consumption: Option<u64>,
    #[serde(default)]
    pub item_restrictions: Vec<String>,
    #[serde(default)]
    pub collectible_item_id: Option<String>,
    /// Opaque; only its presence matters (resale-configured collectible).
    #[serde(default)]
    pub price_configuration: Option<serde_json::Value>,
}

impl RawCatalogDetail {
    /// Convert into the domain detail; entries without an id are dropped.
    pub fn into_detail(self) -> Option<rapscan_core::CatalogDetail> {
        Some(rapscan_core::CatalogDetail {
            asset_id: self.id?,
            name: self.name,
            price: self.price,
            price_status: self.price_status,
            lowest_price: self.lowest_price,
            units_available: self.units_available_for_consumption,
            item_restrictions: self.item_restrictions,
            collectible_item_id: self.collectible_item_id,
            has_resale_configuration: self.price_configuration.is_some(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ThumbnailResponse {
    #[serde(default)]
    pub data: Vec<RawThumbnail>,
}

/// One thumbnail entry. Some API versions key by `assetId` instead of
/// `targetId`, hence the alias.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawThumbnail {
    #[serde(default, alias = "assetId")]
    pub target_id: Option<u64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl RawThumbnail {
    /// Usable (id, url) pair, skipping pending or errored thumbnails.
    pub fn into_pair(self) -> Option<(u64, String)> {
        let id = self.target_id?;
        let url = self.image_url.filter(|u| !u.is_empty())?;
        Some((id, url))
    }
}
