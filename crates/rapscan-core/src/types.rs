//! Inventory item and catalog enrichment types.
//!
//! `InventoryItem` is the merged per-asset record produced by the
//! aggregation pipeline; `CatalogDetail` is the catalog-side enrichment
//! keyed by asset id. Both serialize in the camelCase wire shape the
//! service has always exposed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name used when neither the inventory nor the catalog payload
/// carries one.
pub const UNKNOWN_ITEM_NAME: &str = "Unknown Item";

/// Upstream endpoint family an item record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSource {
    /// `inventory.roblox.com .../assets/collectibles` (limiteds, carries RAP).
    Collectibles,
    /// `inventory.roblox.com .../assets` (generic owned assets).
    Assets,
    /// `inventory.roblox.com .../items/Asset` walked per asset-type group.
    Inventory,
}

impl std::fmt::Display for ItemSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collectibles => write!(f, "collectibles"),
            Self::Assets => write!(f, "assets"),
            Self::Inventory => write!(f, "inventory"),
        }
    }
}

/// Sale status reported by the inventory or catalog endpoints.
///
/// Upstream sends free-form strings; anything unrecognized maps to
/// `Unknown` rather than failing the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SaleStatus {
    ForSale,
    OnSale,
    Resellable,
    OffSale,
    Free,
    #[default]
    Unknown,
}

impl SaleStatus {
    /// Total parser: unrecognized or missing statuses become `Unknown`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("ForSale") => Self::ForSale,
            Some("OnSale") => Self::OnSale,
            Some("Resellable") => Self::Resellable,
            Some("OffSale") => Self::OffSale,
            Some("Free") => Self::Free,
            _ => Self::Unknown,
        }
    }

    /// Statuses under which an item can currently be bought or resold.
    pub fn is_purchasable(&self) -> bool {
        matches!(self, Self::ForSale | Self::OnSale | Self::Resellable)
    }
}

impl std::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ForSale => write!(f, "ForSale"),
            Self::OnSale => write!(f, "OnSale"),
            Self::Resellable => write!(f, "Resellable"),
            Self::OffSale => write!(f, "OffSale"),
            Self::Free => write!(f, "Free"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Asset type reference as the inventory endpoints report it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTypeRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Catalog metadata echoed back on each item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogInfo {
    /// Raw restriction tags, e.g. `"Limited"`, `"LimitedUnique"`.
    pub item_restrictions: Vec<String>,
    /// Present on items tracked by the collectibles marketplace.
    pub collectible_item_id: Option<String>,
    pub units_available: Option<u64>,
}

/// Catalog-side enrichment for one asset, keyed by asset id.
///
/// All fields are optional on the wire; missing values never fail a
/// lookup, they just contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogDetail {
    pub asset_id: u64,
    pub name: Option<String>,
    /// Catalog list price in Robux.
    pub price: Option<u64>,
    /// Catalog price status string, e.g. `"ForSale"`, `"OffSale"`, `"Free"`.
    pub price_status: Option<String>,
    /// Lowest current resale price in Robux.
    pub lowest_price: Option<u64>,
    pub units_available: Option<u64>,
    pub item_restrictions: Vec<String>,
    pub collectible_item_id: Option<String>,
    /// Whether the payload carried a resale price configuration block.
    pub has_resale_configuration: bool,
}

impl CatalogDetail {
    /// Exact-tag check, `"LimitedUnique"` does not count as `"Limited"`.
    pub fn is_limited(&self) -> bool {
        self.item_restrictions.iter().any(|r| r == "Limited")
    }

    pub fn is_limited_unique(&self) -> bool {
        self.item_restrictions.iter().any(|r| r == "LimitedUnique")
    }

    /// First positive price among lowest resale price and list price.
    pub fn best_price(&self) -> u64 {
        self.lowest_price
            .filter(|p| *p > 0)
            .or(self.price.filter(|p| *p > 0))
            .unwrap_or(0)
    }
}

/// One owned asset after merge, dedupe, and enrichment.
///
/// Prices are integer Robux; `recent_average_price` holds the resolved
/// value after catalog backfill (market RAP preferred, then lowest resale
/// price, then list price, else 0).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub asset_id: u64,
    pub name: String,
    pub recent_average_price: u64,
    pub is_limited: bool,
    pub is_limited_unique: bool,
    pub sale_status: SaleStatus,
    pub asset_type: Option<AssetTypeRef>,
    /// Per-copy serial for LimitedUnique items, collectibles endpoint only.
    pub serial_number: Option<u32>,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    /// Empty string until thumbnail enrichment fills it.
    pub image_url: String,
    pub source: ItemSource,
    pub catalog_info: CatalogInfo,
}

impl InventoryItem {
    /// Bare record carrying only identity; the pipeline fills in raw
    /// fields and enrichment afterwards. The empty name marks "unknown"
    /// until [`ensure_named`](Self::ensure_named) runs.
    pub fn new(asset_id: u64, source: ItemSource) -> Self {
        Self {
            asset_id,
            name: String::new(),
            recent_average_price: 0,
            is_limited: false,
            is_limited_unique: false,
            sale_status: SaleStatus::Unknown,
            asset_type: None,
            serial_number: None,
            created: None,
            updated: None,
            image_url: String::new(),
            source,
            catalog_info: CatalogInfo::default(),
        }
    }

    /// Merge catalog enrichment into this record.
    ///
    /// Backfills name and sale status when the inventory payload lacked
    /// them, ORs the limited flags, resolves the price by priority
    /// (existing RAP, then lowest resale price, then list price), and
    /// copies the catalog metadata block.
    pub fn apply_catalog(&mut self, detail: &CatalogDetail) {
        if self.name.is_empty() {
            if let Some(name) = &detail.name {
                self.name.clone_from(name);
            }
        }
        self.is_limited = self.is_limited || detail.is_limited();
        self.is_limited_unique = self.is_limited_unique || detail.is_limited_unique();
        if self.sale_status == SaleStatus::Unknown {
            self.sale_status = SaleStatus::parse(detail.price_status.as_deref());
        }
        if self.recent_average_price == 0 {
            self.recent_average_price = detail.best_price();
        }
        self.catalog_info = CatalogInfo {
            item_restrictions: detail.item_restrictions.clone(),
            collectible_item_id: detail.collectible_item_id.clone(),
            units_available: detail.units_available,
        };
    }

    /// Replace an empty name with the `"Unknown Item"` placeholder.
    pub fn ensure_named(&mut self) {
        if self.name.is_empty() {
            self.name = UNKNOWN_ITEM_NAME.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(asset_id: u64) -> CatalogDetail {
        CatalogDetail {
            asset_id,
            ..CatalogDetail::default()
        }
    }

    #[test]
    fn test_sale_status_parse_known_and_unknown() {
        assert_eq!(SaleStatus::parse(Some("ForSale")), SaleStatus::ForSale);
        assert_eq!(SaleStatus::parse(Some("Resellable")), SaleStatus::Resellable);
        assert_eq!(SaleStatus::parse(Some("garbage")), SaleStatus::Unknown);
        assert_eq!(SaleStatus::parse(None), SaleStatus::Unknown);
    }

    #[test]
    fn test_restriction_tags_are_exact_matches() {
        let mut d = detail(1);
        d.item_restrictions = vec!["LimitedUnique".to_string()];
        assert!(!d.is_limited());
        assert!(d.is_limited_unique());

        d.item_restrictions = vec!["Limited".to_string(), "ThirteenPlus".to_string()];
        assert!(d.is_limited());
        assert!(!d.is_limited_unique());
    }

    #[test]
    fn test_best_price_skips_zero_lowest_price() {
        let mut d = detail(1);
        d.lowest_price = Some(0);
        d.price = Some(350);
        assert_eq!(d.best_price(), 350);

        d.lowest_price = Some(120);
        assert_eq!(d.best_price(), 120);

        d.lowest_price = None;
        d.price = None;
        assert_eq!(d.best_price(), 0);
    }

    #[test]
    fn test_apply_catalog_price_priority() {
        // Existing RAP wins over every catalog price.
        let mut item = InventoryItem::new(10, ItemSource::Collectibles);
        item.recent_average_price = 4_500;
        let mut d = detail(10);
        d.lowest_price = Some(999);
        item.apply_catalog(&d);
        assert_eq!(item.recent_average_price, 4_500);

        // No RAP: lowest resale price is used before the list price.
        let mut item = InventoryItem::new(11, ItemSource::Assets);
        let mut d = detail(11);
        d.lowest_price = Some(200);
        d.price = Some(500);
        item.apply_catalog(&d);
        assert_eq!(item.recent_average_price, 200);

        // Neither RAP nor lowest price: list price, else zero.
        let mut item = InventoryItem::new(12, ItemSource::Assets);
        let mut d = detail(12);
        d.price = Some(75);
        item.apply_catalog(&d);
        assert_eq!(item.recent_average_price, 75);
    }

    #[test]
    fn test_apply_catalog_backfills_without_overwriting() {
        let mut item = InventoryItem::new(20, ItemSource::Assets);
        item.name = "Perfectly Legitimate Hat".to_string();
        item.sale_status = SaleStatus::Resellable;

        let mut d = detail(20);
        d.name = Some("Catalog Name".to_string());
        d.price_status = Some("OffSale".to_string());
        d.item_restrictions = vec!["Limited".to_string()];
        item.apply_catalog(&d);

        assert_eq!(item.name, "Perfectly Legitimate Hat");
        assert_eq!(item.sale_status, SaleStatus::Resellable);
        assert!(item.is_limited);
        assert_eq!(item.catalog_info.item_restrictions, vec!["Limited"]);
    }

    #[test]
    fn test_apply_catalog_fills_missing_name_and_status() {
        let mut item = InventoryItem::new(21, ItemSource::Inventory);
        let mut d = detail(21);
        d.name = Some("Backfilled".to_string());
        d.price_status = Some("ForSale".to_string());
        item.apply_catalog(&d);

        assert_eq!(item.name, "Backfilled");
        assert_eq!(item.sale_status, SaleStatus::ForSale);
    }

    #[test]
    fn test_ensure_named_placeholder() {
        let mut item = InventoryItem::new(30, ItemSource::Assets);
        item.ensure_named();
        assert_eq!(item.name, UNKNOWN_ITEM_NAME);

        let mut named = InventoryItem::new(31, ItemSource::Assets);
        named.name = "Kept".to_string();
        named.ensure_named();
        assert_eq!(named.name, "Kept");
    }

    #[test]
    fn test_item_serializes_in_legacy_camel_case() {
        let mut item = InventoryItem::new(1029025, ItemSource::Collectibles);
        item.name = "Domino Crown".to_string();
        item.recent_average_price = 3_000_000;
        item.is_limited = true;
        item.serial_number = Some(7);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["assetId"], 1029025);
        assert_eq!(json["recentAveragePrice"], 3_000_000);
        assert_eq!(json["isLimited"], true);
        assert_eq!(json["isLimitedUnique"], false);
        assert_eq!(json["saleStatus"], "Unknown");
        assert_eq!(json["serialNumber"], 7);
        assert_eq!(json["source"], "collectibles");
        assert_eq!(json["imageUrl"], "");
        assert!(json["catalogInfo"]["itemRestrictions"]
            .as_array()
            .unwrap()
            .is_empty());
    }
}
