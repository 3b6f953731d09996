//! Core domain types for the rapscan inventory valuation service.
//!
//! This crate provides the pure (no I/O) building blocks shared by the
//! aggregation pipeline and the HTTP surface:
//! - `InventoryItem`, `CatalogDetail`: the merged inventory record and its
//!   catalog enrichment
//! - `is_sellable`: the sellability classifier
//! - `InventoryQuery` + `shape`: filtering, sorting, pagination, and
//!   summary totals

pub mod classify;
pub mod query;
pub mod types;

pub use classify::is_sellable;
pub use query::{
    shape, InventoryQuery, ItemFilter, MostExpensive, ShapedPage, SortKey, DEFAULT_PAGE_LIMIT,
};
pub use types::{
    AssetTypeRef, CatalogDetail, CatalogInfo, InventoryItem, ItemSource, SaleStatus,
    UNKNOWN_ITEM_NAME,
};
