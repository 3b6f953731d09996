//! Inventory aggregation pipeline.
//!
//! Fans out over the collectibles, assets, and items endpoints for one
//! user, dedupes on asset id with source priority, classifies the
//! sellable set, and enriches it with catalog pricing and thumbnails.
//! The pipeline never fails a scan outright; degraded sources surface
//! as tagged outcomes in the per-source reports.

pub mod config;
pub mod pipeline;
pub mod report;
pub mod source;

pub use config::{EnrichmentPolicy, PipelineConfig};
pub use pipeline::InventoryAggregator;
pub use report::{AggregatedInventory, SourceReport};
pub use source::{InventorySource, MockInventorySource};
