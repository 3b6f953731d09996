//! Fan-out fetch, dedupe, classification, and enrichment.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info};

use rapscan_core::{is_sellable, CatalogDetail, InventoryItem};
use rapscan_roblox::FetchTask;

use crate::config::{EnrichmentPolicy, PipelineConfig};
use crate::report::{AggregatedInventory, SourceReport};
use crate::source::InventorySource;

/// Walks every source for a user, merges the results, and keeps the
/// sellable set. One instance serves all requests; per-call state lives
/// on the stack.
pub struct InventoryAggregator<S: InventorySource> {
    source: Arc<S>,
    config: PipelineConfig,
}

impl<S: InventorySource> InventoryAggregator<S> {
    pub fn new(source: Arc<S>, config: PipelineConfig) -> Self {
        Self { source, config }
    }

    /// Fetch tasks in merge-priority order: collectibles first, then the
    /// generic assets endpoint, then one items walk per asset-type group.
    pub fn tasks(&self) -> Vec<FetchTask> {
        let mut tasks = vec![FetchTask::collectibles(), FetchTask::assets()];
        for group in &self.config.asset_type_groups {
            tasks.push(FetchTask::inventory(group.clone()));
        }
        tasks
    }

    /// Full scan for one user. Source failures degrade to tagged outcomes
    /// in the reports rather than aborting the scan, so the result is
    /// always usable even if partial.
    pub async fn aggregate(&self, user_id: u64) -> AggregatedInventory {
        let tasks = self.tasks();
        let fetches = join_all(
            tasks
                .iter()
                .map(|task| self.source.fetch_source(task, user_id)),
        )
        .await;

        let reports: Vec<SourceReport> = fetches.iter().map(SourceReport::from_fetch).collect();
        let raw_total: usize = reports.iter().map(|r| r.entries).sum();

        // First occurrence wins. join_all preserves task order, so a
        // collectibles entry shadows the same asset from later walks.
        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for fetch in fetches {
            let source = fetch.task.source;
            for entry in fetch.entries {
                if let Some(item) = entry.into_item(source) {
                    if seen.insert(item.asset_id) {
                        items.push(item);
                    }
                }
            }
        }
        let total_fetched = items.len();
        debug!(user_id, raw = raw_total, unique = total_fetched, "merged source walks");

        let mut items = match self.config.enrichment {
            EnrichmentPolicy::Full => self.enrich_full(items).await,
            EnrichmentPolicy::Candidates => self.enrich_candidates(items).await,
        };
        self.finalize(&mut items).await;

        info!(
            user_id,
            total_fetched,
            sellable = items.len(),
            "inventory scan complete"
        );
        AggregatedInventory {
            items,
            total_fetched,
            reports,
        }
    }

    /// Enrich everything, then classify with catalog evidence in hand.
    async fn enrich_full(&self, items: Vec<InventoryItem>) -> Vec<InventoryItem> {
        let details = self.details_for(&items).await;
        items
            .into_iter()
            .filter_map(|mut item| {
                let detail = details.get(&item.asset_id);
                if !is_sellable(&item, detail) {
                    return None;
                }
                if let Some(detail) = detail {
                    item.apply_catalog(detail);
                }
                Some(item)
            })
            .collect()
    }

    /// Classify on raw fields first and enrich only the survivors.
    /// Catalog evidence can only promote, so no second pass is needed.
    async fn enrich_candidates(&self, items: Vec<InventoryItem>) -> Vec<InventoryItem> {
        let mut kept: Vec<InventoryItem> = items
            .into_iter()
            .filter(|item| is_sellable(item, None))
            .collect();
        let details = self.details_for(&kept).await;
        for item in &mut kept {
            if let Some(detail) = details.get(&item.asset_id) {
                item.apply_catalog(detail);
            }
        }
        kept
    }

    async fn details_for(&self, items: &[InventoryItem]) -> HashMap<u64, CatalogDetail> {
        if items.is_empty() {
            return HashMap::new();
        }
        let ids: Vec<u64> = items.iter().map(|i| i.asset_id).collect();
        self.source.catalog_details(&ids).await
    }

    /// Thumbnail lookup plus name fallback for the kept set.
    async fn finalize(&self, items: &mut [InventoryItem]) {
        if items.is_empty() {
            return;
        }
        let ids: Vec<u64> = items.iter().map(|i| i.asset_id).collect();
        let thumbs = self.source.thumbnails(&ids).await;
        for item in items.iter_mut() {
            if let Some(url) = thumbs.get(&item.asset_id) {
                item.image_url = url.clone();
            }
            item.ensure_named();
        }
    }
}
