//! Upstream seam for the aggregation pipeline.
//!
//! `RobloxClient` is the production implementation; `MockInventorySource`
//! is a scripted stand-in for pipeline and handler tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use rapscan_core::CatalogDetail;
use rapscan_roblox::{FetchTask, RobloxClient, SourceFetch, SourceOutcome};

/// Everything the pipeline needs from upstream. All three calls are
/// infallible at this boundary; degradation shows up as tagged outcomes
/// or missing map entries.
#[async_trait]
pub trait InventorySource: Send + Sync {
    async fn fetch_source(&self, task: &FetchTask, user_id: u64) -> SourceFetch;

    async fn catalog_details(&self, ids: &[u64]) -> HashMap<u64, CatalogDetail>;

    async fn thumbnails(&self, ids: &[u64]) -> HashMap<u64, String>;
}

#[async_trait]
impl InventorySource for RobloxClient {
    async fn fetch_source(&self, task: &FetchTask, user_id: u64) -> SourceFetch {
        RobloxClient::fetch_source(self, task, user_id).await
    }

    async fn catalog_details(&self, ids: &[u64]) -> HashMap<u64, CatalogDetail> {
        RobloxClient::catalog_details(self, ids).await
    }

    async fn thumbnails(&self, ids: &[u64]) -> HashMap<u64, String> {
        RobloxClient::thumbnails(self, ids).await
    }
}

/// Scripted source for tests.
///
/// Fetches are keyed by task label; unscripted tasks return an empty
/// complete walk. Catalog and thumbnail requests are recorded for
/// verification.
#[derive(Default)]
pub struct MockInventorySource {
    fetches: Mutex<HashMap<String, SourceFetch>>,
    catalog: Mutex<HashMap<u64, CatalogDetail>>,
    thumbnails: Mutex<HashMap<u64, String>>,
    catalog_requests: Mutex<Vec<Vec<u64>>>,
    thumbnail_requests: Mutex<Vec<Vec<u64>>>,
}

impl MockInventorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the walk result for one task.
    pub fn script_fetch(&self, fetch: SourceFetch) {
        self.fetches.lock().insert(fetch.task.label(), fetch);
    }

    pub fn script_catalog(&self, detail: CatalogDetail) {
        self.catalog.lock().insert(detail.asset_id, detail);
    }

    pub fn script_thumbnail(&self, asset_id: u64, url: impl Into<String>) {
        self.thumbnails.lock().insert(asset_id, url.into());
    }

    /// Id sets the pipeline asked the catalog for, in call order.
    pub fn catalog_requests(&self) -> Vec<Vec<u64>> {
        self.catalog_requests.lock().clone()
    }

    pub fn thumbnail_requests(&self) -> Vec<Vec<u64>> {
        self.thumbnail_requests.lock().clone()
    }
}

#[async_trait]
impl InventorySource for MockInventorySource {
    async fn fetch_source(&self, task: &FetchTask, _user_id: u64) -> SourceFetch {
        self.fetches
            .lock()
            .get(&task.label())
            .cloned()
            .unwrap_or_else(|| SourceFetch {
                task: task.clone(),
                entries: Vec::new(),
                outcome: SourceOutcome::Complete,
                pages: 0,
            })
    }

    async fn catalog_details(&self, ids: &[u64]) -> HashMap<u64, CatalogDetail> {
        self.catalog_requests.lock().push(ids.to_vec());
        let scripted = self.catalog.lock();
        ids.iter()
            .filter_map(|id| scripted.get(id).map(|d| (*id, d.clone())))
            .collect()
    }

    async fn thumbnails(&self, ids: &[u64]) -> HashMap<u64, String> {
        self.thumbnail_requests.lock().push(ids.to_vec());
        let scripted = self.thumbnails.lock();
        ids.iter()
            .filter_map(|id| scripted.get(id).map(|url| (*id, url.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_empty_walk_for_unscripted_task() {
        let mock = MockInventorySource::new();
        let fetch = mock.fetch_source(&FetchTask::collectibles(), 1).await;
        assert_eq!(fetch.outcome, SourceOutcome::Complete);
        assert!(fetch.entries.is_empty());
    }

    #[tokio::test]
    async fn test_mock_records_catalog_requests() {
        let mock = MockInventorySource::new();
        mock.script_catalog(CatalogDetail {
            asset_id: 5,
            ..CatalogDetail::default()
        });

        let details = mock.catalog_details(&[5, 6]).await;
        assert_eq!(details.len(), 1);
        assert!(details.contains_key(&5));
        assert_eq!(mock.catalog_requests(), vec![vec![5, 6]]);
    }
}
