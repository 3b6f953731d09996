//! HTTP client for the Roblox REST endpoints.
//!
//! One `RobloxClient` is built at startup and shared across requests; it
//! owns the connection pool, the upstream base URLs, and the retry and
//! throttle settings.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Response;
use tracing::debug;

use rapscan_core::{CatalogDetail, ItemSource};

use crate::batch::fetch_in_batches;
use crate::catalog::CatalogBatchSource;
use crate::config::RobloxConfig;
use crate::error::{RobloxError, RobloxResult};
use crate::paging::{fetch_all_pages, FetchTask, PageFetcher, SourceFetch};
use crate::thumbnails::ThumbnailBatchSource;
use crate::wire::ItemPage;

pub struct RobloxClient {
    http: reqwest::Client,
    config: RobloxConfig,
}

impl RobloxClient {
    pub fn new(config: RobloxConfig) -> RobloxResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &RobloxConfig {
        &self.config
    }

    /// Walk one inventory source to its end. Never fails outward; the
    /// outcome is tagged on the returned `SourceFetch`.
    pub async fn fetch_source(&self, task: &FetchTask, user_id: u64) -> SourceFetch {
        fetch_all_pages(self, task, user_id, &self.config.retry, &self.config.paging).await
    }

    /// Catalog details for `ids`, batched and throttled. Ids the catalog
    /// did not resolve are simply absent from the map.
    pub async fn catalog_details(&self, ids: &[u64]) -> HashMap<u64, CatalogDetail> {
        let source = CatalogBatchSource {
            http: &self.http,
            base_url: &self.config.catalog_base_url,
        };
        fetch_in_batches(&source, ids, &self.config.catalog_batch, &self.config.retry).await
    }

    /// Thumbnail URLs for `ids`, batched and throttled.
    pub async fn thumbnails(&self, ids: &[u64]) -> HashMap<u64, String> {
        let source = ThumbnailBatchSource {
            http: &self.http,
            base_url: &self.config.thumbnails_base_url,
        };
        fetch_in_batches(&source, ids, &self.config.thumbnail_batch, &self.config.retry).await
    }

    fn page_url(&self, task: &FetchTask, user_id: u64) -> String {
        let base = &self.config.inventory_base_url;
        match task.source {
            ItemSource::Collectibles => {
                format!("{base}/v1/users/{user_id}/assets/collectibles")
            }
            ItemSource::Assets => format!("{base}/v1/users/{user_id}/assets"),
            ItemSource::Inventory => format!("{base}/v1/users/{user_id}/items/Asset"),
        }
    }
}

#[async_trait]
impl PageFetcher for RobloxClient {
    async fn fetch_page(
        &self,
        task: &FetchTask,
        user_id: u64,
        cursor: Option<&str>,
    ) -> RobloxResult<ItemPage> {
        let url = self.page_url(task, user_id);
        debug!(source = %task.label(), user_id, cursor = ?cursor, "Requesting inventory page");

        let mut request = self
            .http
            .get(&url)
            .query(&[("limit", self.config.paging.page_limit)]);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }
        if let Some(types) = &task.asset_types {
            request = request.query(&[("assetTypes", types.as_str())]);
        }

        let response = request.send().await?;
        let response = check_status(response).await?;
        response
            .json::<ItemPage>()
            .await
            .map_err(|e| RobloxError::Body(format!("inventory page decode failed: {e}")))
    }
}

/// Map non-2xx statuses onto the error taxonomy. 429 carries the
/// `Retry-After` hint (whole seconds) when parseable.
pub(crate) async fn check_status(response: Response) -> RobloxResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status.as_u16() {
        429 => {
            let retry_after_ms = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(|secs| secs.saturating_mul(1_000));
            Err(RobloxError::RateLimited { retry_after_ms })
        }
        403 => Err(RobloxError::PrivateInventory),
        code => {
            let body = response.text().await.unwrap_or_default();
            Err(RobloxError::Status { status: code, body })
        }
    }
}
