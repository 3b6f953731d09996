//! Catalog details batch endpoint.

use async_trait::async_trait;

use rapscan_core::CatalogDetail;

use crate::batch::BatchSource;
use crate::client::check_status;
use crate::error::{RobloxError, RobloxResult};
use crate::wire::{CatalogDetailsRequest, CatalogDetailsResponse, RawCatalogDetail};

/// POST `{catalog}/v1/catalog/items/details` for one chunk of asset ids.
pub(crate) struct CatalogBatchSource<'a> {
    pub http: &'a reqwest::Client,
    pub base_url: &'a str,
}

#[async_trait]
impl BatchSource for CatalogBatchSource<'_> {
    type Value = CatalogDetail;

    fn label(&self) -> &'static str {
        "catalog-details"
    }

    async fn fetch_batch(&self, ids: &[u64]) -> RobloxResult<Vec<(u64, CatalogDetail)>> {
        let url = format!("{}/v1/catalog/items/details", self.base_url);
        let request = CatalogDetailsRequest::for_assets(ids);
        let response = self.http.post(&url).json(&request).send().await?;
        let response = check_status(response).await?;
        let body: CatalogDetailsResponse = response
            .json()
            .await
            .map_err(|e| RobloxError::Body(format!("catalog details decode failed: {e}")))?;
        Ok(body
            .data
            .into_iter()
            .filter_map(RawCatalogDetail::into_detail)
            .map(|detail| (detail.asset_id, detail))
            .collect())
    }
}
