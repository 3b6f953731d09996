//! Thumbnail batch endpoint.

use async_trait::async_trait;

use crate::batch::BatchSource;
use crate::client::check_status;
use crate::error::{RobloxError, RobloxResult};
use crate::wire::{RawThumbnail, ThumbnailResponse};

const THUMBNAIL_SIZE: &str = "150x150";
const THUMBNAIL_FORMAT: &str = "Png";

/// GET `{thumbnails}/v1/assets?assetIds=...` for one chunk of asset ids.
pub(crate) struct ThumbnailBatchSource<'a> {
    pub http: &'a reqwest::Client,
    pub base_url: &'a str,
}

#[async_trait]
impl BatchSource for ThumbnailBatchSource<'_> {
    type Value = String;

    fn label(&self) -> &'static str {
        "thumbnails"
    }

    async fn fetch_batch(&self, ids: &[u64]) -> RobloxResult<Vec<(u64, String)>> {
        let asset_ids = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}/v1/assets", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("assetIds", asset_ids.as_str()),
                ("size", THUMBNAIL_SIZE),
                ("format", THUMBNAIL_FORMAT),
                ("isCircular", "false"),
            ])
            .send()
            .await?;
        let response = check_status(response).await?;
        let body: ThumbnailResponse = response
            .json()
            .await
            .map_err(|e| RobloxError::Body(format!("thumbnail decode failed: {e}")))?;
        Ok(body
            .data
            .into_iter()
            .filter_map(RawThumbnail::into_pair)
            .collect())
    }
}
