//! Shared chunk-and-throttle loop for the batch enrichment endpoints.
//!
//! Catalog details and thumbnails follow the same shape: split ids into
//! fixed-size chunks, one request per chunk through the retry wrapper,
//! fixed delay between chunks. A chunk that still fails after retries is
//! logged and contributes nothing; later chunks are unaffected.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::time::{sleep, Duration};
use tracing::{debug, warn};

use crate::config::BatchConfig;
use crate::error::RobloxResult;
use crate::retry::{retry_with_backoff, RetryPolicy};

/// One batch endpoint: turns a chunk of asset ids into keyed values.
#[async_trait]
pub trait BatchSource: Send + Sync {
    type Value: Send;

    /// Endpoint name for logs.
    fn label(&self) -> &'static str;

    async fn fetch_batch(&self, ids: &[u64]) -> RobloxResult<Vec<(u64, Self::Value)>>;
}

/// Fetch enrichment for `ids`, chunked and throttled per `cfg`.
pub async fn fetch_in_batches<S: BatchSource>(
    source: &S,
    ids: &[u64],
    cfg: &BatchConfig,
    retry: &RetryPolicy,
) -> HashMap<u64, S::Value> {
    let mut out = HashMap::with_capacity(ids.len());
    if ids.is_empty() {
        return out;
    }

    let chunk_size = cfg.batch_size.max(1);
    let total_batches = ids.len().div_ceil(chunk_size);

    for (index, chunk) in ids.chunks(chunk_size).enumerate() {
        let batch = index + 1;
        match retry_with_backoff(retry, source.label(), || source.fetch_batch(chunk)).await {
            Ok(pairs) => {
                debug!(
                    endpoint = source.label(),
                    batch,
                    total_batches,
                    requested = chunk.len(),
                    resolved = pairs.len(),
                    "Batch fetched"
                );
                out.extend(pairs);
            }
            Err(err) => {
                warn!(
                    endpoint = source.label(),
                    batch,
                    total_batches,
                    error = %err,
                    "Batch failed, continuing without it"
                );
            }
        }
        if batch < total_batches {
            sleep(Duration::from_millis(cfg.delay_ms)).await;
        }
    }

    out
}
