//! Cursor walker for the paginated inventory endpoints.
//!
//! A walk is infallible at its boundary: whatever happens upstream, the
//! caller gets a `SourceFetch` with the entries accumulated so far and a
//! tagged outcome. A private inventory (403) is not a failure, it is a
//! normal zero-contribution outcome.

use async_trait::async_trait;
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

use rapscan_core::ItemSource;

use crate::config::PagingConfig;
use crate::error::{RobloxError, RobloxResult};
use crate::retry::{retry_with_backoff, RetryPolicy};
use crate::wire::{ItemPage, RawInventoryEntry};

/// One endpoint walk: which source family, and for the inventory items
/// endpoint, which comma-separated asset types to request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTask {
    pub source: ItemSource,
    pub asset_types: Option<String>,
}

impl FetchTask {
    pub fn collectibles() -> Self {
        Self {
            source: ItemSource::Collectibles,
            asset_types: None,
        }
    }

    pub fn assets() -> Self {
        Self {
            source: ItemSource::Assets,
            asset_types: None,
        }
    }

    pub fn inventory(asset_types: impl Into<String>) -> Self {
        Self {
            source: ItemSource::Inventory,
            asset_types: Some(asset_types.into()),
        }
    }

    /// Log label, e.g. `collectibles` or `inventory[Hat,Hair,Face]`.
    pub fn label(&self) -> String {
        match &self.asset_types {
            Some(types) => format!("{}[{}]", self.source, types),
            None => self.source.to_string(),
        }
    }
}

/// How a source walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// Reached the final page.
    Complete,
    /// Stopped early (retry budget spent or page cap hit); partial data kept.
    Truncated { reason: String },
    /// Upstream returned 403; the inventory is not publicly visible.
    Private,
    /// Aborted on a non-retryable failure; partial data kept.
    Failed { reason: String },
}

impl SourceOutcome {
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Truncated { .. } => "truncated",
            Self::Private => "private",
            Self::Failed { .. } => "failed",
        }
    }
}

impl std::fmt::Display for SourceOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Truncated { reason } => write!(f, "truncated: {reason}"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

/// Everything one source walk produced.
#[derive(Debug, Clone)]
pub struct SourceFetch {
    pub task: FetchTask,
    pub entries: Vec<RawInventoryEntry>,
    pub outcome: SourceOutcome,
    pub pages: u32,
}

/// Transport seam for the walker; `RobloxClient` is the real
/// implementation, tests script their own.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(
        &self,
        task: &FetchTask,
        user_id: u64,
        cursor: Option<&str>,
    ) -> RobloxResult<ItemPage>;
}

/// Walk one source to its end, the page cap, or a terminal error.
///
/// Each page gets its own retry budget through the shared backoff
/// wrapper, so a 429 streak on page N does not charge page N+1.
pub async fn fetch_all_pages<F: PageFetcher + ?Sized>(
    fetcher: &F,
    task: &FetchTask,
    user_id: u64,
    retry: &RetryPolicy,
    paging: &PagingConfig,
) -> SourceFetch {
    let label = task.label();
    let mut entries: Vec<RawInventoryEntry> = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0u32;

    let outcome = loop {
        let result = retry_with_backoff(retry, &label, || {
            fetcher.fetch_page(task, user_id, cursor.as_deref())
        })
        .await;

        match result {
            Ok(page) => {
                pages += 1;
                let next = page.next_cursor().map(str::to_string);
                debug!(
                    source = %label,
                    user_id,
                    page = pages,
                    entries = page.data.len(),
                    has_next = next.is_some(),
                    "Fetched inventory page"
                );
                entries.extend(page.data);

                match next {
                    None => break SourceOutcome::Complete,
                    Some(_) if pages >= paging.max_pages => {
                        break SourceOutcome::Truncated {
                            reason: format!("page cap {} reached", paging.max_pages),
                        }
                    }
                    Some(next) => {
                        cursor = Some(next);
                        sleep(Duration::from_millis(paging.page_delay_ms)).await;
                    }
                }
            }
            Err(RobloxError::PrivateInventory) => break SourceOutcome::Private,
            Err(err) if err.is_retryable() => {
                break SourceOutcome::Truncated {
                    reason: err.to_string(),
                }
            }
            Err(err) => {
                break SourceOutcome::Failed {
                    reason: err.to_string(),
                }
            }
        }
    };

    info!(
        source = %label,
        user_id,
        pages,
        entries = entries.len(),
        outcome = %outcome,
        "Source walk finished"
    );

    SourceFetch {
        task: task.clone(),
        entries,
        outcome,
        pages,
    }
}
