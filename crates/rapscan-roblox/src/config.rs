//! Roblox client configuration.

use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;

/// Upstream endpoints, throttling, and retry settings.
///
/// Base URLs are overridable so tests and self-hosted proxies can point
/// the client elsewhere; the defaults are the production Roblox hosts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobloxConfig {
    #[serde(default = "default_inventory_base_url")]
    pub inventory_base_url: String,
    #[serde(default = "default_catalog_base_url")]
    pub catalog_base_url: String,
    #[serde(default = "default_thumbnails_base_url")]
    pub thumbnails_base_url: String,
    /// Sent on every request; some Roblox endpoints reject the default
    /// reqwest agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub retry: RetryPolicy,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub catalog_batch: BatchConfig,
    #[serde(default = "default_thumbnail_batch")]
    pub thumbnail_batch: BatchConfig,
}

/// Cursor-walk settings shared by all inventory endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Items requested per page. 100 is the upstream maximum.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    /// Hard cap on pages walked per source.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    /// Fixed delay between consecutive pages of one source.
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
}

/// Batch endpoint settings (catalog details, thumbnails).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Ids per request. 100 is the upstream ceiling.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Fixed delay between consecutive batches.
    #[serde(default = "default_batch_delay_ms")]
    pub delay_ms: u64,
}

fn default_inventory_base_url() -> String {
    "https://inventory.roblox.com".to_string()
}

fn default_catalog_base_url() -> String {
    "https://catalog.roblox.com".to_string()
}

fn default_thumbnails_base_url() -> String {
    "https://thumbnails.roblox.com".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_page_limit() -> u32 {
    100
}

fn default_max_pages() -> u32 {
    10
}

fn default_page_delay_ms() -> u64 {
    500
}

fn default_batch_size() -> usize {
    100
}

fn default_batch_delay_ms() -> u64 {
    300
}

fn default_thumbnail_batch() -> BatchConfig {
    BatchConfig {
        batch_size: default_batch_size(),
        delay_ms: 200,
    }
}

impl Default for RobloxConfig {
    fn default() -> Self {
        Self {
            inventory_base_url: default_inventory_base_url(),
            catalog_base_url: default_catalog_base_url(),
            thumbnails_base_url: default_thumbnails_base_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            retry: RetryPolicy::default(),
            paging: PagingConfig::default(),
            catalog_batch: BatchConfig::default(),
            thumbnail_batch: default_thumbnail_batch(),
        }
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_limit: default_page_limit(),
            max_pages: default_max_pages(),
            page_delay_ms: default_page_delay_ms(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            delay_ms: default_batch_delay_ms(),
        }
    }
}
