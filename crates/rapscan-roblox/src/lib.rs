//! HTTP client for the public Roblox REST endpoints.
//!
//! This crate owns everything that talks to the network:
//! - `RobloxClient`: reqwest-backed client with timeout and user agent
//! - `paging::fetch_all_pages`: cursor walker with per-page retry budget
//!   and tagged outcomes (complete / truncated / private / failed)
//! - `batch::fetch_in_batches`: shared chunk-and-throttle loop behind the
//!   catalog details and thumbnail enrichers
//! - `retry::retry_with_backoff`: the single retry wrapper every upstream
//!   call goes through
//! - `wire`: raw payload shapes, lenient about missing fields

pub mod batch;
mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod paging;
pub mod retry;
mod thumbnails;
pub mod wire;

pub use client::RobloxClient;
pub use config::{BatchConfig, PagingConfig, RobloxConfig};
pub use error::{RobloxError, RobloxResult};
pub use paging::{fetch_all_pages, FetchTask, PageFetcher, SourceFetch, SourceOutcome};
pub use retry::{retry_with_backoff, RetryPolicy};
pub use wire::{ItemPage, RawInventoryEntry};
