//! Shared handler state and the scan seam behind it.

use std::sync::Arc;

use async_trait::async_trait;

use rapscan_inventory::{AggregatedInventory, InventoryAggregator, InventorySource};

use crate::error::ApiError;

/// What the handlers need from the scanning side.
///
/// `InventoryAggregator` is the production implementation and reports
/// upstream degradation in-band, so it never returns `Err`; the error arm
/// exists for providers with their own infrastructure to fail.
#[async_trait]
pub trait InventoryProvider: Send + Sync {
    async fn scan(&self, user_id: u64) -> Result<AggregatedInventory, ApiError>;
}

#[async_trait]
impl<S: InventorySource + 'static> InventoryProvider for InventoryAggregator<S> {
    async fn scan(&self, user_id: u64) -> Result<AggregatedInventory, ApiError> {
        Ok(self.aggregate(user_id).await)
    }
}

/// Shared application state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn InventoryProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn InventoryProvider>) -> Self {
        Self { provider }
    }
}
