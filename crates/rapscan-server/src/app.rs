//! Service assembly.
//!
//! Builds the Roblox client, the aggregation pipeline, and the API
//! state from one loaded configuration.

use std::sync::Arc;

use rapscan_api::{run_server, ApiConfig, AppState};
use rapscan_inventory::InventoryAggregator;
use rapscan_roblox::RobloxClient;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Assembled service, ready to serve.
pub struct Application {
    state: AppState,
    server: ApiConfig,
}

impl Application {
    /// Wire the scan pipeline against the configured Roblox hosts.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let client = RobloxClient::new(config.roblox)?;
        let aggregator = InventoryAggregator::new(Arc::new(client), config.pipeline);

        Ok(Self {
            state: AppState::new(Arc::new(aggregator)),
            server: config.server,
        })
    }

    /// Serve requests until the listener fails.
    pub async fn run(self) -> AppResult<()> {
        run_server(self.state, self.server)
            .await
            .map_err(|e| AppError::Server(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_application_builds_from_default_config() {
        let app = Application::new(AppConfig::default());
        assert!(app.is_ok());
    }
}
