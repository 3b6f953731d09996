//! Application configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use rapscan_api::ApiConfig;
use rapscan_inventory::PipelineConfig;
use rapscan_roblox::RobloxConfig;

use crate::error::{AppError, AppResult};

/// Top-level service configuration, one section per layer.
///
/// Every section is optional in the TOML file; omitted sections take
/// their built-in defaults, which match the production Roblox hosts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ApiConfig,
    /// Upstream Roblox client settings.
    #[serde(default)]
    pub roblox: RobloxConfig,
    /// Scan pipeline settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl AppConfig {
    /// Load configuration from file.
    pub fn load() -> AppResult<Self> {
        let config_path = std::env::var("RAPSCAN_CONFIG")
            .unwrap_or_else(|_| "config/default.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}
