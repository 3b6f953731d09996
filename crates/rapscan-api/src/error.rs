//! Handler-boundary error rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use rapscan_core::InventoryItem;

/// Internal failure crossing the handler boundary.
///
/// Degraded upstreams never reach this type; the pipeline reports those
/// in-band. This covers infrastructure failures from alternative scan
/// providers.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn scan(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Legacy zeroed body for HTTP 500 responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(rename = "TotalCount")]
    pub total_count: usize,
    #[serde(rename = "TotalValue")]
    pub total_value: u64,
    #[serde(rename = "Items")]
    pub items: Vec<InventoryItem>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        let body = ErrorBody {
            success: false,
            error: "Internal server error".to_string(),
            message: self.message,
            total_count: 0,
            total_value: 0,
            items: Vec::new(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
