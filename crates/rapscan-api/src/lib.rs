//! HTTP surface for the inventory valuation service.
//!
//! Routes:
//! - `GET /inventory/{userId}?page=&limit=&sortBy=&filter=&minValue=`:
//!   full aggregate summary in the legacy wire shape
//! - `GET /sellable/{userId}?page=&limit=`: compact value-sorted listing
//! - `GET /health`: liveness probe
//!
//! Handlers reach the scanning side through [`InventoryProvider`], so
//! tests drive them with stub providers instead of live upstreams.

mod config;
mod error;
mod server;
mod state;
mod types;

pub use config::ApiConfig;
pub use error::ApiError;
pub use server::{create_router, run_server};
pub use state::{AppState, InventoryProvider};
pub use types::{DebugInfo, HealthStatus, InventorySummary, SellableItem, SellableSummary};
