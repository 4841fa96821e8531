//! Rice Retail Dashboard client
//!
//! Fetches sales, analytics and inventory data from the rice retail
//! analytics backend and renders dashboard state: summary figures, tables,
//! chart specifications and the inventory and delete flows.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod view;

pub use api::{ApiClient, DashboardApi};
pub use config::Config;
pub use controller::{DashboardController, PendingDelete};
pub use error::{ClientError, ClientResult};

use view::{MemoryPage, RecordingCharts};

/// A controller talking to the real backend and rendering into memory
pub type MemoryController = DashboardController<ApiClient, MemoryPage, RecordingCharts>;

/// Build a controller for `config` rendering into `page`
pub fn connect(config: &Config, page: MemoryPage) -> ClientResult<MemoryController> {
    let client = ApiClient::new(&config.api)?;
    tracing::debug!("Using backend at {}", client.base_url());
    Ok(DashboardController::new(client, page, RecordingCharts::new())
        .with_recent_limit(config.dashboard.recent_limit))
}
