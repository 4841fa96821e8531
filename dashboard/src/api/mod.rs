//! Backend API integration

pub mod client;
pub mod response;

pub use client::ApiClient;
pub use response::{normalize, Normalized};

use async_trait::async_trait;
use serde_json::Value;
use shared::{
    AnalyticsSummary, CompanyProfile, Correlations, InventoryItem, InventoryPatch,
    MarketComparison, NewInventoryItem, PredictionRequest, PredictionResult, QueryParams,
    SalesEntry,
};

use crate::error::ClientResult;

/// The backend endpoints the dashboard consumes
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `GET /api/sales`
    async fn sales(&self, query: &QueryParams) -> ClientResult<Vec<SalesEntry>>;

    /// `DELETE /api/sales/:id`
    async fn delete_sale(&self, id: &str) -> ClientResult<()>;

    /// `GET /api/analytics`
    async fn analytics(&self, query: &QueryParams) -> ClientResult<AnalyticsSummary>;

    /// `GET /api/retailer/inventory`
    async fn retailer_inventory(&self) -> ClientResult<Vec<InventoryItem>>;

    /// `GET /api/retailer/inventory/:id`
    async fn retailer_inventory_item(&self, id: &str) -> ClientResult<InventoryItem>;

    /// `POST /api/retailer/inventory`
    async fn create_inventory_item(&self, item: &NewInventoryItem) -> ClientResult<InventoryItem>;

    /// `PATCH /api/retailer/inventory/:id`
    async fn update_inventory_item(
        &self,
        id: &str,
        patch: &InventoryPatch,
    ) -> ClientResult<InventoryItem>;

    /// `DELETE /api/retailer/inventory/:id`
    async fn delete_inventory_item(&self, id: &str) -> ClientResult<()>;

    /// `GET /api/inventory`
    async fn browse_inventory(&self, query: &QueryParams) -> ClientResult<Vec<InventoryItem>>;

    /// `GET /api/company/:retailer_id`
    async fn company(&self, retailer_id: &str) -> ClientResult<CompanyProfile>;

    /// `GET /api/trends`
    async fn trends(&self, query: &QueryParams) -> ClientResult<Value>;

    /// `GET /api/correlations`
    async fn correlations(&self, query: &QueryParams) -> ClientResult<Correlations>;

    /// `GET /api/market-comparison`
    async fn market_comparison(&self, query: &QueryParams) -> ClientResult<MarketComparison>;

    /// `POST /api/predict`
    async fn predict(&self, request: &PredictionRequest) -> ClientResult<PredictionResult>;
}
