//! HTTP client for the rice retail analytics backend

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::{
    AnalyticsSummary, CompanyProfile, Correlations, InventoryItem, InventoryPatch,
    MarketComparison, NewInventoryItem, PredictionRequest, PredictionResult, QueryParams,
    SalesEntry,
};

use super::response::{normalize, Normalized};
use super::DashboardApi;
use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

/// Backend API client
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session_cookie: Option<String>,
}

impl ApiClient {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_cookie: config.session_cookie.clone(),
        })
    }

    /// Create a client with a custom base URL and default settings (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/api/...` path with one percent-encoded id segment appended
    fn item_path(prefix: &str, id: &str) -> String {
        format!("{}/{}", prefix, urlencoding::encode(id))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.session_cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    /// Send a request and normalize whatever comes back
    async fn send(&self, builder: RequestBuilder) -> ClientResult<Normalized> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!("Backend request failed: {}", e);
            ClientError::from(e)
        })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let url = response.url().path().to_owned();
        let bytes = response.bytes().await?;

        let normalized = normalize(status, content_type.as_deref(), &bytes);
        match normalized.error_message() {
            Some(error) => tracing::warn!("{} returned {}: {}", url, status, error),
            None => tracing::debug!("{} returned {}", url, status),
        }
        Ok(normalized)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &QueryParams) -> ClientResult<T> {
        let builder = self.request(Method::GET, path).query(query);
        self.send(builder).await?.into_result()
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path).json(body);
        self.send(builder).await?.into_result()
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let builder = self.request(Method::DELETE, path);
        self.send(builder).await?.check().map(|_| ())
    }
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn sales(&self, query: &QueryParams) -> ClientResult<Vec<SalesEntry>> {
        self.get("/api/sales", query).await
    }

    async fn delete_sale(&self, id: &str) -> ClientResult<()> {
        self.delete(&Self::item_path("/api/sales", id)).await
    }

    async fn analytics(&self, query: &QueryParams) -> ClientResult<AnalyticsSummary> {
        self.get("/api/analytics", query).await
    }

    async fn retailer_inventory(&self) -> ClientResult<Vec<InventoryItem>> {
        self.get("/api/retailer/inventory", &QueryParams::new()).await
    }

    async fn retailer_inventory_item(&self, id: &str) -> ClientResult<InventoryItem> {
        self.get(&Self::item_path("/api/retailer/inventory", id), &QueryParams::new())
            .await
    }

    async fn create_inventory_item(&self, item: &NewInventoryItem) -> ClientResult<InventoryItem> {
        self.send_json(Method::POST, "/api/retailer/inventory", item)
            .await
    }

    async fn update_inventory_item(
        &self,
        id: &str,
        patch: &InventoryPatch,
    ) -> ClientResult<InventoryItem> {
        self.send_json(
            Method::PATCH,
            &Self::item_path("/api/retailer/inventory", id),
            patch,
        )
        .await
    }

    async fn delete_inventory_item(&self, id: &str) -> ClientResult<()> {
        self.delete(&Self::item_path("/api/retailer/inventory", id))
            .await
    }

    async fn browse_inventory(&self, query: &QueryParams) -> ClientResult<Vec<InventoryItem>> {
        self.get("/api/inventory", query).await
    }

    async fn company(&self, retailer_id: &str) -> ClientResult<CompanyProfile> {
        self.get(&Self::item_path("/api/company", retailer_id), &QueryParams::new())
            .await
    }

    async fn trends(&self, query: &QueryParams) -> ClientResult<Value> {
        self.get("/api/trends", query).await
    }

    async fn correlations(&self, query: &QueryParams) -> ClientResult<Correlations> {
        self.get("/api/correlations", query).await
    }

    async fn market_comparison(&self, query: &QueryParams) -> ClientResult<MarketComparison> {
        self.get("/api/market-comparison", query).await
    }

    async fn predict(&self, request: &PredictionRequest) -> ClientResult<PredictionResult> {
        self.send_json(Method::POST, "/api/predict", request).await
    }
}
