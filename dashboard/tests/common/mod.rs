//! Test doubles shared by the controller tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use rice_dashboard::api::DashboardApi;
use rice_dashboard::view::{MemoryPage, RecordingCharts};
use rice_dashboard::{ClientError, ClientResult, DashboardController};
use rust_decimal::Decimal;
use serde_json::Value;
use shared::{
    AnalyticsSummary, ChartPoint, CompanyProfile, Correlations, InventoryItem, InventoryPatch,
    MarketComparison, NewInventoryItem, PredictionRequest, PredictionResult, QueryParams,
    SalesEntry,
};

pub type TestController = DashboardController<FakeApi, MemoryPage, RecordingCharts>;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// A canned backend reply, replayable on every call
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Backend(u16, &'static str),
    Transport,
}

impl<T: Clone> Reply<T> {
    fn produce(&self) -> ClientResult<T> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Backend(status, message) => Err(ClientError::backend(*status, *message)),
            Reply::Transport => Err(ClientError::Transport("connection refused".to_string())),
        }
    }
}

/// One request the controller made
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Sales(QueryParams),
    DeleteSale(String),
    Analytics(QueryParams),
    RetailerInventory,
    RetailerInventoryItem(String),
    CreateInventoryItem(NewInventoryItem),
    UpdateInventoryItem(String, InventoryPatch),
    DeleteInventoryItem(String),
    BrowseInventory(QueryParams),
    Company(String),
    Trends(QueryParams),
    Correlations(QueryParams),
    MarketComparison(QueryParams),
    Predict(PredictionRequest),
}

/// In-memory backend. Every endpoint succeeds with an empty body until told
/// otherwise.
pub struct FakeApi {
    pub sales: Mutex<Reply<Vec<SalesEntry>>>,
    pub analytics: Mutex<Reply<AnalyticsSummary>>,
    pub delete_sale: Mutex<Reply<()>>,
    pub inventory: Mutex<Reply<Vec<InventoryItem>>>,
    pub inventory_item: Mutex<Reply<InventoryItem>>,
    /// Create replies keyed by variety; unlisted varieties succeed
    pub create_by_variety: Mutex<BTreeMap<String, Reply<InventoryItem>>>,
    pub update: Mutex<Reply<InventoryItem>>,
    pub delete_item: Mutex<Reply<()>>,
    pub browse: Mutex<Reply<Vec<InventoryItem>>>,
    pub company: Mutex<Reply<CompanyProfile>>,
    pub trends: Mutex<Reply<Value>>,
    pub correlations: Mutex<Reply<Correlations>>,
    pub markets: Mutex<Reply<MarketComparison>>,
    pub predict: Mutex<Reply<PredictionResult>>,
    calls: Mutex<Vec<Call>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            sales: Mutex::new(Reply::Ok(Vec::new())),
            analytics: Mutex::new(Reply::Ok(AnalyticsSummary::default())),
            delete_sale: Mutex::new(Reply::Ok(())),
            inventory: Mutex::new(Reply::Ok(Vec::new())),
            inventory_item: Mutex::new(Reply::Ok(InventoryItem::default())),
            create_by_variety: Mutex::new(BTreeMap::new()),
            update: Mutex::new(Reply::Ok(InventoryItem::default())),
            delete_item: Mutex::new(Reply::Ok(())),
            browse: Mutex::new(Reply::Ok(Vec::new())),
            company: Mutex::new(Reply::Ok(CompanyProfile::default())),
            trends: Mutex::new(Reply::Ok(Value::Null)),
            correlations: Mutex::new(Reply::Ok(Correlations::default())),
            markets: Mutex::new(Reply::Ok(MarketComparison::new())),
            predict: Mutex::new(Reply::Ok(PredictionResult::default())),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<T>(slot: &Mutex<Reply<T>>, reply: Reply<T>) {
        *slot.lock().unwrap() = reply;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| matches(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn replay<T: Clone>(slot: &Mutex<Reply<T>>) -> ClientResult<T> {
    slot.lock().unwrap().produce()
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn sales(&self, query: &QueryParams) -> ClientResult<Vec<SalesEntry>> {
        self.record(Call::Sales(query.clone()));
        replay(&self.sales)
    }

    async fn delete_sale(&self, id: &str) -> ClientResult<()> {
        self.record(Call::DeleteSale(id.to_string()));
        replay(&self.delete_sale)
    }

    async fn analytics(&self, query: &QueryParams) -> ClientResult<AnalyticsSummary> {
        self.record(Call::Analytics(query.clone()));
        replay(&self.analytics)
    }

    async fn retailer_inventory(&self) -> ClientResult<Vec<InventoryItem>> {
        self.record(Call::RetailerInventory);
        replay(&self.inventory)
    }

    async fn retailer_inventory_item(&self, id: &str) -> ClientResult<InventoryItem> {
        self.record(Call::RetailerInventoryItem(id.to_string()));
        replay(&self.inventory_item)
    }

    async fn create_inventory_item(&self, item: &NewInventoryItem) -> ClientResult<InventoryItem> {
        self.record(Call::CreateInventoryItem(item.clone()));
        let variety = item.rice_variety.clone().unwrap_or_default();
        match self.create_by_variety.lock().unwrap().get(&variety) {
            Some(reply) => reply.produce(),
            None => Ok(InventoryItem {
                id: format!("new-{}", variety),
                rice_variety: item.rice_variety.clone(),
                ..Default::default()
            }),
        }
    }

    async fn update_inventory_item(
        &self,
        id: &str,
        patch: &InventoryPatch,
    ) -> ClientResult<InventoryItem> {
        self.record(Call::UpdateInventoryItem(id.to_string(), patch.clone()));
        replay(&self.update)
    }

    async fn delete_inventory_item(&self, id: &str) -> ClientResult<()> {
        self.record(Call::DeleteInventoryItem(id.to_string()));
        replay(&self.delete_item)
    }

    async fn browse_inventory(&self, query: &QueryParams) -> ClientResult<Vec<InventoryItem>> {
        self.record(Call::BrowseInventory(query.clone()));
        replay(&self.browse)
    }

    async fn company(&self, retailer_id: &str) -> ClientResult<CompanyProfile> {
        self.record(Call::Company(retailer_id.to_string()));
        replay(&self.company)
    }

    async fn trends(&self, query: &QueryParams) -> ClientResult<Value> {
        self.record(Call::Trends(query.clone()));
        replay(&self.trends)
    }

    async fn correlations(&self, query: &QueryParams) -> ClientResult<Correlations> {
        self.record(Call::Correlations(query.clone()));
        replay(&self.correlations)
    }

    async fn market_comparison(&self, query: &QueryParams) -> ClientResult<MarketComparison> {
        self.record(Call::MarketComparison(query.clone()));
        replay(&self.markets)
    }

    async fn predict(&self, request: &PredictionRequest) -> ClientResult<PredictionResult> {
        self.record(Call::Predict(request.clone()));
        replay(&self.predict)
    }
}

// ============================================================================
// Builders
// ============================================================================

pub fn controller(api: FakeApi) -> TestController {
    DashboardController::new(api, MemoryPage::full(), RecordingCharts::new())
}

pub fn sale(id: &str, week: &str, sold: &str, unsold: &str) -> SalesEntry {
    let sold = dec(sold);
    let unsold = dec(unsold);
    SalesEntry {
        id: id.to_string(),
        week_date: Some(week.to_string()),
        rice_sold: Some(sold),
        rice_unsold: Some(unsold),
        price_per_kg: Some(dec("50")),
        waste_percentage: Some(shared::waste_percentage(sold, unsold).round_dp(1)),
    }
}

pub fn point(week: &str, sold: f64, unsold: f64) -> ChartPoint {
    let total = sold + unsold;
    ChartPoint {
        week: week.to_string(),
        sold,
        unsold,
        waste_percentage: if total > 0.0 { unsold / total * 100.0 } else { 0.0 },
        price: 50.0,
        revenue: sold * 50.0,
    }
}

pub fn summary(points: Vec<ChartPoint>) -> AnalyticsSummary {
    AnalyticsSummary {
        total_entries: Some(Decimal::from(points.len())),
        total_sold: Some(dec("180")),
        total_revenue: Some(dec("9000")),
        efficiency_score: Some("82.5".to_string()),
        chart_data: points,
        total_waste: Some(dec("20")),
        avg_price: Some(dec("50")),
        waste_percentage: Some(dec("10")),
    }
}

pub fn item(id: &str, variety: &str, date_posted: Option<&str>) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        rice_variety: Some(variety.to_string()),
        stock_kg: Some(dec("25")),
        price_per_kg: Some(dec("48.50")),
        date_posted: date_posted.map(str::to_string),
        created_at: Some("2024-03-01T08:00:00+00:00".to_string()),
        retailer_id: Some("r1".to_string()),
        retailer_company: Some("Golden Grain Trading".to_string()),
        retailer_area: Some("Davao".to_string()),
        retailer_location: Some("Bangkerohan Public Market".to_string()),
    }
}
