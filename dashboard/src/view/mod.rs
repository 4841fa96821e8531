//! The page surface the controller renders into.
//!
//! Everything the controller shows goes through [`Page`], keyed by
//! [`ElementId`]. Writes to an element the page does not have are no-ops,
//! so partial pages (a consumer page without a dashboard, a dashboard
//! without the inventory section) render what they can.

pub mod chart;
pub mod memory;
pub mod model;

pub use chart::{ChartBackend, ChartKind, ChartSpec, Dataset};
pub use memory::{ChartEvent, MemoryPage, RecordingCharts};
pub use model::*;

use std::fmt;

/// Every element id the controller reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementId {
    // Dashboard filters
    DashboardYear,
    DashboardMonth,
    DashboardPeriod,
    DashboardApply,
    DashboardReset,

    // Dashboard summary
    TotalEntries,
    TotalSold,
    TotalRevenue,
    EfficiencyScore,
    RecentDataBody,
    SalesChart,
    WasteChart,

    // Retailer inventory
    RetailerInventoryTableBody,
    DeleteModalOverlay,

    // Consumer browsing and company page
    InventoryResultsBody,
    CompanyName,
    CompanyArea,
    CompanyLocation,
    CompanyInventoryBody,
    CompanyStats,

    // Analytics page
    RevenueWasteChart,
    PriceChart,
    SalesDistributionChart,
    CorrelationGrid,
    MarketComparisonGrid,
    InsightsGrid,

    // Prediction form
    PredictedDemand,
    FormulaUsed,
    Recommendations,
    PredictionResults,

    // Sales entry form
    WastePreview,
    WasteText,
}

impl ElementId {
    pub const ALL: [ElementId; 32] = [
        ElementId::DashboardYear,
        ElementId::DashboardMonth,
        ElementId::DashboardPeriod,
        ElementId::DashboardApply,
        ElementId::DashboardReset,
        ElementId::TotalEntries,
        ElementId::TotalSold,
        ElementId::TotalRevenue,
        ElementId::EfficiencyScore,
        ElementId::RecentDataBody,
        ElementId::SalesChart,
        ElementId::WasteChart,
        ElementId::RetailerInventoryTableBody,
        ElementId::DeleteModalOverlay,
        ElementId::InventoryResultsBody,
        ElementId::CompanyName,
        ElementId::CompanyArea,
        ElementId::CompanyLocation,
        ElementId::CompanyInventoryBody,
        ElementId::CompanyStats,
        ElementId::RevenueWasteChart,
        ElementId::PriceChart,
        ElementId::SalesDistributionChart,
        ElementId::CorrelationGrid,
        ElementId::MarketComparisonGrid,
        ElementId::InsightsGrid,
        ElementId::PredictedDemand,
        ElementId::FormulaUsed,
        ElementId::Recommendations,
        ElementId::PredictionResults,
        ElementId::WastePreview,
        ElementId::WasteText,
    ];

    /// The DOM id
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::DashboardYear => "dashboardYear",
            ElementId::DashboardMonth => "dashboardMonth",
            ElementId::DashboardPeriod => "dashboardPeriod",
            ElementId::DashboardApply => "dashboardApply",
            ElementId::DashboardReset => "dashboardReset",
            ElementId::TotalEntries => "totalEntries",
            ElementId::TotalSold => "totalSold",
            ElementId::TotalRevenue => "totalRevenue",
            ElementId::EfficiencyScore => "efficiencyScore",
            ElementId::RecentDataBody => "recentDataBody",
            ElementId::SalesChart => "salesChart",
            ElementId::WasteChart => "wasteChart",
            ElementId::RetailerInventoryTableBody => "retailerInventoryTableBody",
            ElementId::DeleteModalOverlay => "deleteModalOverlay",
            ElementId::InventoryResultsBody => "inventoryResultsBody",
            ElementId::CompanyName => "companyName",
            ElementId::CompanyArea => "companyArea",
            ElementId::CompanyLocation => "companyLocation",
            ElementId::CompanyInventoryBody => "companyInventoryBody",
            ElementId::CompanyStats => "companyStats",
            ElementId::RevenueWasteChart => "revenueWasteChart",
            ElementId::PriceChart => "priceChart",
            ElementId::SalesDistributionChart => "salesDistributionChart",
            ElementId::CorrelationGrid => "correlationGrid",
            ElementId::MarketComparisonGrid => "marketComparisonGrid",
            ElementId::InsightsGrid => "insightsGrid",
            ElementId::PredictedDemand => "predictedDemand",
            ElementId::FormulaUsed => "formulaUsed",
            ElementId::Recommendations => "recommendations",
            ElementId::PredictionResults => "predictionResults",
            ElementId::WastePreview => "wastePreview",
            ElementId::WasteText => "wasteText",
        }
    }

    pub fn from_dom_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.as_str() == id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The DOM contract
pub trait Page {
    /// Whether the element exists on this page
    fn contains(&self, id: ElementId) -> bool;

    /// Replace the element's content. Ignored when the element is absent.
    fn render(&mut self, id: ElementId, content: Content);

    /// Show or hide the element. Ignored when the element is absent.
    fn set_visible(&mut self, id: ElementId, visible: bool);

    fn alert(&mut self, message: &str);

    /// Ask the user for a value; `None` when the prompt is cancelled
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;

    /// Reload the whole page
    fn reload(&mut self);

    fn set_text(&mut self, id: ElementId, text: impl Into<String>)
    where
        Self: Sized,
    {
        self.render(id, Content::Text(text.into()));
    }
}
