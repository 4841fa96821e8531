//! Analytics summary, chart series and the analytics page breakdowns

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{fixed_f64, lenient, plain, CURRENCY, PLACEHOLDER};

/// Response of `GET /api/analytics`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AnalyticsSummary {
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total_entries: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total_sold: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total_revenue: Option<Decimal>,
    /// Backend-computed rating, displayed as-is
    #[serde(default, deserialize_with = "lenient::text")]
    pub efficiency_score: Option<String>,
    #[serde(default)]
    pub chart_data: Vec<ChartPoint>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total_waste: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub avg_price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub waste_percentage: Option<Decimal>,
}

/// One bucket of the chart series (a week, month or year)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChartPoint {
    #[serde(default, deserialize_with = "lenient::id")]
    pub week: String,
    #[serde(default, deserialize_with = "lenient::float_or_zero")]
    pub sold: f64,
    #[serde(default, deserialize_with = "lenient::float_or_zero")]
    pub unsold: f64,
    #[serde(default, deserialize_with = "lenient::float_or_zero")]
    pub waste_percentage: f64,
    #[serde(default, deserialize_with = "lenient::float_or_zero")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient::float_or_zero")]
    pub revenue: f64,
}

/// Colour band of a waste bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WasteBand {
    /// At most 10 %
    Healthy,
    /// Above 10 %, at most 20 %
    Elevated,
    /// Above 20 %
    Critical,
}

impl WasteBand {
    pub fn classify(waste_percentage: f64) -> Self {
        if waste_percentage > 20.0 {
            WasteBand::Critical
        } else if waste_percentage > 10.0 {
            WasteBand::Elevated
        } else {
            WasteBand::Healthy
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            WasteBand::Healthy => "#28a745",
            WasteBand::Elevated => "#ffc107",
            WasteBand::Critical => "#dc3545",
        }
    }
}

/// Total kilograms sold and unsold across the series
pub fn sold_unsold_totals(points: &[ChartPoint]) -> (f64, f64) {
    points
        .iter()
        .fold((0.0, 0.0), |(sold, unsold), p| (sold + p.sold, unsold + p.unsold))
}

// ============================================================================
// Insights
// ============================================================================

/// A short narrative card on the analytics page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Insight {
    pub title: String,
    pub content: String,
}

/// Narrative insights derived from the summary figures
pub fn generate_insights(summary: &AnalyticsSummary) -> Vec<Insight> {
    let waste = summary.waste_percentage;
    let below = |limit: i64| waste.map(|w| w < Decimal::from(limit)).unwrap_or(false);
    let above = |limit: i64| waste.map(|w| w > Decimal::from(limit)).unwrap_or(false);

    let rating = if below(10) {
        "Excellent waste management!"
    } else if below(20) {
        "Good performance with room for improvement."
    } else {
        "Consider optimizing your inventory management."
    };
    let waste_advice = if above(15) {
        "Consider reducing order quantities."
    } else {
        "Waste levels are within acceptable range."
    };

    vec![
        Insight {
            title: "Efficiency Rating".to_string(),
            content: format!(
                "Your current efficiency score is {}. {}",
                summary.efficiency_score.as_deref().unwrap_or(PLACEHOLDER),
                rating
            ),
        },
        Insight {
            title: "Revenue Trend".to_string(),
            content: format!(
                "Total revenue: {}{}. Average price: {}{} per kg.",
                CURRENCY,
                plain(summary.total_revenue),
                CURRENCY,
                plain(summary.avg_price)
            ),
        },
        Insight {
            title: "Waste Analysis".to_string(),
            content: format!("Current waste rate: {}%. {}", plain(waste), waste_advice),
        },
    ]
}

// ============================================================================
// Correlations and market comparison
// ============================================================================

/// Response of `GET /api/correlations`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Correlations {
    #[serde(default)]
    pub interpretations: BTreeMap<String, String>,
    /// Coefficient per variable pair, keyed like `price_vs_demand`
    #[serde(flatten)]
    pub coefficients: BTreeMap<String, Value>,
}

/// A rendered correlation coefficient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorrelationCard {
    pub title: String,
    pub value: String,
    pub interpretation: String,
}

impl Correlations {
    pub fn coefficient(&self, key: &str) -> f64 {
        self.coefficients
            .get(key)
            .and_then(lenient::float_from_value)
            .unwrap_or(0.0)
    }

    /// One card per interpreted coefficient
    pub fn cards(&self) -> Vec<CorrelationCard> {
        self.interpretations
            .iter()
            .map(|(key, interpretation)| CorrelationCard {
                title: key.replace('_', " "),
                value: fixed_f64(self.coefficient(key), 3),
                interpretation: interpretation.clone(),
            })
            .collect()
    }
}

/// Aggregates for one market-size bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MarketStats {
    #[serde(default, deserialize_with = "lenient::float_or_zero")]
    pub total_sold: f64,
    #[serde(default, deserialize_with = "lenient::float_or_zero")]
    pub total_waste: f64,
    #[serde(default, deserialize_with = "lenient::float_or_zero")]
    pub avg_price: f64,
    #[serde(default, deserialize_with = "lenient::float_or_zero")]
    pub avg_waste_percentage: f64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub efficiency_score: Option<String>,
}

/// Response of `GET /api/market-comparison`, keyed by market name
pub type MarketComparison = BTreeMap<String, MarketStats>;

impl MarketStats {
    /// Label/value pairs shown on a market card
    pub fn stat_lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total Sold:", format!("{} kg", fixed_f64(self.total_sold, 1))),
            ("Waste %:", format!("{}%", fixed_f64(self.avg_waste_percentage, 1))),
            ("Avg Price:", format!("{}{}", CURRENCY, fixed_f64(self.avg_price, 2))),
            (
                "Efficiency:",
                self.efficiency_score
                    .clone()
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
            ),
        ]
    }
}
