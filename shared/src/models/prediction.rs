//! Rice demand prediction

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::lenient;

/// Human-readable form of the demand formula
pub const DEMAND_FORMULA: &str =
    "(Population × Avg Consumption × Purchasing Power) ÷ (1 + Competitors)";

/// Body of `POST /api/predict`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    #[validate(range(min = 0.0))]
    pub population: f64,
    /// Kilograms per person per week
    #[validate(range(min = 0.0))]
    pub avg_consumption: f64,
    /// Share of demand customers can afford, 0 to 1
    #[validate(range(min = 0.0, max = 1.0))]
    pub purchasing_power: f64,
    #[validate(range(min = 0.0))]
    pub competitors: f64,
}

/// Response of `POST /api/predict`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PredictionResult {
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub predicted_demand: Option<Decimal>,
    #[serde(default)]
    pub formula_used: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Expected weekly demand in kilograms.
///
/// Purchasing power is clamped to `[0, 1]` and competitors to `>= 0`.
pub fn calculate_rice_demand(
    population: f64,
    avg_consumption: f64,
    purchasing_power: f64,
    competitors: f64,
) -> f64 {
    let purchasing_power = purchasing_power.clamp(0.0, 1.0);
    let competitors = competitors.max(0.0);
    let demand = (population * avg_consumption * purchasing_power) / (1.0 + competitors);
    if demand.is_finite() {
        demand
    } else {
        0.0
    }
}

impl PredictionRequest {
    /// Purchasing power clamped to `[0, 1]` and competitors to `>= 0`
    pub fn clamped(&self) -> Self {
        Self {
            purchasing_power: self.purchasing_power.clamp(0.0, 1.0),
            competitors: self.competitors.max(0.0),
            ..self.clone()
        }
    }

    /// Local estimate using the same formula as the backend
    pub fn estimate(&self) -> f64 {
        calculate_rice_demand(
            self.population,
            self.avg_consumption,
            self.purchasing_power,
            self.competitors,
        )
    }
}
