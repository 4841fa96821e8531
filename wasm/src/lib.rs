//! WebAssembly module for the Rice Retail Dashboard
//!
//! Provides client-side computation for:
//! - The waste preview on the sales entry form
//! - Inventory date grouping
//! - Multi-row inventory form validation
//! - Demand prediction and waste bar colours

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("rice dashboard module loaded"));
}

/// Unsold stock as a percentage of total stock
#[wasm_bindgen]
pub fn calculate_waste_percentage(sold: f64, unsold: f64) -> f64 {
    let sold = Decimal::try_from(sold).unwrap_or(Decimal::ZERO);
    let unsold = Decimal::try_from(unsold).unwrap_or(Decimal::ZERO);
    waste_percentage(sold, unsold).to_f64().unwrap_or(0.0)
}

/// Preview lines for the raw form fields, or an empty string when there is
/// no stock and the preview should be hidden
#[wasm_bindgen]
pub fn waste_preview_text(sold: &str, unsold: &str, price_per_kg: &str) -> String {
    WastePreview::from_input(sold, unsold, price_per_kg)
        .map(|preview| preview.lines().join("\n"))
        .unwrap_or_default()
}

/// Group inventory items by date.
///
/// Returns `[{label, domId, items}]`, newest group first.
#[wasm_bindgen]
pub fn group_inventory_json(items_json: &str) -> Result<String, JsValue> {
    let items: Vec<InventoryItem> = serde_json::from_str(items_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid inventory JSON: {}", e)))?;
    Ok(grouped(&items).to_string())
}

fn grouped(items: &[InventoryItem]) -> Value {
    let groups: Vec<Value> = group_by_date(items)
        .iter()
        .map(|group| {
            json!({
                "label": group.label,
                "domId": group.dom_id(),
                "items": group.items,
            })
        })
        .collect();
    Value::Array(groups)
}

/// Validate the multi-row inventory form.
///
/// Returns the create payloads as JSON, or throws the message to alert.
#[wasm_bindgen]
pub fn validate_inventory_rows_json(
    rows_json: &str,
    date_posted: Option<String>,
) -> Result<String, JsValue> {
    let rows: Vec<InventoryRowInput> = serde_json::from_str(rows_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid rows JSON: {}", e)))?;
    let entries =
        validate_inventory_rows(&rows, date_posted.as_deref()).map_err(JsValue::from_str)?;
    serde_json::to_string(&entries).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Expected weekly rice demand in kilograms
#[wasm_bindgen]
pub fn calculate_rice_demand(
    population: f64,
    avg_consumption: f64,
    purchasing_power: f64,
    competitors: f64,
) -> f64 {
    shared::calculate_rice_demand(population, avg_consumption, purchasing_power, competitors)
}

/// Bar colour for a waste percentage
#[wasm_bindgen]
pub fn waste_bar_color(waste_percentage: f64) -> String {
    WasteBand::classify(waste_percentage).color().to_string()
}

/// Default week date (`YYYY-MM-DD`) for the day given as `YYYY-MM-DD`
#[wasm_bindgen]
pub fn week_date_for(iso_date: &str) -> Option<String> {
    let day = NaiveDate::parse_from_str(iso_date.trim(), "%Y-%m-%d").ok()?;
    Some(default_week_date(day).format("%Y-%m-%d").to_string())
}

/// Default week date for today in the browser's local time
#[wasm_bindgen]
pub fn today_week_date() -> Option<String> {
    let now = js_sys::Date::new_0();
    let today = NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )?;
    Some(default_week_date(today).format("%Y-%m-%d").to_string())
}
