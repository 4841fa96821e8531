//! Validation utilities for dashboard forms and filters

use chrono::NaiveDate;
use validator::Validate;

use crate::models::{InventoryRowInput, NewInventoryItem, PredictionRequest};
use crate::types::non_blank;

pub const INCOMPLETE_ROWS_MESSAGE: &str =
    "Please complete stock and price for all rows or remove incomplete rows.";
pub const NO_ROWS_MESSAGE: &str = "Please add at least one variety row.";

// ============================================================================
// Inventory Validations
// ============================================================================

/// Turn the multi-row form into create payloads.
///
/// Untouched rows are ignored. A single attempted row without stock or price
/// rejects the whole submission.
pub fn validate_inventory_rows(
    rows: &[InventoryRowInput],
    date_posted: Option<&str>,
) -> Result<Vec<NewInventoryItem>, &'static str> {
    let date_posted = non_blank(date_posted).map(str::to_string);
    let mut entries = Vec::new();

    for row in rows.iter().filter(|r| r.is_attempted()) {
        if !row.is_complete() {
            return Err(INCOMPLETE_ROWS_MESSAGE);
        }
        entries.push(NewInventoryItem {
            rice_variety: non_blank(Some(&row.variety)).map(str::to_string),
            stock_kg: row.stock.clone(),
            price_per_kg: row.price.clone(),
            date_posted: date_posted.clone(),
        });
    }

    if entries.is_empty() {
        return Err(NO_ROWS_MESSAGE);
    }
    Ok(entries)
}

/// Validate a `YYYY-MM-DD` posting date
pub fn validate_posting_date(date: &str) -> Result<NaiveDate, &'static str> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| "Date must be in YYYY-MM-DD format")
}

// ============================================================================
// Filter Validations
// ============================================================================

pub fn validate_month(month: u32) -> Result<(), &'static str> {
    if !(1..=12).contains(&month) {
        return Err("Month must be between 1 and 12");
    }
    Ok(())
}

/// Reporting weeks within a month are numbered 1 to 5
pub fn validate_week(week: u32) -> Result<(), &'static str> {
    if !(1..=5).contains(&week) {
        return Err("Week must be between 1 and 5");
    }
    Ok(())
}

pub fn validate_year(year: i32) -> Result<(), &'static str> {
    if !(2000..=2100).contains(&year) {
        return Err("Year must be between 2000 and 2100");
    }
    Ok(())
}

// ============================================================================
// Prediction Validations
// ============================================================================

/// Validate the demand prediction form before it is sent.
///
/// Purchasing power and competitors are clamped into range; the returned
/// request is the one to post.
pub fn validate_prediction(request: &PredictionRequest) -> Result<PredictionRequest, &'static str> {
    if ![
        request.population,
        request.avg_consumption,
        request.purchasing_power,
        request.competitors,
    ]
    .iter()
    .all(|v| v.is_finite())
    {
        return Err("Prediction inputs must be numbers");
    }
    let clamped = request.clamped();
    clamped
        .validate()
        .map_err(|_| "Population and consumption cannot be negative")?;
    Ok(clamped)
}
