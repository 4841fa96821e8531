//! Weekly sales entries and the waste preview shown on the entry form

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{decimal_or_zero, fixed, lenient, CURRENCY};

/// One weekly sales record as returned by `GET /api/sales`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesEntry {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub week_date: Option<String>,
    /// Kilograms sold during the week
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub rice_sold: Option<Decimal>,
    /// Kilograms left unsold at the end of the week
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub rice_unsold: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price_per_kg: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub waste_percentage: Option<Decimal>,
}

/// The `limit` most recent entries, by position in the backend's list
pub fn most_recent(entries: &[SalesEntry], limit: usize) -> &[SalesEntry] {
    let start = entries.len().saturating_sub(limit);
    &entries[start..]
}

/// Live preview of a sales entry before it is submitted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WastePreview {
    pub waste_percentage: Decimal,
    pub total_stock_kg: Decimal,
    pub revenue: Decimal,
}

impl WastePreview {
    /// Compute the preview; `None` (preview hidden) when there is no stock
    /// or the figures do not fit in a `Decimal`
    pub fn compute(sold: Decimal, unsold: Decimal, price_per_kg: Decimal) -> Option<Self> {
        let total = sold.checked_add(unsold)?;
        if total <= Decimal::ZERO {
            return None;
        }
        Some(Self {
            waste_percentage: share_of(unsold, total)?,
            total_stock_kg: total,
            revenue: sold.checked_mul(price_per_kg)?,
        })
    }

    /// Compute from raw form input; blank or unparseable fields count as zero
    pub fn from_input(sold: &str, unsold: &str, price_per_kg: &str) -> Option<Self> {
        Self::compute(
            decimal_or_zero(sold),
            decimal_or_zero(unsold),
            decimal_or_zero(price_per_kg),
        )
    }

    pub fn lines(&self) -> [String; 3] {
        [
            format!("Waste Percentage: {}%", fixed(self.waste_percentage, 1)),
            format!("Total Stock: {} kg", fixed(self.total_stock_kg, 1)),
            format!("Estimated Revenue: {}{}", CURRENCY, fixed(self.revenue, 2)),
        ]
    }
}

impl std::fmt::Display for WastePreview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Unsold stock as a percentage of total stock; zero when there is no stock
/// or the total overflows
pub fn waste_percentage(sold: Decimal, unsold: Decimal) -> Decimal {
    match sold.checked_add(unsold) {
        Some(total) if total > Decimal::ZERO => share_of(unsold, total).unwrap_or_default(),
        _ => Decimal::ZERO,
    }
}

fn share_of(part: Decimal, total: Decimal) -> Option<Decimal> {
    part.checked_div(total)?.checked_mul(Decimal::ONE_HUNDRED)
}

/// Monday of the reporting week used to pre-fill the entry form.
///
/// Weekdays count from Sunday = 0, so a Sunday rolls forward to the next day.
pub fn default_week_date(today: NaiveDate) -> NaiveDate {
    let from_sunday = today.weekday().num_days_from_sunday() as i64;
    today - Duration::days(from_sunday) + Duration::days(1)
}
