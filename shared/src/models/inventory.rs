//! Retailer inventory listings, date grouping and company statistics

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{date_prefix, lenient, non_blank, NO_DATE_LABEL};

/// A stock listing posted by a retailer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct InventoryItem {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub rice_variety: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub stock_kg: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price_per_kg: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub date_posted: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub retailer_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub retailer_company: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub retailer_area: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub retailer_location: Option<String>,
}

impl InventoryItem {
    /// Posting date, falling back to the creation timestamp
    pub fn effective_date(&self) -> Option<&str> {
        non_blank(self.date_posted.as_deref()).or_else(|| non_blank(self.created_at.as_deref()))
    }

    /// `YYYY-MM-DD` group key, or the "No date" bucket
    pub fn group_key(&self) -> String {
        date_prefix(self.effective_date()).unwrap_or_else(|| NO_DATE_LABEL.to_string())
    }
}

// ============================================================================
// Date grouping
// ============================================================================

/// Items sharing one effective date
#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup<'a> {
    pub label: String,
    pub items: Vec<&'a InventoryItem>,
}

impl DateGroup<'_> {
    /// Element id for the group's rows: `dg-` plus the label with every run
    /// of non-alphanumerics collapsed to a single dash
    pub fn dom_id(&self) -> String {
        group_dom_id(&self.label)
    }
}

pub fn group_dom_id(label: &str) -> String {
    let mut id = String::from("dg-");
    let mut in_gap = false;
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            id.push(c);
            in_gap = false;
        } else if !in_gap {
            id.push('-');
            in_gap = true;
        }
    }
    id
}

/// Sort key: real dates first (newest first), then unparseable labels,
/// and the "No date" bucket always last
fn compare_labels(a: &str, b: &str) -> Ordering {
    let rank = |label: &str| -> (u8, Option<NaiveDate>) {
        if label == NO_DATE_LABEL {
            (2, None)
        } else {
            match NaiveDate::parse_from_str(label, "%Y-%m-%d") {
                Ok(date) => (0, Some(date)),
                Err(_) => (1, None),
            }
        }
    };
    let (rank_a, date_a) = rank(a);
    let (rank_b, date_b) = rank(b);
    rank_a
        .cmp(&rank_b)
        .then_with(|| date_b.cmp(&date_a))
        .then_with(|| b.cmp(a))
}

/// Group items by effective date, newest group first, "No date" last.
/// Items keep their input order within a group.
pub fn group_by_date(items: &[InventoryItem]) -> Vec<DateGroup<'_>> {
    let mut groups: Vec<DateGroup<'_>> = Vec::new();
    for item in items {
        let label = item.group_key();
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.items.push(item),
            None => groups.push(DateGroup {
                label,
                items: vec![item],
            }),
        }
    }
    groups.sort_by(|a, b| compare_labels(&a.label, &b.label));
    groups
}

// ============================================================================
// Create / update payloads
// ============================================================================

/// One row of the multi-row "add inventory" form, as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRowInput {
    #[serde(default)]
    pub variety: String,
    #[serde(default)]
    pub stock: String,
    #[serde(default)]
    pub price: String,
}

impl InventoryRowInput {
    pub fn new(variety: &str, stock: &str, price: &str) -> Self {
        Self {
            variety: variety.to_string(),
            stock: stock.to_string(),
            price: price.to_string(),
        }
    }

    /// A row counts once the user typed anything into it
    pub fn is_attempted(&self) -> bool {
        !self.variety.trim().is_empty() || !self.stock.is_empty() || !self.price.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        !self.stock.is_empty() && !self.price.is_empty()
    }
}

/// Body of `POST /api/retailer/inventory`.
///
/// Stock and price are forwarded as typed; the backend owns numeric parsing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewInventoryItem {
    pub rice_variety: Option<String>,
    pub stock_kg: String,
    pub price_per_kg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<String>,
}

/// Body of `PATCH /api/retailer/inventory/:id`; only changed fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rice_variety: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_kg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_kg: Option<String>,
}

/// Answers to the edit prompts; `None` means the prompt was cancelled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditAnswers {
    pub date: Option<String>,
    pub variety: Option<String>,
    pub stock: Option<String>,
    pub price: Option<String>,
}

/// Current values an edit starts from, rendered the way the prompts show them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDefaults {
    pub date: String,
    pub variety: String,
    pub stock: String,
    pub price: String,
}

impl EditDefaults {
    pub fn of(item: &InventoryItem) -> Self {
        Self {
            date: date_prefix(item.date_posted.as_deref()).unwrap_or_default(),
            variety: item.rice_variety.clone().unwrap_or_default(),
            stock: item.stock_kg.map(|d| d.to_string()).unwrap_or_default(),
            price: item.price_per_kg.map(|d| d.to_string()).unwrap_or_default(),
        }
    }
}

impl InventoryPatch {
    /// Keep a field when its prompt was cancelled, left blank, or unchanged
    pub fn from_answers(current: &EditDefaults, answers: &EditAnswers) -> Self {
        fn changed(answer: &Option<String>, current: &str) -> Option<String> {
            answer
                .as_deref()
                .filter(|a| !a.trim().is_empty() && *a != current)
                .map(str::to_string)
        }

        Self {
            date_posted: changed(&answers.date, &current.date),
            rice_variety: changed(&answers.variety, &current.variety),
            stock_kg: changed(&answers.stock, &current.stock),
            price_per_kg: changed(&answers.price, &current.price),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.date_posted.is_none()
            && self.rice_variety.is_none()
            && self.stock_kg.is_none()
            && self.price_per_kg.is_none()
    }
}

// ============================================================================
// Consumer browsing and company pages
// ============================================================================

/// Response of `GET /api/company/:id`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CompanyProfile {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub retailer_company: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub retailer_area: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub retailer_location: Option<String>,
}

/// A retailer appearing in browse results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetailerSummary {
    pub id: Option<String>,
    pub company: Option<String>,
    pub area: Option<String>,
    pub location: Option<String>,
}

/// Unique retailers in first-seen order, keyed by id, then company name
pub fn unique_retailers(items: &[InventoryItem]) -> Vec<RetailerSummary> {
    let mut seen = BTreeSet::new();
    let mut retailers = Vec::new();
    for item in items {
        let key = item
            .retailer_id
            .clone()
            .or_else(|| item.retailer_company.clone())
            .unwrap_or_else(|| "unknown".to_string());
        if seen.insert(key) {
            retailers.push(RetailerSummary {
                id: item.retailer_id.clone(),
                company: item.retailer_company.clone(),
                area: item.retailer_area.clone(),
                location: item.retailer_location.clone(),
            });
        }
    }
    retailers
}

/// Headline numbers for a company's listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyStats {
    pub listings: usize,
    pub varieties: usize,
    pub avg_price: Decimal,
    pub min_price: Decimal,
    pub max_price: Decimal,
}

impl CompanyStats {
    /// `None` when there are no listings; unparseable prices are skipped
    pub fn from_items(items: &[InventoryItem]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        let prices: Vec<Decimal> = items.iter().filter_map(|i| i.price_per_kg).collect();
        let varieties: BTreeSet<String> = items
            .iter()
            .map(|i| {
                non_blank(i.rice_variety.as_deref())
                    .unwrap_or("Unknown")
                    .to_string()
            })
            .collect();

        let (avg_price, min_price, max_price) = if prices.is_empty() {
            (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
        } else {
            // An overflowing sum leaves the average at zero
            let avg = prices
                .iter()
                .try_fold(Decimal::ZERO, |sum, price| sum.checked_add(*price))
                .and_then(|sum| sum.checked_div(Decimal::from(prices.len())))
                .unwrap_or_default();
            (
                avg,
                prices.iter().copied().min().unwrap_or_default(),
                prices.iter().copied().max().unwrap_or_default(),
            )
        };

        Some(Self {
            listings: items.len(),
            varieties: varieties.len(),
            avg_price,
            min_price,
            max_price,
        })
    }
}
