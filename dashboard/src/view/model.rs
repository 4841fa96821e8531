//! View models rendered through the page surface

use std::fmt;

use rust_decimal::Decimal;
use shared::{
    date_label, fixed, fixed_or_placeholder, group_by_date, plain, AnalyticsSummary,
    CompanyStats, CorrelationCard, Insight, InventoryItem, MarketStats, RetailerSummary,
    SalesEntry, CURRENCY, PLACEHOLDER,
};

use super::ElementId;

pub const NO_INVENTORY_MESSAGE: &str = "No inventory yet";
pub const NO_RESULTS_MESSAGE: &str = "No results";
pub const NO_LISTINGS_MESSAGE: &str = "No listings";

/// What an element shows
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Table(TableBody),
    Inventory(InventoryTableView),
    Cards(Vec<Card>),
    Stats(Vec<Stat>),
    Items(Vec<String>),
    Empty,
}

impl Content {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }
}

// ============================================================================
// Tables
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    /// A single row spanning the table, used for empty states
    Message { text: String, colspan: usize },
    Rows(Vec<TableRow>),
}

impl TableBody {
    pub fn message(text: &str, colspan: usize) -> Self {
        TableBody::Message {
            text: text.to_string(),
            colspan,
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        match self {
            TableBody::Rows(rows) => rows,
            TableBody::Message { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRow {
    pub cells: Vec<String>,
    /// Navigation target when the whole row is clickable
    pub href: Option<String>,
    pub actions: Vec<RowAction>,
}

/// A button on a row, carrying the id it acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    DeleteSale(String),
    EditInventory(String),
    DeleteInventory(String),
}

impl RowAction {
    pub fn label(&self) -> &'static str {
        match self {
            RowAction::DeleteSale(_) | RowAction::DeleteInventory(_) => "Delete",
            RowAction::EditInventory(_) => "Edit",
        }
    }
}

/// `{prefix}{value}{suffix}`, or the placeholder when the value is missing
fn with_unit(value: Option<Decimal>, prefix: &str, suffix: &str) -> String {
    match value {
        Some(v) => format!("{}{}{}", prefix, plain(Some(v)), suffix),
        None => PLACEHOLDER.to_string(),
    }
}

/// Rows of the recent entries table
pub fn recent_rows(entries: &[SalesEntry]) -> TableBody {
    TableBody::Rows(
        entries
            .iter()
            .map(|entry| TableRow {
                cells: vec![
                    entry
                        .week_date
                        .clone()
                        .unwrap_or_else(|| PLACEHOLDER.to_string()),
                    with_unit(entry.rice_sold, "", " kg"),
                    with_unit(entry.rice_unsold, "", " kg"),
                    with_unit(entry.price_per_kg, CURRENCY, ""),
                    with_unit(entry.waste_percentage, "", "%"),
                ],
                href: None,
                actions: vec![RowAction::DeleteSale(entry.id.clone())],
            })
            .collect(),
    )
}

/// One row per retailer in consumer browse results
pub fn retailer_rows(retailers: &[RetailerSummary]) -> TableBody {
    if retailers.is_empty() {
        return TableBody::message(NO_RESULTS_MESSAGE, 3);
    }
    let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| PLACEHOLDER.to_string());
    TableBody::Rows(
        retailers
            .iter()
            .map(|r| TableRow {
                cells: vec![or_dash(&r.company), or_dash(&r.area), or_dash(&r.location)],
                href: r.id.as_deref().map(company_href),
                actions: Vec::new(),
            })
            .collect(),
    )
}

/// Link to a retailer's company page
pub fn company_href(retailer_id: &str) -> String {
    format!("/company/{}", urlencoding::encode(retailer_id))
}

/// Listings table on the company page
pub fn company_listing_rows(items: &[InventoryItem]) -> TableBody {
    if items.is_empty() {
        return TableBody::message(NO_LISTINGS_MESSAGE, 4);
    }
    TableBody::Rows(
        items
            .iter()
            .map(|item| TableRow {
                cells: vec![
                    item.rice_variety
                        .clone()
                        .unwrap_or_else(|| PLACEHOLDER.to_string()),
                    fixed_or_placeholder(item.stock_kg, 2),
                    format!("{}{}", CURRENCY, fixed_or_placeholder(item.price_per_kg, 2)),
                    date_label(item.effective_date()),
                ],
                href: None,
                actions: Vec::new(),
            })
            .collect(),
    )
}

// ============================================================================
// Summary
// ============================================================================

/// The four headline figures of the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub total_entries: String,
    pub total_sold: String,
    pub total_revenue: String,
    pub efficiency_score: String,
}

impl SummaryView {
    /// Every field reset to the placeholder
    pub fn placeholder() -> Self {
        Self {
            total_entries: PLACEHOLDER.to_string(),
            total_sold: PLACEHOLDER.to_string(),
            total_revenue: PLACEHOLDER.to_string(),
            efficiency_score: PLACEHOLDER.to_string(),
        }
    }

    pub fn from_summary(summary: &AnalyticsSummary) -> Self {
        Self {
            total_entries: plain(summary.total_entries),
            total_sold: with_unit(summary.total_sold, "", " kg"),
            total_revenue: with_unit(summary.total_revenue, CURRENCY, ""),
            efficiency_score: summary
                .efficiency_score
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        }
    }

    pub fn fields(&self) -> [(ElementId, &str); 4] {
        [
            (ElementId::TotalEntries, &self.total_entries),
            (ElementId::TotalSold, &self.total_sold),
            (ElementId::TotalRevenue, &self.total_revenue),
            (ElementId::EfficiencyScore, &self.efficiency_score),
        ]
    }
}

// ============================================================================
// Grouped inventory
// ============================================================================

/// The retailer's inventory, grouped by posting date
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventoryTableView {
    pub groups: Vec<InventoryGroupView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryGroupView {
    pub dom_id: String,
    pub label: String,
    pub expanded: bool,
    pub rows: Vec<InventoryRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRowView {
    pub id: String,
    pub variety: String,
    pub stock: String,
    pub price: String,
    pub created: String,
}

impl InventoryTableView {
    /// Build the grouped view; every group starts collapsed
    pub fn from_items(items: &[InventoryItem]) -> Self {
        let groups = group_by_date(items)
            .into_iter()
            .map(|group| InventoryGroupView {
                dom_id: group.dom_id(),
                rows: group.items.iter().map(|i| InventoryRowView::of(i)).collect(),
                label: group.label,
                expanded: false,
            })
            .collect();
        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, dom_id: &str) -> Option<&InventoryGroupView> {
        self.groups.iter().find(|g| g.dom_id == dom_id)
    }

    /// Flip a group's expanded state; `false` when no group has that id
    pub fn toggle(&mut self, dom_id: &str) -> bool {
        match self.groups.iter_mut().find(|g| g.dom_id == dom_id) {
            Some(group) => {
                group.expanded = !group.expanded;
                true
            }
            None => false,
        }
    }
}

impl InventoryGroupView {
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn glyph(&self) -> &'static str {
        if self.expanded {
            "▾"
        } else {
            "▸"
        }
    }

    pub fn aria_expanded(&self) -> &'static str {
        if self.expanded {
            "true"
        } else {
            "false"
        }
    }

    pub fn header_text(&self) -> String {
        format!("{} {} ({} items)", self.glyph(), self.label, self.count())
    }

    /// Rows are shown only while the group is expanded
    pub fn rows_visible(&self) -> bool {
        self.expanded
    }
}

impl InventoryRowView {
    pub fn of(item: &InventoryItem) -> Self {
        Self {
            id: item.id.clone(),
            variety: item
                .rice_variety
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            stock: fixed_or_placeholder(item.stock_kg, 2),
            price: format!("{}{}", CURRENCY, fixed_or_placeholder(item.price_per_kg, 2)),
            created: date_label(item.created_at.as_deref()),
        }
    }

    pub fn cells(&self) -> [&str; 4] {
        [&self.variety, &self.stock, &self.price, &self.created]
    }

    pub fn actions(&self) -> [RowAction; 2] {
        [
            RowAction::EditInventory(self.id.clone()),
            RowAction::DeleteInventory(self.id.clone()),
        ]
    }
}

// ============================================================================
// Cards and stats
// ============================================================================

/// A labelled value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

impl Stat {
    pub fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// A card in one of the analytics grids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub value: Option<String>,
    pub body: Option<String>,
    pub stats: Vec<Stat>,
}

impl Card {
    pub fn insight(insight: &Insight) -> Self {
        Self {
            title: insight.title.clone(),
            value: None,
            body: Some(insight.content.clone()),
            stats: Vec::new(),
        }
    }

    pub fn correlation(card: &CorrelationCard) -> Self {
        Self {
            title: card.title.clone(),
            value: Some(card.value.clone()),
            body: Some(card.interpretation.clone()),
            stats: Vec::new(),
        }
    }

    pub fn market(name: &str, stats: &MarketStats) -> Self {
        Self {
            title: name.to_string(),
            value: None,
            body: None,
            stats: stats
                .stat_lines()
                .into_iter()
                .map(|(label, value)| Stat::new(label, value))
                .collect(),
        }
    }
}

/// Headline stats on the company page
pub fn company_stats(stats: &CompanyStats) -> Vec<Stat> {
    let price = |v: Decimal| format!("{}{}", CURRENCY, fixed(v, 2));
    vec![
        Stat::new("Listings:", stats.listings.to_string()),
        Stat::new("Varieties:", stats.varieties.to_string()),
        Stat::new("Avg Price:", price(stats.avg_price)),
        Stat::new(
            "Min/Max Price:",
            format!("{} – {}", price(stats.min_price), price(stats.max_price)),
        ),
    ]
}

// ============================================================================
// Plain-text rendering
// ============================================================================

impl fmt::Display for TableRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cells.join(" | "))?;
        for action in &self.actions {
            write!(f, " [{}]", action.label())?;
        }
        if let Some(href) = &self.href {
            write!(f, " -> {}", href)?;
        }
        Ok(())
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Text(text) => write!(f, "{}", text),
            Content::Empty => Ok(()),
            Content::Table(TableBody::Message { text, .. }) => write!(f, "{}", text),
            Content::Table(TableBody::Rows(rows)) => {
                let lines: Vec<String> = rows.iter().map(|r| r.to_string()).collect();
                write!(f, "{}", lines.join("\n"))
            }
            Content::Inventory(view) => {
                let mut lines = Vec::new();
                for group in &view.groups {
                    lines.push(group.header_text());
                    if group.rows_visible() {
                        for row in &group.rows {
                            lines.push(format!("    {} [Edit] [Delete]", row.cells().join(" | ")));
                        }
                    }
                }
                write!(f, "{}", lines.join("\n"))
            }
            Content::Cards(cards) => {
                let mut lines = Vec::new();
                for card in cards {
                    match &card.value {
                        Some(value) => lines.push(format!("{}: {}", card.title, value)),
                        None => lines.push(card.title.clone()),
                    }
                    if let Some(body) = &card.body {
                        lines.push(format!("  {}", body));
                    }
                    for stat in &card.stats {
                        lines.push(format!("  {} {}", stat.label, stat.value));
                    }
                }
                write!(f, "{}", lines.join("\n"))
            }
            Content::Stats(stats) => {
                let lines: Vec<String> = stats
                    .iter()
                    .map(|s| format!("{} {}", s.label, s.value))
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
            Content::Items(items) => {
                let lines: Vec<String> = items.iter().map(|i| format!("- {}", i)).collect();
                write!(f, "{}", lines.join("\n"))
            }
        }
    }
}
