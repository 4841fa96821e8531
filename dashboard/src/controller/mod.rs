//! Dashboard data controller
//!
//! Fetches from the backend through [`DashboardApi`], turns responses into
//! view models and renders them through a [`Page`]. Chart instances, the
//! pending delete and the inventory grouping state are private to the
//! controller; nothing is global.

mod analytics;
mod browse;
mod dashboard;
mod delete;
mod inventory;
mod prediction;

pub use browse::retailer_id_from_path;
pub use dashboard::{DashboardSnapshot, RefreshTicket};
pub use delete::DELETE_FAILED_MESSAGE;
pub use inventory::GroupKey;
pub use prediction::PREDICTION_FAILED_MESSAGE;

use std::collections::BTreeMap;

use crate::api::DashboardApi;
use crate::view::{ChartBackend, ChartSpec, ElementId, InventoryTableView, Page};

/// Default number of rows in the recent entries table
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// The one delete awaiting confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDelete {
    Sale(String),
    InventoryItem(String),
}

pub struct DashboardController<A, P, C: ChartBackend> {
    api: A,
    page: P,
    charts: C,
    chart_slots: BTreeMap<ElementId, C::Handle>,
    pending_delete: Option<PendingDelete>,
    inventory_view: Option<InventoryTableView>,
    latest_ticket: u64,
    recent_limit: usize,
}

impl<A, P, C> DashboardController<A, P, C>
where
    A: DashboardApi,
    P: Page,
    C: ChartBackend,
{
    pub fn new(api: A, page: P, charts: C) -> Self {
        Self {
            api,
            page,
            charts,
            chart_slots: BTreeMap::new(),
            pending_delete: None,
            inventory_view: None,
            latest_ticket: 0,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn charts(&self) -> &C {
        &self.charts
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    /// The grouped inventory as last rendered, with its expanded state
    pub fn inventory_view(&self) -> Option<&InventoryTableView> {
        self.inventory_view.as_ref()
    }

    pub fn into_parts(self) -> (A, P, C) {
        (self.api, self.page, self.charts)
    }

    /// Destroy the canvas's previous chart, then draw `spec` or clear the
    /// canvas when there is nothing to draw
    fn redraw(&mut self, canvas: ElementId, spec: Option<ChartSpec>) {
        if !self.page.contains(canvas) || !self.charts.available() {
            return;
        }
        if let Some(previous) = self.chart_slots.remove(&canvas) {
            self.charts.destroy(previous);
        }
        match spec {
            Some(spec) => {
                let handle = self.charts.draw(canvas, &spec);
                self.chart_slots.insert(canvas, handle);
            }
            None => self.charts.clear(canvas),
        }
    }
}
