//! Summary figures, recent entries and the sales/waste charts

use shared::{most_recent, AnalyticsSummary, ChartPoint, DashboardFilters, Period, SalesEntry};

use super::DashboardController;
use crate::api::DashboardApi;
use crate::error::{ClientError, ClientResult};
use crate::view::{
    chart, recent_rows, ChartBackend, Content, ElementId, Page, SummaryView,
};

/// Identifies one refresh; only the newest one issued may render
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// Both dashboard responses, fetched together
#[derive(Debug)]
pub struct DashboardSnapshot {
    pub sales: ClientResult<Vec<SalesEntry>>,
    pub analytics: ClientResult<AnalyticsSummary>,
}

impl<A, P, C> DashboardController<A, P, C>
where
    A: DashboardApi,
    P: Page,
    C: ChartBackend,
{
    /// Fetch sales and analytics for `filters` and render the dashboard
    pub async fn refresh(&mut self, filters: &DashboardFilters) -> bool {
        let ticket = self.issue_refresh();
        let snapshot = Self::fetch_dashboard(&self.api, filters).await;
        self.apply_refresh(ticket, snapshot)
    }

    /// Reset the filter controls and reload with no filters
    pub async fn reset_filters(&mut self) -> bool {
        self.page.set_text(ElementId::DashboardYear, "");
        self.page.set_text(ElementId::DashboardMonth, "");
        self.page
            .set_text(ElementId::DashboardPeriod, Period::Week.as_str());
        self.refresh(&DashboardFilters::default()).await
    }

    /// Start a refresh; any ticket issued earlier becomes stale
    pub fn issue_refresh(&mut self) -> RefreshTicket {
        self.latest_ticket += 1;
        RefreshTicket(self.latest_ticket)
    }

    /// Fetch both dashboard responses concurrently
    pub async fn fetch_dashboard(api: &A, filters: &DashboardFilters) -> DashboardSnapshot {
        let sales_query = filters.sales_query();
        let analytics_query = filters.analytics_query();
        let (sales, analytics) = futures::join!(
            api.sales(&sales_query),
            api.analytics(&analytics_query)
        );
        DashboardSnapshot { sales, analytics }
    }

    /// Render a fetched snapshot unless a newer refresh has been issued.
    /// Returns whether it was rendered.
    pub fn apply_refresh(&mut self, ticket: RefreshTicket, snapshot: DashboardSnapshot) -> bool {
        if ticket.0 < self.latest_ticket {
            tracing::debug!(
                "Discarding stale dashboard refresh {} (latest is {})",
                ticket.0,
                self.latest_ticket
            );
            return false;
        }

        let sales = snapshot.sales.unwrap_or_else(|e| {
            log_failure("sales", &e);
            Vec::new()
        });

        match snapshot.analytics {
            Ok(summary) => {
                self.render_summary(&SummaryView::from_summary(&summary));
                self.render_recent(&sales);
                self.draw_dashboard_charts(&summary.chart_data);
            }
            Err(e) => {
                log_failure("analytics", &e);
                self.render_summary(&SummaryView::placeholder());
                self.render_recent(&sales);
                self.draw_dashboard_charts(&[]);
            }
        }
        true
    }

    pub fn render_summary(&mut self, summary: &SummaryView) {
        for (id, text) in summary.fields() {
            self.page.set_text(id, text);
        }
    }

    /// Render the most recent entries with a delete action on each row
    pub fn render_recent(&mut self, entries: &[SalesEntry]) {
        if !self.page.contains(ElementId::RecentDataBody) {
            tracing::error!("Could not find recentDataBody element");
            return;
        }
        let recent = most_recent(entries, self.recent_limit);
        self.page
            .render(ElementId::RecentDataBody, Content::Table(recent_rows(recent)));
    }

    /// Redraw both dashboard charts; an empty series clears them
    pub fn draw_dashboard_charts(&mut self, points: &[ChartPoint]) {
        self.redraw(ElementId::SalesChart, chart::sales_chart(points));
        self.redraw(ElementId::WasteChart, chart::waste_chart(points));
    }
}

fn log_failure(what: &str, err: &ClientError) {
    if err.is_transport() {
        tracing::error!("Error loading dashboard {}: {}", what, err);
    } else {
        tracing::warn!("Dashboard {} unavailable: {}", what, err);
    }
}
