//! The analytics page: advanced charts, insights, correlations and markets

use shared::{generate_insights, AnalyticsFilters, AnalyticsSummary};

use super::DashboardController;
use crate::api::DashboardApi;
use crate::view::{chart, Card, ChartBackend, Content, ElementId, Page};

impl<A, P, C> DashboardController<A, P, C>
where
    A: DashboardApi,
    P: Page,
    C: ChartBackend,
{
    /// Render the analytics page for `filters`
    pub async fn load_analytics(&mut self, filters: &AnalyticsFilters) {
        let query = filters.query();

        match self.api.analytics(&query).await {
            Ok(summary) => {
                self.draw_advanced_charts(&summary);
                self.render_insights(&summary);
            }
            Err(e) => tracing::error!("Error loading analytics data: {}", e),
        }

        let (trends, correlations, markets) = futures::join!(
            self.api.trends(&query),
            self.api.correlations(&query),
            self.api.market_comparison(&query)
        );

        self.page.render(ElementId::CorrelationGrid, Content::Empty);
        match correlations {
            Ok(correlations) => {
                let cards = correlations.cards().iter().map(Card::correlation).collect();
                self.page.render(ElementId::CorrelationGrid, Content::Cards(cards));
            }
            Err(e) => tracing::warn!("Correlations unavailable: {}", e),
        }

        self.page
            .render(ElementId::MarketComparisonGrid, Content::Empty);
        match markets {
            Ok(markets) => {
                let cards = markets
                    .iter()
                    .map(|(name, stats)| Card::market(name, stats))
                    .collect();
                self.page
                    .render(ElementId::MarketComparisonGrid, Content::Cards(cards));
            }
            Err(e) => tracing::warn!("Market comparison unavailable: {}", e),
        }

        match trends {
            Ok(trends) => tracing::debug!("Trend analysis: {}", trends),
            Err(e) => tracing::warn!("Trend analysis unavailable: {}", e),
        }
    }

    /// Scatter, price line and sold/unsold doughnut
    pub fn draw_advanced_charts(&mut self, summary: &AnalyticsSummary) {
        let points = &summary.chart_data;
        self.redraw(ElementId::RevenueWasteChart, chart::revenue_waste_chart(points));
        self.redraw(ElementId::PriceChart, chart::price_chart(points));
        self.redraw(
            ElementId::SalesDistributionChart,
            chart::distribution_chart(points),
        );
    }

    pub fn render_insights(&mut self, summary: &AnalyticsSummary) {
        let cards = generate_insights(summary).iter().map(Card::insight).collect();
        self.page.render(ElementId::InsightsGrid, Content::Cards(cards));
    }
}
