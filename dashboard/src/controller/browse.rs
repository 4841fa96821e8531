//! Consumer inventory browsing and the public company page

use shared::{unique_retailers, CompanyProfile, CompanyStats, InventoryFilters};

use super::DashboardController;
use crate::api::DashboardApi;
use crate::view::{
    company_listing_rows, company_stats, retailer_rows, ChartBackend, Content, ElementId, Page,
    TableBody, NO_RESULTS_MESSAGE,
};

/// Retailer id from a `/company/{id}` path, percent-decoded
pub fn retailer_id_from_path(path: &str) -> Option<String> {
    let raw = path.strip_prefix("/company/")?;
    if raw.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(raw).ok()?;
    Some(decoded.into_owned())
}

impl<A, P, C> DashboardController<A, P, C>
where
    A: DashboardApi,
    P: Page,
    C: ChartBackend,
{
    /// Browse listings and show one row per retailer
    pub async fn load_consumer_inventory(&mut self, filters: &InventoryFilters) {
        if !self.page.contains(ElementId::InventoryResultsBody) {
            return;
        }
        match self.api.browse_inventory(&filters.query()).await {
            Ok(items) => {
                let retailers = unique_retailers(&items);
                tracing::debug!(
                    "{} listings from {} retailers",
                    items.len(),
                    retailers.len()
                );
                self.page.render(
                    ElementId::InventoryResultsBody,
                    Content::Table(retailer_rows(&retailers)),
                );
            }
            Err(e) if e.is_transport() => {
                tracing::error!("Error loading consumer inventory: {}", e);
            }
            Err(e) => {
                tracing::warn!("Consumer inventory unavailable: {}", e);
                self.page.render(
                    ElementId::InventoryResultsBody,
                    Content::Table(TableBody::message(NO_RESULTS_MESSAGE, 3)),
                );
            }
        }
    }

    /// Load the profile and listings of the retailer named by `path`
    pub async fn load_company_page(&mut self, path: &str) -> bool {
        let Some(retailer_id) = retailer_id_from_path(path) else {
            tracing::debug!("Not a company page: {}", path);
            return false;
        };
        self.load_company_profile(&retailer_id).await;
        self.load_company_inventory(&retailer_id).await;
        true
    }

    pub async fn load_company_profile(&mut self, retailer_id: &str) {
        match self.api.company(retailer_id).await {
            Ok(profile) => self.render_company_profile(&profile),
            Err(e) => tracing::error!("Error loading company profile: {}", e),
        }
    }

    fn render_company_profile(&mut self, profile: &CompanyProfile) {
        let or = |value: &Option<String>, fallback: &str| {
            value.clone().unwrap_or_else(|| fallback.to_string())
        };
        self.page
            .set_text(ElementId::CompanyName, or(&profile.retailer_company, "Company"));
        self.page
            .set_text(ElementId::CompanyArea, or(&profile.retailer_area, "-"));
        self.page.set_text(
            ElementId::CompanyLocation,
            or(&profile.retailer_location, "-"),
        );
    }

    /// Latest listings of one retailer, with headline stats
    pub async fn load_company_inventory(&mut self, retailer_id: &str) {
        if !self.page.contains(ElementId::CompanyInventoryBody) {
            return;
        }
        let filters = InventoryFilters::for_retailer(retailer_id);
        let items = match self.api.browse_inventory(&filters.query()).await {
            Ok(items) => items,
            Err(e) if e.is_transport() => {
                tracing::error!("Error loading company inventory: {}", e);
                return;
            }
            Err(e) => {
                tracing::warn!("Company inventory unavailable: {}", e);
                Vec::new()
            }
        };

        self.page.render(
            ElementId::CompanyInventoryBody,
            Content::Table(company_listing_rows(&items)),
        );
        let stats = match CompanyStats::from_items(&items) {
            Some(stats) => Content::Stats(company_stats(&stats)),
            None => Content::Empty,
        };
        self.page.render(ElementId::CompanyStats, stats);
    }
}
