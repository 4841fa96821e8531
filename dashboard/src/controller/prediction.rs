//! Demand prediction form and the sales entry waste preview

use shared::{plain, validate_prediction, PredictionRequest, WastePreview};

use super::DashboardController;
use crate::api::DashboardApi;
use crate::view::{ChartBackend, Content, ElementId, Page};

pub const PREDICTION_FAILED_MESSAGE: &str = "Error calculating prediction. Please try again.";

impl<A, P, C> DashboardController<A, P, C>
where
    A: DashboardApi,
    P: Page,
    C: ChartBackend,
{
    /// Submit the prediction form and show the result
    pub async fn predict(&mut self, request: &PredictionRequest) -> bool {
        let request = match validate_prediction(request) {
            Ok(request) => request,
            Err(message) => {
                self.page.alert(message);
                return false;
            }
        };

        let result = match self.api.predict(&request).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("Error making prediction: {}", e);
                self.page.alert(PREDICTION_FAILED_MESSAGE);
                return false;
            }
        };

        self.page
            .set_text(ElementId::PredictedDemand, plain(result.predicted_demand));
        self.page
            .set_text(ElementId::FormulaUsed, result.formula_used);
        self.page.render(
            ElementId::Recommendations,
            Content::Items(result.recommendations),
        );
        self.page.set_visible(ElementId::PredictionResults, true);
        true
    }

    /// Update the live preview from the raw form fields
    pub fn update_waste_preview(&mut self, sold: &str, unsold: &str, price_per_kg: &str) {
        if !self.page.contains(ElementId::WastePreview) || !self.page.contains(ElementId::WasteText)
        {
            return;
        }
        match WastePreview::from_input(sold, unsold, price_per_kg) {
            Some(preview) => {
                self.page.render(
                    ElementId::WasteText,
                    Content::Items(preview.lines().to_vec()),
                );
                self.page.set_visible(ElementId::WastePreview, true);
            }
            None => self.page.set_visible(ElementId::WastePreview, false),
        }
    }
}
