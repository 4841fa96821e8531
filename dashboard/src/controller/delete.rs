//! The shared delete confirmation modal

use super::{DashboardController, PendingDelete};
use crate::api::DashboardApi;
use crate::view::{ChartBackend, ElementId, Page};

pub const DELETE_FAILED_MESSAGE: &str = "Error deleting entry. Please try again.";

impl<A, P, C> DashboardController<A, P, C>
where
    A: DashboardApi,
    P: Page,
    C: ChartBackend,
{
    /// Ask to delete a sales entry, replacing any pending delete
    pub fn delete_entry(&mut self, id: &str) {
        self.open_delete_modal(PendingDelete::Sale(id.to_string()));
    }

    /// Ask to delete an inventory item, replacing any pending delete
    pub fn delete_inventory_item(&mut self, id: &str) {
        self.open_delete_modal(PendingDelete::InventoryItem(id.to_string()));
    }

    fn open_delete_modal(&mut self, pending: PendingDelete) {
        self.pending_delete = Some(pending);
        self.page.set_visible(ElementId::DeleteModalOverlay, true);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.page.set_visible(ElementId::DeleteModalOverlay, false);
    }

    /// Perform the pending delete, then reload what it affected.
    ///
    /// A sale reloads the page; an inventory item reloads only the
    /// inventory table. The modal is closed whatever the outcome.
    pub async fn confirm_delete(&mut self) {
        let Some(pending) = self.pending_delete.take() else {
            self.cancel_delete();
            return;
        };

        let result = match &pending {
            PendingDelete::Sale(id) => self.api.delete_sale(id).await,
            PendingDelete::InventoryItem(id) => self.api.delete_inventory_item(id).await,
        };

        match result {
            Err(e) if e.is_transport() => {
                tracing::error!("Delete failed: {}", e);
                self.page.alert(DELETE_FAILED_MESSAGE);
            }
            outcome => {
                if let Err(e) = outcome {
                    tracing::warn!("Backend rejected delete of {:?}: {}", pending, e);
                }
                match pending {
                    PendingDelete::Sale(_) => self.page.reload(),
                    PendingDelete::InventoryItem(_) => self.load_retailer_inventory().await,
                }
            }
        }

        self.cancel_delete();
    }
}
