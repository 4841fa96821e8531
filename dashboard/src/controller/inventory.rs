//! Retailer inventory: grouped table, multi-row create and prompt-driven edit

use futures::future::join_all;
use shared::{
    validate_inventory_rows, EditAnswers, EditDefaults, InventoryItem, InventoryPatch,
    InventoryRowInput,
};

use super::DashboardController;
use crate::api::DashboardApi;
use crate::error::ClientError;
use crate::view::{
    ChartBackend, Content, ElementId, InventoryTableView, Page, TableBody, NO_INVENTORY_MESSAGE,
};

const DATE_PROMPT: &str = "Date (YYYY-MM-DD) - leave blank to keep";
const VARIETY_PROMPT: &str = "Variety - leave blank to keep";
const STOCK_PROMPT: &str = "Stock (kg) - leave blank to keep";
const PRICE_PROMPT: &str = "Price per kg - leave blank to keep";

/// A key pressed while a group header has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Enter,
    Space,
    Other,
}

impl GroupKey {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Self {
        match key {
            "Enter" => GroupKey::Enter,
            " " | "Spacebar" => GroupKey::Space,
            _ => GroupKey::Other,
        }
    }

    pub fn toggles(&self) -> bool {
        matches!(self, GroupKey::Enter | GroupKey::Space)
    }
}

impl<A, P, C> DashboardController<A, P, C>
where
    A: DashboardApi,
    P: Page,
    C: ChartBackend,
{
    /// Fetch the retailer's inventory and render it grouped by date
    pub async fn load_retailer_inventory(&mut self) {
        if !self.page.contains(ElementId::RetailerInventoryTableBody) {
            return;
        }
        match self.api.retailer_inventory().await {
            Ok(items) => self.render_inventory_grouped(&items),
            Err(e) if e.is_transport() => {
                tracing::error!("Error loading retailer inventory: {}", e);
            }
            Err(e) => {
                tracing::warn!("Retailer inventory unavailable: {}", e);
                self.render_inventory_grouped(&[]);
            }
        }
    }

    /// Render items grouped by effective date, every group collapsed
    pub fn render_inventory_grouped(&mut self, items: &[InventoryItem]) {
        if !self.page.contains(ElementId::RetailerInventoryTableBody) {
            return;
        }
        if items.is_empty() {
            self.inventory_view = None;
            self.page.render(
                ElementId::RetailerInventoryTableBody,
                Content::Table(TableBody::message(NO_INVENTORY_MESSAGE, 6)),
            );
            return;
        }
        let view = InventoryTableView::from_items(items);
        self.page.render(
            ElementId::RetailerInventoryTableBody,
            Content::Inventory(view.clone()),
        );
        self.inventory_view = Some(view);
    }

    /// Expand or collapse a group; `false` when there is no such group
    pub fn toggle_group(&mut self, dom_id: &str) -> bool {
        let Some(view) = self.inventory_view.as_mut() else {
            return false;
        };
        if !view.toggle(dom_id) {
            return false;
        }
        let rendered = Content::Inventory(view.clone());
        self.page
            .render(ElementId::RetailerInventoryTableBody, rendered);
        true
    }

    /// Keyboard activation of a group header
    pub fn handle_group_key(&mut self, dom_id: &str, key: GroupKey) -> bool {
        key.toggles() && self.toggle_group(dom_id)
    }

    /// Validate the multi-row form and create every row.
    ///
    /// Nothing is sent when any attempted row is incomplete. Rows are posted
    /// concurrently; failures are reported together and the table is
    /// reloaded either way.
    pub async fn create_inventory_entries(
        &mut self,
        rows: &[InventoryRowInput],
        date_posted: Option<&str>,
    ) -> bool {
        let entries = match validate_inventory_rows(rows, date_posted) {
            Ok(entries) => entries,
            Err(message) => {
                self.page.alert(message);
                return false;
            }
        };

        let results = join_all(
            entries
                .iter()
                .map(|entry| self.api.create_inventory_item(entry)),
        )
        .await;

        let failures: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(failure_line)
            .collect();

        if !failures.is_empty() {
            tracing::warn!(
                "{} of {} inventory entries failed to save",
                failures.len(),
                entries.len()
            );
            self.page.alert(&format!(
                "Some entries failed to save:\n{}",
                failures.join("\n")
            ));
        } else {
            tracing::info!("Created {} inventory entries", entries.len());
        }

        self.load_retailer_inventory().await;
        failures.is_empty()
    }

    /// Prompt for new values and PATCH only the fields that changed
    pub async fn edit_inventory_item(&mut self, id: &str) {
        let item = match self.api.retailer_inventory_item(id).await {
            Ok(item) => item,
            Err(ClientError::Backend { message, .. }) => {
                let text = if message.is_empty() {
                    "Item not found"
                } else {
                    message.as_str()
                };
                self.page.alert(text);
                return;
            }
            Err(e) => {
                tracing::error!("Edit inventory error: {}", e);
                self.page.alert("Error editing item");
                return;
            }
        };

        let current = EditDefaults::of(&item);
        let answers = EditAnswers {
            date: self.page.prompt(DATE_PROMPT, &current.date),
            variety: self.page.prompt(VARIETY_PROMPT, &current.variety),
            stock: self.page.prompt(STOCK_PROMPT, &current.stock),
            price: self.page.prompt(PRICE_PROMPT, &current.price),
        };
        let patch = InventoryPatch::from_answers(&current, &answers);
        if patch.is_empty() {
            tracing::debug!("No changes for inventory item {}", id);
            return;
        }

        match self.api.update_inventory_item(id, &patch).await {
            Ok(_) => self.load_retailer_inventory().await,
            Err(ClientError::Backend { message, .. }) => {
                let text = if message.is_empty() {
                    "Update failed"
                } else {
                    message.as_str()
                };
                self.page.alert(text);
            }
            Err(e) => {
                tracing::error!("Edit inventory error: {}", e);
                self.page.alert("Error editing item");
            }
        }
    }
}

fn failure_line(err: &ClientError) -> String {
    match err {
        ClientError::Backend { message, body, .. } if message.is_empty() => body.to_string(),
        ClientError::Backend { message, .. } => message.clone(),
        other => other.user_message(),
    }
}
