//! Retailer inventory tests
//!
//! Tests for the grouped inventory table and its flows including:
//! - Date grouping with the "No date" bucket last
//! - Collapsible groups toggled by click or keyboard
//! - Multi-row create rejecting partial rows before anything is sent
//! - Prompt-driven edit sending only the changed fields

mod common;

use std::collections::BTreeSet;

use common::*;
use proptest::prelude::*;
use rice_dashboard::controller::GroupKey;
use rice_dashboard::view::{Content, ElementId, InventoryTableView, TableBody};
use shared::{
    group_by_date, InventoryItem, InventoryPatch, InventoryRowInput, NewInventoryItem,
    INCOMPLETE_ROWS_MESSAGE, NO_DATE_LABEL, NO_ROWS_MESSAGE,
};

fn rendered_inventory(controller: &TestController) -> InventoryTableView {
    match controller.page().content(ElementId::RetailerInventoryTableBody) {
        Some(Content::Inventory(view)) => view.clone(),
        other => panic!("inventory not rendered: {other:?}"),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Dated groups newest first, undated last, all collapsed
    #[tokio::test]
    async fn test_load_renders_grouped_inventory() {
        let api = FakeApi::new();
        let mut undated = item("3", "Sinandomeng", None);
        undated.created_at = None;
        FakeApi::set(
            &api.inventory,
            Reply::Ok(vec![
                item("1", "Jasmine", Some("2024-03-01")),
                undated,
                item("2", "Dinorado", Some("2024-03-08T09:30:00")),
                item("4", "Malagkit", Some("2024-03-01")),
            ]),
        );
        let mut controller = controller(api);

        controller.load_retailer_inventory().await;

        let view = rendered_inventory(&controller);
        let headers: Vec<String> = view.groups.iter().map(|g| g.header_text()).collect();
        assert_eq!(
            headers,
            vec![
                "▸ 2024-03-08 (1 items)",
                "▸ 2024-03-01 (2 items)",
                "▸ No date (1 items)",
            ]
        );
        assert_eq!(view.groups[1].dom_id, "dg-2024-03-01");
        assert_eq!(view.groups[2].dom_id, "dg-No-date");
        assert!(view.groups.iter().all(|g| g.aria_expanded() == "false"));

        let row = &view.groups[1].rows[0];
        assert_eq!(row.cells(), ["Jasmine", "25.00", "₱48.50", "2024-03-01"]);
        assert_eq!(view.groups[2].rows[0].created, "-");
    }

    /// Test empty inventory message
    #[tokio::test]
    async fn test_empty_inventory_message() {
        let mut controller = controller(FakeApi::new());

        controller.load_retailer_inventory().await;

        assert_eq!(
            controller.page().content(ElementId::RetailerInventoryTableBody),
            Some(&Content::Table(TableBody::message("No inventory yet", 6)))
        );
        assert!(controller.inventory_view().is_none());
    }

    /// A backend error renders the empty table; a network error leaves it alone
    #[tokio::test]
    async fn test_load_errors() {
        let api = FakeApi::new();
        FakeApi::set(&api.inventory, Reply::Backend(403, "Retailer access required"));
        let mut rejected = controller(api);
        rejected.load_retailer_inventory().await;
        assert_eq!(
            rejected.page().content(ElementId::RetailerInventoryTableBody),
            Some(&Content::Table(TableBody::message("No inventory yet", 6)))
        );

        let api = FakeApi::new();
        FakeApi::set(&api.inventory, Reply::Transport);
        let mut offline = controller(api);
        offline.load_retailer_inventory().await;
        assert_eq!(
            offline.page().content(ElementId::RetailerInventoryTableBody),
            Some(&Content::Empty)
        );
    }

    /// Clicking a header flips it; keyboard activation uses Enter and Space
    #[tokio::test]
    async fn test_toggle_group() {
        let api = FakeApi::new();
        FakeApi::set(
            &api.inventory,
            Reply::Ok(vec![item("1", "Jasmine", Some("2024-03-01"))]),
        );
        let mut controller = controller(api);
        controller.load_retailer_inventory().await;

        assert!(controller.toggle_group("dg-2024-03-01"));
        let view = rendered_inventory(&controller);
        assert_eq!(view.groups[0].header_text(), "▾ 2024-03-01 (1 items)");
        assert!(view.groups[0].rows_visible());

        assert!(!controller.handle_group_key("dg-2024-03-01", GroupKey::from_key("a")));
        assert!(controller.handle_group_key("dg-2024-03-01", GroupKey::from_key(" ")));
        assert!(!rendered_inventory(&controller).groups[0].expanded);
        assert!(controller.handle_group_key("dg-2024-03-01", GroupKey::from_key("Enter")));
        assert!(rendered_inventory(&controller).groups[0].expanded);

        assert!(!controller.toggle_group("dg-1999-01-01"));
    }

    /// Reloading collapses every group again
    #[tokio::test]
    async fn test_reload_collapses_groups() {
        let api = FakeApi::new();
        FakeApi::set(
            &api.inventory,
            Reply::Ok(vec![item("1", "Jasmine", Some("2024-03-01"))]),
        );
        let mut controller = controller(api);
        controller.load_retailer_inventory().await;
        controller.toggle_group("dg-2024-03-01");

        controller.load_retailer_inventory().await;

        assert!(!rendered_inventory(&controller).groups[0].expanded);
    }

    /// One incomplete row rejects the whole submission; nothing is sent
    #[tokio::test]
    async fn test_partial_row_rejects_submission() {
        let mut controller = controller(FakeApi::new());
        let rows = vec![
            InventoryRowInput::new("Jasmine", "25", "48.50"),
            InventoryRowInput::new("Dinorado", "", "52"),
        ];

        assert!(!controller.create_inventory_entries(&rows, Some("2024-03-04")).await);

        assert_eq!(controller.page().alerts(), &[INCOMPLETE_ROWS_MESSAGE.to_string()]);
        assert!(controller.api().calls().is_empty());
    }

    /// Test no attempted rows
    #[tokio::test]
    async fn test_no_rows_rejected() {
        let mut controller = controller(FakeApi::new());
        let rows = vec![InventoryRowInput::new("  ", "", "")];

        controller.create_inventory_entries(&rows, None).await;

        assert_eq!(controller.page().alerts(), &[NO_ROWS_MESSAGE.to_string()]);
        assert!(controller.api().calls().is_empty());
    }

    /// Every valid row is posted with the shared date, then the table reloads
    #[tokio::test]
    async fn test_create_posts_every_row_and_reloads() {
        let mut controller = controller(FakeApi::new());
        let rows = vec![
            InventoryRowInput::new("Jasmine", "25", "48.50"),
            InventoryRowInput::new("", "", ""),
            InventoryRowInput::new("", "10", "40"),
        ];

        assert!(controller.create_inventory_entries(&rows, Some("2024-03-04")).await);

        let calls = controller.api().calls();
        assert_eq!(
            calls,
            vec![
                Call::CreateInventoryItem(NewInventoryItem {
                    rice_variety: Some("Jasmine".to_string()),
                    stock_kg: "25".to_string(),
                    price_per_kg: "48.50".to_string(),
                    date_posted: Some("2024-03-04".to_string()),
                }),
                Call::CreateInventoryItem(NewInventoryItem {
                    rice_variety: None,
                    stock_kg: "10".to_string(),
                    price_per_kg: "40".to_string(),
                    date_posted: Some("2024-03-04".to_string()),
                }),
                Call::RetailerInventory,
            ]
        );
        assert!(controller.page().alerts().is_empty());
    }

    /// Failed rows are reported together and the table still reloads
    #[tokio::test]
    async fn test_create_reports_partial_failures() {
        let api = FakeApi::new();
        {
            let mut replies = api.create_by_variety.lock().unwrap();
            replies.insert("Dinorado".to_string(), Reply::Backend(400, "Invalid stock"));
            replies.insert("Malagkit".to_string(), Reply::Transport);
        }
        let mut controller = controller(api);
        let rows = vec![
            InventoryRowInput::new("Jasmine", "25", "48.50"),
            InventoryRowInput::new("Dinorado", "-1", "52"),
            InventoryRowInput::new("Malagkit", "5", "70"),
        ];

        assert!(!controller.create_inventory_entries(&rows, None).await);

        assert_eq!(
            controller.page().alerts(),
            &[format!(
                "Some entries failed to save:\nInvalid stock\n{}",
                rice_dashboard::error::NETWORK_ERROR_MESSAGE
            )]
        );
        assert_eq!(controller.api().count(|c| *c == Call::RetailerInventory), 1);
        assert_eq!(
            controller
                .api()
                .count(|c| matches!(c, Call::CreateInventoryItem(_))),
            3
        );
    }

    /// Blank, cancelled and unchanged answers keep the field
    #[tokio::test]
    async fn test_edit_sends_only_changed_fields() {
        let api = FakeApi::new();
        FakeApi::set(
            &api.inventory_item,
            Reply::Ok(item("9", "Jasmine", Some("2024-03-01T00:00:00"))),
        );
        let mut controller = controller(api);
        let page = controller.page_mut();
        page.queue_prompt_answer(Some(""));
        page.queue_prompt_answer(Some("Dinorado"));
        page.queue_prompt_answer(Some("25"));
        page.queue_prompt_answer(None);

        controller.edit_inventory_item("9").await;

        assert_eq!(
            controller.page().prompts(),
            &[
                "Date (YYYY-MM-DD) - leave blank to keep".to_string(),
                "Variety - leave blank to keep".to_string(),
                "Stock (kg) - leave blank to keep".to_string(),
                "Price per kg - leave blank to keep".to_string(),
            ]
        );
        let calls = controller.api().calls();
        assert_eq!(
            calls[1],
            Call::UpdateInventoryItem(
                "9".to_string(),
                InventoryPatch {
                    rice_variety: Some("Dinorado".to_string()),
                    ..Default::default()
                }
            )
        );
        assert_eq!(calls[2], Call::RetailerInventory);
    }

    /// Test that a new date and price are both sent
    #[tokio::test]
    async fn test_edit_date_and_price() {
        let api = FakeApi::new();
        FakeApi::set(
            &api.inventory_item,
            Reply::Ok(item("9", "Jasmine", Some("2024-03-01"))),
        );
        let mut controller = controller(api);
        controller.page_mut().queue_prompt_answer(Some("2024-03-15"));
        controller.page_mut().queue_prompt_answer(None);
        controller.page_mut().queue_prompt_answer(None);
        controller.page_mut().queue_prompt_answer(Some("51.25"));

        controller.edit_inventory_item("9").await;

        assert!(controller.api().calls().contains(&Call::UpdateInventoryItem(
            "9".to_string(),
            InventoryPatch {
                date_posted: Some("2024-03-15".to_string()),
                price_per_kg: Some("51.25".to_string()),
                ..Default::default()
            }
        )));
    }

    /// Every prompt cancelled: no request at all
    #[tokio::test]
    async fn test_edit_without_changes_sends_nothing() {
        let api = FakeApi::new();
        FakeApi::set(&api.inventory_item, Reply::Ok(item("9", "Jasmine", None)));
        let mut controller = controller(api);

        controller.edit_inventory_item("9").await;

        assert_eq!(
            controller.api().calls(),
            vec![Call::RetailerInventoryItem("9".to_string())]
        );
        assert!(controller.page().alerts().is_empty());
    }

    /// Fetch and update failures are alerted
    #[tokio::test]
    async fn test_edit_failures_alert() {
        let api = FakeApi::new();
        FakeApi::set(&api.inventory_item, Reply::Backend(404, "Not found"));
        let mut missing = controller(api);
        missing.edit_inventory_item("9").await;
        assert_eq!(missing.page().alerts(), &["Not found".to_string()]);
        assert!(missing.page().prompts().is_empty());

        let api = FakeApi::new();
        FakeApi::set(&api.inventory_item, Reply::Ok(item("9", "Jasmine", None)));
        FakeApi::set(&api.update, Reply::Backend(400, "Invalid price"));
        let mut rejected = controller(api);
        rejected.page_mut().queue_prompt_answer(None);
        rejected.page_mut().queue_prompt_answer(Some("Dinorado"));
        rejected.edit_inventory_item("9").await;
        assert_eq!(rejected.page().alerts(), &["Invalid price".to_string()]);
        assert_eq!(rejected.api().count(|c| *c == Call::RetailerInventory), 0);

        let api = FakeApi::new();
        FakeApi::set(&api.inventory_item, Reply::Transport);
        let mut offline = controller(api);
        offline.edit_inventory_item("9").await;
        assert_eq!(offline.page().alerts(), &["Error editing item".to_string()]);
    }

    /// Page without the inventory section makes no request
    #[tokio::test]
    async fn test_load_skipped_without_table() {
        let page = rice_dashboard::view::MemoryPage::with_elements(&[ElementId::TotalEntries]);
        let mut controller = rice_dashboard::DashboardController::new(
            FakeApi::new(),
            page,
            rice_dashboard::view::RecordingCharts::new(),
        );

        controller.load_retailer_inventory().await;

        assert!(controller.api().calls().is_empty());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating optional posting dates
    fn date_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            (1u32..=28u32).prop_map(|d| Some(format!("2024-02-{:02}", d))),
            (1u32..=28u32).prop_map(|d| Some(format!("2024-03-{:02}T10:00:00", d))),
        ]
    }

    fn items_strategy() -> impl Strategy<Value = Vec<InventoryItem>> {
        prop::collection::vec(date_strategy(), 0..25).prop_map(|dates| {
            dates
                .into_iter()
                .enumerate()
                .map(|(i, date)| InventoryItem {
                    id: i.to_string(),
                    date_posted: date,
                    ..Default::default()
                })
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every item lands in exactly one group
        #[test]
        fn prop_grouping_keeps_every_item(items in items_strategy()) {
            let groups = group_by_date(&items);
            let total: usize = groups.iter().map(|g| g.items.len()).sum();
            prop_assert_eq!(total, items.len());

            let labels: BTreeSet<&str> = groups.iter().map(|g| g.label.as_str()).collect();
            prop_assert_eq!(labels.len(), groups.len());
        }

        /// Dated groups descend and "No date" is always last
        #[test]
        fn prop_grouping_order(items in items_strategy()) {
            let groups = group_by_date(&items);
            let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();

            if let Some(pos) = labels.iter().position(|l| *l == NO_DATE_LABEL) {
                prop_assert_eq!(pos, labels.len() - 1);
            }
            let dated: Vec<&str> = labels.iter().copied().filter(|l| *l != NO_DATE_LABEL).collect();
            for pair in dated.windows(2) {
                prop_assert!(pair[0] > pair[1]);
            }
        }

        /// Rendered groups mirror the grouping and all start collapsed
        #[test]
        fn prop_rendered_groups_start_collapsed(items in items_strategy()) {
            let api = FakeApi::new();
            FakeApi::set(&api.inventory, Reply::Ok(items.clone()));
            let mut controller = controller(api);

            tokio_test::block_on(controller.load_retailer_inventory());

            match controller.page().content(ElementId::RetailerInventoryTableBody) {
                Some(Content::Inventory(view)) => {
                    prop_assert_eq!(view.groups.len(), group_by_date(&items).len());
                    prop_assert!(view.groups.iter().all(|g| !g.expanded));
                }
                Some(Content::Table(_)) => prop_assert!(items.is_empty()),
                other => prop_assert!(false, "unexpected content: {:?}", other),
            }
        }
    }
}
