use crate::application::api_client::ApiClient;
use crate::application::page_controller::{PageView, Reaction};
use crate::domain::filter::{FilterState, PageQuery};
use crate::domain::payloads::InventoryData;
use crate::error::DashboardError;
use crate::presentation::interaction::{Binding, Interaction, InteractionKind};
use crate::presentation::surface::{EventKind, ViewSurface};
use crate::presentation::table_renderer::{
    TableFilter, categories, inventory_rows, low_stock_alert_rows,
};
use crate::presentation::view_plan::ViewPlan;
use async_trait::async_trait;

const ITEM_MODAL: &str = "inventory-modal";
const ITEM_TABLE: &str = "inventory-table";

/// Search by name, exact category, stock status badge.
const INVENTORY_FILTER: TableFilter = TableFilter {
    table: ITEM_TABLE,
    search_columns: &[0],
    category_column: Some(2),
    status_column: Some(5),
};

pub struct InventoryView;

#[async_trait]
impl PageView for InventoryView {
    type Payload = InventoryData;
    type Local = ();

    fn name(&self) -> &'static str {
        "inventory"
    }

    async fn fetch(&self, api: &ApiClient, token: &str, _query: &PageQuery) -> Result<InventoryData, DashboardError> {
        api.get_inventory_data(token).await
    }

    fn plan(&self, data: &InventoryData, _query: &PageQuery) -> Result<ViewPlan, DashboardError> {
        let mut plan = ViewPlan::new();
        plan.rows("alerts-container", low_stock_alert_rows(&data.low_stock_items))
            .options("category-filter", categories(&data.items))
            .rows(ITEM_TABLE, inventory_rows(&data.items));
        Ok(plan)
    }

    fn bindings(&self) -> Vec<Binding> {
        vec![
            Binding::search("inventory-search"),
            Binding::category("category-filter"),
            Binding::stock("stock-filter"),
            Binding::page("add-item-btn", EventKind::Click),
            Binding::close_modal("close-modal", ITEM_MODAL),
            Binding::close_modal(ITEM_MODAL, ITEM_MODAL),
            Binding::page(ITEM_TABLE, EventKind::Click),
            Binding::page("inventory-form", EventKind::Submit),
        ]
    }

    fn table_filter(&self) -> Option<TableFilter> {
        Some(INVENTORY_FILTER)
    }

    fn interact(
        &self,
        interaction: &Interaction,
        _local: &mut (),
        surface: &mut dyn ViewSurface,
        _filters: &FilterState,
    ) -> Reaction {
        match (interaction.element.as_str(), &interaction.kind) {
            ("add-item-btn", InteractionKind::Click) => {
                open_item_modal(surface, "Add Inventory Item", "");
                Reaction::Handled
            }
            (ITEM_TABLE, InteractionKind::RowAction { row }) => {
                let key = surface
                    .rows(ITEM_TABLE)
                    .get(*row)
                    .and_then(|r| r.key.clone());
                match key {
                    Some(id) => {
                        open_item_modal(surface, "Edit Inventory Item", &id);
                        Reaction::Handled
                    }
                    None => {
                        tracing::warn!(row, "No inventory item at row");
                        Reaction::Ignored
                    }
                }
            }
            ("inventory-form", InteractionKind::Submit) => {
                tracing::info!(item = ?surface.value("item-id"), "Inventory submission is not sent to the API");
                Reaction::Handled
            }
            _ => Reaction::Ignored,
        }
    }
}

fn open_item_modal(surface: &mut dyn ViewSurface, title: &str, item_id: &str) {
    surface.set_text("modal-title", title);
    surface.set_value("item-id", item_id);
    surface.set_visible(ITEM_MODAL, true);
}
