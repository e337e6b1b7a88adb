use crate::application::api_client::ApiClient;
use crate::application::page_controller::{PageView, Reaction};
use crate::domain::filter::{FilterState, PageQuery};
use crate::domain::payloads::SalesData;
use crate::domain::sale_draft::SaleDraft;
use crate::error::DashboardError;
use crate::presentation::chart_renderer::{ChartSpec, Rgb};
use crate::presentation::formatters::{format_currency, format_fixed2, format_number};
use crate::presentation::interaction::{Binding, Interaction, InteractionKind};
use crate::presentation::surface::{Cell, EventKind, Row, ViewSurface};
use crate::presentation::table_renderer::transaction_rows;
use crate::presentation::view_plan::ViewPlan;
use async_trait::async_trait;

const SALE_MODAL: &str = "add-sale-modal";
const SALE_ITEMS: &str = "sale-items-container";

pub struct SalesView;

#[async_trait]
impl PageView for SalesView {
    type Payload = SalesData;
    /// Line items of the add-sale form.
    type Local = SaleDraft;

    fn name(&self) -> &'static str {
        "sales"
    }

    async fn fetch(&self, api: &ApiClient, token: &str, _query: &PageQuery) -> Result<SalesData, DashboardError> {
        api.get_sales_data(token).await
    }

    fn plan(&self, data: &SalesData, _query: &PageQuery) -> Result<ViewPlan, DashboardError> {
        let trend = ChartSpec::line("Sales", &data.trend, Rgb::GREEN)?.currency_axis();

        let mut plan = ViewPlan::new();
        plan.text("total-sales", format_currency(data.summary.total_sales))
            .text("total-transactions", format_number(data.summary.transaction_count))
            .text("avg-order-value", format_currency(data.summary.avg_order_value))
            .chart("sales-trend-chart", trend)
            .rows("sales-table", transaction_rows(&data.recent_transactions));
        Ok(plan)
    }

    fn bindings(&self) -> Vec<Binding> {
        vec![
            Binding::open_modal("add-sale-btn", SALE_MODAL),
            Binding::close_modal("close-modal", SALE_MODAL),
            // backdrop
            Binding::close_modal(SALE_MODAL, SALE_MODAL),
            Binding::page("sale-customer", EventKind::Change),
            Binding::page("add-item-btn", EventKind::Click),
            Binding::page(SALE_ITEMS, EventKind::Click),
            Binding::page(SALE_ITEMS, EventKind::Change),
            Binding::page("add-sale-form", EventKind::Submit),
        ]
    }

    fn interact(
        &self,
        interaction: &Interaction,
        draft: &mut SaleDraft,
        surface: &mut dyn ViewSurface,
        _filters: &FilterState,
    ) -> Reaction {
        match (interaction.element.as_str(), &interaction.kind) {
            ("sale-customer", InteractionKind::Change(customer)) => {
                // Blank selection means a new customer.
                surface.set_visible("new-customer-fields", customer.is_empty());
                Reaction::Handled
            }
            ("add-item-btn", InteractionKind::Click) => {
                draft.add_line();
                render_draft(draft, surface);
                Reaction::Handled
            }
            (SALE_ITEMS, InteractionKind::RowAction { row }) => {
                if draft.remove_line(*row) {
                    render_draft(draft, surface);
                }
                Reaction::Handled
            }
            (SALE_ITEMS, InteractionKind::RowEdit { row, field, value }) => {
                if draft.set_field(*row, field, value) {
                    render_draft(draft, surface);
                } else {
                    tracing::warn!(row, field = field.as_str(), "Ignoring edit of unknown sale line field");
                }
                Reaction::Handled
            }
            ("add-sale-form", InteractionKind::Submit) => {
                tracing::info!(
                    lines = draft.lines().len(),
                    total = draft.total(),
                    "Sale submission is not sent to the API"
                );
                Reaction::Handled
            }
            _ => Reaction::Ignored,
        }
    }
}

fn render_draft(draft: &SaleDraft, surface: &mut dyn ViewSurface) {
    surface.clear_rows(SALE_ITEMS);
    for (index, line) in draft.lines().iter().enumerate() {
        let row = Row::keyed(
            index.to_string(),
            vec![
                Cell::tagged(format_number(line.quantity), "item-quantity"),
                Cell::tagged(format_fixed2(line.price), "item-price"),
                Cell::tagged("\u{d7}", "btn-remove-item"),
            ],
        )
        .with_class("sale-item");
        surface.append_row(SALE_ITEMS, row);
    }
    surface.set_value("sale-total", &format_fixed2(draft.total()));
}
