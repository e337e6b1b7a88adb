use crate::application::api_client::ApiClient;
use crate::application::page_controller::{PageView, Reaction};
use crate::domain::filter::{FilterState, PageQuery};
use crate::domain::payloads::CustomerData;
use crate::error::DashboardError;
use crate::presentation::chart_renderer::{ChartSpec, Rgb};
use crate::presentation::formatters::{format_currency, format_number};
use crate::presentation::interaction::{Binding, Interaction};
use crate::presentation::surface::{EventKind, ViewSurface};
use crate::presentation::table_renderer::{TableFilter, customer_rows};
use crate::presentation::view_plan::ViewPlan;
use async_trait::async_trait;

pub const EXPORT_NOTICE: &str = "Export functionality will be implemented";

/// Name, email and phone are searchable.
const CUSTOMER_FILTER: TableFilter = TableFilter {
    table: "customers-table",
    search_columns: &[0, 1, 2],
    category_column: None,
    status_column: None,
};

pub struct CustomersView;

#[async_trait]
impl PageView for CustomersView {
    type Payload = CustomerData;
    type Local = ();

    fn name(&self) -> &'static str {
        "customer"
    }

    async fn fetch(&self, api: &ApiClient, token: &str, query: &PageQuery) -> Result<CustomerData, DashboardError> {
        api.get_customer_data(token, query.period.as_deref()).await
    }

    fn plan(&self, data: &CustomerData, _query: &PageQuery) -> Result<ViewPlan, DashboardError> {
        let acquisition = ChartSpec::bar("New Customers", &data.acquisition, Rgb::BLUE)?.fluid();
        let value = ChartSpec::doughnut(
            &data.value_segments,
            &[Rgb::GREEN, Rgb::BLUE, Rgb::YELLOW, Rgb::RED],
        )?
        .fluid();

        let m = &data.metrics;
        let s = &data.segments;
        let mut plan = ViewPlan::new();
        plan.text("total-customers", format_number(m.total_customers))
            .text("repeat-customers", format_number(m.repeat_customers))
            .text("repeat-rate", format!("{}% repeat rate", format_number(m.repeat_rate)))
            .text("avg-spend", format_currency(m.avg_spend))
            .text("avg-visits", format_number(m.avg_visits))
            .chart("acquisition-chart", acquisition)
            .chart("value-chart", value)
            .text("high-value-count", format_number(s.high_value))
            .text("loyal-count", format_number(s.loyal))
            .text("at-risk-count", format_number(s.at_risk))
            .text("new-count", format_number(s.new))
            .rows("customers-table", customer_rows(&data.customers));
        Ok(plan)
    }

    fn bindings(&self) -> Vec<Binding> {
        vec![
            Binding::period("customer-period"),
            Binding::search("customer-search"),
            Binding::page("export-customers-btn", EventKind::Click),
        ]
    }

    fn table_filter(&self) -> Option<TableFilter> {
        Some(CUSTOMER_FILTER)
    }

    fn interact(
        &self,
        interaction: &Interaction,
        _local: &mut (),
        surface: &mut dyn ViewSurface,
        _filters: &FilterState,
    ) -> Reaction {
        if interaction.element == "export-customers-btn" {
            surface.alert(EXPORT_NOTICE);
            return Reaction::Handled;
        }
        Reaction::Ignored
    }
}
