use crate::application::api_client::{ApiClient, DEFAULT_REPORT, DEFAULT_REPORT_PERIOD};
use crate::application::page_controller::{PageView, Reaction};
use crate::domain::filter::{FilterState, PageQuery};
use crate::domain::payloads::{
    CustomReportOptions, ExpensesReport, InventoryReport, ProfitLossReport, ReportData, ReportKind,
    SalesReport,
};
use crate::error::DashboardError;
use crate::presentation::chart_renderer::{ChartSpec, Rgb};
use crate::presentation::formatters::{format_currency, format_number, format_percent};
use crate::presentation::interaction::{Binding, Interaction};
use crate::presentation::surface::{Cell, EventKind, Row, ViewSurface};
use crate::presentation::table_renderer::{breakdown_rows, field_option_rows, low_stock_line_rows};
use crate::presentation::view_plan::ViewPlan;
use async_trait::async_trait;

/// Group of report containers; exactly one is active.
pub const REPORT_GROUP: &str = "report-container";
pub const CUSTOM_PLACEHOLDER: &str = "Custom report data would appear here based on your selections";

const BREAKDOWN_PALETTE: [Rgb; 5] = [Rgb::RED, Rgb::YELLOW, Rgb::BLUE, Rgb::PURPLE, Rgb::TEAL];

pub struct ReportsView;

#[async_trait]
impl PageView for ReportsView {
    type Payload = ReportData;
    type Local = ();

    fn name(&self) -> &'static str {
        "report"
    }

    fn initial_query(&self) -> PageQuery {
        PageQuery {
            period: Some(DEFAULT_REPORT_PERIOD.to_string()),
            report_type: Some(DEFAULT_REPORT.as_str().to_string()),
        }
    }

    async fn fetch(&self, api: &ApiClient, token: &str, query: &PageQuery) -> Result<ReportData, DashboardError> {
        let (kind, period) = ApiClient::report_params(query);
        api.get_report_data(token, kind, &period).await
    }

    fn plan(&self, data: &ReportData, _query: &PageQuery) -> Result<ViewPlan, DashboardError> {
        let mut plan = ViewPlan::new();
        match data {
            ReportData::ProfitLoss(report) => plan_profit_loss(&mut plan, report),
            ReportData::Sales(report) => plan_sales(&mut plan, report)?,
            ReportData::Expenses(report) => plan_expenses(&mut plan, report)?,
            ReportData::Inventory(report) => plan_inventory(&mut plan, report)?,
            ReportData::Custom(options) => plan_custom(&mut plan, options),
        }
        plan.activate(REPORT_GROUP, &data.kind().container_id());
        Ok(plan)
    }

    fn bindings(&self) -> Vec<Binding> {
        vec![
            Binding::page("report-type", EventKind::Change),
            Binding::period("report-period"),
            Binding::page("export-report-btn", EventKind::Click),
            Binding::page("generate-custom-report-btn", EventKind::Click),
        ]
    }

    fn interact(
        &self,
        interaction: &Interaction,
        _local: &mut (),
        surface: &mut dyn ViewSurface,
        filters: &FilterState,
    ) -> Reaction {
        let current = filters
            .report_type
            .clone()
            .unwrap_or_else(|| DEFAULT_REPORT.as_str().to_string());
        match interaction.element.as_str() {
            "report-type" => {
                let requested = interaction.value().unwrap_or_default();
                let Some(kind) = ReportKind::parse(requested) else {
                    tracing::warn!(requested, current = %current, "Unknown report type, keeping current report");
                    surface.set_value("report-type", &current);
                    return Reaction::Ignored;
                };
                Reaction::Refetch(PageQuery {
                    period: filters.period.clone(),
                    report_type: Some(kind.as_str().to_string()),
                })
            }
            "export-report-btn" => {
                let format = surface
                    .value("report-format")
                    .filter(|f| !f.is_empty())
                    .unwrap_or_else(|| "pdf".to_string());
                surface.alert(&format!("Exporting {} report as {}", current, format.to_uppercase()));
                Reaction::Handled
            }
            "generate-custom-report-btn" => {
                generate_custom_report(surface);
                Reaction::Handled
            }
            _ => Reaction::Ignored,
        }
    }
}

fn plan_profit_loss(plan: &mut ViewPlan, r: &ProfitLossReport) {
    plan.text("report-period-label", r.period.clone())
        .text("product-sales", format_currency(r.revenue.product_sales))
        .text("service-revenue", format_currency(r.revenue.service_revenue))
        .text("other-income", format_currency(r.revenue.other_income))
        .text("total-revenue", format_currency(r.revenue.total))
        .text("inventory-costs", format_currency(r.cogs.inventory))
        .text("labor-costs", format_currency(r.cogs.labor))
        .text("material-costs", format_currency(r.cogs.materials))
        .text("total-cogs", format_currency(r.cogs.total))
        .text("gross-profit", format_currency(r.gross_profit.amount))
        .text("gross-margin", format_percent(r.gross_profit.margin))
        .text("rent-expense", format_currency(r.expenses.rent))
        .text("utilities-expense", format_currency(r.expenses.utilities))
        .text("marketing-expense", format_currency(r.expenses.marketing))
        .text("salaries-expense", format_currency(r.expenses.salaries))
        .text("other-expenses", format_currency(r.expenses.other))
        .text("total-expenses", format_currency(r.expenses.total))
        .text("net-profit", format_currency(r.net_profit.amount))
        .text("profit-margin", format_percent(r.net_profit.margin));
}

fn plan_sales(plan: &mut ViewPlan, r: &SalesReport) -> Result<(), DashboardError> {
    r.sales_by_category.validate("sales by category")?;
    let by_category = ChartSpec::bar("Sales by Category", &r.sales_by_category.as_series(), Rgb::BLUE)?
        .currency_axis();
    let trend = ChartSpec::line("Sales Trend", &r.sales_trend, Rgb::GREEN)?
        .filled()
        .currency_axis();

    plan.text("sales-report-period", r.period.clone())
        .text("total-sales", format_currency(r.overview.total_sales))
        .text("transaction-count", format_number(r.overview.transaction_count))
        .text("avg-order-value", format_currency(r.overview.avg_order_value))
        .chart("sales-category-chart", by_category)
        .rows("sales-category-table", breakdown_rows(&r.sales_by_category))
        .chart("sales-trend-chart", trend);
    Ok(())
}

fn plan_expenses(plan: &mut ViewPlan, r: &ExpensesReport) -> Result<(), DashboardError> {
    r.expenses_by_category.validate("expenses by category")?;
    let by_category = ChartSpec::doughnut(&r.expenses_by_category.as_series(), &BREAKDOWN_PALETTE)?;
    let trend = ChartSpec::line("Expenses Trend", &r.expenses_trend, Rgb::RED)?
        .filled()
        .currency_axis();

    plan.text("expenses-report-period", r.period.clone())
        .text("total-expenses-summary", format_currency(r.overview.total))
        .text("fixed-expenses", format_currency(r.overview.fixed))
        .text("variable-expenses", format_currency(r.overview.variable))
        .text("expenses-percentage", format_percent(r.overview.percentage))
        .chart("expenses-category-chart", by_category)
        .rows("expenses-category-table", breakdown_rows(&r.expenses_by_category))
        .chart("expenses-trend-chart", trend);
    Ok(())
}

fn plan_inventory(plan: &mut ViewPlan, r: &InventoryReport) -> Result<(), DashboardError> {
    r.inventory_by_category.validate("inventory by category")?;
    let by_category = ChartSpec::pie(&r.inventory_by_category.as_series(), &BREAKDOWN_PALETTE)?;

    // Inventory is a snapshot, not a period.
    plan.text("inventory-report-period", "Current")
        .text("total-inventory-value", format_currency(r.overview.total_value))
        .text("product-count", format_number(r.overview.product_count))
        .text("inventory-turnover", format!("{} days", format_number(r.overview.turnover_days)))
        .chart("inventory-category-chart", by_category)
        .rows("inventory-category-table", breakdown_rows(&r.inventory_by_category))
        .rows("low-stock-table", low_stock_line_rows(&r.low_stock_items));
    Ok(())
}

fn plan_custom(plan: &mut ViewPlan, options: &CustomReportOptions) {
    let mut fields = vec!["Select field...".to_string()];
    fields.extend(options.filterable_fields.iter().map(|f| f.name.clone()));

    plan.rows("available-columns", field_option_rows(&options.available_columns))
        .options("filter-field", fields);
}

/// Placeholder table headed by the selected columns, in the order offered.
fn generate_custom_report(surface: &mut dyn ViewSurface) {
    let raw = surface.value("available-columns").unwrap_or_default();
    let selected: Vec<&str> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    let columns: Vec<String> = surface
        .rows("available-columns")
        .into_iter()
        .filter_map(|row| row.key)
        .filter(|id| selected.contains(&id.as_str()))
        .collect();
    tracing::debug!(?columns, "Generating custom report");

    let header = Row::new(columns.iter().map(|c| Cell::text(c.clone())).collect()).with_class("header");
    surface.clear_rows("custom-report-table");
    surface.append_row("custom-report-table", header);
    surface.append_row("custom-report-table", Row::new(vec![Cell::text(CUSTOM_PLACEHOLDER)]));
    surface.set_visible("custom-report-results", true);
}
