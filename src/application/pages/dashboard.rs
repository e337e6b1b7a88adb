use crate::application::api_client::ApiClient;
use crate::application::page_controller::PageView;
use crate::domain::filter::PageQuery;
use crate::domain::payloads::DashboardData;
use crate::error::DashboardError;
use crate::presentation::chart_renderer::{ChartSpec, Rgb};
use crate::presentation::formatters::{format_change, format_currency, format_number};
use crate::presentation::interaction::Binding;
use crate::presentation::table_renderer::activity_rows;
use crate::presentation::view_plan::ViewPlan;
use async_trait::async_trait;

/// Overview page: headline metrics, recent activity, revenue and acquisition charts.
pub struct DashboardView;

#[async_trait]
impl PageView for DashboardView {
    type Payload = DashboardData;
    type Local = ();

    fn name(&self) -> &'static str {
        "dashboard"
    }

    async fn fetch(&self, api: &ApiClient, token: &str, _query: &PageQuery) -> Result<DashboardData, DashboardError> {
        api.get_dashboard_data(token).await
    }

    fn plan(&self, data: &DashboardData, _query: &PageQuery) -> Result<ViewPlan, DashboardError> {
        let revenue = ChartSpec::line("Revenue", &data.revenue_trend, Rgb::BLUE)?.currency_axis();
        let customers =
            ChartSpec::stacked_bar(&data.customer_acquisition.to_series(), &[Rgb::BLUE, Rgb::GREEN])?;

        let m = &data.metrics;
        let mut plan = ViewPlan::new();
        plan.text("total-revenue", format_currency(m.total_revenue))
            .text("revenue-change", format_change(m.revenue_change))
            .text("new-customers", format_number(m.new_customers))
            .text("customer-change", format_change(m.customer_change))
            .text("repeat-customers", format_number(m.repeat_customers))
            .text("repeat-change", format_change(m.repeat_change))
            .text("inventory-alerts", format_number(m.low_stock_items))
            .rows("activity-list", activity_rows(&data.recent_activity))
            .chart("revenue-chart", revenue)
            .chart("customer-chart", customers);
        Ok(plan)
    }

    fn bindings(&self) -> Vec<Binding> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::page_controller::PageState;
    use crate::application::testing::{FakeGateway, dashboard_body, page};
    use crate::presentation::chart_renderer::ChartKind;
    use serde_json::json;

    #[tokio::test]
    async fn test_dashboard_renders_metrics_activity_and_charts() {
        let mut dashboard = page(DashboardView, FakeGateway::new().respond("/dashboard", dashboard_body()));
        assert_eq!(dashboard.load().await, PageState::Rendered);

        let surface = dashboard.surface();
        assert_eq!(surface.text("total-revenue"), Some("$12,345.60"));
        assert_eq!(surface.text("revenue-change"), Some("8% vs last period"));
        assert_eq!(surface.text("customer-change"), Some("-3.5% vs last period"));
        assert_eq!(surface.text("new-customers"), Some("42"));
        assert_eq!(surface.text("inventory-alerts"), Some("4"));

        let activity = surface.visible_rows("activity-list");
        assert_eq!(activity.len(), 2);
        assert_eq!(activity[0].cell_text(0), "Jan 5, 2024");
        assert_eq!(activity[0].cell_text(1), "Order #1001 placed");

        let revenue = surface.chart("revenue-chart").unwrap();
        assert_eq!(revenue.kind, ChartKind::Line);
        assert_eq!(revenue.data.labels.len(), 3);
        assert_eq!(surface.chart("customer-chart").unwrap().data.datasets.len(), 2);
        assert_eq!(surface.listener_count(), 1);
    }

    #[tokio::test]
    async fn test_misaligned_trend_renders_nothing() {
        let mut body = dashboard_body();
        body["revenueTrend"] = json!({"labels": ["Jan", "Feb", "Mar"], "values": [1000, 1500]});
        let mut dashboard = page(DashboardView, FakeGateway::new().respond("/dashboard", body));

        assert_eq!(dashboard.load().await, PageState::Failed);
        assert_eq!(dashboard.surface().mutations(), 0);
        assert_eq!(
            dashboard.surface().alerts(),
            &["Failed to load dashboard data. Please try again.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_missing_metrics_is_malformed() {
        let mut body = dashboard_body();
        body.as_object_mut().unwrap().remove("metrics");
        let mut dashboard = page(DashboardView, FakeGateway::new().respond("/dashboard", body));

        assert_eq!(dashboard.load().await, PageState::Failed);
        assert_eq!(dashboard.surface().text("total-revenue"), None);
    }
}
