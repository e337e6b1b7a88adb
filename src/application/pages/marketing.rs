use crate::application::api_client::ApiClient;
use crate::application::page_controller::{PageView, Reaction};
use crate::domain::filter::{FilterState, PageQuery};
use crate::domain::payloads::MarketingData;
use crate::domain::records::roas_class;
use crate::error::DashboardError;
use crate::presentation::chart_renderer::{ChartSpec, Rgb};
use crate::presentation::formatters::{format_change, format_currency, format_fixed2};
use crate::presentation::interaction::{Binding, Interaction};
use crate::presentation::surface::{EventKind, ViewSurface};
use crate::presentation::table_renderer::{TableFilter, campaign_rows};
use crate::presentation::view_plan::ViewPlan;
use async_trait::async_trait;

const ADS_MODAL: &str = "connect-ads-modal";

const CAMPAIGN_FILTER: TableFilter = TableFilter {
    table: "campaigns-table",
    search_columns: &[0, 1],
    category_column: None,
    status_column: None,
};

pub struct MarketingView;

#[async_trait]
impl PageView for MarketingView {
    type Payload = MarketingData;
    type Local = ();

    fn name(&self) -> &'static str {
        "marketing"
    }

    async fn fetch(&self, api: &ApiClient, token: &str, query: &PageQuery) -> Result<MarketingData, DashboardError> {
        api.get_marketing_data(token, query.period.as_deref()).await
    }

    fn plan(&self, data: &MarketingData, _query: &PageQuery) -> Result<ViewPlan, DashboardError> {
        let spend_revenue =
            ChartSpec::grouped_bar(&data.spend_vs_revenue.to_series(), &[Rgb::RED, Rgb::GREEN])?.currency_axis();
        let channels = ChartSpec::doughnut(
            &data.channel_performance,
            &[Rgb::BLUE, Rgb::RED, Rgb::YELLOW, Rgb::GREEN, Rgb::PURPLE],
        )?;

        let m = &data.metrics;
        let mut plan = ViewPlan::new();
        plan.text("total-spend", format_currency(m.total_spend))
            .text("spend-change", format_change(m.spend_change))
            .text("total-revenue", format_currency(m.total_revenue))
            .text("revenue-change", format_change(m.revenue_change))
            .text("roas", format_fixed2(m.roas))
            .class("roas", roas_class(m.roas))
            .text("cpa", format_currency(m.cpa))
            .chart("spend-revenue-chart", spend_revenue)
            .chart("channel-chart", channels)
            .rows("campaigns-table", campaign_rows(&data.campaigns));
        Ok(plan)
    }

    fn bindings(&self) -> Vec<Binding> {
        vec![
            Binding::period("marketing-period"),
            Binding::search("campaign-search"),
            Binding::open_modal("connect-ads-btn", ADS_MODAL),
            Binding::close_modal("close-modal", ADS_MODAL),
            Binding::close_modal(ADS_MODAL, ADS_MODAL),
            Binding::page("connect-fb-btn", EventKind::Click),
            Binding::page("connect-google-btn", EventKind::Click),
        ]
    }

    fn table_filter(&self) -> Option<TableFilter> {
        Some(CAMPAIGN_FILTER)
    }

    fn interact(
        &self,
        interaction: &Interaction,
        _local: &mut (),
        surface: &mut dyn ViewSurface,
        _filters: &FilterState,
    ) -> Reaction {
        let network = match interaction.element.as_str() {
            "connect-fb-btn" => "Facebook",
            "connect-google-btn" => "Google",
            _ => return Reaction::Ignored,
        };
        surface.alert(&format!("{} connection will be implemented", network));
        Reaction::Handled
    }
}
