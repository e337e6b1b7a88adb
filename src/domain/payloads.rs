// Response bodies consumed by the page views
use super::metrics::*;
use super::records::*;
use super::series::{CategoryBreakdown, MultiSeries, SeriesData};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub metrics: DashboardMetrics,
    #[serde(default)]
    pub recent_activity: Vec<Activity>,
    pub revenue_trend: SeriesData,
    pub customer_acquisition: AcquisitionSplit,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquisitionSplit {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub new_customers: Vec<f64>,
    #[serde(default)]
    pub repeat_customers: Vec<f64>,
}

impl AcquisitionSplit {
    pub fn to_series(&self) -> MultiSeries {
        MultiSeries::new(self.labels.clone())
            .with("New Customers", self.new_customers.clone())
            .with("Repeat Customers", self.repeat_customers.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesData {
    pub summary: SalesSummary,
    pub trend: SeriesData,
    #[serde(default)]
    pub recent_transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerData {
    pub metrics: CustomerMetrics,
    pub acquisition: SeriesData,
    pub value_segments: SeriesData,
    pub segments: SegmentCounts,
    #[serde(default)]
    pub customers: Vec<Customer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryData {
    #[serde(default)]
    pub low_stock_items: Vec<LowStockAlert>,
    #[serde(default)]
    pub items: Vec<InventoryItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingData {
    pub metrics: MarketingMetrics,
    pub spend_vs_revenue: SpendRevenue,
    pub channel_performance: SeriesData,
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpendRevenue {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub spend: Vec<f64>,
    #[serde(default)]
    pub revenue: Vec<f64>,
}

impl SpendRevenue {
    pub fn to_series(&self) -> MultiSeries {
        MultiSeries::new(self.labels.clone())
            .with("Spend", self.spend.clone())
            .with("Revenue", self.revenue.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossReport {
    pub period: String,
    pub revenue: RevenueLines,
    pub cogs: CostLines,
    pub gross_profit: ProfitLine,
    pub expenses: ExpenseLines,
    pub net_profit: ProfitLine,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub period: String,
    pub overview: SalesOverview,
    pub sales_by_category: CategoryBreakdown,
    pub sales_trend: SeriesData,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensesReport {
    pub period: String,
    pub overview: ExpensesOverview,
    pub expenses_by_category: CategoryBreakdown,
    pub expenses_trend: SeriesData,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub overview: InventoryOverview,
    pub inventory_by_category: CategoryBreakdown,
    #[serde(default)]
    pub low_stock_items: Vec<LowStockLine>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomReportOptions {
    #[serde(default)]
    pub available_columns: Vec<FieldOption>,
    #[serde(default)]
    pub filterable_fields: Vec<FieldOption>,
}

/// The report body's shape depends on the requested report type.
#[derive(Debug, Clone)]
pub enum ReportData {
    ProfitLoss(ProfitLossReport),
    Sales(SalesReport),
    Expenses(ExpensesReport),
    Inventory(InventoryReport),
    Custom(CustomReportOptions),
}

impl ReportData {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportData::ProfitLoss(_) => ReportKind::ProfitLoss,
            ReportData::Sales(_) => ReportKind::Sales,
            ReportData::Expenses(_) => ReportKind::Expenses,
            ReportData::Inventory(_) => ReportKind::Inventory,
            ReportData::Custom(_) => ReportKind::Custom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    ProfitLoss,
    Sales,
    Expenses,
    Inventory,
    Custom,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::ProfitLoss,
        ReportKind::Sales,
        ReportKind::Expenses,
        ReportKind::Inventory,
        ReportKind::Custom,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == raw)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::ProfitLoss => "profit-loss",
            ReportKind::Sales => "sales",
            ReportKind::Expenses => "expenses",
            ReportKind::Inventory => "inventory",
            ReportKind::Custom => "custom",
        }
    }

    /// Id of the container holding this report.
    pub fn container_id(&self) -> String {
        format!("{}-report", self.as_str())
    }

    pub fn decode(&self, body: serde_json::Value) -> Result<ReportData, serde_json::Error> {
        Ok(match self {
            ReportKind::ProfitLoss => ReportData::ProfitLoss(serde_json::from_value(body)?),
            ReportKind::Sales => ReportData::Sales(serde_json::from_value(body)?),
            ReportKind::Expenses => ReportData::Expenses(serde_json::from_value(body)?),
            ReportKind::Inventory => ReportData::Inventory(serde_json::from_value(body)?),
            ReportKind::Custom => ReportData::Custom(serde_json::from_value(body)?),
        })
    }
}
