// Per-page metric sets, replaced wholesale on every refresh
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_revenue: f64,
    pub revenue_change: f64,
    pub new_customers: f64,
    pub customer_change: f64,
    pub repeat_customers: f64,
    pub repeat_change: f64,
    pub low_stock_items: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_sales: f64,
    pub transaction_count: f64,
    pub avg_order_value: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerMetrics {
    pub total_customers: f64,
    pub repeat_customers: f64,
    pub repeat_rate: f64,
    pub avg_spend: f64,
    pub avg_visits: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentCounts {
    pub high_value: f64,
    pub loyal: f64,
    pub at_risk: f64,
    pub new: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingMetrics {
    pub total_spend: f64,
    pub spend_change: f64,
    pub total_revenue: f64,
    pub revenue_change: f64,
    pub roas: f64,
    pub cpa: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueLines {
    pub product_sales: f64,
    pub service_revenue: f64,
    pub other_income: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CostLines {
    pub inventory: f64,
    pub labor: f64,
    pub materials: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseLines {
    pub rent: f64,
    pub utilities: f64,
    pub marketing: f64,
    pub salaries: f64,
    pub other: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfitLine {
    pub amount: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOverview {
    pub total_sales: f64,
    pub transaction_count: f64,
    pub avg_order_value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExpensesOverview {
    pub total: f64,
    pub fixed: f64,
    pub variable: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryOverview {
    pub total_value: f64,
    pub product_count: f64,
    pub turnover_days: f64,
}
