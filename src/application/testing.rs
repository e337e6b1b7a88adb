// Test doubles shared by the application layer tests
use crate::application::api_client::ApiClient;
use crate::application::gateway::{AnalyticsGateway, ApiRequest};
use crate::application::page_controller::{PageController, PageView};
use crate::application::session_store::{MemorySessionStore, SessionContext};
use crate::presentation::memory_surface::MemorySurface;
use crate::error::GatewayError;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Canned responses keyed by request path.
#[derive(Default)]
pub struct FakeGateway {
    responses: HashMap<String, Value>,
    delays: HashMap<String, Duration>,
    failures: Vec<String>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, path: &str, body: Value) -> Self {
        self.responses.insert(path.to_string(), body);
        self
    }

    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    pub fn fail(mut self, path: &str) -> Self {
        self.failures.push(path.to_string());
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalyticsGateway for FakeGateway {
    async fn request(&self, request: ApiRequest) -> Result<Value, GatewayError> {
        let path = request.resource.path();
        self.requests.lock().unwrap().push(request);

        if let Some(delay) = self.delays.get(&path) {
            tokio::time::sleep(*delay).await;
        }

        if self.failures.contains(&path) {
            return Err(GatewayError::Transport {
                path,
                message: "connection refused".to_string(),
            });
        }

        self.responses
            .get(&path)
            .cloned()
            .ok_or(GatewayError::Status {
                path,
                status: 404,
                body: String::new(),
            })
    }
}

pub fn signed_in() -> SessionContext {
    let context = SessionContext::new(Arc::new(MemorySessionStore::new()));
    context.sign_in("test-token", Some("owner")).unwrap();
    context
}

pub fn signed_out() -> SessionContext {
    SessionContext::new(Arc::new(MemorySessionStore::new()))
}

/// A signed-in controller for `view` backed by `gateway`.
pub fn page<V: PageView>(view: V, gateway: FakeGateway) -> PageController<V, MemorySurface> {
    PageController::new(
        view,
        ApiClient::new(Arc::new(gateway)),
        signed_in(),
        MemorySurface::new(),
    )
}

pub fn dashboard_body() -> Value {
    json!({
        "metrics": {
            "totalRevenue": 12345.6, "revenueChange": 8,
            "newCustomers": 42, "customerChange": -3.5,
            "repeatCustomers": 17, "repeatChange": 12,
            "lowStockItems": 4
        },
        "recentActivity": [
            {"date": "2024-01-05", "message": "Order #1001 placed"},
            {"date": "2024-01-04", "message": "Stock received"}
        ],
        "revenueTrend": {"labels": ["Jan", "Feb", "Mar"], "values": [1000, 1500, 1200]},
        "customerAcquisition": {
            "labels": ["Jan", "Feb"],
            "newCustomers": [10, 12],
            "repeatCustomers": [5, 7]
        }
    })
}

pub fn sales_body() -> Value {
    json!({
        "summary": {"totalSales": 2500.5, "transactionCount": 3, "avgOrderValue": 833.5},
        "trend": {"labels": ["Mon", "Tue"], "values": [1200, 1300.5]},
        "recentTransactions": [
            {"id": "T-1", "date": "2024-02-01", "customer": "Ada", "items": [{}, {}], "amount": 1200},
            {"id": "T-2", "date": "2024-02-02", "items": [{}], "amount": 1300.5}
        ]
    })
}

pub fn customers_body(period_label: &str) -> Value {
    json!({
        "metrics": {"totalCustomers": 120, "repeatCustomers": 45, "repeatRate": 37.5,
                    "avgSpend": 88.2, "avgVisits": 3.1},
        "acquisition": {"labels": ["Jan", "Feb"], "values": [20, 25]},
        "valueSegments": {"labels": ["High", "Low"], "values": [30, 90]},
        "segments": {"highValue": 12, "loyal": 30, "atRisk": 8, "new": 70},
        "customers": [
            {"id": 1, "name": period_label, "email": "ada@shop.test", "phone": "555-0101",
             "totalSpend": 950, "visitCount": 12, "lastVisit": "2024-03-02", "segment": "high_value"},
            {"id": 2, "name": "Bob", "email": "bob@shop.test", "totalSpend": 40,
             "visitCount": 1, "segment": "new"},
            {"id": 3, "email": "carol@shop.test", "phone": "555-0199", "totalSpend": 300,
             "visitCount": 5, "lastVisit": "2023-12-24", "segment": "at_risk"}
        ]
    })
}

pub fn inventory_body() -> Value {
    json!({
        "lowStockItems": [{"name": "Stout", "stock": 3, "threshold": 5}],
        "items": [
            {"id": 1, "name": "Pale Ale", "sku": "PA-1", "category": "Beer", "stock": 0, "threshold": 5, "price": 4},
            {"id": 2, "name": "Stout", "category": "Beer", "stock": 3, "threshold": 5, "price": 4.5},
            {"id": 3, "name": "Merlot", "category": "Wine", "stock": 10, "threshold": 5, "price": 7.25},
            {"id": 4, "name": "Peanuts", "stock": 40, "threshold": 10, "price": 1.5}
        ]
    })
}

pub fn marketing_body(total_spend: f64) -> Value {
    json!({
        "metrics": {"totalSpend": total_spend, "spendChange": 5, "totalRevenue": 4800,
                    "revenueChange": 12.5, "roas": 3.2, "cpa": 14.75},
        "spendVsRevenue": {"labels": ["Jan", "Feb"], "spend": [700, 800], "revenue": [2200, 2600]},
        "channelPerformance": {"labels": ["Facebook", "Google"], "values": [55, 45]},
        "campaigns": [
            {"name": "Spring Sale", "channel": "Facebook", "spend": 500, "revenue": 1500,
             "roas": 3.0, "impressions": 120000, "clicks": 3400, "cpa": 12.5},
            {"name": "Brand Push", "channel": "Google", "spend": 1000, "revenue": 800,
             "roas": 0.8, "impressions": 56000, "clicks": 900, "cpa": 25}
        ]
    })
}

pub fn profit_loss_body(period: &str) -> Value {
    json!({
        "period": period,
        "revenue": {"productSales": 9000, "serviceRevenue": 2000, "otherIncome": 500, "total": 11500},
        "cogs": {"inventory": 3000, "labor": 1500, "materials": 500, "total": 5000},
        "grossProfit": {"amount": 6500, "margin": 56.5},
        "expenses": {"rent": 1200, "utilities": 300, "marketing": 400, "salaries": 2000,
                     "other": 100, "total": 4000},
        "netProfit": {"amount": 2500, "margin": 21.7}
    })
}

pub fn sales_report_body() -> Value {
    json!({
        "period": "Last 30 days",
        "overview": {"totalSales": 1500, "transactionCount": 30, "avgOrderValue": 50},
        "salesByCategory": {"labels": ["Food", "Drinks"], "values": [1000, 500], "total": 1500},
        "salesTrend": {"labels": ["W1", "W2"], "values": [700, 800]}
    })
}

pub fn custom_report_body() -> Value {
    json!({
        "availableColumns": [{"id": "date", "name": "Date"}, {"id": "amount", "name": "Amount"}],
        "filterableFields": [{"id": "channel", "name": "Channel"}]
    })
}

pub fn expenses_report_body() -> Value {
    json!({
        "period": "Last 90 days",
        "overview": {"total": 4000, "fixed": 2500, "variable": 1500, "percentage": 34.8},
        "expensesByCategory": {"labels": ["Rent", "Payroll", "Ads"], "values": [1200, 2000, 800], "total": 4000},
        "expensesTrend": {"labels": ["Jan", "Feb", "Mar"], "values": [1300, 1350, 1350]}
    })
}

pub fn inventory_report_body() -> Value {
    json!({
        "overview": {"totalValue": 18250.5, "productCount": 120, "turnoverDays": 21},
        "inventoryByCategory": {"labels": ["Beer", "Wine"], "values": [12000, 6250.5], "total": 18250.5},
        "lowStockItems": [
            {"name": "Stout", "currentStock": 3, "threshold": 5, "value": 13.5}
        ]
    })
}
