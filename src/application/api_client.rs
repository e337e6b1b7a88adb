// Typed resource methods on top of the gateway
use crate::application::gateway::{AnalyticsGateway, ApiRequest, Resource};
use crate::domain::filter::PageQuery;
use crate::domain::payloads::{
    CustomerData, DashboardData, InventoryData, MarketingData, ReportData, ReportKind, SalesData,
};
use crate::domain::session::{AuthResponse, Credentials, Registration};
use crate::error::DashboardError;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Report shown when the page first opens.
pub const DEFAULT_REPORT: ReportKind = ReportKind::ProfitLoss;
pub const DEFAULT_REPORT_PERIOD: &str = "30";

#[derive(Clone)]
pub struct ApiClient {
    gateway: Arc<dyn AnalyticsGateway>,
}

impl ApiClient {
    pub fn new(gateway: Arc<dyn AnalyticsGateway>) -> Self {
        Self { gateway }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, DashboardError> {
        let body = serde_json::to_value(credentials).map_err(|e| DashboardError::malformed("login", e))?;
        self.fetch(ApiRequest::post(Resource::Login, body)).await
    }

    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, DashboardError> {
        let body =
            serde_json::to_value(registration).map_err(|e| DashboardError::malformed("register", e))?;
        self.fetch(ApiRequest::post(Resource::Register, body)).await
    }

    pub async fn get_dashboard_data(&self, token: &str) -> Result<DashboardData, DashboardError> {
        self.fetch(ApiRequest::get(Resource::Dashboard, token)).await
    }

    pub async fn get_sales_data(&self, token: &str) -> Result<SalesData, DashboardError> {
        self.fetch(ApiRequest::get(Resource::Sales, token)).await
    }

    pub async fn get_customer_data(&self, token: &str, period: Option<&str>) -> Result<CustomerData, DashboardError> {
        let resource = Resource::Customers {
            period: period.map(str::to_string),
        };
        self.fetch(ApiRequest::get(resource, token)).await
    }

    pub async fn get_inventory_data(&self, token: &str) -> Result<InventoryData, DashboardError> {
        self.fetch(ApiRequest::get(Resource::Inventory, token)).await
    }

    pub async fn get_marketing_data(&self, token: &str, period: Option<&str>) -> Result<MarketingData, DashboardError> {
        let resource = Resource::Marketing {
            period: period.map(str::to_string),
        };
        self.fetch(ApiRequest::get(resource, token)).await
    }

    pub async fn get_report_data(
        &self,
        token: &str,
        kind: ReportKind,
        period: &str,
    ) -> Result<ReportData, DashboardError> {
        let resource = Resource::Reports {
            report_type: kind.as_str().to_string(),
            period: period.to_string(),
        };
        let body = self.gateway.request(ApiRequest::get(resource, token)).await?;
        kind.decode(body)
            .map_err(|e| DashboardError::malformed(format!("{} report", kind.as_str()), e))
    }

    /// Report request derived from a page query, falling back to the defaults.
    pub fn report_params(query: &PageQuery) -> (ReportKind, String) {
        let kind = query
            .report_type
            .as_deref()
            .and_then(ReportKind::parse)
            .unwrap_or(DEFAULT_REPORT);
        let period = query
            .period
            .clone()
            .unwrap_or_else(|| DEFAULT_REPORT_PERIOD.to_string());
        (kind, period)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, DashboardError> {
        let resource = request.resource.name();
        let body = self.gateway.request(request).await?;
        serde_json::from_value(body).map_err(|e| DashboardError::malformed(resource, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::FakeGateway;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_sales_data_sends_bearer_token() {
        let gateway = Arc::new(FakeGateway::new().respond(
            "/sales",
            json!({
                "summary": {"totalSales": 100, "transactionCount": 2, "avgOrderValue": 50},
                "trend": {"labels": ["Mon"], "values": [100]},
                "recentTransactions": []
            }),
        ));
        let client = ApiClient::new(gateway.clone());

        let data = client.get_sales_data("secret").await.unwrap();
        assert_eq!(data.summary.total_sales, 100.0);

        let sent = gateway.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].token.as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_reported() {
        let gateway = Arc::new(FakeGateway::new().respond("/inventory", json!({"items": "nope"})));
        let client = ApiClient::new(gateway);

        let err = client.get_inventory_data("t").await.unwrap_err();
        assert!(matches!(err, DashboardError::MalformedPayload { .. }));
    }

    #[tokio::test]
    async fn test_customer_period_reaches_path() {
        let gateway = Arc::new(FakeGateway::new());
        let client = ApiClient::new(gateway.clone());

        let _ = client.get_customer_data("t", Some("90")).await;
        assert_eq!(gateway.requests()[0].resource.path(), "/customers?period=90");
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let gateway = Arc::new(
            FakeGateway::new().respond("/auth/login", json!({"token": "abc", "role": "owner"})),
        );
        let client = ApiClient::new(gateway.clone());

        let response = client
            .login(&Credentials {
                email: "me@shop.test".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.token.as_deref(), Some("abc"));
        assert_eq!(gateway.requests()[0].body.as_ref().unwrap()["email"], "me@shop.test");
    }

    #[test]
    fn test_report_params_defaults() {
        let (kind, period) = ApiClient::report_params(&PageQuery::default());
        assert_eq!(kind, ReportKind::ProfitLoss);
        assert_eq!(period, "30");

        let (kind, period) = ApiClient::report_params(&PageQuery {
            period: Some("90".to_string()),
            report_type: Some("inventory".to_string()),
        });
        assert_eq!(kind, ReportKind::Inventory);
        assert_eq!(period, "90");
    }
}
