// Gateway trait for the remote analytics API
use crate::error::GatewayError;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Named endpoints of the analytics API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Login,
    Register,
    Dashboard,
    Sales,
    Customers { period: Option<String> },
    Inventory,
    Marketing { period: Option<String> },
    Reports { report_type: String, period: String },
}

impl Resource {
    /// Path relative to the API base URL, including any query string.
    pub fn path(&self) -> String {
        match self {
            Resource::Login => "/auth/login".to_string(),
            Resource::Register => "/auth/register".to_string(),
            Resource::Dashboard => "/dashboard".to_string(),
            Resource::Sales => "/sales".to_string(),
            Resource::Customers { period } => with_period("/customers", period.as_deref()),
            Resource::Inventory => "/inventory".to_string(),
            Resource::Marketing { period } => with_period("/marketing", period.as_deref()),
            Resource::Reports {
                report_type,
                period,
            } => format!(
                "/reports?type={}&period={}",
                urlencoding::encode(report_type),
                urlencoding::encode(period)
            ),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Login => "login",
            Resource::Register => "register",
            Resource::Dashboard => "dashboard",
            Resource::Sales => "sales",
            Resource::Customers { .. } => "customers",
            Resource::Inventory => "inventory",
            Resource::Marketing { .. } => "marketing",
            Resource::Reports { .. } => "reports",
        }
    }
}

fn with_period(base: &str, period: Option<&str>) -> String {
    match period {
        Some(p) if !p.is_empty() => format!("{}?period={}", base, urlencoding::encode(p)),
        _ => base.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub resource: Resource,
    pub method: HttpMethod,
    pub token: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(resource: Resource, token: &str) -> Self {
        Self {
            resource,
            method: HttpMethod::Get,
            token: Some(token.to_string()),
            body: None,
        }
    }

    pub fn post(resource: Resource, body: serde_json::Value) -> Self {
        Self {
            resource,
            method: HttpMethod::Post,
            token: None,
            body: Some(body),
        }
    }
}

/// Issues one request and returns the parsed JSON body. Single attempt, no retry.
#[async_trait]
pub trait AnalyticsGateway: Send + Sync {
    async fn request(&self, request: ApiRequest) -> Result<serde_json::Value, GatewayError>;
}
