// HTTP gateway implementation over reqwest
use crate::application::gateway::{AnalyticsGateway, ApiRequest, HttpMethod};
use crate::error::GatewayError;
use anyhow::Context;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    /// Requests are single-attempt and carry no client-side timeout.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AnalyticsGateway for HttpGateway {
    async fn request(&self, request: ApiRequest) -> Result<serde_json::Value, GatewayError> {
        let path = request.resource.path();
        let url = self.url(&path);

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        }
        .header("Accept", "application/json");

        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tracing::debug!(method = ?request.method, %url, "Sending API request");

        let response = builder.send().await.map_err(|e| GatewayError::Transport {
            path: path.clone(),
            message: e.to_string(),
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%url, %status, "API request rejected");
            return Err(GatewayError::Status {
                path,
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| GatewayError::Decode {
                path,
                message: e.to_string(),
            })
    }
}
