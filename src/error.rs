// Error taxonomy shared by the gateway, renderers and page controllers
use thiserror::Error;

/// Failures raised by an `AnalyticsGateway` transport.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("request to {path} failed: {message}")]
    Transport { path: String, message: String },

    #[error("{path} answered with status {status}: {body}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    #[error("could not decode response from {path}: {message}")]
    Decode { path: String, message: String },
}

/// Label/value alignment problems detected before a chart is built.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("series '{series}' has {values} values for {labels} labels")]
    LengthMismatch {
        series: String,
        labels: usize,
        values: usize,
    },
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("no session token present")]
    AuthMissing,

    #[error(transparent)]
    Fetch(#[from] GatewayError),

    #[error("malformed {resource} payload: {message}")]
    MalformedPayload { resource: String, message: String },

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error("session store error: {0}")]
    Session(String),
}

impl DashboardError {
    pub fn malformed(resource: impl Into<String>, err: impl std::fmt::Display) -> Self {
        DashboardError::MalformedPayload {
            resource: resource.into(),
            message: err.to_string(),
        }
    }
}
