// Session domain model
use serde::{Deserialize, Serialize};

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "authToken";
/// Storage key holding the role returned at login.
pub const ROLE_KEY: &str = "userRole";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Option<String>,
}

impl Session {
    pub fn new(token: String, role: Option<String>) -> Self {
        Self { token, role }
    }
}

/// Body returned by `/auth/login` and `/auth/register`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub business_name: String,
    pub role: String,
}
