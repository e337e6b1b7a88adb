// Auth guard and the login/register/logout flows
use crate::application::api_client::ApiClient;
use crate::application::session_store::SessionContext;
use crate::domain::session::{AuthResponse, Credentials, Registration, Session};
use crate::error::DashboardError;
use crate::presentation::surface::ViewSurface;

/// Where unauthenticated users are sent.
pub const LOGIN_PATH: &str = "index.html";

pub struct AuthGuard;

impl AuthGuard {
    /// Presence of a token is the only check. Redirects and returns `None` when absent.
    pub fn check_authenticated(session: &SessionContext, surface: &mut dyn ViewSurface) -> Option<Session> {
        match session.current() {
            Some(s) => Some(s),
            None => {
                tracing::info!("No session token, redirecting to {}", LOGIN_PATH);
                surface.navigate(LOGIN_PATH);
                None
            }
        }
    }
}

/// Clears both stored keys and routes to the login view.
pub fn logout(session: &SessionContext, surface: &mut dyn ViewSurface) {
    if let Err(e) = session.sign_out() {
        tracing::error!("Failed to clear session: {}", e);
    }
    surface.navigate(LOGIN_PATH);
}

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
    session: SessionContext,
}

impl AuthService {
    pub fn new(api: ApiClient, session: SessionContext) -> Self {
        Self { api, session }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, DashboardError> {
        let response = self
            .api
            .login(&Credentials {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        self.store(response)
    }

    pub async fn register(&self, registration: &Registration) -> Result<Session, DashboardError> {
        let response = self.api.register(registration).await?;
        self.store(response)
    }

    fn store(&self, response: AuthResponse) -> Result<Session, DashboardError> {
        let Some(token) = response.token.filter(|t| !t.is_empty()) else {
            if let Some(message) = &response.message {
                tracing::warn!("Authentication rejected: {}", message);
            }
            return Err(DashboardError::AuthMissing);
        };
        self.session.sign_in(&token, response.role.as_deref())?;
        tracing::info!("Signed in");
        Ok(Session::new(token, response.role))
    }
}
