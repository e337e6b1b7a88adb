// Main entry point - Dependency injection and command dispatch
mod application;
mod domain;
mod error;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::api_client::ApiClient;
use crate::application::session_store::SessionContext;
use crate::domain::session::Registration;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::file_session_store::FileSessionStore;
use crate::infrastructure::http_gateway::HttpGateway;
use crate::presentation::cli::{self, App, Commands, Services};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = App::parse();

    // Load configuration
    let config = load_app_config()?;

    // Initialize tracing; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Create adapters (infrastructure layer)
    let gateway = Arc::new(HttpGateway::new(&config.api.base_url)?);
    let store = Arc::new(FileSessionStore::new(config.session.resolved_path()));
    tracing::debug!(base_url = %config.api.base_url, session = %store.path().display(), "Configured");

    // Create services (application layer)
    let services = Services {
        api: ApiClient::new(gateway),
        session: SessionContext::new(store),
    };

    match app.command {
        Commands::Login { email, password } => cli::run_login(&services, &email, &password).await,
        Commands::Register {
            email,
            password,
            business_name,
            role,
        } => {
            let registration = Registration {
                email,
                password,
                business_name,
                role,
            };
            cli::run_register(&services, &registration).await
        }
        Commands::Logout => cli::run_logout(&services),
        Commands::View { page, interactive } => cli::run_view(&services, page, interactive).await,
    }
}
