// Console front end: argument parsing, page runner and the stdin interaction stream
use crate::application::api_client::ApiClient;
use crate::application::auth::{AuthService, logout};
use crate::application::page_controller::{PageController, PageState, PageView};
use crate::application::pages::customers::CustomersView;
use crate::application::pages::dashboard::DashboardView;
use crate::application::pages::inventory::InventoryView;
use crate::application::pages::marketing::MarketingView;
use crate::application::pages::reports::ReportsView;
use crate::application::pages::sales::SalesView;
use crate::application::session_store::SessionContext;
use crate::domain::session::Registration;
use crate::presentation::interaction::Interaction;
use crate::presentation::memory_surface::MemorySurface;
use async_stream::stream;
use clap::{Parser, Subcommand, ValueEnum};
use futures::Stream;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;

#[derive(Debug, Parser)]
#[command(name = "bizdash")]
#[command(about = "Business analytics dashboard for the terminal")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and keep the session token for later commands
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        business_name: String,
        #[arg(long, default_value = "owner")]
        role: String,
    },
    /// Forget the stored session
    Logout,
    /// Render a page; with --interactive, read interactions such as
    /// `change customer-period 90` from stdin until EOF
    View {
        #[arg(value_enum)]
        page: PageKind,
        #[arg(short, long)]
        interactive: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageKind {
    Dashboard,
    Sales,
    Customers,
    Inventory,
    Marketing,
    Reports,
}

/// Shared handles every command works with.
#[derive(Clone)]
pub struct Services {
    pub api: ApiClient,
    pub session: SessionContext,
}

pub async fn run_login(services: &Services, email: &str, password: &str) -> anyhow::Result<()> {
    let auth = AuthService::new(services.api.clone(), services.session.clone());
    let session = auth.login(email, password).await?;
    println!("Signed in as {}", session.role.as_deref().unwrap_or("user"));
    Ok(())
}

pub async fn run_register(services: &Services, registration: &Registration) -> anyhow::Result<()> {
    let auth = AuthService::new(services.api.clone(), services.session.clone());
    let session = auth.register(registration).await?;
    println!(
        "Registered {} as {}",
        registration.business_name,
        session.role.as_deref().unwrap_or("user")
    );
    Ok(())
}

pub fn run_logout(services: &Services) -> anyhow::Result<()> {
    let mut surface = MemorySurface::new();
    logout(&services.session, &mut surface);
    println!("Signed out");
    Ok(())
}

pub async fn run_view(services: &Services, page: PageKind, interactive: bool) -> anyhow::Result<()> {
    match page {
        PageKind::Dashboard => view_page(DashboardView, services, interactive).await,
        PageKind::Sales => view_page(SalesView, services, interactive).await,
        PageKind::Customers => view_page(CustomersView, services, interactive).await,
        PageKind::Inventory => view_page(InventoryView, services, interactive).await,
        PageKind::Marketing => view_page(MarketingView, services, interactive).await,
        PageKind::Reports => view_page(ReportsView, services, interactive).await,
    }
}

async fn view_page<V: PageView>(view: V, services: &Services, interactive: bool) -> anyhow::Result<()> {
    let mut controller = PageController::new(
        view,
        services.api.clone(),
        services.session.clone(),
        MemorySurface::new(),
    );

    let state = controller.load().await;
    if state == PageState::Redirected {
        println!("Not signed in. Run `bizdash login` first.");
        return Ok(());
    }
    println!("{}", controller.surface().render_text());
    if !interactive {
        return Ok(());
    }

    let mut seen = snapshot(controller.surface());
    let state = controller
        .run(console_events(), |_, surface| {
            let now = snapshot(surface);
            if now != seen {
                println!("{}", surface.render_text());
                seen = now;
            }
        })
        .await;

    if state == PageState::Redirected {
        println!("Signed out");
    }
    Ok(())
}

fn snapshot(surface: &MemorySurface) -> (usize, usize) {
    (surface.mutations(), surface.alerts().len())
}

pub fn console_events() -> impl Stream<Item = Interaction> {
    interactions(BufReader::new(tokio::io::stdin()))
}

/// One interaction per line; blank lines are skipped and unparseable ones logged.
pub fn interactions<R>(reader: R) -> impl Stream<Item = Interaction>
where
    R: AsyncBufRead + Unpin,
{
    let lines = LinesStream::new(reader.lines());
    stream! {
        for await line in lines {
            match line {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => match line.parse::<Interaction>() {
                    Ok(interaction) => yield interaction,
                    Err(e) => tracing::warn!("{}", e),
                },
                Err(e) => {
                    tracing::error!("Failed to read interaction: {}", e);
                    break;
                }
            }
        }
    }
}
