// Generic fetch -> render -> bind -> refresh pipeline shared by every page
use crate::application::api_client::ApiClient;
use crate::application::auth::{AuthGuard, logout};
use crate::application::sequencer::{RequestSequencer, Ticket};
use crate::application::session_store::SessionContext;
use crate::domain::filter::{FilterState, PageQuery};
use crate::error::DashboardError;
use crate::presentation::chart_renderer::ChartRegistry;
use crate::presentation::interaction::{Binding, BindingRole, Interaction};
use crate::presentation::surface::ViewSurface;
use crate::presentation::table_renderer::TableFilter;
use crate::presentation::view_plan::ViewPlan;
use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, Stream, StreamExt};
use futures::FutureExt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Loading,
    Rendered,
    Refreshing,
    Failed,
    /// Navigated away: no session, or the user logged out.
    Redirected,
}

/// Outcome of a page-specific interaction handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    Ignored,
    Handled,
    Refetch(PageQuery),
}

/// One business page: how to fetch it, how to render it, what it listens to.
#[async_trait]
pub trait PageView: Send + Sync + 'static {
    type Payload: Send + 'static;
    /// Page-local UI state that lives as long as the controller.
    type Local: Default + Send;

    /// Used in diagnostics and the generic failure notice.
    fn name(&self) -> &'static str;

    fn initial_query(&self) -> PageQuery {
        PageQuery::default()
    }

    async fn fetch(&self, api: &ApiClient, token: &str, query: &PageQuery) -> Result<Self::Payload, DashboardError>;

    /// Build every surface change for `payload`. Nothing is applied if this fails.
    fn plan(&self, payload: &Self::Payload, query: &PageQuery) -> Result<ViewPlan, DashboardError>;

    /// Handlers bound once the first render succeeded; logout is always bound.
    fn bindings(&self) -> Vec<Binding>;

    fn table_filter(&self) -> Option<TableFilter> {
        None
    }

    fn interact(
        &self,
        _interaction: &Interaction,
        _local: &mut Self::Local,
        _surface: &mut dyn ViewSurface,
        _filters: &FilterState,
    ) -> Reaction {
        Reaction::Ignored
    }
}

enum Dispatch {
    Nothing,
    Fetch(PageQuery),
    Logout,
}

enum Step<P> {
    Event(Option<Interaction>),
    Landed(Landing<P>),
    Idle,
}

type Landing<P> = (Ticket, PageQuery, Result<P, DashboardError>);

pub struct PageController<V: PageView, S: ViewSurface> {
    view: Arc<V>,
    api: ApiClient,
    session: SessionContext,
    surface: S,
    charts: ChartRegistry,
    state: PageState,
    filters: FilterState,
    local: V::Local,
    sequencer: RequestSequencer,
    bindings: Vec<Binding>,
    bound: bool,
}

impl<V: PageView, S: ViewSurface> PageController<V, S> {
    pub fn new(view: V, api: ApiClient, session: SessionContext, surface: S) -> Self {
        Self {
            view: Arc::new(view),
            api,
            session,
            surface,
            charts: ChartRegistry::new(),
            state: PageState::Loading,
            filters: FilterState::default(),
            local: V::Local::default(),
            sequencer: RequestSequencer::new(),
            bindings: Vec::new(),
            bound: false,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Auth check, first fetch, render, and handler binding.
    pub async fn load(&mut self) -> PageState {
        self.state = PageState::Loading;
        let Some(session) = AuthGuard::check_authenticated(&self.session, &mut self.surface) else {
            self.state = PageState::Redirected;
            return self.state;
        };
        self.bind_logout();

        let query = self.view.initial_query();
        self.filters = FilterState::from_query(&query);
        let ticket = self.sequencer.issue();
        tracing::debug!(page = self.view.name(), "Loading page data");
        let result = self.view.fetch(&self.api, &session.token, &query).await;
        self.land((ticket, query, result));
        self.state
    }

    /// Consume interactions until the stream ends or the page navigates away.
    /// Fetches run alongside event intake; `observe` sees the state and surface after every step.
    pub async fn run<St, F>(&mut self, events: St, mut observe: F) -> PageState
    where
        St: Stream<Item = Interaction>,
        F: FnMut(PageState, &S),
    {
        tokio::pin!(events);
        let mut inflight: FuturesUnordered<BoxFuture<'static, Landing<V::Payload>>> = FuturesUnordered::new();
        let mut events_open = true;

        while self.state != PageState::Redirected && (events_open || !inflight.is_empty()) {
            let step = tokio::select! {
                event = events.next(), if events_open => Step::Event(event),
                Some(landing) = inflight.next(), if !inflight.is_empty() => Step::Landed(landing),
                else => Step::Idle,
            };

            match step {
                Step::Event(None) => events_open = false,
                Step::Event(Some(interaction)) => match self.dispatch(&interaction) {
                    Dispatch::Nothing => {}
                    Dispatch::Logout => self.logout(),
                    Dispatch::Fetch(query) => {
                        if let Some(fetch) = self.begin_fetch(query) {
                            inflight.push(fetch);
                        }
                    }
                },
                Step::Landed(landing) => self.land(landing),
                Step::Idle => break,
            }
            observe(self.state, &self.surface);
        }

        self.state
    }

    fn dispatch(&mut self, interaction: &Interaction) -> Dispatch {
        if self.state == PageState::Redirected {
            return Dispatch::Nothing;
        }
        if let Some(value) = interaction.value() {
            self.surface.set_value(&interaction.element, value);
        }

        let Some(binding) = self.bindings.iter().find(|b| b.matches(interaction)).copied() else {
            tracing::debug!(page = self.view.name(), "No handler bound for {:?}", interaction);
            return Dispatch::Nothing;
        };

        if binding.role == BindingRole::Logout {
            return Dispatch::Logout;
        }
        if self.state == PageState::Failed {
            tracing::debug!(page = self.view.name(), "Page failed, ignoring {:?}", interaction);
            return Dispatch::Nothing;
        }

        let value = interaction.value().unwrap_or_default().to_string();
        match binding.role {
            BindingRole::Logout => Dispatch::Logout,
            BindingRole::Period => {
                self.filters.period = Some(value);
                Dispatch::Fetch(self.filters.query())
            }
            BindingRole::Search => {
                self.filters.search_term = value;
                self.apply_local_filters();
                Dispatch::Nothing
            }
            BindingRole::CategoryFilter => {
                self.filters.category = value;
                self.apply_local_filters();
                Dispatch::Nothing
            }
            BindingRole::StockFilter => {
                self.filters.stock = value;
                self.apply_local_filters();
                Dispatch::Nothing
            }
            BindingRole::OpenModal(modal) => {
                self.surface.set_visible(modal, true);
                Dispatch::Nothing
            }
            BindingRole::CloseModal(modal) => {
                self.surface.set_visible(modal, false);
                Dispatch::Nothing
            }
            BindingRole::Page => {
                match self
                    .view
                    .interact(interaction, &mut self.local, &mut self.surface, &self.filters)
                {
                    Reaction::Refetch(query) => {
                        self.filters.period = query.period.clone();
                        self.filters.report_type = query.report_type.clone();
                        Dispatch::Fetch(query)
                    }
                    Reaction::Handled | Reaction::Ignored => Dispatch::Nothing,
                }
            }
        }
    }

    fn begin_fetch(&mut self, query: PageQuery) -> Option<BoxFuture<'static, Landing<V::Payload>>> {
        let Some(session) = AuthGuard::check_authenticated(&self.session, &mut self.surface) else {
            self.charts.release_all(&mut self.surface);
            self.state = PageState::Redirected;
            return None;
        };

        self.state = PageState::Refreshing;
        let ticket = self.sequencer.issue();
        let view = Arc::clone(&self.view);
        let api = self.api.clone();
        tracing::debug!(page = view.name(), ?query, "Refreshing page data");

        Some(
            async move {
                let result = view.fetch(&api, &session.token, &query).await;
                (ticket, query, result)
            }
            .boxed(),
        )
    }

    fn land(&mut self, (ticket, query, result): Landing<V::Payload>) {
        if !self.sequencer.is_latest(ticket) {
            tracing::debug!(page = self.view.name(), ?query, "Discarding stale response");
            return;
        }

        let initial = self.state == PageState::Loading;
        match result.and_then(|payload| self.view.plan(&payload, &query)) {
            Ok(plan) => {
                plan.apply(&mut self.surface, &mut self.charts);
                if self.filters.has_local_filters() {
                    self.apply_local_filters();
                }
                self.state = PageState::Rendered;
                self.bind();
            }
            Err(e) => {
                let verb = if initial { "load" } else { "update" };
                tracing::error!(page = self.view.name(), "Failed to {} {} data: {}", verb, self.view.name(), e);
                self.surface
                    .alert(&format!("Failed to {} {} data. Please try again.", verb, self.view.name()));
                self.state = PageState::Failed;
            }
        }
    }

    fn apply_local_filters(&mut self) {
        if let Some(filter) = self.view.table_filter() {
            let visible = filter.apply(&mut self.surface, &self.filters);
            tracing::debug!(page = self.view.name(), visible, "Applied local filters");
        }
    }

    fn bind_logout(&mut self) {
        if self.bindings.iter().any(|b| b.role == BindingRole::Logout) {
            return;
        }
        let binding = Binding::logout();
        self.surface.listen(binding.element, binding.event);
        self.bindings.push(binding);
    }

    fn bind(&mut self) {
        if self.bound {
            return;
        }
        for binding in self.view.bindings() {
            self.surface.listen(binding.element, binding.event);
            self.bindings.push(binding);
        }
        self.bound = true;
    }

    fn logout(&mut self) {
        self.charts.release_all(&mut self.surface);
        logout(&self.session, &mut self.surface);
        self.state = PageState::Redirected;
    }
}

// Sequential driving and read-back for tests
#[cfg(test)]
impl<V: PageView, S: ViewSurface> PageController<V, S> {
    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Handle one interaction, awaiting any fetch it triggers.
    pub async fn handle(&mut self, interaction: Interaction) -> PageState {
        match self.dispatch(&interaction) {
            Dispatch::Nothing => {}
            Dispatch::Logout => self.logout(),
            Dispatch::Fetch(query) => {
                if let Some(fetch) = self.begin_fetch(query) {
                    let landing = fetch.await;
                    self.land(landing);
                }
            }
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::auth::LOGIN_PATH;
    use crate::application::pages::customers::CustomersView;
    use crate::application::session_store::SessionStore;
    use crate::application::testing::{FakeGateway, customers_body, signed_in, signed_out};
    use crate::domain::session::{ROLE_KEY, TOKEN_KEY};
    use crate::presentation::memory_surface::MemorySurface;
    use std::time::Duration;

    fn controller(gateway: FakeGateway, session: SessionContext) -> PageController<CustomersView, MemorySurface> {
        PageController::new(
            CustomersView,
            ApiClient::new(Arc::new(gateway)),
            session,
            MemorySurface::new(),
        )
    }

    fn customers_gateway() -> FakeGateway {
        FakeGateway::new()
            .respond("/customers", customers_body("Ada"))
            .respond("/customers?period=90", customers_body("Ninety"))
            .respond("/customers?period=7", customers_body("Seven"))
    }

    #[tokio::test]
    async fn test_unauthenticated_load_redirects_without_fetching() {
        let gateway = Arc::new(customers_gateway());
        let mut page = PageController::new(
            CustomersView,
            ApiClient::new(gateway.clone()),
            signed_out(),
            MemorySurface::new(),
        );

        assert_eq!(page.load().await, PageState::Redirected);
        assert!(gateway.requests().is_empty());
        assert_eq!(page.surface().navigations(), &[LOGIN_PATH.to_string()]);
        assert_eq!(page.surface().listener_count(), 0);
    }

    #[tokio::test]
    async fn test_load_renders_and_binds_once() {
        let mut page = controller(customers_gateway(), signed_in());
        assert_eq!(page.load().await, PageState::Rendered);

        let listeners = page.surface().listener_count();
        assert_eq!(listeners, 1 + CustomersView.bindings().len());
        assert_eq!(page.surface().row_count("customers-table"), 3);

        let state = page.handle(Interaction::change("customer-period", "90")).await;
        assert_eq!(state, PageState::Rendered);
        assert_eq!(page.surface().listener_count(), listeners);
        assert_eq!(page.surface().visible_rows("customers-table")[0].cell_text(0), "Ninety");
        assert_eq!(page.filters().period.as_deref(), Some("90"));
    }

    #[tokio::test]
    async fn test_refresh_replaces_charts_instead_of_stacking() {
        let mut page = controller(customers_gateway(), signed_in());
        page.load().await;
        page.handle(Interaction::change("customer-period", "90")).await;
        page.handle(Interaction::change("customer-period", "7")).await;

        assert_eq!(page.surface().live_charts("acquisition-chart"), 1);
        assert_eq!(page.surface().live_charts("value-chart"), 1);
    }

    #[tokio::test]
    async fn test_load_failure_alerts_once_without_rendering() {
        let mut page = controller(FakeGateway::new().fail("/customers"), signed_in());

        assert_eq!(page.load().await, PageState::Failed);
        assert_eq!(
            page.surface().alerts(),
            &["Failed to load customer data. Please try again.".to_string()]
        );
        assert_eq!(page.surface().mutations(), 0);
        assert_eq!(page.surface().text("total-customers"), None);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_render() {
        let gateway = FakeGateway::new()
            .respond("/customers", customers_body("Ada"))
            .fail("/customers?period=365");
        let mut page = controller(gateway, signed_in());
        page.load().await;
        let before = page.surface().mutations();

        let state = page.handle(Interaction::change("customer-period", "365")).await;
        assert_eq!(state, PageState::Failed);
        assert_eq!(page.surface().mutations(), before);
        assert_eq!(page.surface().alerts().len(), 1);
        assert!(page.surface().alerts()[0].starts_with("Failed to update customer data"));

        // Failed is terminal for everything but logout.
        page.handle(Interaction::input("customer-search", "bob")).await;
        assert_eq!(page.surface().mutations(), before);
    }

    #[tokio::test]
    async fn test_search_filters_locally_without_fetching() {
        let gateway = Arc::new(customers_gateway());
        let mut page = PageController::new(
            CustomersView,
            ApiClient::new(gateway.clone()),
            signed_in(),
            MemorySurface::new(),
        );
        page.load().await;

        page.handle(Interaction::input("customer-search", "SHOP.TEST")).await;
        assert_eq!(page.surface().visible_rows("customers-table").len(), 3);

        page.handle(Interaction::input("customer-search", "555-0199")).await;
        let rows = page.surface().visible_rows("customers-table");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cell_text(1), "carol@shop.test");
        assert_eq!(gateway.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_search_survives_refresh() {
        let mut page = controller(customers_gateway(), signed_in());
        page.load().await;
        page.handle(Interaction::input("customer-search", "bob")).await;
        page.handle(Interaction::change("customer-period", "90")).await;

        let rows = page.surface().visible_rows("customers-table");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cell_text(0), "Bob");
    }

    #[tokio::test]
    async fn test_unbound_interactions_are_ignored() {
        let mut page = controller(customers_gateway(), signed_in());
        page.load().await;
        let before = page.surface().mutations();

        page.handle(Interaction::change("marketing-period", "90")).await;
        page.handle(Interaction::click("customer-period")).await;
        assert_eq!(page.surface().mutations(), before);
        assert_eq!(page.state(), PageState::Rendered);
    }

    #[tokio::test]
    async fn test_logout_from_failed_page() {
        let session = signed_in();
        let mut page = controller(FakeGateway::new().fail("/customers"), session.clone());
        page.load().await;

        assert_eq!(page.handle(Interaction::click("logout-btn")).await, PageState::Redirected);
        assert_eq!(session.store().get(TOKEN_KEY).unwrap(), None);
        assert_eq!(session.store().get(ROLE_KEY).unwrap(), None);
        assert_eq!(page.surface().navigations().last().map(String::as_str), Some(LOGIN_PATH));
    }

    #[tokio::test]
    async fn test_latest_request_wins_over_slow_stale_response() {
        let gateway = customers_gateway().delay("/customers?period=7", Duration::from_millis(80));
        let mut page = controller(gateway, signed_in());
        page.load().await;

        let events = futures::stream::iter(vec![
            Interaction::change("customer-period", "7"),
            Interaction::change("customer-period", "90"),
        ]);
        let state = page.run(events, |_, _| {}).await;

        assert_eq!(state, PageState::Rendered);
        assert_eq!(page.surface().visible_rows("customers-table")[0].cell_text(0), "Ninety");
        assert_eq!(page.filters().period.as_deref(), Some("90"));
    }

    #[tokio::test]
    async fn test_stale_failure_is_discarded_silently() {
        let gateway = customers_gateway()
            .fail("/customers?period=7")
            .delay("/customers?period=7", Duration::from_millis(80));
        let mut page = controller(gateway, signed_in());
        page.load().await;

        let events = futures::stream::iter(vec![
            Interaction::change("customer-period", "7"),
            Interaction::change("customer-period", "90"),
        ]);
        let state = page.run(events, |_, _| {}).await;

        assert_eq!(state, PageState::Rendered);
        assert!(page.surface().alerts().is_empty());
        assert_eq!(page.surface().visible_rows("customers-table")[0].cell_text(0), "Ninety");
    }

    #[tokio::test]
    async fn test_refreshing_while_fetch_in_flight() {
        let gateway = customers_gateway().delay("/customers?period=90", Duration::from_millis(30));
        let mut page = controller(gateway, signed_in());
        page.load().await;

        let events = futures::stream::iter(vec![Interaction::change("customer-period", "90")]);
        let mut seen = Vec::new();
        let state = page
            .run(events, |state, surface| {
                seen.push((state, surface.visible_rows("customers-table")[0].cell_text(0).to_string()))
            })
            .await;

        assert_eq!(state, PageState::Rendered);
        assert_eq!(seen.first(), Some(&(PageState::Refreshing, "Ada".to_string())));
        assert_eq!(seen.last(), Some(&(PageState::Rendered, "Ninety".to_string())));
    }

    #[tokio::test]
    async fn test_run_stops_after_logout() {
        let session = signed_in();
        let gateway = Arc::new(customers_gateway());
        let mut page = PageController::new(
            CustomersView,
            ApiClient::new(gateway.clone()),
            session.clone(),
            MemorySurface::new(),
        );
        page.load().await;

        let events = futures::stream::iter(vec![
            Interaction::click("logout-btn"),
            Interaction::change("customer-period", "90"),
        ]);
        let mut steps = 0;
        let state = page.run(events, |_, _| steps += 1).await;

        assert_eq!(state, PageState::Redirected);
        assert_eq!(steps, 1);
        assert_eq!(gateway.requests().len(), 1);
        assert!(session.current().is_none());
        assert_eq!(page.surface().live_charts("acquisition-chart"), 0);
    }
}
