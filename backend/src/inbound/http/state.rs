//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and only see port trait
//! objects, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AnalyticsQuery, DashboardCommand, DashboardQuery, ExploreQuery, IdentityProvider,
    PricingService, PublicProfileQuery,
};

/// Parameter object bundling every port implementation handlers need.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub identity: Arc<dyn IdentityProvider>,
    pub dashboard: Arc<dyn DashboardCommand>,
    pub dashboard_query: Arc<dyn DashboardQuery>,
    pub public_profiles: Arc<dyn PublicProfileQuery>,
    pub analytics: Arc<dyn AnalyticsQuery>,
    pub explore: Arc<dyn ExploreQuery>,
    pub pricing: Arc<dyn PricingService>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub identity: Arc<dyn IdentityProvider>,
    pub dashboard: Arc<dyn DashboardCommand>,
    pub dashboard_query: Arc<dyn DashboardQuery>,
    pub public_profiles: Arc<dyn PublicProfileQuery>,
    pub analytics: Arc<dyn AnalyticsQuery>,
    pub explore: Arc<dyn ExploreQuery>,
    pub pricing: Arc<dyn PricingService>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use my5::domain::ports::{FixtureIdentityProvider, FixtureRankingApi};
    /// use my5::domain::{
    ///     AnalyticsService, DashboardService, ExploreService, PricingCatalogue,
    ///     PublicProfileService,
    /// };
    /// use my5::inbound::http::state::{HttpState, HttpStatePorts};
    /// use my5::outbound::memory::InMemoryStore;
    /// use url::Url;
    ///
    /// let store = Arc::new(InMemoryStore::new(Arc::new(DefaultClock)));
    /// let ranking = Arc::new(FixtureRankingApi);
    /// let base = Url::parse("http://localhost:8080").expect("base url");
    /// let dashboard = Arc::new(DashboardService::new(store.clone(), store.clone()));
    /// let state = HttpState::new(HttpStatePorts {
    ///     identity: Arc::new(FixtureIdentityProvider),
    ///     dashboard: dashboard.clone(),
    ///     dashboard_query: dashboard,
    ///     public_profiles: Arc::new(PublicProfileService::new(store.clone(), store.clone(), base)),
    ///     analytics: Arc::new(AnalyticsService::new(store, ranking.clone(), 4)),
    ///     explore: Arc::new(ExploreService::new(ranking.clone())),
    ///     pricing: Arc::new(PricingCatalogue::new(ranking)),
    /// });
    /// let _identity = state.identity.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            identity,
            dashboard,
            dashboard_query,
            public_profiles,
            analytics,
            explore,
            pricing,
        } = ports;
        Self {
            identity,
            dashboard,
            dashboard_query,
            public_profiles,
            analytics,
            explore,
            pricing,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
