//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};

use crate::domain::ports::{
    AnalyticsQuery, DashboardCommand, DashboardQuery, ExploreQuery, FixtureIdentityProvider,
    IdentityProvider, MockAnalyticsQuery, MockDashboardCommand, MockDashboardQuery,
    MockExploreQuery, MockPricingService, MockPublicProfileQuery, PricingService,
    PublicProfileQuery,
};
use crate::domain::ports::{FIXTURE_EMAIL, FIXTURE_PASSWORD};
use crate::inbound::http::auth::{LoginRequest, login};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Name of the session cookie in tests.
pub const SESSION_COOKIE: &str = "session";

/// Session middleware with a fresh key and `Secure` disabled for plain HTTP.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie set on `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// App with `state`, cookie sessions and the login route under `/api/v1`,
/// plus whatever `routes` registers in the same scope.
pub fn test_app<F>(
    ports: MockPorts,
    routes: F,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    F: FnOnce(&mut web::ServiceConfig),
{
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").service(login).configure(routes))
}

/// Sign in with the fixture credentials and return the session cookie.
///
/// # Panics
/// Panics when the login route rejects the fixture credentials.
pub async fn login_cookie(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    >,
) -> Cookie<'static> {
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(LoginRequest {
            email: FIXTURE_EMAIL.to_owned(),
            password: FIXTURE_PASSWORD.to_owned(),
        })
        .to_request();
    let response = test::call_service(app, request).await;
    assert!(response.status().is_success(), "fixture login failed");
    session_cookie(&response).expect("session cookie")
}

/// Mocks for every driving port; unset expectations panic when called.
pub struct MockPorts {
    pub identity: Arc<dyn IdentityProvider>,
    pub dashboard: MockDashboardCommand,
    pub dashboard_query: MockDashboardQuery,
    pub public_profiles: MockPublicProfileQuery,
    pub analytics: MockAnalyticsQuery,
    pub explore: MockExploreQuery,
    pub pricing: MockPricingService,
}

impl Default for MockPorts {
    fn default() -> Self {
        Self {
            identity: Arc::new(FixtureIdentityProvider),
            dashboard: MockDashboardCommand::new(),
            dashboard_query: MockDashboardQuery::new(),
            public_profiles: MockPublicProfileQuery::new(),
            analytics: MockAnalyticsQuery::new(),
            explore: MockExploreQuery::new(),
            pricing: MockPricingService::new(),
        }
    }
}

impl MockPorts {
    /// Freeze the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        let dashboard: Arc<dyn DashboardCommand> = Arc::new(self.dashboard);
        let dashboard_query: Arc<dyn DashboardQuery> = Arc::new(self.dashboard_query);
        let public_profiles: Arc<dyn PublicProfileQuery> = Arc::new(self.public_profiles);
        let analytics: Arc<dyn AnalyticsQuery> = Arc::new(self.analytics);
        let explore: Arc<dyn ExploreQuery> = Arc::new(self.explore);
        let pricing: Arc<dyn PricingService> = Arc::new(self.pricing);
        HttpState::new(HttpStatePorts {
            identity: self.identity,
            dashboard,
            dashboard_query,
            public_profiles,
            analytics,
            explore,
            pricing,
        })
    }
}
