//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use my5::Trace;
#[cfg(debug_assertions)]
use my5::doc::ApiDoc;
use my5::inbound::http::analytics::{analytics_ai, analytics_overview};
use my5::inbound::http::auth::{current_session, login, logout};
use my5::inbound::http::dashboard::{
    create_profile, delete_favorite, load_dashboard, save_favorite, set_visibility,
    swap_favorites,
};
use my5::inbound::http::explore::{explore_popular, explore_search};
use my5::inbound::http::health::{HealthState, live, ready};
use my5::inbound::http::pricing::{checkout, list_plans};
use my5::inbound::http::public_profile::{public_profile_json, public_profile_page};
use my5::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn session_middleware(
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build()
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let api = web::scope("/api/v1")
        .wrap(session_middleware(key, cookie_secure, same_site))
        .service(login)
        .service(logout)
        .service(current_session)
        .service(load_dashboard)
        .service(create_profile)
        .service(swap_favorites)
        .service(save_favorite)
        .service(delete_favorite)
        .service(set_visibility)
        .service(public_profile_json)
        .service(analytics_overview)
        .service(analytics_ai)
        .service(explore_popular)
        .service(explore_search)
        .service(list_plans)
        .service(checkout);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(public_profile_page)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server and mark the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when an outbound client cannot be built or
/// the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config)?;
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        ..
    } = config;

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
