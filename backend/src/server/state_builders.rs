//! Wiring of adapters and services into [`HttpState`].

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use my5::domain::ports::{
    FavoriteRepository, FixtureIdentityProvider, IdentityProvider, ProfileRepository,
};
use my5::domain::{
    AnalyticsService, DashboardService, ExploreService, PricingCatalogue, PublicProfileService,
};
use my5::inbound::http::state::{HttpState, HttpStatePorts};
use my5::outbound::identity::HttpIdentityProvider;
use my5::outbound::memory::InMemoryStore;
use my5::outbound::persistence::{DieselFavoriteRepository, DieselProfileRepository};
use my5::outbound::ranking_api::RankingApiHttpClient;

use super::ServerConfig;

fn io_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

fn build_identity(config: &ServerConfig) -> std::io::Result<Arc<dyn IdentityProvider>> {
    match &config.auth {
        Some(auth) => {
            let provider =
                HttpIdentityProvider::new(auth.url.clone(), auth.api_key.clone(), config.http_timeout)
                    .map_err(|err| io_error("identity client", err))?;
            info!(url = %auth.url, "using hosted identity service");
            Ok(Arc::new(provider))
        }
        None => {
            info!("no identity service configured; fixture sign-in enabled");
            Ok(Arc::new(FixtureIdentityProvider))
        }
    }
}

/// Build every store-backed and ranking-backed port over one pair of
/// repositories.
fn store_ports<P, F>(
    profiles: Arc<P>,
    favorites: Arc<F>,
    ranking: Arc<RankingApiHttpClient>,
    identity: Arc<dyn IdentityProvider>,
    config: &ServerConfig,
) -> HttpStatePorts
where
    P: ProfileRepository + 'static,
    F: FavoriteRepository + 'static,
{
    let dashboard = Arc::new(DashboardService::new(profiles.clone(), favorites.clone()));
    HttpStatePorts {
        identity,
        dashboard: dashboard.clone(),
        dashboard_query: dashboard,
        public_profiles: Arc::new(PublicProfileService::new(
            profiles,
            favorites.clone(),
            config.public_base_url.clone(),
        )),
        analytics: Arc::new(AnalyticsService::new(
            favorites,
            ranking.clone(),
            config.lookup_concurrency,
        )),
        explore: Arc::new(ExploreService::new(ranking.clone())),
        pricing: Arc::new(PricingCatalogue::new(ranking)),
    }
}

/// Assemble handler state, choosing PostgreSQL when a pool is configured and
/// the in-memory store otherwise.
///
/// # Errors
/// Returns [`std::io::Error`] when an outbound HTTP client cannot be built.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let identity = build_identity(config)?;
    let ranking = Arc::new(
        RankingApiHttpClient::new(config.ranking_api_url.clone(), config.http_timeout)
            .map_err(|err| io_error("ranking api client", err))?,
    );
    let ports = match &config.db_pool {
        Some(pool) => store_ports(
            Arc::new(DieselProfileRepository::new(pool.clone())),
            Arc::new(DieselFavoriteRepository::new(pool.clone())),
            ranking,
            identity,
            config,
        ),
        None => {
            info!("no database configured; profiles are kept in memory");
            let store = Arc::new(InMemoryStore::new(Arc::new(DefaultClock)));
            store_ports(store.clone(), store, ranking, identity, config)
        }
    };
    Ok(web::Data::new(HttpState::new(ports)))
}
