//! HTTP server configuration object.

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use url::Url;

use my5::outbound::persistence::DbPool;
use my5::settings::AuthServiceSettings;

/// Everything `create_server` needs beyond the health state.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) auth: Option<AuthServiceSettings>,
    pub(crate) ranking_api_url: Url,
    pub(crate) public_base_url: Url,
    pub(crate) http_timeout: Duration,
    pub(crate) lookup_concurrency: usize,
}

impl ServerConfig {
    /// Session and listener settings; outbound services start from defaults.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        ranking_api_url: Url,
        public_base_url: Url,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            auth: None,
            ranking_api_url,
            public_base_url,
            http_timeout: Duration::from_secs(10),
            lookup_concurrency: 4,
        }
    }

    /// Persist profiles and favourites in PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Authenticate against the hosted identity service instead of the fixture.
    #[must_use]
    pub fn with_auth_service(mut self, auth: Option<AuthServiceSettings>) -> Self {
        self.auth = auth;
        self
    }

    /// Outbound HTTP timeout and analytics fan-out.
    #[must_use]
    pub fn with_outbound_limits(mut self, http_timeout: Duration, lookup_concurrency: usize) -> Self {
        self.http_timeout = http_timeout;
        self.lookup_concurrency = lookup_concurrency;
        self
    }
}
