//! Driven port for the remote ranking, search, analysis and billing API.

use async_trait::async_trait;

use crate::domain::{
    CheckoutSession, PlanId, PopularItem, PricingPlan, RankedItem, RankingCategory, SearchHit,
    SearchQuery,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ranking API adapters.
    pub enum RankingApiError {
        /// Network transport failed before a response arrived.
        Transport { message: String } => "ranking api transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } => "ranking api timeout: {message}",
        /// The API throttled the request.
        RateLimited { message: String } => "ranking api rate limited request: {message}",
        /// The API rejected the request as invalid.
        InvalidRequest { message: String } => "ranking api rejected request: {message}",
        /// The response body could not be decoded.
        Decode { message: String } => "ranking api response decode failed: {message}",
    }
}

/// Read-mostly client for the ranking API. Only [`RankingApi::checkout`]
/// has side effects, and those live entirely on the remote side.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RankingApi: Send + Sync {
    /// `GET /rankings`.
    async fn categories(&self) -> Result<Vec<RankingCategory>, RankingApiError>;

    /// `GET /rankings/{id}`.
    async fn category_items(&self, category_id: &str) -> Result<Vec<RankedItem>, RankingApiError>;

    /// `GET /search/movie?q=`; release year of the first match, if any.
    async fn movie_release_year(&self, title: &str) -> Result<Option<i32>, RankingApiError>;

    /// `GET /search/rankings?q=&rank=`.
    async fn search_rankings(&self, query: &SearchQuery)
    -> Result<Vec<SearchHit>, RankingApiError>;

    /// `GET /stats/popular`.
    async fn popular(&self) -> Result<Vec<PopularItem>, RankingApiError>;

    /// `GET /analyze`; empty when the API has nothing to say.
    async fn analysis(&self) -> Result<String, RankingApiError>;

    /// `GET /pricing`.
    async fn pricing_plans(&self) -> Result<Vec<PricingPlan>, RankingApiError>;

    /// `POST /checkout`.
    async fn checkout(&self, plan_id: &PlanId) -> Result<CheckoutSession, RankingApiError>;
}

/// Ranking API stand-in that knows nothing: every list is empty and
/// checkout is refused. Used when no API base URL is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRankingApi;

#[async_trait]
impl RankingApi for FixtureRankingApi {
    async fn categories(&self) -> Result<Vec<RankingCategory>, RankingApiError> {
        Ok(Vec::new())
    }

    async fn category_items(&self, _category_id: &str) -> Result<Vec<RankedItem>, RankingApiError> {
        Ok(Vec::new())
    }

    async fn movie_release_year(&self, _title: &str) -> Result<Option<i32>, RankingApiError> {
        Ok(None)
    }

    async fn search_rankings(
        &self,
        _query: &SearchQuery,
    ) -> Result<Vec<SearchHit>, RankingApiError> {
        Ok(Vec::new())
    }

    async fn popular(&self) -> Result<Vec<PopularItem>, RankingApiError> {
        Ok(Vec::new())
    }

    async fn analysis(&self) -> Result<String, RankingApiError> {
        Ok(String::new())
    }

    async fn pricing_plans(&self) -> Result<Vec<PricingPlan>, RankingApiError> {
        Ok(Vec::new())
    }

    async fn checkout(&self, _plan_id: &PlanId) -> Result<CheckoutSession, RankingApiError> {
        Err(RankingApiError::transport("ranking api is not configured"))
    }
}
