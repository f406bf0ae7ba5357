//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`IdentityProvider`], [`RankingApi`]) are
//! implemented by outbound adapters. Driving ports (`*Query`, `*Command`,
//! [`PricingService`]) are called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod analytics_query;
mod dashboard;
mod explore_query;
mod favorite_repository;
mod identity_provider;
mod pricing_service;
mod profile_repository;
mod public_profile_query;
mod ranking_api;

#[cfg(test)]
pub use analytics_query::MockAnalyticsQuery;
pub use analytics_query::{
    AiAnalysis, AnalyticsQuery, AnalyticsReport, AnalyticsStats, CategoryCount, DecadeCount,
    DecadeDistribution, RadarPoint, RankingBreakdown, TimelinePoint,
};
#[cfg(test)]
pub use dashboard::{MockDashboardCommand, MockDashboardQuery};
pub use dashboard::{
    BoardUpdate, CreateProfileRequest, Dashboard, DashboardCommand, DashboardQuery,
    DashboardView, SaveFavoriteRequest, SwapFavoritesRequest, VisibilityUpdate,
};
#[cfg(test)]
pub use explore_query::MockExploreQuery;
pub use explore_query::{ExploreQuery, PopularView, SearchView};
#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
pub use favorite_repository::{FavoriteRepository, FavoriteRepositoryError};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    FIXTURE_EMAIL, FIXTURE_PASSWORD, FIXTURE_USER_ID, FixtureIdentityProvider, IdentityProvider,
    IdentityProviderError,
};
#[cfg(test)]
pub use pricing_service::MockPricingService;
pub use pricing_service::{PlansView, PricingService};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use public_profile_query::MockPublicProfileQuery;
pub use public_profile_query::{PublicProfileQuery, PublicProfileView, ShareLinks};
#[cfg(test)]
pub use ranking_api::MockRankingApi;
pub use ranking_api::{FixtureRankingApi, RankingApi, RankingApiError};
