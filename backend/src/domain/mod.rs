//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities for profiles and their five
//! favourite slots, the ports the services depend on, and the services
//! the inbound adapters call. Types validate on construction; document
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: API error payload and stable identifier.
//! - [`Handle`], [`Profile`], [`Slot`], [`Favorite`], [`SlotBoard`]: the
//!   profile aggregate and its slots.
//! - `*Service` types implementing the driving ports in [`ports`].

pub mod analytics_service;
pub mod auth;
pub mod dashboard_service;
pub mod error;
pub mod explore_service;
pub mod favorite;
pub mod ports;
pub mod pricing_catalogue;
pub mod profile;
pub mod public_profile_service;
pub mod ranking;
pub mod slot_board;
pub mod trace_id;
pub mod user;

pub use self::analytics_service::AnalyticsService;
pub use self::auth::{AccessToken, AuthSession, LoginCredentials, LoginValidationError};
pub use self::dashboard_service::{
    DELETED_MESSAGE, DashboardService, HANDLE_TAKEN_MESSAGE, HIDDEN_MESSAGE, PUBLISHED_MESSAGE,
    SAVED_MESSAGE, SWAPPED_MESSAGE,
};
pub use self::error::{Error, ErrorCode};
pub use self::explore_service::ExploreService;
pub use self::favorite::{
    Favorite, FavoriteDraft, FavoriteValidationError, SLOT_COUNT, Slot, SlotPair,
};
pub use self::pricing_catalogue::PricingCatalogue;
pub use self::profile::{HANDLE_RULE_MESSAGE, Handle, HandleValidationError, NewProfile, Profile};
pub use self::public_profile_service::{PublicProfileService, share_links};
pub use self::ranking::{
    CheckoutSession, PlanId, PlanIdValidationError, PopularItem, PricingPlan, RankedItem,
    RankingCategory, SearchHit, SearchQuery, SearchQueryError,
};
pub use self::slot_board::{SlotBoard, SlotCell};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserIdValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use my5::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
