//! OpenAPI document for the JSON API.
//!
//! Served by Swagger UI in debug builds and printed by
//! `cargo run --bin openapi-dump`. The `/u/{handle}` HTML page is not part of
//! the document.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{
    AiAnalysis, AnalyticsReport, AnalyticsStats, CategoryCount, DecadeCount, DecadeDistribution,
    PlansView, PopularView, RadarPoint, RankingBreakdown, SearchView, TimelinePoint,
};
use crate::domain::{
    CheckoutSession, Error, ErrorCode, Favorite, Handle, PopularItem, PricingPlan, Profile,
    RankedItem, RankingCategory, SearchHit, Slot, SlotCell,
};
use crate::inbound::http::auth::{LoginRequest, LogoutResponse, SessionResponse};
use crate::inbound::http::dashboard::{
    BoardBody, CreateProfileBody, DashboardBody, SaveFavoriteBody, SwapBody, VisibilityBody,
    VisibilityRequestBody,
};
use crate::inbound::http::pricing::CheckoutRequest;
use crate::inbound::http::public_profile::{PublicProfileBody, ShareLinksBody};

/// Registers the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the MY5 API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "MY5 API",
        description = "Five favourite slots per user, public profiles, and ranking-backed views."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::dashboard::load_dashboard,
        crate::inbound::http::dashboard::create_profile,
        crate::inbound::http::dashboard::save_favorite,
        crate::inbound::http::dashboard::delete_favorite,
        crate::inbound::http::dashboard::swap_favorites,
        crate::inbound::http::dashboard::set_visibility,
        crate::inbound::http::public_profile::public_profile_json,
        crate::inbound::http::analytics::analytics_overview,
        crate::inbound::http::analytics::analytics_ai,
        crate::inbound::http::explore::explore_popular,
        crate::inbound::http::explore::explore_search,
        crate::inbound::http::pricing::list_plans,
        crate::inbound::http::pricing::checkout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Handle,
        Profile,
        Slot,
        Favorite,
        SlotCell,
        RankingCategory,
        RankedItem,
        SearchHit,
        PopularItem,
        PricingPlan,
        CheckoutSession,
        CategoryCount,
        TimelinePoint,
        RankingBreakdown,
        RadarPoint,
        DecadeCount,
        DecadeDistribution,
        AnalyticsStats,
        AnalyticsReport,
        AiAnalysis,
        PopularView,
        SearchView,
        PlansView,
        LoginRequest,
        SessionResponse,
        LogoutResponse,
        DashboardBody,
        BoardBody,
        VisibilityBody,
        CreateProfileBody,
        SaveFavoriteBody,
        SwapBody,
        VisibilityRequestBody,
        PublicProfileBody,
        ShareLinksBody,
        CheckoutRequest,
    )),
    tags(
        (name = "auth", description = "Sign-in and session"),
        (name = "dashboard", description = "The signed-in user's five slots"),
        (name = "profiles", description = "Public profiles"),
        (name = "analytics", description = "Charts over the user's favourites"),
        (name = "explore", description = "Popular items and cross-user search"),
        (name = "pricing", description = "Plans and checkout"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn object_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            Some(_) => panic!("{name} is not an inline object schema"),
            None => panic!("{name} is missing from the components"),
        }
    }

    #[rstest]
    #[case("Error", &["code", "message", "traceId", "details"])]
    #[case("Profile", &["handle", "displayName", "isPublic"])]
    #[case("SlotCell", &["slot", "favorite", "canSwapUp", "canSwapDown"])]
    #[case("DecadeDistribution", &["buckets", "failedLookups"])]
    fn schemas_use_wire_field_names(#[case] schema: &str, #[case] fields: &[&str]) {
        let actual = object_fields(schema);
        for field in fields {
            assert!(
                actual.iter().any(|name| name == field),
                "{schema} should expose {field}, has {actual:?}"
            );
        }
    }

    #[rstest]
    #[case("/api/v1/login")]
    #[case("/api/v1/me")]
    #[case("/api/v1/me/favorites/{slot}")]
    #[case("/api/v1/me/favorites/swap")]
    #[case("/api/v1/profiles/{handle}")]
    #[case("/api/v1/analytics")]
    #[case("/api/v1/explore/search")]
    #[case("/api/v1/checkout")]
    #[case("/health/ready")]
    fn document_lists_endpoint(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[test]
    fn favorite_schema_hides_owner() {
        let fields = object_fields("Favorite");
        assert!(!fields.iter().any(|name| name == "userId"));
    }

    #[test]
    fn session_cookie_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
