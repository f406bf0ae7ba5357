//! Analytics over the signed-in user's favourites.
//!
//! ```text
//! GET /api/v1/analytics
//! GET /api/v1/analytics/ai
//! ```

use actix_web::{get, web};

use crate::domain::Error;
use crate::domain::ports::{AiAnalysis, AnalyticsReport};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Charts and headline numbers. Remote failures set `degraded` instead of
/// failing the request.
#[utoipa::path(
    get,
    path = "/api/v1/analytics",
    responses(
        (status = 200, description = "Analytics report", body = AnalyticsReport),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["analytics"],
    operation_id = "getAnalytics"
)]
#[get("/analytics")]
pub async fn analytics_overview(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AnalyticsReport>> {
    let user_id = session.require_user_id()?;
    let report = state.analytics.overview(&user_id).await?;
    Ok(web::Json(report))
}

/// AI commentary; never fails once signed in.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/ai",
    responses(
        (status = 200, description = "Commentary or fallback text", body = AiAnalysis),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["analytics"],
    operation_id = "getAiAnalysis"
)]
#[get("/analytics/ai")]
pub async fn analytics_ai(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AiAnalysis>> {
    session.require_user_id()?;
    Ok(web::Json(state.analytics.ai_analysis().await))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{AnalyticsStats, CategoryCount, DecadeDistribution};
    use crate::inbound::http::test_utils::{MockPorts, login_cookie, test_app};

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(analytics_overview).service(analytics_ai);
    }

    fn degraded_report() -> AnalyticsReport {
        let categories = vec![CategoryCount {
            category: "映画".to_owned(),
            count: 2,
        }];
        AnalyticsReport {
            pie: categories.clone(),
            categories,
            timeline: Vec::new(),
            rankings: Vec::new(),
            radar: Vec::new(),
            decades: DecadeDistribution::default(),
            stats: AnalyticsStats {
                total_items: 2,
                category_count: 1,
                favorite_count: 2,
            },
            degraded: true,
        }
    }

    #[actix_web::test]
    async fn overview_requires_login() {
        let mut ports = MockPorts::default();
        ports.analytics.expect_overview().times(0);
        let app = test::init_service(test_app(ports, routes)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/analytics").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn overview_serialises_degraded_report() {
        let mut ports = MockPorts::default();
        ports
            .analytics
            .expect_overview()
            .times(1)
            .return_once(|_| Ok(degraded_report()));
        let app = test::init_service(test_app(ports, routes)).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/analytics")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let value: Value = test::read_body_json(res).await;
        assert_eq!(value["degraded"], true);
        assert_eq!(value["categories"][0]["category"], "映画");
        assert_eq!(value["stats"]["favoriteCount"], 2);
        assert_eq!(value["decades"]["failedLookups"], 0);
    }

    #[actix_web::test]
    async fn store_failure_surfaces() {
        let mut ports = MockPorts::default();
        ports
            .analytics
            .expect_overview()
            .return_once(|_| Err(Error::service_unavailable("store unavailable")));
        let app = test::init_service(test_app(ports, routes)).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/analytics")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn ai_fallback_is_still_ok() {
        let mut ports = MockPorts::default();
        ports.analytics.expect_ai_analysis().return_once(|| AiAnalysis {
            text: "分析の取得に失敗しました。".to_owned(),
            available: false,
        });
        let app = test::init_service(test_app(ports, routes)).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/analytics/ai")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let value: Value = test::read_body_json(res).await;
        assert_eq!(value["available"], false);
    }
}
