//! Cross-user exploration.
//!
//! ```text
//! GET /api/v1/explore/popular
//! GET /api/v1/explore/search?q=heat&rank=1
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::Error;
use crate::domain::ports::{PopularView, SearchView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dashboard::parse_slot;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Search parameters.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Title text; must not be blank.
    #[serde(default)]
    pub q: String,
    /// Restrict to favourites at this rank, 1 to 5.
    pub rank: Option<i64>,
}

/// Items most often listed across users.
#[utoipa::path(
    get,
    path = "/api/v1/explore/popular",
    responses(
        (status = 200, description = "Popular items", body = PopularView),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["explore"],
    operation_id = "getPopular"
)]
#[get("/explore/popular")]
pub async fn explore_popular(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<PopularView>> {
    session.require_user_id()?;
    Ok(web::Json(state.explore.popular().await))
}

/// Search everyone's favourites by title.
#[utoipa::path(
    get,
    path = "/api/v1/explore/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Search results", body = SearchView),
        (status = 400, description = "Blank query or rank out of range", body = Error),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["explore"],
    operation_id = "searchFavorites"
)]
#[get("/explore/search")]
pub async fn explore_search(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<SearchView>> {
    session.require_user_id()?;
    let SearchParams { q, rank } = params.into_inner();
    let rank = rank.map(|raw| parse_slot(raw, "rank")).transpose()?;
    let view = state.explore.search(&q, rank).await?;
    Ok(web::Json(view))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::{PopularItem, SearchHit};
    use crate::inbound::http::test_utils::{MockPorts, login_cookie, test_app};

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(explore_popular).service(explore_search);
    }

    #[actix_web::test]
    async fn popular_passes_degraded_flag() {
        let mut ports = MockPorts::default();
        ports.explore.expect_popular().return_once(|| PopularView {
            items: Vec::new(),
            degraded: true,
        });
        let app = test::init_service(test_app(ports, routes)).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/explore/popular")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let value: Value = test::read_body_json(res).await;
        assert_eq!(value["degraded"], true);
        assert_eq!(value["items"], Value::Array(Vec::new()));
    }

    #[actix_web::test]
    async fn popular_lists_items() {
        let mut ports = MockPorts::default();
        ports.explore.expect_popular().return_once(|| PopularView {
            items: vec![PopularItem {
                rank: 1,
                title: "Heat".to_owned(),
                category: "映画".to_owned(),
                count: 7,
            }],
            degraded: false,
        });
        let app = test::init_service(test_app(ports, routes)).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/explore/popular")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        let value: Value = test::read_body_json(res).await;
        assert_eq!(value["items"][0]["title"], "Heat");
        assert_eq!(value["items"][0]["count"], 7);
    }

    #[rstest]
    #[case("/api/v1/explore/search?q=heat&rank=0")]
    #[case("/api/v1/explore/search?q=heat&rank=6")]
    #[actix_web::test]
    async fn search_rejects_rank_outside_board(#[case] uri: &str) {
        let mut ports = MockPorts::default();
        ports.explore.expect_search().times(0);
        let app = test::init_service(test_app(ports, routes)).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri(uri).cookie(cookie).to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let value: Value = test::read_body_json(res).await;
        assert_eq!(value["details"]["field"], "rank");
        assert_eq!(value["details"]["code"], "slot_out_of_range");
    }

    #[actix_web::test]
    async fn search_forwards_text_and_rank() {
        let mut ports = MockPorts::default();
        ports
            .explore
            .expect_search()
            .withf(|text, rank| text == "heat" && rank.map(|slot| slot.get()) == Some(2))
            .times(1)
            .return_once(|_, _| {
                Ok(SearchView {
                    results: vec![SearchHit {
                        title: "Heat".to_owned(),
                        rank: 2,
                        category: "映画".to_owned(),
                        handle: "cinephile".to_owned(),
                        display_name: None,
                        created_at: None,
                    }],
                    degraded: false,
                })
            });
        let app = test::init_service(test_app(ports, routes)).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/explore/search?q=heat&rank=2")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let value: Value = test::read_body_json(res).await;
        assert_eq!(value["results"][0]["handle"], "cinephile");
    }

    #[actix_web::test]
    async fn blank_query_error_passes_through() {
        let mut ports = MockPorts::default();
        ports
            .explore
            .expect_search()
            .return_once(|_, _| Err(Error::invalid_request("search query must not be empty")));
        let app = test::init_service(test_app(ports, routes)).await;
        let cookie = login_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/explore/search")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn search_requires_login() {
        let mut ports = MockPorts::default();
        ports.explore.expect_search().times(0);
        let app = test::init_service(test_app(ports, routes)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/explore/search?q=heat")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
