//! Pricing page and checkout.
//!
//! ```text
//! GET  /api/v1/pricing
//! POST /api/v1/checkout {"planId":"pro"}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::PlansView;
use crate::domain::{CheckoutSession, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Checkout request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub plan_id: String,
}

/// Plans on offer.
#[utoipa::path(
    get,
    path = "/api/v1/pricing",
    responses(
        (status = 200, description = "Plans", body = PlansView),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["pricing"],
    operation_id = "listPlans"
)]
#[get("/pricing")]
pub async fn list_plans(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<PlansView>> {
    session.require_user_id()?;
    Ok(web::Json(state.pricing.plans().await))
}

/// Start a hosted checkout and return its URL.
#[utoipa::path(
    post,
    path = "/api/v1/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Checkout session", body = CheckoutSession),
        (status = 400, description = "Blank plan id", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 409, description = "Already on this plan", body = Error),
        (status = 503, description = "Payment backend unavailable", body = Error)
    ),
    tags = ["pricing"],
    operation_id = "checkout"
)]
#[post("/checkout")]
pub async fn checkout(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CheckoutRequest>,
) -> ApiResult<web::Json<CheckoutSession>> {
    let user_id = session.require_user_id()?;
    let plan_id = payload.into_inner().plan_id;
    tracing::debug!(%user_id, plan = %plan_id, "checkout requested");
    let checkout = state.pricing.checkout(&plan_id).await?;
    Ok(web::Json(checkout))
}
