//! Owner dashboard handlers: the five slots, handle setup and visibility.
//!
//! ```text
//! GET    /api/v1/me
//! POST   /api/v1/me/profile          {"handle":"cinephile","displayName":"Cine"}
//! PUT    /api/v1/me/favorites/{slot} {"category":"映画","title":"Heat","note":""}
//! DELETE /api/v1/me/favorites/{slot}
//! POST   /api/v1/me/favorites/swap   {"first":2,"second":3}
//! PUT    /api/v1/me/visibility       {"isPublic":true}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::{
    BoardUpdate, CreateProfileRequest, Dashboard, DashboardView, SaveFavoriteRequest,
    SwapFavoritesRequest, VisibilityUpdate,
};
use crate::domain::{Error, Profile, Slot, SlotCell};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Dashboard payload. `handleSetup` is set, and `profile` absent, until the
/// user has picked a handle.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardBody {
    pub handle_setup: bool,
    pub profile: Option<Profile>,
    pub slots: Vec<SlotCell>,
}

impl From<DashboardView> for DashboardBody {
    fn from(view: DashboardView) -> Self {
        match view {
            DashboardView::HandleSetup => Self {
                handle_setup: true,
                profile: None,
                slots: Vec::new(),
            },
            DashboardView::Ready(dashboard) => dashboard.into(),
        }
    }
}

impl From<Dashboard> for DashboardBody {
    fn from(Dashboard { profile, board }: Dashboard) -> Self {
        Self {
            handle_setup: false,
            profile: Some(profile),
            slots: board.cells(),
        }
    }
}

/// Board after a slot mutation.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardBody {
    pub slots: Vec<SlotCell>,
    pub message: String,
}

impl From<BoardUpdate> for BoardBody {
    fn from(update: BoardUpdate) -> Self {
        Self {
            slots: update.board.cells(),
            message: update.message.to_owned(),
        }
    }
}

/// Profile after a visibility change.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityBody {
    pub profile: Profile,
    pub message: String,
}

impl From<VisibilityUpdate> for VisibilityBody {
    fn from(update: VisibilityUpdate) -> Self {
        Self {
            profile: update.profile,
            message: update.message.to_owned(),
        }
    }
}

/// Handle setup payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileBody {
    pub handle: String,
    pub display_name: Option<String>,
}

/// Slot content payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveFavoriteBody {
    #[serde(default)]
    pub category: String,
    pub title: String,
    #[serde(default)]
    pub note: String,
}

/// Swap payload; the slots must be neighbours.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SwapBody {
    pub first: i64,
    pub second: i64,
}

/// Visibility payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityRequestBody {
    pub is_public: bool,
}

pub(crate) fn parse_slot(raw: i64, field: &str) -> Result<Slot, Error> {
    Slot::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": field, "code": "slot_out_of_range" }))
    })
}

/// Load the signed-in user's dashboard.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Dashboard", body = DashboardBody),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "loadDashboard"
)]
#[get("/me")]
pub async fn load_dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardBody>> {
    let user_id = session.require_user_id()?;
    let view = state.dashboard_query.load(&user_id).await?;
    Ok(web::Json(view.into()))
}

/// Pick a handle and create the profile.
#[utoipa::path(
    post,
    path = "/api/v1/me/profile",
    request_body = CreateProfileBody,
    responses(
        (status = 201, description = "Profile created", body = DashboardBody),
        (status = 400, description = "Invalid handle", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 409, description = "Handle taken or profile exists", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "createProfile"
)]
#[post("/me/profile")]
pub async fn create_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateProfileBody>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let CreateProfileBody {
        handle,
        display_name,
    } = payload.into_inner();
    let dashboard = state
        .dashboard
        .create_profile(CreateProfileRequest {
            user_id,
            handle,
            display_name,
        })
        .await?;
    Ok(HttpResponse::Created().json(DashboardBody::from(dashboard)))
}

/// Create or overwrite one slot.
#[utoipa::path(
    put,
    path = "/api/v1/me/favorites/{slot}",
    params(("slot" = i64, Path, description = "Slot number, 1 to 5")),
    request_body = SaveFavoriteBody,
    responses(
        (status = 200, description = "Saved", body = BoardBody),
        (status = 400, description = "Invalid slot or title", body = Error),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "saveFavorite"
)]
#[put("/me/favorites/{slot}")]
pub async fn save_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<SaveFavoriteBody>,
) -> ApiResult<web::Json<BoardBody>> {
    let user_id = session.require_user_id()?;
    let slot = parse_slot(path.into_inner(), "slot")?;
    let SaveFavoriteBody {
        category,
        title,
        note,
    } = payload.into_inner();
    let update = state
        .dashboard
        .save_favorite(SaveFavoriteRequest {
            user_id,
            slot,
            category,
            title,
            note,
        })
        .await?;
    Ok(web::Json(update.into()))
}

/// Empty one slot.
#[utoipa::path(
    delete,
    path = "/api/v1/me/favorites/{slot}",
    params(("slot" = i64, Path, description = "Slot number, 1 to 5")),
    responses(
        (status = 200, description = "Deleted", body = BoardBody),
        (status = 400, description = "Invalid slot", body = Error),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "deleteFavorite"
)]
#[delete("/me/favorites/{slot}")]
pub async fn delete_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<BoardBody>> {
    let user_id = session.require_user_id()?;
    let slot = parse_slot(path.into_inner(), "slot")?;
    let update = state.dashboard.delete_favorite(&user_id, slot).await?;
    Ok(web::Json(update.into()))
}

/// Exchange two neighbouring slots.
#[utoipa::path(
    post,
    path = "/api/v1/me/favorites/swap",
    request_body = SwapBody,
    responses(
        (status = 200, description = "Swapped", body = BoardBody),
        (status = 400, description = "Slots invalid, not adjacent or both empty", body = Error),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "swapFavorites"
)]
#[post("/me/favorites/swap")]
pub async fn swap_favorites(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SwapBody>,
) -> ApiResult<web::Json<BoardBody>> {
    let user_id = session.require_user_id()?;
    let SwapBody { first, second } = payload.into_inner();
    let update = state
        .dashboard
        .swap_favorites(SwapFavoritesRequest {
            user_id,
            first: parse_slot(first, "first")?,
            second: parse_slot(second, "second")?,
        })
        .await?;
    Ok(web::Json(update.into()))
}

/// Publish or hide the profile.
#[utoipa::path(
    put,
    path = "/api/v1/me/visibility",
    request_body = VisibilityRequestBody,
    responses(
        (status = 200, description = "Visibility updated", body = VisibilityBody),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "No profile yet", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "setVisibility"
)]
#[put("/me/visibility")]
pub async fn set_visibility(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<VisibilityRequestBody>,
) -> ApiResult<web::Json<VisibilityBody>> {
    let user_id = session.require_user_id()?;
    let update = state
        .dashboard
        .set_visibility(&user_id, payload.is_public)
        .await?;
    Ok(web::Json(update.into()))
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
