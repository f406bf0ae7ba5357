//! Sign-in, sign-out and session introspection.
//!
//! ```text
//! POST /api/v1/login {"email":"demo@my5.invalid","password":"password"}
//! POST /api/v1/logout
//! GET  /api/v1/session
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::domain::ports::IdentityProviderError;
use crate::domain::{Error, LoginCredentials, LoginValidationError, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Where clients go after signing out.
pub const LOGIN_PATH: &str = "/login";

/// Login request body.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Identity of the signed-in user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[schema(value_type = String, format = Uuid)]
    pub user_id: UserId,
}

/// Where to navigate after logout.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub redirect: String,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let (field, code) = match &err {
        LoginValidationError::EmptyEmail => ("email", "empty_email"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn map_identity_error(err: IdentityProviderError) -> Error {
    match err {
        IdentityProviderError::InvalidCredentials => Error::unauthorized("invalid credentials"),
        IdentityProviderError::SessionExpired => Error::unauthorized("session expired"),
        other => {
            warn!(error = %other, "identity service call failed");
            Error::service_unavailable("identity service unavailable")
        }
    }
}

/// Sign in through the identity service and establish a session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Identity service unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<SessionResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let auth = state
        .identity
        .sign_in(&credentials)
        .await
        .map_err(map_identity_error)?;
    session.persist(&auth)?;
    info!(user_id = %auth.user_id, "signed in");
    Ok(web::Json(SessionResponse {
        user_id: auth.user_id,
    }))
}

/// Revoke the access token (best effort) and clear the session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 200, description = "Logged out", body = LogoutResponse),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<LogoutResponse>> {
    let user_id = session.require_user_id()?;
    if let Some(token) = session.access_token()? {
        if let Err(error) = state.identity.sign_out(&token).await {
            warn!(%user_id, %error, "token revocation failed; clearing session anyway");
        }
    }
    session.purge();
    info!(%user_id, "signed out");
    Ok(web::Json(LogoutResponse {
        redirect: LOGIN_PATH.to_owned(),
    }))
}

/// Current identity. An access token the identity service no longer
/// accepts ends the session.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Signed in", body = SessionResponse),
        (status = 401, description = "Not signed in or session expired", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentSession"
)]
#[get("/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let Some(token) = session.access_token()? else {
        return Ok(HttpResponse::Ok().json(SessionResponse { user_id }));
    };
    match state.identity.current_user(&token).await {
        Ok(remote) if remote == user_id => Ok(HttpResponse::Ok().json(SessionResponse { user_id })),
        Ok(remote) => {
            warn!(%user_id, %remote, "token belongs to another account");
            session.purge();
            Err(Error::unauthorized("session expired"))
        }
        Err(IdentityProviderError::SessionExpired) => {
            session.purge();
            Err(Error::unauthorized("session expired"))
        }
        Err(error) => {
            warn!(%user_id, %error, "could not verify token; trusting session cookie");
            Ok(HttpResponse::Ok().json(SessionResponse { user_id }))
        }
    }
}
