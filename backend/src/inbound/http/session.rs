//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie carries the authenticated user id and the identity-service
//! access token. Handlers only see domain types.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{AccessToken, AuthSession, Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const ACCESS_TOKEN_KEY: &str = "access_token";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store a freshly issued sign-in session, replacing any previous one.
    pub fn persist(&self, auth: &AuthSession) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, auth.user_id.to_string())
            .and_then(|()| self.0.insert(ACCESS_TOKEN_KEY, auth.access_token.expose()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id, if present and well formed.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| match UserId::new(&raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                None
            }
        }))
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Access token stored at sign-in, if any.
    pub fn access_token(&self) -> Result<Option<AccessToken>, Error> {
        let raw = self
            .0
            .get::<String>(ACCESS_TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.map(AccessToken::new))
    }

    /// Drop every session value and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
