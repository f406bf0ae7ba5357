//! Wire shapes of the hosted identity service (GoTrue-compatible).

use serde::{Deserialize, Serialize};

use crate::domain::{AccessToken, AuthSession, UserId};

#[derive(Debug, Serialize)]
pub(super) struct PasswordGrantDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Deserialize)]
pub(super) struct TokenResponseDto {
    access_token: String,
    user: UserDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    id: String,
}

impl UserDto {
    pub(super) fn into_user_id(self) -> Result<UserId, String> {
        UserId::new(&self.id).map_err(|err| format!("identity user id {}: {err}", self.id))
    }
}

impl TokenResponseDto {
    pub(super) fn into_session(self) -> Result<AuthSession, String> {
        if self.access_token.is_empty() {
            return Err("token response carried an empty access token".to_owned());
        }
        Ok(AuthSession {
            user_id: self.user.into_user_id()?,
            access_token: AccessToken::new(self.access_token),
        })
    }
}
