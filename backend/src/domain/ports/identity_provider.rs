//! Driven port for the hosted identity service that issues sessions.

use async_trait::async_trait;

use crate::domain::{AccessToken, AuthSession, LoginCredentials, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity service adapters.
    pub enum IdentityProviderError {
        /// Email/password pair was rejected.
        InvalidCredentials => "invalid credentials",
        /// The access token is expired or revoked.
        SessionExpired => "session expired",
        /// Network transport failed or timed out.
        Transport { message: String } => "identity service unreachable: {message}",
        /// The service answered with an unexpected status.
        Rejected { message: String } => "identity service rejected the request: {message}",
        /// The response body could not be decoded.
        Decode { message: String } => "identity service response decode failed: {message}",
    }
}

/// Sign-in, token introspection and sign-out against the identity service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange credentials for a session.
    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthSession, IdentityProviderError>;

    /// Resolve the account behind `token`.
    async fn current_user(&self, token: &AccessToken) -> Result<UserId, IdentityProviderError>;

    /// Revoke `token`.
    async fn sign_out(&self, token: &AccessToken) -> Result<(), IdentityProviderError>;
}

/// Email accepted by [`FixtureIdentityProvider`].
pub const FIXTURE_EMAIL: &str = "demo@my5.invalid";
/// Password accepted by [`FixtureIdentityProvider`].
pub const FIXTURE_PASSWORD: &str = "password";
/// Account id issued by [`FixtureIdentityProvider`].
pub const FIXTURE_USER_ID: &str = "123e4567-e89b-12d3-a456-426614174000";
const FIXTURE_TOKEN: &str = "fixture-access-token";

/// Offline identity provider used when no identity service is configured.
///
/// Accepts exactly [`FIXTURE_EMAIL`] / [`FIXTURE_PASSWORD`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

impl FixtureIdentityProvider {
    fn user_id() -> Result<UserId, IdentityProviderError> {
        UserId::new(FIXTURE_USER_ID)
            .map_err(|err| IdentityProviderError::decode(format!("invalid fixture user id: {err}")))
    }
}

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthSession, IdentityProviderError> {
        if credentials.email() == FIXTURE_EMAIL && credentials.password() == FIXTURE_PASSWORD {
            Ok(AuthSession {
                user_id: Self::user_id()?,
                access_token: AccessToken::new(FIXTURE_TOKEN),
            })
        } else {
            Err(IdentityProviderError::InvalidCredentials)
        }
    }

    async fn current_user(&self, token: &AccessToken) -> Result<UserId, IdentityProviderError> {
        if token.expose() == FIXTURE_TOKEN {
            Self::user_id()
        } else {
            Err(IdentityProviderError::SessionExpired)
        }
    }

    async fn sign_out(&self, _token: &AccessToken) -> Result<(), IdentityProviderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FIXTURE_EMAIL, FIXTURE_PASSWORD, true)]
    #[case(FIXTURE_EMAIL, "wrong", false)]
    #[case("other@my5.invalid", FIXTURE_PASSWORD, false)]
    #[tokio::test]
    async fn fixture_accepts_only_demo_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let creds = LoginCredentials::try_from_parts(email, password).expect("credentials shape");
        let result = FixtureIdentityProvider.sign_in(&creds).await;
        match (should_succeed, result) {
            (true, Ok(session)) => assert_eq!(session.user_id.to_string(), FIXTURE_USER_ID),
            (false, Err(err)) => assert_eq!(err, IdentityProviderError::InvalidCredentials),
            (true, Err(err)) => panic!("expected success, got error: {err:?}"),
            (false, Ok(session)) => panic!("expected failure, got session: {session:?}"),
        }
    }

    #[tokio::test]
    async fn fixture_token_round_trips() {
        let creds =
            LoginCredentials::try_from_parts(FIXTURE_EMAIL, FIXTURE_PASSWORD).expect("creds");
        let session = FixtureIdentityProvider.sign_in(&creds).await.expect("sign in");
        let user = FixtureIdentityProvider
            .current_user(&session.access_token)
            .await
            .expect("token valid");
        assert_eq!(user, session.user_id);

        let stale = FixtureIdentityProvider
            .current_user(&AccessToken::new("stale"))
            .await
            .expect_err("unknown token");
        assert_eq!(stale, IdentityProviderError::SessionExpired);
    }
}
