//! Reqwest-backed identity provider.
//!
//! Speaks the password-grant subset of a GoTrue-style auth API: every call
//! carries the project `apikey`; token-scoped calls add a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{PasswordGrantDto, TokenResponseDto, UserDto};
use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{AccessToken, AuthSession, LoginCredentials, UserId};

/// Identity provider talking to a hosted auth service.
pub struct HttpIdentityProvider {
    client: Client,
    base: Url,
    api_key: Zeroizing<String>,
}

impl HttpIdentityProvider {
    /// Build a provider for the auth service at `base`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, api_key: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            api_key: Zeroizing::new(api_key),
        })
    }

    fn endpoint(&self, segment: &str) -> Result<Url, IdentityProviderError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| IdentityProviderError::rejected("auth url cannot carry a path"))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    fn authorised(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send(request: RequestBuilder) -> Result<Response, IdentityProviderError> {
        request.send().await.map_err(|error| {
            IdentityProviderError::transport(if error.is_timeout() {
                format!("timeout: {error}")
            } else {
                error.to_string()
            })
        })
    }
}

fn rejection(status: StatusCode) -> IdentityProviderError {
    IdentityProviderError::rejected(format!("status {}", status.as_u16()))
}

fn map_sign_in_status(status: StatusCode) -> IdentityProviderError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY => {
            IdentityProviderError::InvalidCredentials
        }
        _ => rejection(status),
    }
}

fn map_token_status(status: StatusCode) -> IdentityProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => IdentityProviderError::SessionExpired,
        _ => rejection(status),
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthSession, IdentityProviderError> {
        let mut url = self.endpoint("token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        let request = self.authorised(self.client.post(url)).json(&PasswordGrantDto {
            email: credentials.email(),
            password: credentials.password(),
        });
        let response = Self::send(request).await?;
        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "sign-in refused");
            return Err(map_sign_in_status(status));
        }
        let token: TokenResponseDto = response
            .json()
            .await
            .map_err(|err| IdentityProviderError::decode(err.to_string()))?;
        token.into_session().map_err(IdentityProviderError::decode)
    }

    async fn current_user(&self, token: &AccessToken) -> Result<UserId, IdentityProviderError> {
        let url = self.endpoint("user")?;
        let request = self
            .authorised(self.client.get(url))
            .bearer_auth(token.expose());
        let response = Self::send(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(map_token_status(status));
        }
        let user: UserDto = response
            .json()
            .await
            .map_err(|err| IdentityProviderError::decode(err.to_string()))?;
        user.into_user_id().map_err(IdentityProviderError::decode)
    }

    async fn sign_out(&self, token: &AccessToken) -> Result<(), IdentityProviderError> {
        let url = self.endpoint("logout")?;
        let request = self
            .authorised(self.client.post(url))
            .bearer_auth(token.expose());
        let response = Self::send(request).await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(map_token_status(status))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for status mapping and URL building.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(StatusCode::BAD_REQUEST, IdentityProviderError::InvalidCredentials)]
    #[case(StatusCode::UNPROCESSABLE_ENTITY, IdentityProviderError::InvalidCredentials)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, IdentityProviderError::rejected("status 500"))]
    fn sign_in_statuses(#[case] status: StatusCode, #[case] expected: IdentityProviderError) {
        assert_eq!(map_sign_in_status(status), expected);
    }

    #[rstest]
    #[case(StatusCode::UNAUTHORIZED, IdentityProviderError::SessionExpired)]
    #[case(StatusCode::FORBIDDEN, IdentityProviderError::SessionExpired)]
    #[case(StatusCode::BAD_GATEWAY, IdentityProviderError::rejected("status 502"))]
    fn token_statuses(#[case] status: StatusCode, #[case] expected: IdentityProviderError) {
        assert_eq!(map_token_status(status), expected);
    }

    #[rstest]
    #[case("https://auth.example/auth/v1", "https://auth.example/auth/v1/token")]
    #[case("https://auth.example/auth/v1/", "https://auth.example/auth/v1/token")]
    fn endpoints_extend_the_base_path(#[case] base: &str, #[case] expected: &str) {
        let provider = HttpIdentityProvider::new(
            Url::parse(base).expect("url"),
            "anon".to_owned(),
            Duration::from_secs(1),
        )
        .expect("client");
        assert_eq!(provider.endpoint("token").expect("endpoint").as_str(), expected);
    }
}
