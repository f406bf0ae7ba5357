//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `MY5_*` environment variables and an optional
//! configuration file, in that order of precedence.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_RANKING_API_URL: &str = "https://my-ranking-api.hiroshinagano0113.workers.dev";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";

/// Errors raised when a setting is present but unusable.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A value failed to parse.
    #[error("invalid {field} '{value}': {reason}")]
    Invalid {
        field: &'static str,
        value: String,
        reason: String,
    },
    /// Identity URL configured without an API key.
    #[error("MY5_AUTH_URL is set but MY5_AUTH_API_KEY is missing")]
    MissingAuthApiKey,
}

/// Identity service location and credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthServiceSettings {
    pub url: Url,
    pub api_key: String,
}

/// Top-level service configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MY5")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Base URL of the ranking API.
    pub ranking_api_url: Option<String>,
    /// Base URL of the identity service; fixture sign-in when absent.
    pub auth_url: Option<String>,
    /// API key sent to the identity service.
    pub auth_api_key: Option<String>,
    /// Origin used to build share links for public profiles.
    pub public_base_url: Option<String>,
    /// Timeout for outbound HTTP calls, in seconds.
    #[ortho_config(default = 10)]
    pub http_timeout_secs: u64,
    /// Concurrent film lookups during analytics.
    #[ortho_config(default = 4)]
    pub lookup_concurrency: usize,
}

impl AppSettings {
    /// Bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::Invalid {
            field: "bind_addr",
            value: raw.to_owned(),
            reason: err.to_string(),
        })
    }

    /// Ranking API base URL.
    pub fn ranking_api_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "ranking_api_url",
            self.ranking_api_url
                .as_deref()
                .unwrap_or(DEFAULT_RANKING_API_URL),
        )
    }

    /// Public origin for share links.
    pub fn public_base_url(&self) -> Result<Url, SettingsError> {
        parse_url(
            "public_base_url",
            self.public_base_url
                .as_deref()
                .unwrap_or(DEFAULT_PUBLIC_BASE_URL),
        )
    }

    /// Identity service settings, or `None` to use fixture sign-in.
    pub fn auth_service(&self) -> Result<Option<AuthServiceSettings>, SettingsError> {
        let Some(raw) = self.auth_url.as_deref() else {
            return Ok(None);
        };
        let api_key = self
            .auth_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(SettingsError::MissingAuthApiKey)?;
        Ok(Some(AuthServiceSettings {
            url: parse_url("auth_url", raw)?,
            api_key,
        }))
    }

    /// Outbound HTTP timeout.
    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }

    /// Film lookup fan-out, at least one.
    #[must_use]
    pub fn lookup_concurrency(&self) -> usize {
        self.lookup_concurrency.max(1)
    }
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, SettingsError> {
    Url::parse(raw).map_err(|err| SettingsError::Invalid {
        field,
        value: raw.to_owned(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 8] = [
        "MY5_BIND_ADDR",
        "MY5_DATABASE_URL",
        "MY5_RANKING_API_URL",
        "MY5_AUTH_URL",
        "MY5_AUTH_API_KEY",
        "MY5_PUBLIC_BASE_URL",
        "MY5_HTTP_TIMEOUT_SECS",
        "MY5_LOOKUP_CONCURRENCY",
    ];

    fn load() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("my5")]).expect("settings should load")
    }

    fn cleared_except(
        overrides: &[(&'static str, &str)],
    ) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(cleared_except(&[]));

        let settings = load();

        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("addr")
        );
        assert!(settings.database_url.is_none());
        assert_eq!(
            settings.ranking_api_url().expect("url").as_str(),
            "https://my-ranking-api.hiroshinagano0113.workers.dev/"
        );
        assert!(settings.auth_service().expect("auth").is_none());
        assert_eq!(settings.http_timeout(), Duration::from_secs(10));
        assert_eq!(settings.lookup_concurrency(), 4);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(cleared_except(&[
            ("MY5_BIND_ADDR", "127.0.0.1:9000"),
            ("MY5_DATABASE_URL", "postgres://localhost/my5"),
            ("MY5_AUTH_URL", "https://auth.example/auth/v1"),
            ("MY5_AUTH_API_KEY", "anon-key"),
            ("MY5_HTTP_TIMEOUT_SECS", "3"),
            ("MY5_LOOKUP_CONCURRENCY", "8"),
        ]));

        let settings = load();

        assert_eq!(settings.bind_addr().expect("addr").port(), 9000);
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/my5")
        );
        let auth = settings.auth_service().expect("auth").expect("configured");
        assert_eq!(auth.api_key, "anon-key");
        assert_eq!(auth.url.host_str(), Some("auth.example"));
        assert_eq!(settings.http_timeout(), Duration::from_secs(3));
        assert_eq!(settings.lookup_concurrency(), 8);
    }

    #[rstest]
    fn auth_url_without_key_is_rejected() {
        let _guard = lock_env(cleared_except(&[("MY5_AUTH_URL", "https://auth.example")]));

        let err = load().auth_service().expect_err("key required");

        assert!(matches!(err, SettingsError::MissingAuthApiKey));
    }

    #[rstest]
    #[case("MY5_BIND_ADDR", "not-an-addr")]
    #[case("MY5_PUBLIC_BASE_URL", "::nope")]
    fn malformed_values_are_reported(#[case] name: &'static str, #[case] value: &str) {
        let _guard = lock_env(cleared_except(&[(name, value)]));
        let settings = load();

        let failed = if name == "MY5_BIND_ADDR" {
            settings.bind_addr().is_err()
        } else {
            settings.public_base_url().is_err()
        };

        assert!(failed);
    }
}
