//! Session cookie settings read from the environment.
//!
//! Debug builds fall back to development defaults with a warning; release
//! builds refuse to start unless every toggle is present and valid.
//!
//! | Variable | Values | Debug default |
//! | --- | --- | --- |
//! | `MY5_SESSION_KEY_FILE` | path | `/var/run/secrets/session_key` |
//! | `MY5_SESSION_COOKIE_SECURE` | `1`/`0` | `1` |
//! | `MY5_SESSION_SAMESITE` | `Strict`/`Lax`/`None` | `Lax` |
//! | `MY5_SESSION_ALLOW_EPHEMERAL` | `1`/`0` | `0` |

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
/// `Key::derive_from` panics below this many bytes.
const KEY_DERIVE_MIN_LEN: usize = 32;
const KEY_FILE_ENV: &str = "MY5_SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "MY5_SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "MY5_SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "MY5_SESSION_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Which validation regime applies.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Missing or malformed toggles fall back to defaults.
    Debug,
    /// Every toggle must be present and valid.
    Release,
}

impl BuildMode {
    /// Mode matching `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use my5::inbound::http::session_config::BuildMode;
    ///
    /// let expected = if cfg!(debug_assertions) { BuildMode::Debug } else { BuildMode::Release };
    /// assert_eq!(BuildMode::from_debug_assertions(), expected);
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated cookie settings.
pub struct SessionSettings {
    /// Key used to encrypt and sign the session cookie.
    pub key: Key,
    /// Whether the cookie carries `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy.
    pub same_site: SameSite,
}

/// Reasons session settings were rejected.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// Required variable unset.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// Variable set to an unparsable value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Key file unreadable and no ephemeral fallback allowed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Key file shorter than the release minimum.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` without `Secure` in a release build.
    #[error("MY5_SESSION_SAMESITE=None requires MY5_SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    /// Ephemeral keys requested in a release build.
    #[error("MY5_SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Read and validate session settings.
///
/// # Examples
///
/// ```rust
/// use my5::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("my5_session_key_example");
/// std::fs::write(&key_path, vec![b'k'; 64])?;
/// let key_path = key_path.to_string_lossy().into_owned();
///
/// let mut env = MockEnv::new();
/// let path = key_path.clone();
/// env.expect_string().returning(move |name| match name {
///     "MY5_SESSION_KEY_FILE" => Some(path.clone()),
///     "MY5_SESSION_COOKIE_SECURE" => Some("1".to_owned()),
///     "MY5_SESSION_SAMESITE" => Some("Strict".to_owned()),
///     "MY5_SESSION_ALLOW_EPHEMERAL" => Some("0".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = toggle(env, mode, COOKIE_SECURE_ENV, BOOL_EXPECTED, true, parse_bool)?;
    let same_site = same_site(env, mode, cookie_secure)?;
    let allow_ephemeral = toggle(
        env,
        mode,
        ALLOW_EPHEMERAL_ENV,
        BOOL_EXPECTED,
        false,
        parse_bool,
    )?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = session_key(env, mode, allow_ephemeral)?;
    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

/// Read `name`, falling back to `debug_default` in debug builds when it is
/// unset or unparsable.
fn toggle<E, T, P>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    expected: &'static str,
    debug_default: T,
    parse: P,
) -> Result<T, SessionConfigError>
where
    E: Env,
    T: std::fmt::Debug,
    P: Fn(&str) -> Option<T>,
{
    let Some(value) = env.string(name) else {
        if mode.is_debug() {
            warn!(variable = name, default = ?debug_default, "not set; using default");
            return Ok(debug_default);
        }
        return Err(SessionConfigError::MissingEnv { name });
    };
    match parse(&value) {
        Some(parsed) => Ok(parsed),
        None if mode.is_debug() => {
            warn!(variable = name, %value, default = ?debug_default, "invalid value; using default");
            Ok(debug_default)
        }
        None => Err(SessionConfigError::InvalidEnv {
            name,
            value,
            expected,
        }),
    }
}

fn same_site<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let same_site = toggle(
        env,
        mode,
        SAMESITE_ENV,
        SAMESITE_EXPECTED,
        SameSite::Lax,
        parse_same_site,
    )?;
    if same_site == SameSite::None && !cookie_secure {
        if !mode.is_debug() {
            return Err(SessionConfigError::InsecureSameSiteNone);
        }
        warn!("SameSite=None without Secure; browsers may drop the session cookie");
    }
    Ok(same_site)
}

fn session_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );
    match std::fs::read(&path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            let length = bytes.len();
            if !mode.is_debug() && length < SESSION_KEY_MIN_LEN {
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            if length < KEY_DERIVE_MIN_LEN {
                warn!(
                    path = %path.display(),
                    length,
                    "session key file too short to derive from; using a temporary key"
                );
                return Ok(Key::generate());
            }
            Ok(Key::derive_from(&bytes))
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(path = %path.display(), %error, "using a temporary session key; sessions end on restart");
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.trim().to_ascii_lowercase().as_str() {
        "lax" => Some(SameSite::Lax),
        "strict" => Some(SameSite::Strict),
        "none" => Some(SameSite::None),
        _ => None,
    }
}

#[cfg(test)]
#[path = "session_config_tests.rs"]
mod tests;
