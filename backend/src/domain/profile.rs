//! Public profile data model.
//!
//! A profile is created lazily the first time a user picks a handle. The
//! handle doubles as the public URL segment (`/u/{handle}`).

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Message shown when a handle fails validation.
pub const HANDLE_RULE_MESSAGE: &str = "3〜20文字の英数字・アンダースコアのみ";

static HANDLE_RE: OnceLock<Regex> = OnceLock::new();

fn handle_regex() -> &'static Regex {
    HANDLE_RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9_]{3,20}$")
            .unwrap_or_else(|error| panic!("handle regex failed to compile: {error}"))
    })
}

/// Raised when a handle does not match `^[A-Za-z0-9_]{3,20}$`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", HANDLE_RULE_MESSAGE)]
pub struct HandleValidationError;

/// Unique, URL-safe profile handle.
///
/// # Examples
/// ```
/// use my5::domain::Handle;
///
/// assert!(Handle::new("abc").is_ok());
/// assert!(Handle::new("ab").is_err());
/// assert!(Handle::new("abc!").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct Handle(String);

impl Handle {
    /// Validate raw input. No trimming is applied.
    pub fn new(raw: impl Into<String>) -> Result<Self, HandleValidationError> {
        let raw = raw.into();
        if handle_regex().is_match(&raw) {
            Ok(Self(raw))
        } else {
            Err(HandleValidationError)
        }
    }

    /// Borrow the handle text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for Handle {
    type Error = HandleValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Handle> for String {
    fn from(value: Handle) -> Self {
        value.0
    }
}

/// Stored profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Owning account.
    #[schema(value_type = String, format = Uuid)]
    pub user_id: UserId,
    /// Public handle.
    pub handle: Handle,
    /// Display name; may be blank, in which case the handle is shown.
    pub display_name: String,
    /// Free-text biography.
    pub bio: String,
    /// Whether `/u/{handle}` shows favourites.
    pub is_public: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Name to render: the display name, or the handle when it is blank.
    #[must_use]
    pub fn shown_name(&self) -> &str {
        if self.display_name.trim().is_empty() {
            self.handle.as_str()
        } else {
            self.display_name.as_str()
        }
    }
}

/// Insert payload for the handle setup step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    /// Owning account.
    pub user_id: UserId,
    /// Requested handle.
    pub handle: Handle,
    /// Display name, already defaulted to the handle when blank.
    pub display_name: String,
}

impl NewProfile {
    /// Build an insert payload, defaulting the display name to the handle.
    #[must_use]
    pub fn new(user_id: UserId, handle: Handle, display_name: Option<&str>) -> Self {
        let display_name = match display_name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => handle.as_str().to_owned(),
        };
        Self {
            user_id,
            handle,
            display_name,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc", true)]
    #[case("ab", false)]
    #[case("abc!", false)]
    #[case("a_b_C_123", true)]
    #[case("abcdefghijklmnopqrst", true)]
    #[case("abcdefghijklmnopqrstu", false)]
    #[case("名前です", false)]
    #[case(" abc", false)]
    fn handle_validation(#[case] raw: &str, #[case] accepted: bool) {
        assert_eq!(Handle::new(raw).is_ok(), accepted, "handle {raw:?}");
    }

    #[test]
    fn handle_error_uses_rule_message() {
        let err = Handle::new("x").expect_err("too short");
        assert_eq!(err.to_string(), HANDLE_RULE_MESSAGE);
    }

    #[rstest]
    #[case(None, "taro")]
    #[case(Some("   "), "taro")]
    #[case(Some(" Taro Yamada "), "Taro Yamada")]
    fn new_profile_defaults_display_name(#[case] input: Option<&str>, #[case] expected: &str) {
        let handle = Handle::new("taro").expect("valid handle");
        let profile = NewProfile::new(UserId::random(), handle, input);
        assert_eq!(profile.display_name, expected);
    }

    #[test]
    fn handle_deserialisation_validates() {
        assert!(serde_json::from_str::<Handle>("\"ok_handle\"").is_ok());
        assert!(serde_json::from_str::<Handle>("\"no\"").is_err());
    }
}
