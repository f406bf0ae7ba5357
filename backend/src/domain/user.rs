//! Account identifier issued by the identity service.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdValidationError {
    /// Input was empty.
    #[error("user id must not be empty")]
    Empty,
    /// Input was not a canonical UUID.
    #[error("user id must be a valid UUID")]
    Invalid,
}

/// Stable user identifier. One profile exists per user id at most.
///
/// # Examples
/// ```
/// use my5::domain::UserId;
///
/// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserIdValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserIdValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(UserIdValidationError::Invalid);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserIdValidationError::Invalid)
    }

    /// Wrap an already-parsed UUID, e.g. one read from the store.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserIdValidationError::Empty)]
    #[case("not-a-uuid", UserIdValidationError::Invalid)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserIdValidationError::Invalid)]
    fn rejects_malformed_ids(#[case] raw: &str, #[case] expected: UserIdValidationError) {
        assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
    }

    #[test]
    fn serialises_as_plain_string() {
        let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        let json = serde_json::to_string(&id).expect("serialise");
        assert_eq!(json, "\"3fa85f64-5717-4562-b3fc-2c963f66afa6\"");
        let back: UserId = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, id);
    }
}
