//! Port abstraction for profile persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Handle, NewProfile, Profile, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "profile repository query failed: {message}",
        /// Another profile already owns the handle.
        HandleTaken { handle: String } => "handle already taken: {handle}",
        /// The user already has a profile.
        AlreadyExists => "profile already exists for this user",
    }
}

/// Storage for profiles keyed by user id with a unique handle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the profile owned by `user_id`.
    async fn find_by_user(&self, user_id: &UserId)
    -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Fetch the profile with `handle`.
    async fn find_by_handle(&self, handle: &Handle)
    -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Insert a new profile, private by default.
    async fn insert(&self, profile: &NewProfile) -> Result<Profile, ProfileRepositoryError>;

    /// Update the visibility flag and return the updated profile, or `None`
    /// when the user has no profile.
    async fn set_visibility(
        &self,
        user_id: &UserId,
        is_public: bool,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;
}
