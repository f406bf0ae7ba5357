//! Port abstraction for favourite persistence.
//!
//! Rows are keyed by `(user_id, slot)`. Writes are last-write-wins; only
//! [`FavoriteRepository::swap`] is required to be atomic.

use async_trait::async_trait;

use crate::domain::{Favorite, FavoriteDraft, Slot, SlotPair, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by favourite repository adapters.
    pub enum FavoriteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "favorite repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "favorite repository query failed: {message}",
    }
}

/// Storage for the five favourite slots of each user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Favourites of `user_id` ordered by slot.
    async fn list_by_slot(&self, user_id: &UserId)
    -> Result<Vec<Favorite>, FavoriteRepositoryError>;

    /// Favourites of `user_id` ordered by creation time, oldest first.
    async fn list_by_creation(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Favorite>, FavoriteRepositoryError>;

    /// Create or replace the favourite in `slot`.
    async fn upsert(
        &self,
        user_id: &UserId,
        slot: Slot,
        draft: &FavoriteDraft,
    ) -> Result<Favorite, FavoriteRepositoryError>;

    /// Remove the favourite in `slot`; returns whether a row existed.
    async fn delete(&self, user_id: &UserId, slot: Slot) -> Result<bool, FavoriteRepositoryError>;

    /// Exchange the contents of two slots in one atomic step. An empty side
    /// stays empty after moving, so a single filled slot simply relocates.
    async fn swap(&self, user_id: &UserId, pair: SlotPair) -> Result<(), FavoriteRepositoryError>;
}
