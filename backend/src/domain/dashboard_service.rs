//! Dashboard service: the owner's five-slot state machine.
//!
//! Every slot mutation is followed by a reload from the store so the caller
//! always renders what was actually persisted.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    BoardUpdate, CreateProfileRequest, Dashboard, DashboardCommand, DashboardQuery,
    DashboardView, FavoriteRepository, FavoriteRepositoryError, ProfileRepository,
    ProfileRepositoryError, SaveFavoriteRequest, SwapFavoritesRequest, VisibilityUpdate,
};
use crate::domain::{
    Error, FavoriteDraft, FavoriteValidationError, Handle, NewProfile, Slot, SlotBoard, SlotPair,
    UserId,
};

/// Confirmation after a save.
pub const SAVED_MESSAGE: &str = "保存しました";
/// Confirmation after a delete.
pub const DELETED_MESSAGE: &str = "削除しました";
/// Confirmation after a swap.
pub const SWAPPED_MESSAGE: &str = "入れ替えました";
/// Confirmation after publishing.
pub const PUBLISHED_MESSAGE: &str = "公開にしました";
/// Confirmation after hiding.
pub const HIDDEN_MESSAGE: &str = "非公開にしました";
/// Shown when a handle is already taken.
pub const HANDLE_TAKEN_MESSAGE: &str = "このハンドルは既に使われています";

pub(crate) fn map_profile_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile store unavailable: {message}"))
        }
        ProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile store error: {message}"))
        }
        ProfileRepositoryError::HandleTaken { .. } => Error::conflict(HANDLE_TAKEN_MESSAGE)
            .with_details(json!({ "field": "handle", "code": "handle_taken" })),
        ProfileRepositoryError::AlreadyExists => Error::conflict("profile already exists")
            .with_details(json!({ "field": "handle", "code": "profile_exists" })),
    }
}

pub(crate) fn map_favorite_error(error: FavoriteRepositoryError) -> Error {
    match error {
        FavoriteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("favorite store unavailable: {message}"))
        }
        FavoriteRepositoryError::Query { message } => {
            Error::internal(format!("favorite store error: {message}"))
        }
    }
}

fn map_validation_error(error: FavoriteValidationError) -> Error {
    let (field, code) = match &error {
        FavoriteValidationError::SlotOutOfRange { .. } => ("slot", "slot_out_of_range"),
        FavoriteValidationError::EmptyTitle => ("title", "empty_title"),
        FavoriteValidationError::NotAdjacent { .. } => ("slots", "not_adjacent"),
    };
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Dashboard use-cases over profile and favourite repositories.
#[derive(Clone)]
pub struct DashboardService<P, F> {
    profiles: Arc<P>,
    favorites: Arc<F>,
}

impl<P, F> DashboardService<P, F> {
    /// Create a service over the given repositories.
    pub fn new(profiles: Arc<P>, favorites: Arc<F>) -> Self {
        Self {
            profiles,
            favorites,
        }
    }
}

impl<P, F> DashboardService<P, F>
where
    P: ProfileRepository,
    F: FavoriteRepository,
{
    async fn board(&self, user_id: &UserId) -> Result<SlotBoard, Error> {
        let rows = self
            .favorites
            .list_by_slot(user_id)
            .await
            .map_err(map_favorite_error)?;
        Ok(SlotBoard::from_rows(rows))
    }

    async fn reload(&self, user_id: &UserId, message: &'static str) -> Result<BoardUpdate, Error> {
        Ok(BoardUpdate {
            board: self.board(user_id).await?,
            message,
        })
    }
}

#[async_trait]
impl<P, F> DashboardQuery for DashboardService<P, F>
where
    P: ProfileRepository,
    F: FavoriteRepository,
{
    async fn load(&self, user_id: &UserId) -> Result<DashboardView, Error> {
        let Some(profile) = self
            .profiles
            .find_by_user(user_id)
            .await
            .map_err(map_profile_error)?
        else {
            return Ok(DashboardView::HandleSetup);
        };
        let board = self.board(user_id).await?;
        Ok(DashboardView::Ready(Dashboard { profile, board }))
    }
}

#[async_trait]
impl<P, F> DashboardCommand for DashboardService<P, F>
where
    P: ProfileRepository,
    F: FavoriteRepository,
{
    async fn create_profile(&self, request: CreateProfileRequest) -> Result<Dashboard, Error> {
        let CreateProfileRequest {
            user_id,
            handle,
            display_name,
        } = request;
        let handle = Handle::new(handle).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "handle", "code": "invalid_handle" }))
        })?;
        let new_profile = NewProfile::new(user_id, handle, display_name.as_deref());
        let profile = self
            .profiles
            .insert(&new_profile)
            .await
            .map_err(map_profile_error)?;
        info!(%user_id, handle = %profile.handle, "profile created");
        let board = self.board(&user_id).await?;
        Ok(Dashboard { profile, board })
    }

    async fn save_favorite(&self, request: SaveFavoriteRequest) -> Result<BoardUpdate, Error> {
        let SaveFavoriteRequest {
            user_id,
            slot,
            category,
            title,
            note,
        } = request;
        let draft = FavoriteDraft::new(category, &title, note).map_err(map_validation_error)?;
        self.favorites
            .upsert(&user_id, slot, &draft)
            .await
            .map_err(map_favorite_error)?;
        self.reload(&user_id, SAVED_MESSAGE).await
    }

    async fn delete_favorite(&self, user_id: &UserId, slot: Slot) -> Result<BoardUpdate, Error> {
        let existed = self
            .favorites
            .delete(user_id, slot)
            .await
            .map_err(map_favorite_error)?;
        if !existed {
            debug!(%user_id, slot = slot.get(), "delete on empty slot");
        }
        self.reload(user_id, DELETED_MESSAGE).await
    }

    async fn swap_favorites(&self, request: SwapFavoritesRequest) -> Result<BoardUpdate, Error> {
        let SwapFavoritesRequest {
            user_id,
            first,
            second,
        } = request;
        let pair = SlotPair::adjacent(first, second).map_err(map_validation_error)?;
        let current = self.board(&user_id).await?;
        if current.get(pair.upper()).is_none() && current.get(pair.lower()).is_none() {
            return Err(Error::invalid_request("both slots are empty")
                .with_details(json!({ "field": "slots", "code": "empty_slots" })));
        }
        self.favorites
            .swap(&user_id, pair)
            .await
            .map_err(map_favorite_error)?;
        self.reload(&user_id, SWAPPED_MESSAGE).await
    }

    async fn set_visibility(
        &self,
        user_id: &UserId,
        is_public: bool,
    ) -> Result<VisibilityUpdate, Error> {
        let profile = self
            .profiles
            .set_visibility(user_id, is_public)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| Error::not_found("profile not found"))?;
        let message = if is_public {
            PUBLISHED_MESSAGE
        } else {
            HIDDEN_MESSAGE
        };
        Ok(VisibilityUpdate { profile, message })
    }
}

#[cfg(test)]
#[path = "dashboard_service_tests.rs"]
mod tests;
