//! Driving ports for the owner's dashboard: loading the board and mutating
//! slots, the handle and visibility.

use async_trait::async_trait;

use crate::domain::{Error, Profile, Slot, SlotBoard, UserId};

/// Profile plus its projected slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    /// Owner profile.
    pub profile: Profile,
    /// Current slot projection.
    pub board: SlotBoard,
}

/// Result of loading the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    /// No profile yet; the user must pick a handle first.
    HandleSetup,
    /// Profile exists; slots are editable.
    Ready(Dashboard),
}

/// Handle setup input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProfileRequest {
    /// Authenticated account.
    pub user_id: UserId,
    /// Raw handle text, validated by the service.
    pub handle: String,
    /// Optional display name; the handle is used when blank.
    pub display_name: Option<String>,
}

/// Save input for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFavoriteRequest {
    /// Authenticated account.
    pub user_id: UserId,
    /// Target slot.
    pub slot: Slot,
    /// Category text.
    pub category: String,
    /// Title, trimmed and required.
    pub title: String,
    /// Note text.
    pub note: String,
}

/// Swap input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapFavoritesRequest {
    /// Authenticated account.
    pub user_id: UserId,
    /// One end of the swap.
    pub first: Slot,
    /// The other end; must neighbour `first`.
    pub second: Slot,
}

/// Reloaded board after a slot mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardUpdate {
    /// Board as read back from the store.
    pub board: SlotBoard,
    /// Confirmation shown to the user.
    pub message: &'static str,
}

/// Profile after a visibility toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityUpdate {
    /// Updated profile.
    pub profile: Profile,
    /// Confirmation shown to the user.
    pub message: &'static str,
}

/// Read side of the dashboard.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Load the profile and board for `user_id`.
    async fn load(&self, user_id: &UserId) -> Result<DashboardView, Error>;
}

/// Write side of the dashboard. Every slot mutation returns the board as
/// reloaded from the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardCommand: Send + Sync {
    /// Create the profile during handle setup.
    async fn create_profile(&self, request: CreateProfileRequest) -> Result<Dashboard, Error>;

    /// Create or overwrite one slot.
    async fn save_favorite(&self, request: SaveFavoriteRequest) -> Result<BoardUpdate, Error>;

    /// Empty one slot.
    async fn delete_favorite(&self, user_id: &UserId, slot: Slot) -> Result<BoardUpdate, Error>;

    /// Exchange two neighbouring slots.
    async fn swap_favorites(&self, request: SwapFavoritesRequest) -> Result<BoardUpdate, Error>;

    /// Publish or hide the profile.
    async fn set_visibility(
        &self,
        user_id: &UserId,
        is_public: bool,
    ) -> Result<VisibilityUpdate, Error>;
}
