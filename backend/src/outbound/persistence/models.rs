//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{favorites, profiles};

/// Row struct for reading from the profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub user_id: Uuid,
    pub handle: String,
    pub display_name: String,
    pub bio: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for the handle setup step. Other columns take their
/// database defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profiles)]
pub(crate) struct NewProfileRow<'a> {
    pub user_id: Uuid,
    pub handle: &'a str,
    pub display_name: &'a str,
}

/// Full favourite row; also used to reinsert rows during a swap.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = favorites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FavoriteRow {
    pub user_id: Uuid,
    pub slot: i16,
    pub category: String,
    pub title: String,
    pub note: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for a slot upsert.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = favorites)]
pub(crate) struct NewFavoriteRow<'a> {
    pub user_id: Uuid,
    pub slot: i16,
    pub category: &'a str,
    pub title: &'a str,
    pub note: &'a str,
}
