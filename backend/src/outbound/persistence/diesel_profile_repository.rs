//! PostgreSQL-backed `ProfileRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{Handle, NewProfile, Profile, UserId};

use super::diesel_basic_error_mapping::{
    PROFILES_PKEY, map_basic_diesel_error, map_basic_pool_error, unique_violation_constraint,
};
use super::models::{NewProfileRow, ProfileRow};
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

/// Diesel-backed implementation of the `ProfileRepository` port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfileRepositoryError {
    map_basic_pool_error(error, ProfileRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    map_basic_diesel_error(
        error,
        ProfileRepositoryError::query,
        ProfileRepositoryError::connection,
    )
}

/// Map an insert failure, distinguishing the two unique constraints.
fn map_insert_error(error: diesel::result::Error, handle: &Handle) -> ProfileRepositoryError {
    match unique_violation_constraint(&error).as_deref() {
        Some(PROFILES_PKEY) => ProfileRepositoryError::AlreadyExists,
        Some(_) => ProfileRepositoryError::handle_taken(handle.as_str()),
        None => map_diesel_error(error),
    }
}

fn row_to_profile(row: ProfileRow) -> Result<Profile, ProfileRepositoryError> {
    let handle = Handle::new(row.handle.as_str()).map_err(|_| {
        ProfileRepositoryError::query(format!("stored handle is invalid: {}", row.handle))
    })?;
    Ok(Profile {
        user_id: UserId::from_uuid(row.user_id),
        handle,
        display_name: row.display_name,
        bio: row.bio,
        is_public: row.is_public,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProfileRow> = profiles::table
            .filter(profiles::user_id.eq(user_id.as_uuid()))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_profile).transpose()
    }

    async fn find_by_handle(
        &self,
        handle: &Handle,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProfileRow> = profiles::table
            .filter(profiles::handle.eq(handle.as_str()))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_profile).transpose()
    }

    async fn insert(&self, profile: &NewProfile) -> Result<Profile, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewProfileRow {
            user_id: *profile.user_id.as_uuid(),
            handle: profile.handle.as_str(),
            display_name: profile.display_name.as_str(),
        };
        let row: ProfileRow = diesel::insert_into(profiles::table)
            .values(&new_row)
            .returning(ProfileRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, &profile.handle))?;
        row_to_profile(row)
    }

    async fn set_visibility(
        &self,
        user_id: &UserId,
        is_public: bool,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ProfileRow> =
            diesel::update(profiles::table.filter(profiles::user_id.eq(user_id.as_uuid())))
                .set((
                    profiles::is_public.eq(is_public),
                    profiles::updated_at.eq(Utc::now()),
                ))
                .returning(ProfileRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
        row.map(row_to_profile).transpose()
    }
}
