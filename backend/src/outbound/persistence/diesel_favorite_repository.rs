//! PostgreSQL-backed `FavoriteRepository` implementation using Diesel ORM.
//!
//! Upserts rely on the `(user_id, slot)` primary key. Swaps lock both rows
//! and rewrite them inside one transaction so readers never observe a
//! half-swapped board.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use tracing::warn;

use crate::domain::ports::{FavoriteRepository, FavoriteRepositoryError};
use crate::domain::{Favorite, FavoriteDraft, Slot, SlotPair, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{FavoriteRow, NewFavoriteRow};
use super::pool::{DbPool, PoolError};
use super::schema::favorites;

/// Diesel-backed implementation of the `FavoriteRepository` port.
#[derive(Clone)]
pub struct DieselFavoriteRepository {
    pool: DbPool,
}

impl DieselFavoriteRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FavoriteRepositoryError {
    map_basic_pool_error(error, FavoriteRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> FavoriteRepositoryError {
    map_basic_diesel_error(
        error,
        FavoriteRepositoryError::query,
        FavoriteRepositoryError::connection,
    )
}

fn slot_column(slot: Slot) -> i16 {
    i16::from(slot.get())
}

fn row_to_favorite(row: FavoriteRow) -> Result<Favorite, FavoriteRepositoryError> {
    let slot = Slot::new(i64::from(row.slot)).map_err(|err| {
        FavoriteRepositoryError::query(format!("stored favourite is invalid: {err}"))
    })?;
    Ok(Favorite {
        user_id: UserId::from_uuid(row.user_id),
        slot,
        category: row.category,
        title: row.title,
        note: row.note,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Map stored rows, skipping any whose slot is outside 1..=5.
fn rows_to_favorites(rows: Vec<FavoriteRow>) -> Vec<Favorite> {
    rows.into_iter()
        .filter_map(|row| {
            let (user_id, slot) = (row.user_id, row.slot);
            match row_to_favorite(row) {
                Ok(favorite) => Some(favorite),
                Err(error) => {
                    warn!(%user_id, slot, %error, "skipping stored favourite");
                    None
                }
            }
        })
        .collect()
}

/// Move each row to the other slot of the pair.
fn swapped_rows(rows: Vec<FavoriteRow>, pair: SlotPair) -> Vec<FavoriteRow> {
    let upper = slot_column(pair.upper());
    let lower = slot_column(pair.lower());
    let now = Utc::now();
    rows.into_iter()
        .map(|row| FavoriteRow {
            slot: if row.slot == upper { lower } else { upper },
            updated_at: now,
            ..row
        })
        .collect()
}

#[async_trait]
impl FavoriteRepository for DieselFavoriteRepository {
    async fn list_by_slot(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Favorite>, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<FavoriteRow> = favorites::table
            .filter(favorites::user_id.eq(user_id.as_uuid()))
            .order(favorites::slot.asc())
            .select(FavoriteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows_to_favorites(rows))
    }

    async fn list_by_creation(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Favorite>, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<FavoriteRow> = favorites::table
            .filter(favorites::user_id.eq(user_id.as_uuid()))
            .order((favorites::created_at.asc(), favorites::slot.asc()))
            .select(FavoriteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows_to_favorites(rows))
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        slot: Slot,
        draft: &FavoriteDraft,
    ) -> Result<Favorite, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewFavoriteRow {
            user_id: *user_id.as_uuid(),
            slot: slot_column(slot),
            category: draft.category(),
            title: draft.title(),
            note: draft.note(),
        };
        let row: FavoriteRow = diesel::insert_into(favorites::table)
            .values(&new_row)
            .on_conflict((favorites::user_id, favorites::slot))
            .do_update()
            .set((
                favorites::category.eq(excluded(favorites::category)),
                favorites::title.eq(excluded(favorites::title)),
                favorites::note.eq(excluded(favorites::note)),
                favorites::updated_at.eq(Utc::now()),
            ))
            .returning(FavoriteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_favorite(row)
    }

    async fn delete(&self, user_id: &UserId, slot: Slot) -> Result<bool, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            favorites::table
                .filter(favorites::user_id.eq(user_id.as_uuid()))
                .filter(favorites::slot.eq(slot_column(slot))),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn swap(&self, user_id: &UserId, pair: SlotPair) -> Result<(), FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let owner = *user_id.as_uuid();
        let slots = [slot_column(pair.upper()), slot_column(pair.lower())];

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let rows: Vec<FavoriteRow> = favorites::table
                    .filter(favorites::user_id.eq(owner))
                    .filter(favorites::slot.eq_any(slots))
                    .select(FavoriteRow::as_select())
                    .for_update()
                    .load(conn)
                    .await?;
                if rows.is_empty() {
                    return Ok(());
                }

                diesel::delete(
                    favorites::table
                        .filter(favorites::user_id.eq(owner))
                        .filter(favorites::slot.eq_any(slots)),
                )
                .execute(conn)
                .await?;

                diesel::insert_into(favorites::table)
                    .values(&swapped_rows(rows, pair))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
