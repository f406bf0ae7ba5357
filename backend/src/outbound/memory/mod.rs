//! Process-local profile and favourite store.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. One mutex guards both tables, so a swap is atomic with respect to
//! every other operation.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    FavoriteRepository, FavoriteRepositoryError, ProfileRepository, ProfileRepositoryError,
};
use crate::domain::{Favorite, FavoriteDraft, Handle, NewProfile, Profile, Slot, SlotPair, UserId};

#[derive(Default)]
struct Tables {
    profiles: HashMap<UserId, Profile>,
    favorites: BTreeMap<(UserId, Slot), Favorite>,
}

/// In-memory implementation of both repository ports.
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    /// Create an empty store stamped by `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, String> {
        self.tables
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }

    fn user_favorites(tables: &Tables, user_id: &UserId) -> Vec<Favorite> {
        tables
            .favorites
            .range((*user_id, Slot::ALL[0])..=(*user_id, Slot::ALL[Slot::ALL.len() - 1]))
            .map(|(_, favorite)| favorite.clone())
            .collect()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let tables = self.lock().map_err(ProfileRepositoryError::query)?;
        Ok(tables.profiles.get(user_id).cloned())
    }

    async fn find_by_handle(
        &self,
        handle: &Handle,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let tables = self.lock().map_err(ProfileRepositoryError::query)?;
        Ok(tables
            .profiles
            .values()
            .find(|profile| profile.handle == *handle)
            .cloned())
    }

    async fn insert(&self, profile: &NewProfile) -> Result<Profile, ProfileRepositoryError> {
        let mut tables = self.lock().map_err(ProfileRepositoryError::query)?;
        if tables.profiles.contains_key(&profile.user_id) {
            return Err(ProfileRepositoryError::AlreadyExists);
        }
        if tables
            .profiles
            .values()
            .any(|existing| existing.handle == profile.handle)
        {
            return Err(ProfileRepositoryError::handle_taken(profile.handle.as_str()));
        }
        let now = self.clock.utc();
        let stored = Profile {
            user_id: profile.user_id,
            handle: profile.handle.clone(),
            display_name: profile.display_name.clone(),
            bio: String::new(),
            is_public: false,
            created_at: now,
            updated_at: now,
        };
        tables.profiles.insert(profile.user_id, stored.clone());
        Ok(stored)
    }

    async fn set_visibility(
        &self,
        user_id: &UserId,
        is_public: bool,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let now = self.clock.utc();
        let mut tables = self.lock().map_err(ProfileRepositoryError::query)?;
        Ok(tables.profiles.get_mut(user_id).map(|profile| {
            profile.is_public = is_public;
            profile.updated_at = now;
            profile.clone()
        }))
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryStore {
    async fn list_by_slot(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Favorite>, FavoriteRepositoryError> {
        let tables = self.lock().map_err(FavoriteRepositoryError::query)?;
        Ok(Self::user_favorites(&tables, user_id))
    }

    async fn list_by_creation(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Favorite>, FavoriteRepositoryError> {
        let tables = self.lock().map_err(FavoriteRepositoryError::query)?;
        let mut rows = Self::user_favorites(&tables, user_id);
        rows.sort_by_key(|favorite| (favorite.created_at, favorite.slot));
        Ok(rows)
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        slot: Slot,
        draft: &FavoriteDraft,
    ) -> Result<Favorite, FavoriteRepositoryError> {
        let now = self.clock.utc();
        let mut tables = self.lock().map_err(FavoriteRepositoryError::query)?;
        let created_at = tables
            .favorites
            .get(&(*user_id, slot))
            .map_or(now, |existing| existing.created_at);
        let favorite = Favorite {
            user_id: *user_id,
            slot,
            category: draft.category().to_owned(),
            title: draft.title().to_owned(),
            note: draft.note().to_owned(),
            created_at,
            updated_at: now,
        };
        tables.favorites.insert((*user_id, slot), favorite.clone());
        Ok(favorite)
    }

    async fn delete(&self, user_id: &UserId, slot: Slot) -> Result<bool, FavoriteRepositoryError> {
        let mut tables = self.lock().map_err(FavoriteRepositoryError::query)?;
        Ok(tables.favorites.remove(&(*user_id, slot)).is_some())
    }

    async fn swap(&self, user_id: &UserId, pair: SlotPair) -> Result<(), FavoriteRepositoryError> {
        let now = self.clock.utc();
        let mut tables = self.lock().map_err(FavoriteRepositoryError::query)?;
        let upper = tables.favorites.remove(&(*user_id, pair.upper()));
        let lower = tables.favorites.remove(&(*user_id, pair.lower()));
        for (target, moved) in [(pair.lower(), upper), (pair.upper(), lower)] {
            if let Some(mut favorite) = moved {
                favorite.slot = target;
                favorite.updated_at = now;
                tables.favorites.insert((*user_id, target), favorite);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::{TimeZone, Utc};
    use mockable::DefaultClock;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::new(Arc::new(DefaultClock))
    }

    fn slot(value: i64) -> Slot {
        Slot::new(value).expect("slot")
    }

    fn draft(title: &str) -> FavoriteDraft {
        FavoriteDraft::new("映画", title, "").expect("draft")
    }

    fn new_profile(user_id: UserId, handle: &str) -> NewProfile {
        NewProfile::new(user_id, Handle::new(handle).expect("handle"), None)
    }

    #[rstest]
    #[tokio::test]
    async fn profiles_start_private_and_handles_are_unique(store: InMemoryStore) {
        let first = UserId::random();
        let profile = store
            .insert(&new_profile(first, "taken"))
            .await
            .expect("insert");
        assert!(!profile.is_public);

        let clash = store.insert(&new_profile(UserId::random(), "taken")).await;
        assert_eq!(clash, Err(ProfileRepositoryError::handle_taken("taken")));

        let again = store.insert(&new_profile(first, "other")).await;
        assert_eq!(again, Err(ProfileRepositoryError::AlreadyExists));
    }

    #[rstest]
    #[tokio::test]
    async fn visibility_update_requires_profile(store: InMemoryStore) {
        let missing = store
            .set_visibility(&UserId::random(), true)
            .await
            .expect("query");
        assert!(missing.is_none());

        let user_id = UserId::random();
        store
            .insert(&new_profile(user_id, "visible"))
            .await
            .expect("insert");
        let updated = store
            .set_visibility(&user_id, true)
            .await
            .expect("update")
            .expect("profile");
        assert!(updated.is_public);
        let found = store
            .find_by_handle(&Handle::new("visible").expect("handle"))
            .await
            .expect("lookup")
            .expect("profile");
        assert!(found.is_public);
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_replaces_content_and_keeps_creation_time(store: InMemoryStore) {
        let user_id = UserId::random();
        let first = store
            .upsert(&user_id, slot(1), &draft("Old"))
            .await
            .expect("insert");
        let second = store
            .upsert(&user_id, slot(1), &draft("New"))
            .await
            .expect("replace");

        assert_eq!(second.title, "New");
        assert_eq!(second.created_at, first.created_at);
        let rows = store.list_by_slot(&user_id).await.expect("list");
        assert_eq!(rows.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn lists_are_scoped_to_one_user(store: InMemoryStore) {
        let owner = UserId::random();
        let other = UserId::random();
        store
            .upsert(&owner, slot(3), &draft("Mine"))
            .await
            .expect("insert");
        store
            .upsert(&other, slot(1), &draft("Theirs"))
            .await
            .expect("insert");

        let rows = store.list_by_slot(&owner).await.expect("list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Mine");
    }

    #[rstest]
    #[tokio::test]
    async fn swap_exchanges_or_relocates(store: InMemoryStore) {
        let user_id = UserId::random();
        store
            .upsert(&user_id, slot(1), &draft("One"))
            .await
            .expect("insert");
        store
            .upsert(&user_id, slot(2), &draft("Two"))
            .await
            .expect("insert");
        let pair = SlotPair::adjacent(slot(1), slot(2)).expect("pair");
        store.swap(&user_id, pair).await.expect("swap");

        let titles: Vec<_> = store
            .list_by_slot(&user_id)
            .await
            .expect("list")
            .into_iter()
            .map(|f| (f.slot.get(), f.title))
            .collect();
        assert_eq!(titles, [(1, "Two".to_owned()), (2, "One".to_owned())]);

        let pair = SlotPair::adjacent(slot(2), slot(3)).expect("pair");
        store.swap(&user_id, pair).await.expect("swap");
        let rows = store.list_by_slot(&user_id).await.expect("list");
        let slots: Vec<_> = rows.iter().map(|f| f.slot.get()).collect();
        assert_eq!(slots, [1, 3]);
    }

    #[rstest]
    #[tokio::test]
    async fn creation_order_uses_clock() {
        let mut clock = mockable::MockClock::new();
        let mut ticks = [
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).single().expect("time"),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("time"),
        ]
        .into_iter();
        clock
            .expect_utc()
            .times(2)
            .returning(move || ticks.next().unwrap_or_else(Utc::now));
        let store = InMemoryStore::new(Arc::new(clock));
        let user_id = UserId::random();
        store
            .upsert(&user_id, slot(1), &draft("Later"))
            .await
            .expect("insert");
        store
            .upsert(&user_id, slot(2), &draft("Earlier"))
            .await
            .expect("insert");

        let rows = store.list_by_creation(&user_id).await.expect("list");
        let titles: Vec<_> = rows.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, ["Earlier", "Later"]);
    }
}
