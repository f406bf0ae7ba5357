//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// One profile per account; `handle` is unique.
    profiles (user_id) {
        /// Primary key: identity-service account id.
        user_id -> Uuid,
        /// Public handle, `^[A-Za-z0-9_]{3,20}$`.
        handle -> Varchar,
        /// Display name; the handle is shown when blank.
        display_name -> Varchar,
        /// Free-text bio.
        bio -> Text,
        /// Whether `/u/{handle}` shows the favourites.
        is_public -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Favourite slots keyed by `(user_id, slot)`; `slot` is checked to 1..=5.
    favorites (user_id, slot) {
        /// Owning account.
        user_id -> Uuid,
        /// Slot number, also the displayed rank.
        slot -> Int2,
        /// Free-text category.
        category -> Varchar,
        /// Non-empty title.
        title -> Varchar,
        /// Free-text note.
        note -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(profiles, favorites);
