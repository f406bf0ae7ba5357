//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel rows (`models.rs`,
//! `schema.rs`, both internal) and domain types. Connections come from a
//! `bb8` pool through `diesel-async`; every database failure is mapped to
//! the port's typed error.
//!
//! # Example
//!
//! ```ignore
//! use my5::outbound::persistence::{DbPool, DieselProfileRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/my5")).await?;
//! let profiles = DieselProfileRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_favorite_repository;
mod diesel_profile_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_favorite_repository::DieselFavoriteRepository;
pub use diesel_profile_repository::DieselProfileRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
