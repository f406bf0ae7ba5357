//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: process-local store used without a database
//! - **ranking_api**: reqwest client for the remote ranking API
//! - **identity**: reqwest client for the hosted identity service
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod identity;
pub mod memory;
pub mod persistence;
pub mod ranking_api;
