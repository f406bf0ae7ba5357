//! HTTP inbound adapter: actix-web handlers translating requests into
//! driving-port calls.

pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod error;
pub mod explore;
pub mod health;
pub mod pricing;
pub mod public_profile;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use crate::domain::ApiResult;
