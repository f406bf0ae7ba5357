//! Driving port for cross-user exploration.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, PopularItem, SearchHit, Slot};

/// Popular items; `degraded` is set when the API was unreachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopularView {
    /// Items in popularity order.
    pub items: Vec<PopularItem>,
    /// Remote failure indicator.
    pub degraded: bool,
}

/// Search results; `degraded` is set when the API was unreachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchView {
    /// Matching favourites.
    pub results: Vec<SearchHit>,
    /// Remote failure indicator.
    pub degraded: bool,
}

/// Explore use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExploreQuery: Send + Sync {
    /// Popular items across all users.
    async fn popular(&self) -> PopularView;

    /// Search by title with an optional rank filter. Blank text is an
    /// `InvalidRequest`.
    async fn search(&self, text: &str, rank: Option<Slot>) -> Result<SearchView, Error>;
}
