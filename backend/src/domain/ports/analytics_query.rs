//! Driving port for the analytics view.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, RankedItem, RankingCategory, UserId};

/// Number of favourites (or ranking items) under one category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Category label; blank categories become `未分類`.
    pub category: String,
    /// Count under the label.
    pub count: u32,
}

/// Cumulative favourite count at the end of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    /// Day as `YYYY-MM-DD`.
    pub date: String,
    /// Short axis label, `MM-DD`.
    pub label: String,
    /// Running total up to and including `date`.
    pub cumulative: u32,
}

/// A remote ranking category with its best items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankingBreakdown {
    /// Category metadata.
    pub category: RankingCategory,
    /// Total number of items in the category.
    pub item_count: u32,
    /// Up to five items ordered by rank.
    pub top_items: Vec<RankedItem>,
}

/// One axis of the radar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RadarPoint {
    /// `"{icon} {name}"`.
    pub label: String,
    /// Items in the category.
    pub count: u32,
    /// Shared axis maximum, at least 5.
    pub full_mark: u32,
}

/// Films per release decade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecadeCount {
    /// Decade label such as `1990s`.
    pub decade: String,
    /// Films released in the decade.
    pub count: u32,
}

/// Result of the per-film release year fan-out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DecadeDistribution {
    /// Name of the film category used, if one was found.
    pub category: Option<String>,
    /// Buckets sorted by decade.
    pub buckets: Vec<DecadeCount>,
    /// Lookups that failed and were left out.
    pub failed_lookups: u32,
}

/// Headline numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStats {
    /// Sum over the pie chart.
    pub total_items: u32,
    /// Number of categories shown.
    pub category_count: u32,
    /// Number of filled slots.
    pub favorite_count: u32,
}

/// Full analytics payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    /// Favourites per category, in first-seen order.
    pub categories: Vec<CategoryCount>,
    /// Cumulative timeline by creation day.
    pub timeline: Vec<TimelinePoint>,
    /// Remote ranking categories.
    pub rankings: Vec<RankingBreakdown>,
    /// Radar axes from remote categories.
    pub radar: Vec<RadarPoint>,
    /// Pie slices: remote categories, or favourite categories as fallback.
    pub pie: Vec<CategoryCount>,
    /// Film decades.
    pub decades: DecadeDistribution,
    /// Headline numbers.
    pub stats: AnalyticsStats,
    /// Set when the remote API could not be reached.
    pub degraded: bool,
}

/// AI commentary with a user-facing fallback text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    /// Commentary or fallback message.
    pub text: String,
    /// False when the remote call failed.
    pub available: bool,
}

/// Analytics over the authenticated user's favourites.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsQuery: Send + Sync {
    /// Build the report. Remote failures degrade the report instead of
    /// failing it; store failures are errors.
    async fn overview(&self, user_id: &UserId) -> Result<AnalyticsReport, Error>;

    /// Fetch AI commentary. Never fails; failures become fallback text.
    async fn ai_analysis(&self) -> AiAnalysis;
}
