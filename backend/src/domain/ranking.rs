//! Records exchanged with the remote ranking API.
//!
//! These are read-only projections; the service never persists them.

use serde::Serialize;
use utoipa::ToSchema;

use super::Slot;

/// Ranking category as listed by `GET /rankings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankingCategory {
    /// Remote identifier used in `GET /rankings/{id}`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Emoji or short icon label.
    pub icon: String,
}

impl RankingCategory {
    /// Whether the category holds films (`映画` or `Movie` in its name).
    #[must_use]
    pub fn is_movie(&self) -> bool {
        self.name.contains("映画") || self.name.contains("Movie")
    }
}

/// Item inside a ranking category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem {
    /// Item title.
    pub title: String,
    /// Position within the category; lower is better.
    pub rank: u32,
}

/// Validation errors for explore search input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchQueryError {
    /// Query text blank after trimming.
    #[error("search query must not be empty")]
    EmptyText,
}

/// Cross-user search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    rank: Option<Slot>,
}

impl SearchQuery {
    /// Build a query; the text is trimmed and must be non-empty.
    pub fn new(text: &str, rank: Option<Slot>) -> Result<Self, SearchQueryError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SearchQueryError::EmptyText);
        }
        Ok(Self {
            text: text.to_owned(),
            rank,
        })
    }

    /// Trimmed query text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Optional rank filter.
    #[must_use]
    pub fn rank(&self) -> Option<Slot> {
        self.rank
    }
}

/// Search hit owned by some user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// Favourite title.
    pub title: String,
    /// Rank (slot) within the owner's board.
    pub rank: u32,
    /// Category text.
    pub category: String,
    /// Owner handle.
    pub handle: String,
    /// Owner display name, if set.
    pub display_name: Option<String>,
    /// Creation timestamp as reported remotely.
    pub created_at: Option<String>,
}

/// Frequently listed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopularItem {
    /// Popularity position.
    pub rank: u32,
    /// Item title.
    pub title: String,
    /// Category text.
    pub category: String,
    /// Number of users listing it.
    pub count: u32,
}

/// Subscription plan shown on the pricing page.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricingPlan {
    /// Plan identifier passed to checkout.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price in minor-less display units.
    pub price: f64,
    /// ISO currency code.
    pub currency: String,
    /// Billing interval, absent for free plans.
    pub interval: Option<String>,
    /// Feature bullet points.
    pub features: Vec<String>,
    /// Call-to-action label.
    pub cta: String,
    /// Whether the user is already on this plan.
    pub current: bool,
    /// Whether the plan is highlighted.
    pub popular: bool,
}

/// Raised when a checkout plan id is blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("plan id must not be empty")]
pub struct PlanIdValidationError;

/// Identifier of a plan to check out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanId(String);

impl PlanId {
    /// Validate a plan id; surrounding whitespace is removed.
    pub fn new(raw: &str) -> Result<Self, PlanIdValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            Err(PlanIdValidationError)
        } else {
            Ok(Self(raw.to_owned()))
        }
    }

    /// Borrow the id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Redirect target returned by checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CheckoutSession {
    /// URL of the hosted payment page.
    pub url: String,
}
