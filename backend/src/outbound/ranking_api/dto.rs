//! DTOs for decoding ranking API JSON responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into
//! domain records in one pass. Lists default to empty when a wrapper key is
//! missing.

use serde::{Deserialize, Serialize};

use crate::domain::{
    CheckoutSession, PopularItem, PricingPlan, RankedItem, RankingCategory, SearchHit,
};

/// JSON scalar the API sends as either a string or a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(super) enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }

    /// Leading four-digit year, accepting `"1994"`, `"1994-07-06"` or `1994`.
    pub(super) fn year(&self) -> Option<i32> {
        let text = match self {
            Self::Text(text) => text.trim().to_owned(),
            Self::Number(number) => number.to_string(),
        };
        let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
        if digits.len() < 4 {
            return None;
        }
        digits.chars().take(4).collect::<String>().parse().ok()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CategoryDto {
    id: Scalar,
    name: String,
    #[serde(default)]
    icon: String,
}

impl CategoryDto {
    pub(super) fn into_domain(self) -> RankingCategory {
        RankingCategory {
            id: self.id.into_text(),
            name: self.name,
            icon: self.icon,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RankedItemDto {
    title: String,
    rank: u32,
}

impl RankedItemDto {
    pub(super) fn into_domain(self) -> RankedItem {
        RankedItem {
            title: self.title,
            rank: self.rank,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct MovieSearchDto {
    #[serde(default)]
    results: Vec<MovieDto>,
}

#[derive(Debug, Deserialize)]
struct MovieDto {
    #[serde(default)]
    release_year: Option<Scalar>,
}

impl MovieSearchDto {
    /// Release year of the first match.
    pub(super) fn first_release_year(&self) -> Option<i32> {
        self.results
            .first()
            .and_then(|movie| movie.release_year.as_ref())
            .and_then(Scalar::year)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchResponseDto {
    #[serde(default)]
    results: Vec<SearchHitDto>,
}

#[derive(Debug, Deserialize)]
struct SearchHitDto {
    title: String,
    rank: u32,
    #[serde(default)]
    category: String,
    user: SearchUserDto,
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchUserDto {
    handle: String,
    #[serde(default)]
    display_name: Option<String>,
}

impl SearchResponseDto {
    pub(super) fn into_domain(self) -> Vec<SearchHit> {
        self.results
            .into_iter()
            .map(|hit| SearchHit {
                title: hit.title,
                rank: hit.rank,
                category: hit.category,
                handle: hit.user.handle,
                display_name: hit.user.display_name,
                created_at: hit.created_at,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PopularResponseDto {
    #[serde(default)]
    popular: Vec<PopularItemDto>,
}

#[derive(Debug, Deserialize)]
struct PopularItemDto {
    rank: u32,
    title: String,
    #[serde(default)]
    category: String,
    count: u32,
}

impl PopularResponseDto {
    pub(super) fn into_domain(self) -> Vec<PopularItem> {
        self.popular
            .into_iter()
            .map(|item| PopularItem {
                rank: item.rank,
                title: item.title,
                category: item.category,
                count: item.count,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AnalysisDto {
    #[serde(default)]
    pub(super) analysis: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PricingResponseDto {
    #[serde(default)]
    plans: Vec<PlanDto>,
}

#[derive(Debug, Deserialize)]
struct PlanDto {
    id: Scalar,
    name: String,
    price: f64,
    #[serde(default)]
    currency: String,
    #[serde(default)]
    interval: Option<String>,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    cta: String,
    #[serde(default)]
    current: bool,
    #[serde(default)]
    popular: bool,
}

impl PricingResponseDto {
    pub(super) fn into_domain(self) -> Vec<PricingPlan> {
        self.plans
            .into_iter()
            .map(|plan| PricingPlan {
                id: plan.id.into_text(),
                name: plan.name,
                price: plan.price,
                currency: plan.currency,
                interval: plan.interval,
                features: plan.features,
                cta: plan.cta,
                current: plan.current,
                popular: plan.popular,
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CheckoutRequestDto<'a> {
    pub(super) plan_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct CheckoutResponseDto {
    #[serde(default)]
    url: Option<String>,
}

impl CheckoutResponseDto {
    pub(super) fn into_domain(self) -> Result<CheckoutSession, String> {
        match self.url {
            Some(url) if !url.trim().is_empty() => Ok(CheckoutSession { url }),
            _ => Err("checkout response did not include a url".to_owned()),
        }
    }
}
