//! Analytics over a user's favourites and the remote ranking catalogue.
//!
//! Favourite-derived sections are computed locally and always present.
//! Remote sections degrade to empty when the ranking API fails, and the
//! per-film release year lookups fan out with a bounded concurrency limit.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::domain::dashboard_service::map_favorite_error;
use crate::domain::ports::{
    AiAnalysis, AnalyticsQuery, AnalyticsReport, AnalyticsStats, CategoryCount, DecadeCount,
    DecadeDistribution, FavoriteRepository, RadarPoint, RankingApi, RankingApiError,
    RankingBreakdown, TimelinePoint,
};
use crate::domain::{Error, Favorite, RankedItem, UserId};

/// Label used for favourites without a category.
pub const UNCATEGORISED_LABEL: &str = "未分類";
/// AI text shown when the API returns nothing.
pub const NO_ANALYSIS_MESSAGE: &str = "分析データがありません";
/// AI text shown when the API call fails.
pub const ANALYSIS_FAILED_MESSAGE: &str = "分析の取得に失敗しました。";

const TOP_ITEMS: usize = 5;
const MIN_FULL_MARK: u32 = 5;

fn saturating_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Count favourites per category in first-seen order.
#[must_use]
pub fn category_counts(favorites: &[Favorite]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for favorite in favorites {
        let label = match favorite.category.as_str() {
            "" => UNCATEGORISED_LABEL,
            category => category,
        };
        match counts.iter_mut().find(|entry| entry.category == label) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                category: label.to_owned(),
                count: 1,
            }),
        }
    }
    counts
}

/// Cumulative favourite count per creation day, oldest day first.
#[must_use]
pub fn cumulative_timeline(favorites: &[Favorite]) -> Vec<TimelinePoint> {
    let mut per_day = BTreeMap::new();
    for favorite in favorites {
        *per_day.entry(favorite.created_at.date_naive()).or_insert(0_u32) += 1;
    }
    let mut running = 0_u32;
    per_day
        .into_iter()
        .map(|(day, count)| {
            running = running.saturating_add(count);
            TimelinePoint {
                date: day.format("%Y-%m-%d").to_string(),
                label: day.format("%m-%d").to_string(),
                cumulative: running,
            }
        })
        .collect()
}

/// Bucket release years by decade, sorted ascending.
#[must_use]
pub fn decade_buckets(years: impl IntoIterator<Item = i32>) -> Vec<DecadeCount> {
    let mut buckets = BTreeMap::new();
    for year in years {
        *buckets.entry(year.div_euclid(10)).or_insert(0_u32) += 1;
    }
    buckets
        .into_iter()
        .map(|(decade, count)| DecadeCount {
            decade: format!("{decade}0s"),
            count,
        })
        .collect()
}

fn radar(rankings: &[RankingBreakdown]) -> Vec<RadarPoint> {
    let full_mark = rankings
        .iter()
        .map(|ranking| ranking.item_count)
        .max()
        .unwrap_or(0)
        .max(MIN_FULL_MARK);
    rankings
        .iter()
        .map(|ranking| RadarPoint {
            label: format!("{} {}", ranking.category.icon, ranking.category.name),
            count: ranking.item_count,
            full_mark,
        })
        .collect()
}

fn pie(radar: &[RadarPoint], categories: &[CategoryCount]) -> Vec<CategoryCount> {
    if radar.is_empty() {
        return categories.to_vec();
    }
    radar
        .iter()
        .map(|point| CategoryCount {
            category: point.label.clone(),
            count: point.count,
        })
        .collect()
}

struct RemoteSections {
    rankings: Vec<RankingBreakdown>,
    film_items: Option<(String, Vec<RankedItem>)>,
}

/// Implements [`AnalyticsQuery`] over a favourite store and the ranking API.
#[derive(Clone)]
pub struct AnalyticsService<F, A> {
    favorites: Arc<F>,
    ranking: Arc<A>,
    lookup_concurrency: usize,
}

impl<F, A> AnalyticsService<F, A> {
    /// Create a service. At most `lookup_concurrency` film lookups run at
    /// once; zero is treated as one.
    pub fn new(favorites: Arc<F>, ranking: Arc<A>, lookup_concurrency: usize) -> Self {
        Self {
            favorites,
            ranking,
            lookup_concurrency: lookup_concurrency.max(1),
        }
    }
}

impl<F, A> AnalyticsService<F, A>
where
    F: FavoriteRepository,
    A: RankingApi + 'static,
{
    async fn remote_sections(&self) -> Result<RemoteSections, RankingApiError> {
        let categories = self.ranking.categories().await?;
        let mut rankings = Vec::with_capacity(categories.len());
        let mut film_items = None;
        for category in categories {
            let mut items = self.ranking.category_items(&category.id).await?;
            items.sort_by_key(|item| item.rank);
            if film_items.is_none() && category.is_movie() {
                film_items = Some((category.name.clone(), items.clone()));
            }
            let item_count = saturating_count(items.len());
            items.truncate(TOP_ITEMS);
            rankings.push(RankingBreakdown {
                category,
                item_count,
                top_items: items,
            });
        }
        Ok(RemoteSections {
            rankings,
            film_items,
        })
    }

    async fn decades(&self, category: String, items: &[RankedItem]) -> DecadeDistribution {
        let titles: Vec<String> = items.iter().map(|item| item.title.clone()).collect();
        let api = Arc::clone(&self.ranking);
        let outcomes: Vec<_> = stream::iter(titles)
            .map(move |title| {
                let api = Arc::clone(&api);
                async move { api.movie_release_year(&title).await }
            })
            .buffer_unordered(self.lookup_concurrency)
            .collect()
            .await;
        let mut failed_lookups = 0_u32;
        let mut years = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(Some(year)) => years.push(year),
                Ok(None) => {}
                Err(error) => {
                    debug!(%error, "film release year lookup failed");
                    failed_lookups += 1;
                }
            }
        }
        DecadeDistribution {
            category: Some(category),
            buckets: decade_buckets(years),
            failed_lookups,
        }
    }
}

#[async_trait]
impl<F, A> AnalyticsQuery for AnalyticsService<F, A>
where
    F: FavoriteRepository,
    A: RankingApi + 'static,
{
    async fn overview(&self, user_id: &UserId) -> Result<AnalyticsReport, Error> {
        let favorites = self
            .favorites
            .list_by_creation(user_id)
            .await
            .map_err(map_favorite_error)?;
        let categories = category_counts(&favorites);
        let timeline = cumulative_timeline(&favorites);

        let (rankings, decades, degraded) = match self.remote_sections().await {
            Ok(RemoteSections {
                rankings,
                film_items,
            }) => {
                let decades = match film_items {
                    Some((category, items)) if !items.is_empty() => {
                        self.decades(category, &items).await
                    }
                    _ => DecadeDistribution::default(),
                };
                (rankings, decades, false)
            }
            Err(error) => {
                warn!(%error, "ranking api unavailable; analytics degraded");
                (Vec::new(), DecadeDistribution::default(), true)
            }
        };

        let radar = radar(&rankings);
        let pie = pie(&radar, &categories);
        let stats = AnalyticsStats {
            total_items: pie.iter().map(|slice| slice.count).sum(),
            category_count: saturating_count(if radar.is_empty() {
                categories.len()
            } else {
                radar.len()
            }),
            favorite_count: saturating_count(favorites.len()),
        };

        Ok(AnalyticsReport {
            categories,
            timeline,
            rankings,
            radar,
            pie,
            decades,
            stats,
            degraded,
        })
    }

    async fn ai_analysis(&self) -> AiAnalysis {
        match self.ranking.analysis().await {
            Ok(text) if text.trim().is_empty() => AiAnalysis {
                text: NO_ANALYSIS_MESSAGE.to_owned(),
                available: true,
            },
            Ok(text) => AiAnalysis {
                text,
                available: true,
            },
            Err(error) => {
                warn!(%error, "ai analysis unavailable");
                AiAnalysis {
                    text: ANALYSIS_FAILED_MESSAGE.to_owned(),
                    available: false,
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "analytics_service_tests.rs"]
mod tests;
