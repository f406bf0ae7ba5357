//! Cross-user exploration backed by the ranking API.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::domain::ports::{ExploreQuery, PopularView, RankingApi, SearchView};
use crate::domain::{Error, SearchQuery, Slot};

/// Implements [`ExploreQuery`]. Remote failures yield empty, degraded views.
#[derive(Clone)]
pub struct ExploreService<A> {
    ranking: Arc<A>,
}

impl<A> ExploreService<A> {
    /// Create a service over the ranking API.
    pub fn new(ranking: Arc<A>) -> Self {
        Self { ranking }
    }
}

#[async_trait]
impl<A> ExploreQuery for ExploreService<A>
where
    A: RankingApi,
{
    async fn popular(&self) -> PopularView {
        match self.ranking.popular().await {
            Ok(items) => PopularView {
                items,
                degraded: false,
            },
            Err(error) => {
                warn!(%error, "popular items unavailable");
                PopularView {
                    items: Vec::new(),
                    degraded: true,
                }
            }
        }
    }

    async fn search(&self, text: &str, rank: Option<Slot>) -> Result<SearchView, Error> {
        let query = SearchQuery::new(text, rank).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "q", "code": "empty_query" }))
        })?;
        Ok(match self.ranking.search_rankings(&query).await {
            Ok(results) => SearchView {
                results,
                degraded: false,
            },
            Err(error) => {
                warn!(%error, query = query.text(), "ranking search unavailable");
                SearchView {
                    results: Vec::new(),
                    degraded: true,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockRankingApi, RankingApiError};
    use crate::domain::{ErrorCode, PopularItem, SearchHit};

    #[tokio::test]
    async fn popular_degrades_on_failure() {
        let mut api = MockRankingApi::new();
        api.expect_popular()
            .times(1)
            .return_once(|| Err(RankingApiError::transport("dns failure")));

        let view = ExploreService::new(Arc::new(api)).popular().await;

        assert!(view.degraded);
        assert!(view.items.is_empty());
    }

    #[tokio::test]
    async fn popular_passes_items_through() {
        let mut api = MockRankingApi::new();
        api.expect_popular().times(1).return_once(|| {
            Ok(vec![PopularItem {
                rank: 1,
                title: "Spirited Away".to_owned(),
                category: "映画".to_owned(),
                count: 12,
            }])
        });

        let view = ExploreService::new(Arc::new(api)).popular().await;

        assert!(!view.degraded);
        assert_eq!(view.items.len(), 1);
    }

    #[tokio::test]
    async fn blank_search_is_rejected_without_calling_api() {
        let mut api = MockRankingApi::new();
        api.expect_search_rankings().times(0);

        let error = ExploreService::new(Arc::new(api))
            .search("   ", None)
            .await
            .expect_err("blank query");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn search_forwards_trimmed_text_and_rank() {
        let mut api = MockRankingApi::new();
        api.expect_search_rankings()
            .withf(|query| query.text() == "dune" && query.rank().map(Slot::get) == Some(1))
            .times(1)
            .return_once(|_| {
                Ok(vec![SearchHit {
                    title: "Dune".to_owned(),
                    rank: 1,
                    category: "本".to_owned(),
                    handle: "reader".to_owned(),
                    display_name: None,
                    created_at: None,
                }])
            });

        let view = ExploreService::new(Arc::new(api))
            .search(" dune ", Some(Slot::new(1).expect("slot")))
            .await
            .expect("search");

        assert!(!view.degraded);
        assert_eq!(view.results[0].handle, "reader");
    }

    #[tokio::test]
    async fn search_degrades_on_failure() {
        let mut api = MockRankingApi::new();
        api.expect_search_rankings()
            .times(1)
            .return_once(|_| Err(RankingApiError::rate_limited("429")));

        let view = ExploreService::new(Arc::new(api))
            .search("dune", None)
            .await
            .expect("degraded view");

        assert!(view.degraded);
        assert!(view.results.is_empty());
    }
}
