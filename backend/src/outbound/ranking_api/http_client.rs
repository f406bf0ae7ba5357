//! Reqwest-backed ranking API adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{
    AnalysisDto, CategoryDto, CheckoutRequestDto, CheckoutResponseDto, MovieSearchDto,
    PopularResponseDto, PricingResponseDto, RankedItemDto, SearchResponseDto,
};
use crate::domain::ports::{RankingApi, RankingApiError};
use crate::domain::{
    CheckoutSession, PlanId, PopularItem, PricingPlan, RankedItem, RankingCategory, SearchHit,
    SearchQuery,
};

/// Ranking API client rooted at one base URL.
pub struct RankingApiHttpClient {
    client: Client,
    base: Url,
}

impl RankingApiHttpClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RankingApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| RankingApiError::invalid_request("base url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, RankingApiError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        decode(body.as_ref())
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, RankingApiError> {
        debug!(%url, "ranking api request");
        self.fetch(self.client.get(url)).await
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, RankingApiError> {
    serde_json::from_slice(body).map_err(|error| {
        RankingApiError::decode(format!(
            "invalid ranking api payload: {error}; body: {}",
            body_preview(body)
        ))
    })
}

#[async_trait]
impl RankingApi for RankingApiHttpClient {
    async fn categories(&self) -> Result<Vec<RankingCategory>, RankingApiError> {
        let url = self.endpoint(&["rankings"])?;
        let categories: Vec<CategoryDto> = self.get(url).await?;
        Ok(categories.into_iter().map(CategoryDto::into_domain).collect())
    }

    async fn category_items(&self, category_id: &str) -> Result<Vec<RankedItem>, RankingApiError> {
        let url = self.endpoint(&["rankings", category_id])?;
        let items: Vec<RankedItemDto> = self.get(url).await?;
        Ok(items.into_iter().map(RankedItemDto::into_domain).collect())
    }

    async fn movie_release_year(&self, title: &str) -> Result<Option<i32>, RankingApiError> {
        let mut url = self.endpoint(&["search", "movie"])?;
        url.query_pairs_mut().append_pair("q", title);
        let found: MovieSearchDto = self.get(url).await?;
        Ok(found.first_release_year())
    }

    async fn search_rankings(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<SearchHit>, RankingApiError> {
        let mut url = self.endpoint(&["search", "rankings"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query.text());
            if let Some(rank) = query.rank() {
                pairs.append_pair("rank", &rank.to_string());
            }
        }
        let found: SearchResponseDto = self.get(url).await?;
        Ok(found.into_domain())
    }

    async fn popular(&self) -> Result<Vec<PopularItem>, RankingApiError> {
        let url = self.endpoint(&["stats", "popular"])?;
        let popular: PopularResponseDto = self.get(url).await?;
        Ok(popular.into_domain())
    }

    async fn analysis(&self) -> Result<String, RankingApiError> {
        let url = self.endpoint(&["analyze"])?;
        let analysis: AnalysisDto = self.get(url).await?;
        Ok(analysis.analysis.unwrap_or_default())
    }

    async fn pricing_plans(&self) -> Result<Vec<PricingPlan>, RankingApiError> {
        let url = self.endpoint(&["pricing"])?;
        let pricing: PricingResponseDto = self.get(url).await?;
        Ok(pricing.into_domain())
    }

    async fn checkout(&self, plan_id: &PlanId) -> Result<CheckoutSession, RankingApiError> {
        let url = self.endpoint(&["checkout"])?;
        debug!(%url, plan = plan_id.as_str(), "ranking api checkout");
        let request = self.client.post(url).json(&CheckoutRequestDto {
            plan_id: plan_id.as_str(),
        });
        let response: CheckoutResponseDto = self.fetch(request).await?;
        response.into_domain().map_err(RankingApiError::decode)
    }
}

fn map_transport_error(error: reqwest::Error) -> RankingApiError {
    if error.is_timeout() {
        RankingApiError::timeout(error.to_string())
    } else {
        RankingApiError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RankingApiError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => RankingApiError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            RankingApiError::timeout(message)
        }
        _ if status.is_client_error() => RankingApiError::invalid_request(message),
        _ => RankingApiError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let head: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
        format!("{head}...")
    } else {
        compact
    }
}
