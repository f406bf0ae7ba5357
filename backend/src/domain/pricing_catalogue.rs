//! Pricing plans and checkout.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{PlansView, PricingService, RankingApi};
use crate::domain::{CheckoutSession, Error, PlanId};

/// Implements [`PricingService`] over the ranking API's billing endpoints.
#[derive(Clone)]
pub struct PricingCatalogue<A> {
    ranking: Arc<A>,
}

impl<A> PricingCatalogue<A> {
    /// Create a catalogue over the ranking API.
    pub fn new(ranking: Arc<A>) -> Self {
        Self { ranking }
    }
}

#[async_trait]
impl<A> PricingService for PricingCatalogue<A>
where
    A: RankingApi,
{
    async fn plans(&self) -> PlansView {
        match self.ranking.pricing_plans().await {
            Ok(plans) => PlansView {
                plans,
                degraded: false,
            },
            Err(error) => {
                warn!(%error, "pricing plans unavailable");
                PlansView {
                    plans: Vec::new(),
                    degraded: true,
                }
            }
        }
    }

    async fn checkout(&self, plan_id: &str) -> Result<CheckoutSession, Error> {
        let plan_id = PlanId::new(plan_id).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "planId", "code": "empty_plan_id" }))
        })?;

        // Only a successful listing can prove the plan is already active.
        if let Ok(plans) = self.ranking.pricing_plans().await {
            if plans
                .iter()
                .any(|plan| plan.id == plan_id.as_str() && plan.current)
            {
                return Err(Error::conflict("already subscribed to this plan"));
            }
        }

        let session = self.ranking.checkout(&plan_id).await.map_err(|error| {
            warn!(%error, plan = plan_id.as_str(), "checkout failed");
            Error::service_unavailable(format!("checkout unavailable: {error}"))
        })?;
        info!(plan = plan_id.as_str(), "checkout session created");
        Ok(session)
    }
}
