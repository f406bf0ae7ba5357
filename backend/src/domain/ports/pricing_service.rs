//! Driving port for the pricing page and checkout.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{CheckoutSession, Error, PricingPlan};

/// Plans on offer; `degraded` is set when the API was unreachable.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlansView {
    /// Plans in display order.
    pub plans: Vec<PricingPlan>,
    /// Remote failure indicator.
    pub degraded: bool,
}

/// Pricing use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PricingService: Send + Sync {
    /// List plans.
    async fn plans(&self) -> PlansView;

    /// Start checkout for `plan_id`.
    async fn checkout(&self, plan_id: &str) -> Result<CheckoutSession, Error>;
}
