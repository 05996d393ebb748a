//! Payment gateway abstraction.
//!
//! The HTTP layer only talks to [`PaymentGateway`], so tests and other
//! providers can stand in for Stripe.

use crate::error::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A card charge for one order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeRequest {
    /// Card token created by the client-side checkout
    pub source: String,
    /// Smallest currency unit, e.g. cents
    pub amount: i64,
    pub currency: String,
    pub description: String,
    /// Stored on the charge so the webhook can find the order again
    pub order_id: i32,
}

/// Trait for payment providers.
///
/// All providers must be Send + Sync so one instance can be shared by
/// every request handler.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a charge
    ///
    /// # Returns
    /// The provider's charge object, passed through to the client
    async fn create_charge(&self, request: &ChargeRequest) -> AppResult<serde_json::Value>;

    /// Returns the provider name for logging
    fn name(&self) -> &'static str;
}
