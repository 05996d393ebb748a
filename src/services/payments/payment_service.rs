//! Charges and payment webhooks.

use std::sync::Arc;

use serde_json::Value;

use super::gateway::{ChargeRequest, PaymentGateway};
use super::signature::verify_signature;
use crate::config::StripeConfig;
use crate::error::{AppError, AppResult};
use crate::services::OrderService;

/// Event sent once a charge has been captured
const CHARGE_SUCCEEDED: &str = "charge.succeeded";

/// Charge details as submitted by the client.
#[derive(Debug, Clone)]
pub struct ChargeInput {
    pub stripe_token: String,
    pub order_id: i32,
    pub description: String,
    pub amount: i64,
    /// Configured default when `None`
    pub currency: Option<String>,
}

#[derive(Clone)]
pub struct PaymentService {
    gateway: Arc<dyn PaymentGateway>,
    orders: OrderService,
    webhook_secret: String,
    webhook_tolerance_seconds: i64,
    default_currency: String,
}

impl PaymentService {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        orders: OrderService,
        config: &StripeConfig,
    ) -> Self {
        Self {
            gateway,
            orders,
            webhook_secret: config.webhook_secret.clone(),
            webhook_tolerance_seconds: config.webhook_tolerance_seconds,
            default_currency: config.currency.clone(),
        }
    }

    /// Charges the card for an existing order.
    pub async fn charge(&self, input: ChargeInput) -> AppResult<Value> {
        self.orders.ensure_exists(input.order_id).await?;

        let request = ChargeRequest {
            source: input.stripe_token,
            amount: input.amount,
            currency: input
                .currency
                .unwrap_or_else(|| self.default_currency.clone()),
            description: input.description,
            order_id: input.order_id,
        };
        tracing::debug!(
            gateway = self.gateway.name(),
            order_id = request.order_id,
            "Creating charge"
        );
        self.gateway.create_charge(&request).await
    }

    /// Verifies and applies a webhook event.
    ///
    /// Events other than a succeeded charge are acknowledged and ignored.
    pub async fn handle_webhook(&self, payload: &[u8], signature: &str) -> AppResult<()> {
        verify_signature(
            payload,
            signature,
            &self.webhook_secret,
            self.webhook_tolerance_seconds,
        )?;

        let event: Value = serde_json::from_slice(payload).map_err(|e| AppError::BadRequest {
            message: format!("Invalid webhook payload: {e}"),
        })?;
        let event_type = event.get("type").and_then(Value::as_str).unwrap_or_default();

        if event_type != CHARGE_SUCCEEDED {
            tracing::debug!(event_type, "Ignoring webhook event");
            return Ok(());
        }

        match charged_order_id(&event) {
            Some(order_id) => self.orders.mark_paid(order_id).await,
            None => {
                tracing::warn!("charge.succeeded event without an order id");
                Ok(())
            }
        }
    }
}

/// `data.object.metadata.order_id`, which Stripe returns as a string.
fn charged_order_id(event: &Value) -> Option<i32> {
    let raw = event.pointer("/data/object/metadata/order_id")?;
    match raw {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_charged_order_id() {
        let event = json!({"type": "charge.succeeded", "data": {"object": {"metadata": {"order_id": "42"}}}});
        assert_eq!(charged_order_id(&event), Some(42));

        let event = json!({"data": {"object": {"metadata": {"order_id": 7}}}});
        assert_eq!(charged_order_id(&event), Some(7));

        let event = json!({"data": {"object": {"metadata": {}}}});
        assert_eq!(charged_order_id(&event), None);

        let event = json!({"data": {"object": {"metadata": {"order_id": "abc"}}}});
        assert_eq!(charged_order_id(&event), None);
    }
}
