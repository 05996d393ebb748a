//! Stripe charges API.

use super::gateway::{ChargeRequest, PaymentGateway};
use crate::config::StripeConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::build_client;
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Creates charges through `POST {api_base}/v1/charges`.
pub struct StripeGateway {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeGateway {
    pub fn new(config: &StripeConfig) -> AppResult<Self> {
        Ok(Self {
            client: build_client(Duration::from_secs(config.timeout_seconds))?,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
        })
    }

    fn charges_url(&self) -> String {
        format!("{}/v1/charges", self.api_base)
    }
}

fn charge_form(request: &ChargeRequest) -> Vec<(&'static str, String)> {
    vec![
        ("amount", request.amount.to_string()),
        ("currency", request.currency.clone()),
        ("source", request.source.clone()),
        ("description", request.description.clone()),
        ("metadata[order_id]", request.order_id.to_string()),
    ]
}

/// Pulls `error.message` out of a Stripe error body.
fn error_message(body: &serde_json::Value) -> Option<&str> {
    body.get("error")?.get("message")?.as_str()
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_charge(&self, request: &ChargeRequest) -> AppResult<serde_json::Value> {
        let start = Instant::now();

        let response = self
            .client
            .post(self.charges_url())
            .bearer_auth(&self.secret_key)
            .form(&charge_form(request))
            .send()
            .await
            .map_err(|e| AppError::PaymentGateway {
                message: format!("Stripe request failed: {e}"),
            })?;

        let status = response.status();
        let body: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| AppError::PaymentGateway {
                    message: format!("Unreadable Stripe response: {e}"),
                })?;
        let duration_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or("Stripe rejected the charge")
                .to_string();
            tracing::warn!(
                order_id = request.order_id,
                status = status.as_u16(),
                duration_ms,
                %message,
                "Charge failed"
            );
            return Err(AppError::PaymentGateway { message });
        }

        tracing::info!(
            order_id = request.order_id,
            amount = request.amount,
            duration_ms,
            "Charge created"
        );
        Ok(body)
    }

    fn name(&self) -> &'static str {
        "stripe"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> ChargeRequest {
        ChargeRequest {
            source: "tok_visa".to_string(),
            amount: 1999,
            currency: "usd".to_string(),
            description: "Order 7".to_string(),
            order_id: 7,
        }
    }

    #[test]
    fn test_charge_form_carries_order_metadata() {
        let form = charge_form(&request());
        assert!(form.contains(&("metadata[order_id]", "7".to_string())));
        assert!(form.contains(&("amount", "1999".to_string())));
        assert!(form.contains(&("source", "tok_visa".to_string())));
    }

    #[test]
    fn test_charges_url_ignores_trailing_slash() {
        let config = StripeConfig {
            api_base: "https://api.stripe.test/".to_string(),
            ..StripeConfig::default()
        };
        let gateway = StripeGateway::new(&config).unwrap();
        assert_eq!(gateway.charges_url(), "https://api.stripe.test/v1/charges");
        assert_eq!(gateway.name(), "stripe");
    }

    #[test]
    fn test_error_message() {
        let body = json!({"error": {"type": "card_error", "message": "Your card was declined."}});
        assert_eq!(error_message(&body), Some("Your card was declined."));
        assert_eq!(error_message(&json!({})), None);
    }
}
