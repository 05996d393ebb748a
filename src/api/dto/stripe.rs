//! Payment DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::services::ChargeInput;
use crate::utils::validate::{Field, FieldOrder, required, well_typed};

/// Request body of `POST /stripe/charge`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ChargeRequestBody {
    /// Card token from Stripe.js
    #[serde(default, rename = "stripeToken")]
    #[schema(value_type = String, example = "tok_visa")]
    #[validate(
        custom(function = "required", code = "USR_02", message = "Stripe token is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid stripe token")
    )]
    pub stripe_token: Field<String>,

    #[serde(default)]
    #[schema(value_type = i32, example = 1)]
    #[validate(
        custom(function = "required", code = "USR_02", message = "Order id is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid order id")
    )]
    pub order_id: Field<i32>,

    #[serde(default)]
    #[schema(value_type = String)]
    #[validate(
        custom(function = "required", code = "USR_02", message = "Description is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid description")
    )]
    pub description: Field<String>,

    /// In the smallest currency unit
    #[serde(default)]
    #[schema(value_type = i64, example = 1999)]
    #[validate(
        custom(function = "required", code = "USR_02", message = "Amount is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid amount")
    )]
    pub amount: Field<i64>,

    #[serde(default)]
    #[schema(value_type = Option<String>, example = "usd")]
    #[validate(custom(function = "well_typed", code = "USR_10", message = "Invalid currency"))]
    pub currency: Field<String>,
}

impl FieldOrder for ChargeRequestBody {
    const FIELDS: &'static [&'static str] =
        &["stripe_token", "order_id", "description", "amount", "currency"];

    fn wire_name(field: &'static str) -> &'static str {
        match field {
            "stripe_token" => "stripeToken",
            other => other,
        }
    }
}

impl ChargeRequestBody {
    /// Fields checked before the order lookup.
    pub const CHECKED_BEFORE_ORDER: &'static [&'static str] = &["stripe_token", "order_id"];

    pub fn order_id(&self) -> Option<i32> {
        self.order_id.value().copied()
    }

    pub fn into_input(self) -> ChargeInput {
        ChargeInput {
            stripe_token: self.stripe_token.into_value().unwrap_or_default(),
            order_id: self.order_id.into_value().unwrap_or_default(),
            description: self.description.into_value().unwrap_or_default(),
            amount: self.amount.into_value().unwrap_or_default(),
            currency: self.currency.into_value(),
        }
    }
}

/// Acknowledgement of a webhook event.
#[derive(Debug, Serialize, ToSchema)]
pub struct WebhookAck {
    pub received: bool,
}
