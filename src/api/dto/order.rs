//! Order DTOs.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::validate::{Field, FieldOrder, required, well_typed};

/// Request body of `POST /orders`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateOrderRequest {
    #[serde(default)]
    #[schema(value_type = String)]
    #[validate(
        custom(function = "required", code = "USR_02", message = "The cart id is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid Cart Id")
    )]
    pub cart_id: Field<String>,

    #[serde(default)]
    #[schema(value_type = i32, example = 2)]
    #[validate(
        custom(function = "required", code = "USR_02", message = "The shipping id is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid Shipping Id")
    )]
    pub shipping_id: Field<i32>,

    #[serde(default)]
    #[schema(value_type = i32, example = 1)]
    #[validate(
        custom(function = "required", code = "USR_02", message = "The tax id is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid Tax Id")
    )]
    pub tax_id: Field<i32>,
}

impl FieldOrder for CreateOrderRequest {
    const FIELDS: &'static [&'static str] = &["cart_id", "shipping_id", "tax_id"];
}
