//! Shopping cart DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::validate::{Field, FieldOrder, required, well_typed};

/// Request body of `POST /shoppingcart/add`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddToCartRequest {
    #[serde(default)]
    #[schema(value_type = String, example = "0b1e5f0c9d8a4c6e8f1a2b3c4d5e6f70")]
    #[validate(
        custom(function = "required", code = "USR_02", message = "Cart id is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid cart id")
    )]
    pub cart_id: Field<String>,

    #[serde(default)]
    #[schema(value_type = i32, example = 1)]
    #[validate(
        custom(function = "required", code = "USR_02", message = "Product id is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid product id")
    )]
    pub product_id: Field<i32>,

    #[serde(default)]
    #[schema(value_type = String, example = "LG, Red")]
    #[validate(
        custom(function = "required", code = "USR_02", message = "Attributes are required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid attributes")
    )]
    pub attributes: Field<String>,
}

impl FieldOrder for AddToCartRequest {
    const FIELDS: &'static [&'static str] = &["cart_id", "product_id", "attributes"];
}

impl AddToCartRequest {
    /// Fields checked before the cart lookup.
    pub const CHECKED_BEFORE_CART: &'static [&'static str] = &["cart_id"];

    pub fn cart_id(&self) -> Option<&str> {
        self.cart_id.value().map(String::as_str)
    }
}

/// Request body of `PUT /shoppingcart/update/{item_id}`.
///
/// A zero quantity counts as present here, it removes the line.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    #[serde(default)]
    #[schema(value_type = i32, example = 2)]
    pub quantity: serde_json::Value,
}

impl UpdateCartItemRequest {
    /// The quantity, if it is a JSON integer.
    pub fn quantity(&self) -> Option<i32> {
        self.quantity.as_i64().and_then(|n| i32::try_from(n).ok())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartIdResponse {
    #[schema(example = "0b1e5f0c9d8a4c6e8f1a2b3c4d5e6f70")]
    pub cart_id: String,
}
