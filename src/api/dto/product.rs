//! Product review DTOs.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::utils::validate::{Field, FieldOrder, required, well_typed};

/// Request body of `POST /products/{id}/reviews`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ReviewRequest {
    #[serde(default)]
    #[schema(value_type = String, example = "Fits well, nice colour")]
    #[validate(
        custom(function = "required", code = "USR_02", message = "Review is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid review")
    )]
    pub review: Field<String>,

    #[serde(default)]
    #[schema(value_type = i64, example = 5)]
    #[validate(
        custom(function = "required", code = "USR_02", message = "Rating is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid rating")
    )]
    pub rating: Field<i64>,
}

impl FieldOrder for ReviewRequest {
    const FIELDS: &'static [&'static str] = &["review", "rating"];
}
