use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::sql_types::{Int4, Numeric};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, QueryableByName, Serialize, ToSchema)]
pub struct CreatedOrder {
    #[diesel(sql_type = Int4)]
    pub order_id: i32,
}

/// Row of `orders_get_order_details`.
#[derive(Debug, Clone, QueryableByName, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::order_detail)]
pub struct OrderLine {
    pub order_id: i32,
    pub product_id: i32,
    pub attributes: String,
    pub product_name: String,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub unit_cost: BigDecimal,
    #[diesel(sql_type = Numeric)]
    #[schema(value_type = String)]
    pub subtotal: BigDecimal,
}

/// Row of `orders_get_order_short_details` and `orders_get_by_customer_id`.
#[derive(Debug, Clone, QueryableByName, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::orders)]
pub struct OrderSummary {
    pub order_id: i32,
    #[schema(value_type = String)]
    pub total_amount: BigDecimal,
    #[serde(serialize_with = "super::serialize_datetime")]
    #[schema(value_type = String)]
    pub created_on: jiff_diesel::DateTime,
    #[serde(serialize_with = "super::serialize_optional_datetime")]
    #[schema(value_type = Option<String>)]
    pub shipped_on: Option<jiff_diesel::DateTime>,
    pub status: i32,
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub name: String,
}
