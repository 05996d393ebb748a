use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::sql_types::{Numeric, Varchar};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::cart)]
pub struct NewCart {
    pub cart_id: String,
}

/// Just enough of a `shopping_cart` row to find the owning cart.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::shopping_cart)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartLine {
    pub item_id: i32,
    pub cart_id: String,
}

/// Row of `shopping_cart_get_products`.
#[derive(Debug, Clone, QueryableByName, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::shopping_cart)]
pub struct CartItem {
    pub item_id: i32,
    #[diesel(sql_type = Varchar)]
    pub name: String,
    pub attributes: String,
    pub product_id: i32,
    #[diesel(sql_type = Numeric)]
    #[schema(value_type = String)]
    pub price: BigDecimal,
    pub quantity: i32,
    #[diesel(sql_type = diesel::sql_types::Nullable<Varchar>)]
    pub image: Option<String>,
    #[diesel(sql_type = Numeric)]
    #[schema(value_type = String)]
    pub subtotal: BigDecimal,
}

#[derive(Debug, Clone, QueryableByName, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::shopping_cart)]
pub struct SavedItem {
    pub item_id: i32,
    #[diesel(sql_type = Varchar)]
    pub name: String,
    pub attributes: String,
    #[diesel(sql_type = Numeric)]
    #[schema(value_type = String)]
    pub price: BigDecimal,
}

#[derive(Debug, Clone, QueryableByName, Serialize, ToSchema)]
pub struct CartTotal {
    #[diesel(sql_type = Numeric)]
    #[schema(value_type = String, example = "31.90")]
    pub total_amount: BigDecimal,
}
