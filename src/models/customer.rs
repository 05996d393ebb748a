use bigdecimal::BigDecimal;
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

/// Row of `customer_get_customer`. The password hash never leaves the server.
#[derive(Debug, Clone, QueryableByName, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::customer)]
pub struct Customer {
    pub customer_id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password: String,
    pub credit_card: Option<String>,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub shipping_region_id: i32,
    pub day_phone: Option<String>,
    pub eve_phone: Option<String>,
    pub mob_phone: Option<String>,
}

#[derive(Debug, Clone, QueryableByName)]
#[diesel(table_name = crate::schema::customer)]
pub struct LoginInfo {
    pub customer_id: i32,
    pub password: String,
}

/// Row of `customer_get_shipping_regions`.
#[derive(Debug, Clone, QueryableByName, Serialize, ToSchema)]
pub struct ShippingRegion {
    #[diesel(sql_type = diesel::sql_types::Int4)]
    pub shipping_region_id: i32,
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub shipping_region: String,
}

/// Row of `orders_get_shipping_info`.
#[derive(Debug, Clone, QueryableByName, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::shipping)]
pub struct ShippingOption {
    pub shipping_id: i32,
    pub shipping_type: String,
    #[schema(value_type = String, example = "20.00")]
    pub shipping_cost: BigDecimal,
    pub shipping_region_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::tax)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Tax {
    pub tax_id: i32,
    pub tax_type: String,
    #[schema(value_type = String, example = "8.50")]
    pub tax_percentage: BigDecimal,
}
