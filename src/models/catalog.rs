use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::sql_types::{Int2, Int4, Text, Timestamp, Varchar};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Queryable, Selectable, QueryableByName, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::department)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Department {
    pub department_id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// `catalog_get_department_details`, the id is added by the handler.
#[derive(Debug, Clone, QueryableByName)]
#[diesel(table_name = crate::schema::department)]
pub struct DepartmentDetails {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::category)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub department_id: i32,
}

/// Row of `catalog_get_categories_for_product`.
#[derive(Debug, Clone, QueryableByName, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::category)]
pub struct ProductCategory {
    pub category_id: i32,
    pub department_id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::attribute)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Attribute {
    pub attribute_id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::attribute_value)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AttributeValue {
    pub attribute_value_id: i32,
    pub value: String,
}

#[derive(Debug, Clone, QueryableByName, Serialize, ToSchema)]
pub struct ProductAttribute {
    #[diesel(sql_type = Varchar)]
    pub attribute_name: String,
    #[diesel(sql_type = Int4)]
    pub attribute_value_id: i32,
    #[diesel(sql_type = Varchar)]
    pub attribute_value: String,
}

/// Listing row with a shortened description.
#[derive(Debug, Clone, QueryableByName, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::product)]
pub struct ProductSummary {
    pub product_id: i32,
    pub name: String,
    pub description: String,
    #[schema(value_type = String, example = "14.99")]
    pub price: BigDecimal,
    #[schema(value_type = String, example = "0.00")]
    pub discounted_price: BigDecimal,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, QueryableByName, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::product)]
pub struct ProductInfo {
    pub product_id: i32,
    pub name: String,
    pub description: String,
    #[schema(value_type = String)]
    pub price: BigDecimal,
    #[schema(value_type = String)]
    pub discounted_price: BigDecimal,
    pub image: Option<String>,
    pub image_2: Option<String>,
    pub thumbnail: Option<String>,
    pub display: i16,
}

#[derive(Debug, Clone, QueryableByName, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::product)]
pub struct ProductDetails {
    pub product_id: i32,
    pub name: String,
    pub description: String,
    #[schema(value_type = String)]
    pub price: BigDecimal,
    #[schema(value_type = String)]
    pub discounted_price: BigDecimal,
    pub image: Option<String>,
    pub image_2: Option<String>,
}

#[derive(Debug, Clone, QueryableByName, Serialize, ToSchema)]
pub struct ProductLocation {
    #[diesel(sql_type = Int4)]
    pub category_id: i32,
    #[diesel(sql_type = Varchar)]
    pub category_name: String,
    #[diesel(sql_type = Int4)]
    pub department_id: i32,
    #[diesel(sql_type = Varchar)]
    pub department_name: String,
}

#[derive(Debug, Clone, QueryableByName, Serialize, ToSchema)]
pub struct ProductReview {
    #[diesel(sql_type = Varchar)]
    pub name: String,
    #[diesel(sql_type = Text)]
    pub review: String,
    #[diesel(sql_type = Int2)]
    pub rating: i16,
    #[diesel(sql_type = Timestamp)]
    #[serde(serialize_with = "super::serialize_datetime")]
    #[schema(value_type = String, example = "2025-01-10T12:30:00")]
    pub created_on: jiff_diesel::DateTime,
}
