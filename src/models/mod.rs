//! Rows read from tables and from the database routines.
//!
//! Most structs here are returned to clients unchanged, so they derive
//! `Serialize` and `ToSchema` next to the diesel traits.

mod cart;
mod catalog;
mod customer;
mod order;

pub use cart::{CartItem, CartLine, CartTotal, NewCart, SavedItem};
pub use catalog::{
    Attribute, AttributeValue, Category, Department, DepartmentDetails, ProductAttribute,
    ProductCategory, ProductDetails, ProductInfo, ProductLocation, ProductReview, ProductSummary,
};
pub use customer::{Customer, LoginInfo, ShippingOption, ShippingRegion, Tax};
pub use order::{CreatedOrder, OrderLine, OrderSummary};

use diesel::QueryableByName;
use diesel::sql_types::BigInt;
use serde::Serializer;

/// Single `count` column, used for every `*_count` routine.
#[derive(Debug, QueryableByName)]
pub struct RowCount {
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

/// Writes a database timestamp as ISO 8601 without offset.
pub(crate) fn serialize_datetime<S>(value: &jiff_diesel::DateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.to_jiff())
}

pub(crate) fn serialize_optional_datetime<S>(
    value: &Option<jiff_diesel::DateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => serializer.collect_str(&value.to_jiff()),
        None => serializer.serialize_none(),
    }
}
