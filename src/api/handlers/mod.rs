//! HTTP request handlers for API endpoints.
//!
//! One module per resource. Each exposes an `OpenApiRouter` whose paths
//! are relative to `/api/v1`.

pub mod attributes;
pub mod categories;
pub mod customers;
pub mod departments;
pub mod health;
pub mod orders;
pub mod products;
pub mod shipping;
pub mod shopping_cart;
pub mod stripe;
pub mod tax;

use utoipa_axum::router::OpenApiRouter;

use crate::state::AppState;

/// Every resource router merged together.
pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(health::health_routes())
        .merge(attributes::attribute_routes())
        .merge(categories::category_routes())
        .merge(departments::department_routes())
        .merge(products::product_routes())
        .merge(customers::customer_routes())
        .merge(orders::order_routes())
        .merge(shipping::shipping_routes())
        .merge(tax::tax_routes())
        .merge(shopping_cart::shopping_cart_routes())
        .merge(stripe::stripe_routes())
}
