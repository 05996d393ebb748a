use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const ATTRIBUTE_TAG: &str = "Attributes";
pub const CATEGORY_TAG: &str = "Categories";
pub const DEPARTMENT_TAG: &str = "Departments";
pub const PRODUCT_TAG: &str = "Products";
pub const CUSTOMER_TAG: &str = "Customers";
pub const ORDER_TAG: &str = "Orders";
pub const SHIPPING_TAG: &str = "Shipping";
pub const SHOPPING_CART_TAG: &str = "ShoppingCart";
pub const TAX_TAG: &str = "Tax";
pub const STRIPE_TAG: &str = "Stripe";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Turing Shop",
        description = "REST api of the Turing Shop storefront",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::MessageResponse,
            crate::error::ErrorCode,
        )
    ),
    tags(
        (name = ATTRIBUTE_TAG, description = "Product attributes and their values"),
        (name = CATEGORY_TAG, description = "Catalog categories"),
        (name = DEPARTMENT_TAG, description = "Catalog departments"),
        (name = PRODUCT_TAG, description = "Product listings, search and reviews"),
        (name = CUSTOMER_TAG, description = "Customer accounts and login"),
        (name = ORDER_TAG, description = "Orders of the authenticated customer"),
        (name = SHIPPING_TAG, description = "Shipping regions and options"),
        (name = SHOPPING_CART_TAG, description = "Anonymous shopping carts"),
        (name = TAX_TAG, description = "Tax rates"),
        (name = STRIPE_TAG, description = "Card payments and gateway webhooks"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Customer token, sent in `Authorization`, `USER-KEY` or `x-access-token`",
                        ))
                        .build(),
                ),
            )
        }
    }
}
