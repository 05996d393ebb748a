//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod cart_service;
mod catalog_service;
mod customer_service;
mod order_service;
pub mod payments;
mod product_service;
mod shipping_service;

pub use cart_service::CartService;
pub use catalog_service::{CatalogService, Paged};
pub use customer_service::{AccountChanges, CustomerService, Registration, Session};
pub use order_service::OrderService;
pub use payments::{ChargeInput, PaymentGateway, PaymentService, StripeGateway};
pub use product_service::{PageRequest, ProductPage, ProductService};
pub use shipping_service::ShippingService;

use std::sync::Arc;

use crate::config::{JwtConfig, StripeConfig};
use crate::error::AppResult;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub catalog: CatalogService,
    pub products: ProductService,
    pub customers: CustomerService,
    pub orders: OrderService,
    pub carts: CartService,
    pub shipping: ShippingService,
    pub payments: PaymentService,
}

impl Services {
    /// Creates the services with the Stripe gateway.
    pub fn new(repos: Repositories, jwt: JwtConfig, stripe: &StripeConfig) -> AppResult<Self> {
        let gateway: Arc<dyn PaymentGateway> = Arc::new(StripeGateway::new(stripe)?);
        Ok(Self::with_gateway(repos, jwt, stripe, gateway))
    }

    /// Creates the services around a given payment gateway.
    pub fn with_gateway(
        repos: Repositories,
        jwt: JwtConfig,
        stripe: &StripeConfig,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        let orders = OrderService::new(repos.orders);

        Self {
            catalog: CatalogService::new(repos.catalog.clone()),
            products: ProductService::new(repos.products.clone(), repos.catalog),
            customers: CustomerService::new(repos.customers, jwt),
            carts: CartService::new(repos.carts, repos.products),
            shipping: ShippingService::new(repos.shipping),
            payments: PaymentService::new(gateway, orders.clone(), stripe),
            orders,
        }
    }
}
