//! Repository layer for data access operations.
//!
//! Every method borrows a pooled connection for the duration of one query
//! or routine call.

mod cart_repo;
mod catalog_repo;
mod customer_repo;
mod order_repo;
mod product_repo;
mod shipping_repo;

pub use cart_repo::CartRepository;
pub use catalog_repo::CatalogRepository;
pub use customer_repo::{AccountUpdate, AddressUpdate, CustomerRepository};
pub use order_repo::{ORDER_STATUS_PAID, OrderRepository};
pub use product_repo::{ListWindow, ProductRepository};
pub use shipping_repo::ShippingRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub catalog: CatalogRepository,
    pub products: ProductRepository,
    pub customers: CustomerRepository,
    pub orders: OrderRepository,
    pub carts: CartRepository,
    pub shipping: ShippingRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            catalog: CatalogRepository::new(pool.clone()),
            products: ProductRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool.clone()),
            orders: OrderRepository::new(pool.clone()),
            carts: CartRepository::new(pool.clone()),
            shipping: ShippingRepository::new(pool),
        }
    }
}
