//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain; rows that go out unchanged are returned
//! as the models themselves.

mod cart;
mod customer;
mod error;
mod health;
mod order;
mod pagination;
mod product;
mod stripe;

pub use cart::{AddToCartRequest, CartIdResponse, UpdateCartItemRequest};
pub use customer::{
    AddressRequest, AuthResponse, CreditCardRequest, CustomerSchema, LoginRequest,
    RegisterRequest, UpdateCustomerRequest,
};
pub use error::{ErrorBody, ErrorResponse, MessageResponse};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use order::CreateOrderRequest;
pub use pagination::{CategoryListQuery, CategoryPage, CountedRows, ProductListQuery, SearchQuery};
pub use product::ReviewRequest;
pub use stripe::{ChargeRequestBody, WebhookAck};
