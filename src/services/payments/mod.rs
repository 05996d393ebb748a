//! Payments with a pluggable gateway.
//!
//! `PaymentGateway` is the provider seam; `StripeGateway` is the only
//! implementation shipped.

mod gateway;
mod signature;
mod stripe_gateway;

pub mod payment_service;

pub use gateway::{ChargeRequest, PaymentGateway};
pub use payment_service::{ChargeInput, PaymentService};
pub use signature::verify_signature;
pub use stripe_gateway::StripeGateway;
