//! Middleware components for request processing.
//!
//! This module contains middleware for logging, request ID tracking,
//! body trimming and error rendering, and the authentication extractor.

mod auth;
mod error_handler;
mod logging;
mod request_id;
mod trim;

pub use auth::AuthCustomer;
pub use logging::logging_middleware;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use trim::trim_body_middleware;
