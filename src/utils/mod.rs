//! Small helpers shared by services and handlers.

pub mod jwt;
pub mod password;
pub mod validate;
