mod app_error;
mod code;
mod database_converter;

pub use app_error::{AppError, AppResult};
pub use code::ErrorCode;
pub use database_converter::DatabaseErrorConverter;
