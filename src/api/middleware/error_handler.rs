//! Error handler for converting AppError to HTTP responses.
//!
//! Every error leaves the server in the `{"error": {...}}` envelope;
//! internal failures are logged here and reported without details.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl AppError {
    /// HTTP status the error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } | AppError::EndpointNotFound => StatusCode::NOT_FOUND,
            AppError::Duplicate { .. }
            | AppError::Validation { .. }
            | AppError::BadRequest { .. }
            | AppError::InvalidSignature { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::PaymentGateway { .. } => StatusCode::BAD_GATEWAY,
            AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        let status = self.status_code().as_u16();
        match self {
            AppError::NotFound { code, field, .. } | AppError::Duplicate { code, field, .. } => {
                ErrorResponse::new(status, code.default_message())
                    .with_code(*code)
                    .with_field(field)
            }
            AppError::Validation {
                code,
                field,
                message,
            } => ErrorResponse::new(status, message)
                .with_code(*code)
                .with_field(field),
            AppError::EndpointNotFound => ErrorResponse::message_only("Endpoint not found"),
            AppError::Unauthorized {
                code,
                message,
                field,
            } => {
                let response = ErrorResponse::new(status, message).with_code(*code);
                match field {
                    Some(field) => response.with_field(field),
                    None => response,
                }
            }
            AppError::BadRequest { message }
            | AppError::InvalidSignature { message }
            | AppError::PaymentGateway { message } => ErrorResponse::new(status, message),
            AppError::ConnectionPool { .. } => {
                ErrorResponse::new(status, "Database connection unavailable")
            }
            AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
                ErrorResponse::new(status, "An internal error occurred")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (status, Json(self.to_error_response())).into_response()
    }
}
