use crate::error::{DatabaseErrorConverter, ErrorCode};
use diesel_async::pooled_connection::PoolError;
use thiserror::Error;

/// Application-wide error type that represents all possible errors in the system.
///
/// Client-facing variants carry an [`ErrorCode`] and the name of the field
/// that caused the failure so the HTTP layer can render them unchanged.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource lookup that came back empty
    #[error("Resource not found: {code} with {field}={value}")]
    NotFound {
        code: ErrorCode,
        field: String,
        value: String,
    },

    /// Unique value already taken by another row
    #[error("Duplicate entry: {field} = '{value}' already exists")]
    Duplicate {
        code: ErrorCode,
        field: String,
        value: String,
    },

    /// Request field failed validation
    #[error("Validation failed for {field}: {message}")]
    Validation {
        code: ErrorCode,
        field: String,
        message: String,
    },

    /// Path id that is not a number
    #[error("Endpoint not found")]
    EndpointNotFound,

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Missing token, bad token or wrong credentials
    #[error("Unauthorized: {message}")]
    Unauthorized {
        code: ErrorCode,
        message: String,
        field: Option<String>,
    },

    /// Webhook payload whose signature does not verify
    #[error("Invalid signature: {message}")]
    InvalidSignature { message: String },

    /// Payment provider rejected the call or could not be reached
    #[error("Payment gateway error: {message}")]
    PaymentGateway { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Connection pool error
    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn not_found(code: ErrorCode, field: &str, value: impl ToString) -> Self {
        AppError::NotFound {
            code,
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn validation(code: ErrorCode, field: &str, message: &str) -> Self {
        AppError::Validation {
            code,
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Name of the request field the error points at, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            AppError::NotFound { field, .. }
            | AppError::Duplicate { field, .. }
            | AppError::Validation { field, .. } => Some(field),
            AppError::Unauthorized { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    /// 401 for requests without a token
    pub fn missing_token() -> Self {
        AppError::Unauthorized {
            code: ErrorCode::AuthEmpty,
            message: ErrorCode::AuthEmpty.default_message().to_string(),
            field: None,
        }
    }

    /// 401 for tokens that fail verification
    pub fn invalid_token() -> Self {
        AppError::Unauthorized {
            code: ErrorCode::AuthUnauthorized,
            message: ErrorCode::AuthUnauthorized.default_message().to_string(),
            field: None,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<bb8::RunError<PoolError>> for AppError {
    fn from(error: bb8::RunError<PoolError>) -> Self {
        AppError::ConnectionPool {
            source: anyhow::anyhow!("{}", error),
        }
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(error: crate::config::ConfigError) -> Self {
        let key = match &error {
            crate::config::ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::from(error),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        AppError::invalid_token()
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_includes_code() {
        let err = AppError::not_found(ErrorCode::ProductNotFound, "id", 42);
        assert_eq!(err.to_string(), "Resource not found: PRO_01 with id=42");
    }

    #[test]
    fn test_field_of_validation_error() {
        let err = AppError::validation(ErrorCode::InvalidField, "amount", "Invalid amount");
        assert_eq!(err.field(), Some("amount"));
        assert_eq!(AppError::EndpointNotFound.field(), None);
    }

    #[test]
    fn test_auth_constructors() {
        match AppError::missing_token() {
            AppError::Unauthorized { code, message, field } => {
                assert_eq!(code, ErrorCode::AuthEmpty);
                assert_eq!(message, "Request has no Token, Please Login or SignUp");
                assert!(field.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            AppError::invalid_token(),
            AppError::Unauthorized { code: ErrorCode::AuthUnauthorized, .. }
        ));
    }

    #[test]
    fn test_config_error_keeps_field_as_key() {
        let err: AppError = crate::config::ConfigError::validation("jwt.secret", "too short").into();
        match err {
            AppError::Configuration { key, .. } => assert_eq!(key, "jwt.secret"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
