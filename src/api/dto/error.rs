//! Error response DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ErrorCode;

/// Standard error response format.
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "error": {
        "status": 400,
        "code": "USR_02",
        "message": "The email field is required",
        "field": "email"
    }
}))]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    pub message: String,
    /// Request field or path parameter at fault
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with status and message.
    pub fn new(status: u16, message: &str) -> Self {
        Self {
            error: ErrorBody {
                status: Some(status),
                code: None,
                message: message.to_string(),
                field: None,
            },
        }
    }

    /// Body that carries nothing but a message.
    pub fn message_only(message: &str) -> Self {
        Self {
            error: ErrorBody {
                status: None,
                code: None,
                message: message.to_string(),
                field: None,
            },
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.error.code = Some(code);
        self
    }

    pub fn with_field(mut self, field: &str) -> Self {
        self.error.field = Some(field.to_string());
        self
    }
}

/// Plain `{"message": ...}` body.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_envelope() {
        let response = ErrorResponse::new(404, "Product with Id does not exist")
            .with_code(ErrorCode::ProductNotFound)
            .with_field("id");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error": {
                "status": 404,
                "code": "PRO_01",
                "message": "Product with Id does not exist",
                "field": "id"
            }})
        );
    }

    #[test]
    fn test_message_only_envelope() {
        let response = ErrorResponse::message_only("Endpoint not found");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"error": {"message": "Endpoint not found"}})
        );
    }
}
