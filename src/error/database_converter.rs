use crate::error::{AppError, ErrorCode};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use regex::Regex;
use std::sync::LazyLock;

/// Matches the `Key (column)=(value)` detail PostgreSQL attaches to
/// constraint violations.
static KEY_DETAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("invalid key detail regex")
});

static COLUMN_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"column "([^"]+)""#).expect("invalid column regex")
});

/// Unique index behind `customer.email`, the only violation reported as USR_04.
pub const CUSTOMER_EMAIL_CONSTRAINT: &str = "customer_email_key";

/// Utility for converting database errors to structured AppError variants.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::EndpointNotFound,
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let details = info.details().unwrap_or(message);

        match kind {
            DatabaseErrorKind::UniqueViolation => {
                let email_taken = info.constraint_name() == Some(CUSTOMER_EMAIL_CONSTRAINT);
                match Self::key_value(details) {
                    Some((field, value)) if email_taken => AppError::Duplicate {
                        code: ErrorCode::EmailAlreadyExists,
                        field,
                        value,
                    },
                    Some((field, _)) => {
                        let message = format!("The {} already exists", field.replace('_', " "));
                        AppError::Validation {
                            code: ErrorCode::InvalidField,
                            field,
                            message,
                        }
                    }
                    None => Self::database(operation, "Unique constraint violation", message),
                }
            }
            DatabaseErrorKind::ForeignKeyViolation => match Self::key_value(details) {
                Some((field, _)) => {
                    let message = format!("Invalid {}", field.replace('_', " "));
                    AppError::Validation {
                        code: ErrorCode::InvalidField,
                        field,
                        message,
                    }
                }
                None => Self::database(operation, "Foreign key constraint violation", message),
            },
            DatabaseErrorKind::NotNullViolation => {
                let column = info
                    .column_name()
                    .map(str::to_string)
                    .or_else(|| Self::column(message));
                match column {
                    Some(field) => {
                        let message = format!("The {} field is required", field.replace('_', " "));
                        AppError::Validation {
                            code: ErrorCode::RequiredField,
                            field,
                            message,
                        }
                    }
                    None => Self::database(operation, "Not null constraint violation", message),
                }
            }
            _ => Self::database(operation, "Database error", message),
        }
    }

    /// Pulls `(column, value)` out of a constraint violation detail.
    pub fn key_value(details: &str) -> Option<(String, String)> {
        KEY_DETAIL
            .captures(details)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
    }

    fn column(message: &str) -> Option<String> {
        COLUMN_NAME.captures(message).map(|caps| caps[1].to_string())
    }

    fn database(operation: &str, prefix: &str, message: &str) -> AppError {
        AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::msg(format!("{}: {}", prefix, message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
        details: Option<String>,
        column: Option<String>,
        constraint: Option<String>,
    }

    impl DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            self.details.as_deref()
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            self.column.as_deref()
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn db_error(kind: DatabaseErrorKind, message: &str, details: Option<&str>) -> DieselError {
        constraint_error(kind, message, details, None)
    }

    fn constraint_error(
        kind: DatabaseErrorKind,
        message: &str,
        details: Option<&str>,
        constraint: Option<&str>,
    ) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(MockDatabaseErrorInfo {
                message: message.to_string(),
                details: details.map(str::to_string),
                column: None,
                constraint: constraint.map(str::to_string),
            }),
        )
    }

    #[test]
    fn test_convert_not_found_error() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find");
        assert!(matches!(result, AppError::EndpointNotFound));
    }

    #[test]
    fn test_unique_violation_becomes_duplicate_email() {
        let error = constraint_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"customer_email_key\"",
            Some("Key (email)=(ada@example.com) already exists."),
            Some(CUSTOMER_EMAIL_CONSTRAINT),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert customer") {
            AppError::Duplicate { code, field, value } => {
                assert_eq!(code, ErrorCode::EmailAlreadyExists);
                assert_eq!(field, "email");
                assert_eq!(value, "ada@example.com");
            }
            other => panic!("Expected Duplicate error, got: {:?}", other),
        }
    }

    #[test]
    fn test_other_unique_violations_are_not_email_errors() {
        let error = constraint_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"product_category_pkey\"",
            Some("Key (product_id, category_id)=(1, 2) already exists."),
            Some("product_category_pkey"),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "assign category") {
            AppError::Validation { code, field, .. } => {
                assert_eq!(code, ErrorCode::InvalidField);
                assert_eq!(field, "product_id, category_id");
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_foreign_key_violation_names_column() {
        let error = db_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "insert or update on table \"orders\" violates foreign key constraint",
            Some("Key (shipping_id)=(999) is not present in table \"shipping\"."),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "create order") {
            AppError::Validation { code, field, message } => {
                assert_eq!(code, ErrorCode::InvalidField);
                assert_eq!(field, "shipping_id");
                assert_eq!(message, "Invalid shipping id");
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_not_null_violation_reads_column_from_message() {
        let error = db_error(
            DatabaseErrorKind::NotNullViolation,
            "null value in column \"city\" of relation \"customer\" violates not-null constraint",
            None,
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "update address") {
            AppError::Validation { code, field, .. } => {
                assert_eq!(code, ErrorCode::RequiredField);
                assert_eq!(field, "city");
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_violation_is_database_error() {
        let error = db_error(DatabaseErrorKind::UniqueViolation, "something odd", None);
        assert!(matches!(
            DatabaseErrorConverter::convert_diesel_error(error, "op"),
            AppError::Database { .. }
        ));
    }

    #[test]
    fn test_key_value_handles_empty_value() {
        assert_eq!(
            DatabaseErrorConverter::key_value("Key (attributes)=() already exists."),
            Some(("attributes".to_string(), String::new()))
        );
    }
}
