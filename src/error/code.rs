//! Error codes reported to API clients.
//!
//! Every client-facing failure carries one of these codes in the
//! `error.code` field of the response body.

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use utoipa::openapi::schema::{ObjectBuilder, Schema, Type};
use utoipa::openapi::RefOr;
use utoipa::{PartialSchema, ToSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Request carries no token
    AuthEmpty,
    /// Token could not be verified
    AuthUnauthorized,
    PaginationOrderNotMatched,
    PaginationOrderNotAllowed,
    InvalidEmailPassword,
    RequiredField,
    InvalidEmail,
    EmailAlreadyExists,
    EmailNotFound,
    InvalidPhone,
    ValueTooLong,
    InvalidCard,
    InvalidShippingRegion,
    InvalidField,
    OrderNotFound,
    ProductNotFound,
    AttributeNotFound,
    CategoryNotFound,
    InvalidDepartmentId,
    DepartmentNotFound,
    TaxNotFound,
    CartNotFound,
    ItemNotFound,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::AuthEmpty => "AUT_01",
            ErrorCode::AuthUnauthorized => "AUT_02",
            ErrorCode::PaginationOrderNotMatched => "PAG_01",
            ErrorCode::PaginationOrderNotAllowed => "PAG_02",
            ErrorCode::InvalidEmailPassword => "USR_01",
            ErrorCode::RequiredField => "USR_02",
            ErrorCode::InvalidEmail => "USR_03",
            ErrorCode::EmailAlreadyExists => "USR_04",
            ErrorCode::EmailNotFound => "USR_05",
            ErrorCode::InvalidPhone => "USR_06",
            ErrorCode::ValueTooLong => "USR_07",
            ErrorCode::InvalidCard => "USR_08",
            ErrorCode::InvalidShippingRegion => "USR_09",
            ErrorCode::InvalidField => "USR_10",
            ErrorCode::OrderNotFound => "ORD_01",
            ErrorCode::ProductNotFound => "PRO_01",
            ErrorCode::AttributeNotFound => "ATT_01",
            ErrorCode::CategoryNotFound => "CAT_01",
            ErrorCode::InvalidDepartmentId => "DEP_01",
            ErrorCode::DepartmentNotFound => "DEP_02",
            ErrorCode::TaxNotFound => "TAX_01",
            ErrorCode::CartNotFound => "CAR_01",
            ErrorCode::ItemNotFound => "ITM_01",
        }
    }

    /// Looks a code up by its wire form, e.g. `"USR_02"`.
    pub fn from_code(code: &str) -> Option<Self> {
        ALL_CODES.iter().copied().find(|c| c.as_str() == code)
    }

    /// Message used when an error is raised without an explicit one.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::AuthEmpty => "Request has no Token, Please Login or SignUp",
            ErrorCode::AuthUnauthorized => "Invalid Token, Please Login or SignUp",
            ErrorCode::PaginationOrderNotMatched => "Invalid order",
            ErrorCode::PaginationOrderNotAllowed => "Order is not allowed",
            ErrorCode::InvalidEmailPassword => "Invalid password",
            ErrorCode::RequiredField => "Field is required",
            ErrorCode::InvalidEmail => "Invalid Email",
            ErrorCode::EmailAlreadyExists => "Email already exists",
            ErrorCode::EmailNotFound => "User with email does not exist",
            ErrorCode::InvalidPhone => "Invalid phone number",
            ErrorCode::ValueTooLong => "Value is too long",
            ErrorCode::InvalidCard => "Invalid credit card details",
            ErrorCode::InvalidShippingRegion => "Shipping Region with Id does not exist",
            ErrorCode::InvalidField => "Invalid field",
            ErrorCode::OrderNotFound => "Order with Id does not exist",
            ErrorCode::ProductNotFound => "Product with Id does not exist",
            ErrorCode::AttributeNotFound => "Attribute with Id does not exist",
            ErrorCode::CategoryNotFound => "Category with id does not exist",
            ErrorCode::InvalidDepartmentId => "Invalid department id",
            ErrorCode::DepartmentNotFound => "Department with Id does not exist",
            ErrorCode::TaxNotFound => "Tax with Id does not exist",
            ErrorCode::CartNotFound => "Cart with Id does not exist",
            ErrorCode::ItemNotFound => "Item with Id does not exist",
        }
    }
}

const ALL_CODES: [ErrorCode; 23] = [
    ErrorCode::AuthEmpty,
    ErrorCode::AuthUnauthorized,
    ErrorCode::PaginationOrderNotMatched,
    ErrorCode::PaginationOrderNotAllowed,
    ErrorCode::InvalidEmailPassword,
    ErrorCode::RequiredField,
    ErrorCode::InvalidEmail,
    ErrorCode::EmailAlreadyExists,
    ErrorCode::EmailNotFound,
    ErrorCode::InvalidPhone,
    ErrorCode::ValueTooLong,
    ErrorCode::InvalidCard,
    ErrorCode::InvalidShippingRegion,
    ErrorCode::InvalidField,
    ErrorCode::OrderNotFound,
    ErrorCode::ProductNotFound,
    ErrorCode::AttributeNotFound,
    ErrorCode::CategoryNotFound,
    ErrorCode::InvalidDepartmentId,
    ErrorCode::DepartmentNotFound,
    ErrorCode::TaxNotFound,
    ErrorCode::CartNotFound,
    ErrorCode::ItemNotFound,
];

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Documented as the string codes clients see, not the variant names.
impl PartialSchema for ErrorCode {
    fn schema() -> RefOr<Schema> {
        ObjectBuilder::new()
            .schema_type(Type::String)
            .enum_values(Some(ALL_CODES.iter().map(ErrorCode::as_str)))
            .examples([ErrorCode::RequiredField.as_str()])
            .into()
    }
}

impl ToSchema for ErrorCode {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("ErrorCode")
    }
}
