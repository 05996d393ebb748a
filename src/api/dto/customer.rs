//! Customer account DTOs.
//!
//! Request fields are loosely typed [`Field`]s; see `utils::validate`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppResult;
use crate::models::Customer;
use crate::repositories::AddressUpdate;
use crate::services::{AccountChanges, Registration, Session};
use crate::utils::validate::{
    Field, FieldOrder, Text, contact_length, email_format, required, well_typed,
};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body of `POST /customers`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[schema(value_type = String, example = "Ada Lovelace")]
    #[validate(
        custom(function = "required", code = "USR_02", message = "The name field is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid name")
    )]
    pub name: Field<String>,

    #[serde(default)]
    #[schema(value_type = String, format = "email", example = "ada@example.com")]
    #[validate(
        custom(function = "required", code = "USR_02", message = "The email field is required"),
        custom(function = "well_typed", code = "USR_03", message = "Invalid Email"),
        custom(function = "email_format", code = "USR_03", message = "Invalid Email")
    )]
    pub email: Field<String>,

    #[serde(default)]
    #[schema(value_type = String, format = "password")]
    #[validate(
        custom(function = "required", code = "USR_02", message = "The password field is required"),
        custom(function = "well_typed", code = "USR_01", message = "Invalid Password")
    )]
    pub password: Field<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>, example = "5550100200")]
    #[validate(
        custom(function = "well_typed", code = "USR_06", message = "Invalid phone number"),
        custom(function = "contact_length", code = "USR_06", message = "Invalid phone number")
    )]
    pub day_phone: Field<Text>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    #[validate(
        custom(function = "well_typed", code = "USR_06", message = "Invalid phone number"),
        custom(function = "contact_length", code = "USR_06", message = "Invalid phone number")
    )]
    pub eve_phone: Field<Text>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    #[validate(
        custom(function = "well_typed", code = "USR_06", message = "Invalid phone number"),
        custom(function = "contact_length", code = "USR_06", message = "Invalid phone number")
    )]
    pub mob_phone: Field<Text>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    #[validate(
        custom(function = "well_typed", code = "USR_08", message = "Invalid credit card details"),
        custom(function = "contact_length", code = "USR_08", message = "Invalid credit card details")
    )]
    pub credit_card: Field<Text>,
}

impl FieldOrder for RegisterRequest {
    const FIELDS: &'static [&'static str] = &[
        "name",
        "email",
        "password",
        "day_phone",
        "eve_phone",
        "mob_phone",
        "credit_card",
    ];
}

impl RegisterRequest {
    pub fn into_registration(self) -> AppResult<Registration> {
        Ok(Registration {
            name: self.name.require("name")?,
            email: self.email.require("email")?,
            password: self.password.require("password")?,
            day_phone: self.day_phone.into_text(),
            eve_phone: self.eve_phone.into_text(),
            mob_phone: self.mob_phone.into_text(),
            credit_card: self.credit_card.into_text(),
        })
    }
}

/// Request body of `POST /customers/login`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(value_type = String, format = "email", example = "ada@example.com")]
    #[validate(
        custom(function = "required", code = "USR_02", message = "The email field is required"),
        custom(function = "well_typed", code = "USR_03", message = "Invalid Email"),
        custom(function = "email_format", code = "USR_03", message = "Invalid Email")
    )]
    pub email: Field<String>,

    #[serde(default)]
    #[schema(value_type = String, format = "password")]
    #[validate(
        custom(function = "required", code = "USR_02", message = "The password field is required"),
        custom(function = "well_typed", code = "USR_01", message = "Invalid Password")
    )]
    pub password: Field<String>,
}

impl FieldOrder for LoginRequest {
    const FIELDS: &'static [&'static str] = &["email", "password"];
}

impl LoginRequest {
    pub fn credentials(&self) -> (&str, &str) {
        (
            self.email.value().map(String::as_str).unwrap_or_default(),
            self.password.value().map(String::as_str).unwrap_or_default(),
        )
    }
}

/// Request body of `PUT /customer`. Omitting the password keeps it.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateCustomerRequest {
    #[serde(default)]
    #[schema(value_type = String)]
    #[validate(
        custom(function = "required", code = "USR_02", message = "The name field is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid name")
    )]
    pub name: Field<String>,

    #[serde(default)]
    #[schema(value_type = String, format = "email")]
    #[validate(
        custom(function = "required", code = "USR_02", message = "The email field is required"),
        custom(function = "well_typed", code = "USR_03", message = "Invalid Email"),
        custom(function = "email_format", code = "USR_03", message = "Invalid Email")
    )]
    pub email: Field<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>, format = "password")]
    #[validate(custom(function = "well_typed", code = "USR_01", message = "Invalid Password"))]
    pub password: Field<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    #[validate(
        custom(function = "well_typed", code = "USR_06", message = "Invalid phone number"),
        custom(function = "contact_length", code = "USR_06", message = "Invalid phone number")
    )]
    pub day_phone: Field<Text>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    #[validate(
        custom(function = "well_typed", code = "USR_06", message = "Invalid phone number"),
        custom(function = "contact_length", code = "USR_06", message = "Invalid phone number")
    )]
    pub eve_phone: Field<Text>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    #[validate(
        custom(function = "well_typed", code = "USR_06", message = "Invalid phone number"),
        custom(function = "contact_length", code = "USR_06", message = "Invalid phone number")
    )]
    pub mob_phone: Field<Text>,
}

impl FieldOrder for UpdateCustomerRequest {
    const FIELDS: &'static [&'static str] = &[
        "name",
        "email",
        "password",
        "day_phone",
        "eve_phone",
        "mob_phone",
    ];
}

impl UpdateCustomerRequest {
    pub fn into_changes(self) -> AppResult<AccountChanges> {
        Ok(AccountChanges {
            name: self.name.require("name")?,
            email: self.email.require("email")?,
            password: self.password.into_value(),
            day_phone: self.day_phone.into_text(),
            eve_phone: self.eve_phone.into_text(),
            mob_phone: self.mob_phone.into_text(),
        })
    }
}

/// Request body of `PUT /customers/address`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddressRequest {
    #[serde(default)]
    #[schema(value_type = String)]
    #[validate(
        custom(function = "required", code = "USR_02", message = "The address field is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid Address")
    )]
    pub address_1: Field<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    #[validate(custom(function = "well_typed", code = "USR_10", message = "Invalid Address"))]
    pub address_2: Field<String>,

    #[serde(default)]
    #[schema(value_type = String)]
    #[validate(
        custom(function = "required", code = "USR_02", message = "The city field is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid City")
    )]
    pub city: Field<String>,

    #[serde(default)]
    #[schema(value_type = String)]
    #[validate(
        custom(function = "required", code = "USR_02", message = "The region field is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid Region")
    )]
    pub region: Field<String>,

    #[serde(default)]
    #[schema(value_type = String)]
    #[validate(
        custom(function = "required", code = "USR_02", message = "The postal code field is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid Postal Code")
    )]
    pub postal_code: Field<String>,

    #[serde(default)]
    #[schema(value_type = String)]
    #[validate(
        custom(function = "required", code = "USR_02", message = "The country field is required"),
        custom(function = "well_typed", code = "USR_10", message = "Invalid Country")
    )]
    pub country: Field<String>,

    #[serde(default)]
    #[schema(value_type = i32, example = 2)]
    #[validate(
        custom(function = "required", code = "USR_09", message = "The shipping region field is required"),
        custom(function = "well_typed", code = "USR_09", message = "Invalid Shipping Region")
    )]
    pub shipping_region_id: Field<i32>,
}

impl FieldOrder for AddressRequest {
    const FIELDS: &'static [&'static str] = &[
        "address_1",
        "address_2",
        "city",
        "region",
        "postal_code",
        "country",
        "shipping_region_id",
    ];
}

impl AddressRequest {
    pub fn into_update(self) -> AddressUpdate {
        AddressUpdate {
            address_1: self.address_1.into_value().unwrap_or_default(),
            address_2: self.address_2.into_value(),
            city: self.city.into_value().unwrap_or_default(),
            region: self.region.into_value().unwrap_or_default(),
            postal_code: self.postal_code.into_value().unwrap_or_default(),
            country: self.country.into_value().unwrap_or_default(),
            shipping_region_id: self.shipping_region_id.into_value().unwrap_or_default(),
        }
    }
}

/// Request body of `PUT /customers/creditCard`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreditCardRequest {
    #[serde(default)]
    #[schema(value_type = String, example = "4242424242424242")]
    #[validate(
        custom(function = "required", code = "USR_02", message = "The credit card field is required"),
        custom(function = "well_typed", code = "USR_08", message = "Invalid credit card details"),
        custom(function = "contact_length", code = "USR_08", message = "Invalid credit card details")
    )]
    pub credit_card: Field<Text>,
}

impl FieldOrder for CreditCardRequest {
    const FIELDS: &'static [&'static str] = &["credit_card"];
}

impl CreditCardRequest {
    pub fn into_card(self) -> String {
        self.credit_card.into_text().unwrap_or_default()
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Customer wrapped the way sign-up and login return it.
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerSchema {
    pub schema: Customer,
}

/// Response of sign-up and login.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    #[schema(example = "User successfully logged in")]
    pub message: String,
    pub customer: CustomerSchema,
    /// `Bearer <jwt>`
    #[serde(rename = "accessToken")]
    #[schema(example = "Bearer eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub access_token: String,
    #[schema(example = "24h")]
    pub expires_in: String,
}

impl AuthResponse {
    pub fn new(message: &str, session: Session) -> Self {
        Self {
            message: message.to_string(),
            access_token: format!("Bearer {}", session.token),
            expires_in: format!("{}h", session.expires_in_hours),
            customer: CustomerSchema {
                schema: session.customer,
            },
        }
    }
}
