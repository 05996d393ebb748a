//! Request validation.
//!
//! Bodies are deserialized into [`Field`]s so a value that is missing, blank
//! or of the wrong JSON type still reaches `validator`, which then reports it
//! with the code and message attached to the field. Only the first failing
//! field, in the order given by [`FieldOrder`], is returned to the client.

use std::borrow::Cow;
use std::sync::LazyLock;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use regex::Regex;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{AppError, AppResult, ErrorCode};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S@\S+\.\S").expect("invalid email regex"));

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").expect("invalid digits regex"));

/// Phone numbers and card numbers shorter than this are rejected.
const MIN_CONTACT_LENGTH: usize = 7;

/// Conversion from a JSON value that is known not to be blank.
pub trait FromJson: Sized {
    /// `None` when the value has the wrong JSON type.
    fn from_json(value: &Value) -> Option<Self>;
}

impl FromJson for String {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

/// Integers may arrive as JSON floats (`5.0`); a fractional part makes them invalid.
fn whole_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let n = value.as_f64()?;
    // i64::MAX is not exactly representable, so compare against 2^63
    let in_range = n >= i64::MIN as f64 && n < 9_223_372_036_854_775_808.0;
    (n.fract() == 0.0 && in_range).then_some(n as i64)
}

impl FromJson for i32 {
    fn from_json(value: &Value) -> Option<Self> {
        whole_number(value).and_then(|n| i32::try_from(n).ok())
    }
}

impl FromJson for i64 {
    fn from_json(value: &Value) -> Option<Self> {
        whole_number(value)
    }
}

/// Any scalar read as text, e.g. a phone number sent as a JSON number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text(pub String);

impl FromJson for Text {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Text(s.clone())),
            Value::Number(n) => Some(Text(n.to_string())),
            Value::Bool(b) => Some(Text(b.to_string())),
            _ => None,
        }
    }
}

/// A loosely typed request value.
///
/// `null`, `""`, `0` and `false` count as missing, the same as an absent key.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Field<T> {
    #[default]
    Missing,
    /// Present but of the wrong type
    Invalid(Value),
    Present(T),
}

impl<T> Field<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    /// The value of a field that validation has already required.
    ///
    /// # Errors
    /// `USR_02` when missing, `USR_10` when of the wrong type
    pub fn require(self, field: &str) -> AppResult<T> {
        match self {
            Field::Present(value) => Ok(value),
            Field::Missing => Err(AppError::validation(
                ErrorCode::RequiredField,
                field,
                &format!("The {field} field is required"),
            )),
            Field::Invalid(_) => Err(AppError::validation(
                ErrorCode::InvalidField,
                field,
                &format!("Invalid {field}"),
            )),
        }
    }
}

impl Field<Text> {
    pub fn into_text(self) -> Option<String> {
        self.into_value().map(|Text(text)| text)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

impl<'de, T: FromJson> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if is_blank(&value) {
            return Ok(Field::Missing);
        }
        Ok(match T::from_json(&value) {
            Some(parsed) => Field::Present(parsed),
            None => Field::Invalid(value),
        })
    }
}

/// Echoes the received value, used as the `value` parameter of errors.
impl<T> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Missing | Field::Present(_) => serializer.serialize_none(),
            Field::Invalid(raw) => raw.serialize(serializer),
        }
    }
}

// Field checks used from `#[validate(custom(...))]`. The attribute supplies
// the code and message, so the codes below are only fallbacks.

pub fn required<T>(field: &Field<T>) -> Result<(), ValidationError> {
    match field {
        Field::Missing => Err(ValidationError::new("USR_02")),
        _ => Ok(()),
    }
}

pub fn well_typed<T>(field: &Field<T>) -> Result<(), ValidationError> {
    match field {
        Field::Invalid(_) => Err(ValidationError::new("USR_10")),
        _ => Ok(()),
    }
}

pub fn email_format(field: &Field<String>) -> Result<(), ValidationError> {
    match field {
        Field::Present(email) if !EMAIL.is_match(email) => Err(ValidationError::new("USR_03")),
        _ => Ok(()),
    }
}

pub fn contact_length(field: &Field<Text>) -> Result<(), ValidationError> {
    match field {
        Field::Present(Text(text)) if text.chars().count() < MIN_CONTACT_LENGTH => {
            Err(ValidationError::new("USR_10"))
        }
        _ => Ok(()),
    }
}

/// Query numbers: digits only.
pub fn digits(field: &Field<String>) -> Result<(), ValidationError> {
    match field {
        Field::Present(value) if !DIGITS.is_match(value) => Err(ValidationError::new("USR_10")),
        _ => Ok(()),
    }
}

pub fn sort_order(field: &Field<String>) -> Result<(), ValidationError> {
    match field {
        Field::Present(value) if !matches!(value.to_lowercase().as_str(), "asc" | "desc") => {
            Err(ValidationError::new("PAG_01"))
        }
        _ => Ok(()),
    }
}

pub fn on_off(field: &Field<String>) -> Result<(), ValidationError> {
    match field {
        Field::Present(value) if value != "on" && value != "off" => {
            Err(ValidationError::new("USR_10"))
        }
        _ => Ok(()),
    }
}

/// Order in which the fields of a request are checked.
pub trait FieldOrder {
    /// Field names as `validator` reports them, i.e. the Rust names
    const FIELDS: &'static [&'static str];

    /// Name reported to the client, for fields renamed on the wire.
    fn wire_name(field: &'static str) -> &'static str {
        field
    }
}

fn to_app_error(field: &str, error: &ValidationError) -> AppError {
    let code = ErrorCode::from_code(&error.code).unwrap_or(ErrorCode::InvalidField);
    let message = error
        .message
        .clone()
        .unwrap_or(Cow::Borrowed(code.default_message()));
    AppError::validation(code, field, &message)
}

/// First failing field among `fields`, checked in the given order.
pub fn first_error_among<T: FieldOrder>(
    errors: &ValidationErrors,
    fields: &[&'static str],
) -> Option<AppError> {
    let field_errors = errors.field_errors();
    fields.iter().find_map(|name| {
        let error = field_errors.get(*name)?.first()?;
        Some(to_app_error(T::wire_name(name), error))
    })
}

/// Turns the collected errors into the one reported to the client.
pub fn first_error<T: FieldOrder>(errors: &ValidationErrors) -> AppError {
    let field_errors = errors.field_errors();
    debug_assert!(
        field_errors
            .keys()
            .all(|name| T::FIELDS.contains(&&**name)),
        "validated field missing from FieldOrder::FIELDS: {:?}",
        field_errors.keys().collect::<Vec<_>>()
    );

    if let Some(error) = first_error_among::<T>(errors, T::FIELDS) {
        return error;
    }

    // Unlisted fields go by name so the answer never depends on hash order
    let unlisted = field_errors
        .iter()
        .filter_map(|(name, errs)| errs.first().map(|e| (&**name, e)))
        .min_by_key(|(name, _)| *name);
    match unlisted {
        Some((field, error)) => to_app_error(field, error),
        None => AppError::BadRequest {
            message: errors.to_string(),
        },
    }
}

/// Runs the checks of a value that was extracted without them, for
/// handlers that must look something up before validating the request.
pub fn check<T: Validate + FieldOrder>(value: &T) -> AppResult<()> {
    value.validate().map_err(|e| first_error::<T>(&e))
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

/// JSON body that passed validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + FieldOrder,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        check(&value)?;
        Ok(ValidatedJson(value))
    }
}

/// Query string that passed validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + FieldOrder,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        check(&value)?;
        Ok(ValidatedQuery(value))
    }
}

/// Parses a path id the way every numeric route expects it.
fn parse_id(raw: &str) -> Option<i32> {
    if !DIGITS.is_match(raw) {
        return None;
    }
    raw.parse().ok()
}

/// Numeric `{id}` path segment; anything else is an unknown endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub i32);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::EndpointNotFound)?;
        parse_id(&raw).map(PathId).ok_or(AppError::EndpointNotFound)
    }
}

/// Department `{id}`, rejected with `DEP_01` instead of a 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartmentId(pub i32);

impl<S> FromRequestParts<S> for DepartmentId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let invalid = || {
            AppError::validation(
                ErrorCode::InvalidDepartmentId,
                "id",
                ErrorCode::InvalidDepartmentId.default_message(),
            )
        };
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid())?;
        parse_id(&raw).map(DepartmentId).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};

    #[derive(Debug, Deserialize, Validate)]
    struct Signup {
        #[serde(default)]
        #[validate(custom(
            function = "required",
            code = "USR_02",
            message = "The name field is required"
        ))]
        name: Field<String>,
        #[serde(default)]
        #[validate(
            custom(function = "required", code = "USR_02", message = "The email field is required"),
            custom(function = "well_typed", code = "USR_03", message = "Invalid Email"),
            custom(function = "email_format", code = "USR_03", message = "Invalid Email")
        )]
        email: Field<String>,
        #[serde(default)]
        #[validate(custom(
            function = "contact_length",
            code = "USR_06",
            message = "Invalid phone number"
        ))]
        day_phone: Field<Text>,
    }

    impl FieldOrder for Signup {
        const FIELDS: &'static [&'static str] = &["name", "email", "day_phone"];
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn extract(body: &str) -> AppResult<Signup> {
        ValidatedJson::<Signup>::from_request(json_request(body), &())
            .await
            .map(|ValidatedJson(v)| v)
    }

    fn assert_field_error(result: AppResult<Signup>, code: ErrorCode, field: &str, message: &str) {
        match result {
            Err(AppError::Validation {
                code: c,
                field: f,
                message: m,
            }) => {
                assert_eq!(c, code);
                assert_eq!(f, field);
                assert_eq!(m, message);
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_values_are_missing() {
        for raw in ["null", "\"\"", "0", "false"] {
            let field: Field<String> = serde_json::from_str(raw).unwrap();
            assert!(field.is_missing(), "{raw} should be missing");
        }
        let field: Field<i32> = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(field, Field::Invalid(Value::String("12".into())));
        let field: Field<i32> = serde_json::from_str("12").unwrap();
        assert_eq!(field.value(), Some(&12));
    }

    #[test]
    fn test_whole_floats_are_integers() {
        let field: Field<i32> = serde_json::from_str("5.0").unwrap();
        assert_eq!(field.value(), Some(&5));
        let field: Field<i32> = serde_json::from_str("4.5").unwrap();
        assert!(matches!(field, Field::Invalid(_)));
        let field: Field<i32> = serde_json::from_str("3000000000").unwrap();
        assert!(matches!(field, Field::Invalid(_)));
        let field: Field<i64> = serde_json::from_str("1e300").unwrap();
        assert!(matches!(field, Field::Invalid(_)));
    }

    #[test]
    fn test_require() {
        assert_eq!(Field::Present(3).require("amount").unwrap(), 3);
        let missing = Field::<i32>::Missing.require("amount").unwrap_err();
        assert!(matches!(
            missing,
            AppError::Validation { code: ErrorCode::RequiredField, .. }
        ));
        let invalid = Field::<String>::Invalid(Value::from(42)).require("name").unwrap_err();
        assert_eq!(invalid.field(), Some("name"));
    }

    #[test]
    fn test_text_accepts_numbers() {
        let field: Field<Text> = serde_json::from_str("5550100200").unwrap();
        assert_eq!(field.into_text().as_deref(), Some("5550100200"));
    }

    #[tokio::test]
    async fn test_valid_body() {
        let signup = extract(r#"{"name":"Ada","email":"ada@example.com","day_phone":"5550100"}"#)
            .await
            .unwrap();
        assert_eq!(signup.name.value().map(String::as_str), Some("Ada"));
    }

    #[tokio::test]
    async fn test_first_field_in_order_wins() {
        let result = extract(r#"{"email":"nope","day_phone":"1"}"#).await;
        assert_field_error(result, ErrorCode::RequiredField, "name", "The name field is required");

        let result = extract(r#"{"name":"Ada","email":"nope","day_phone":"1"}"#).await;
        assert_field_error(result, ErrorCode::InvalidEmail, "email", "Invalid Email");
    }

    #[tokio::test]
    async fn test_wrong_type_is_reported() {
        let result = extract(r#"{"name":"Ada","email":42}"#).await;
        assert_field_error(result, ErrorCode::InvalidEmail, "email", "Invalid Email");
    }

    #[tokio::test]
    async fn test_short_phone() {
        let result = extract(r#"{"name":"Ada","email":"ada@example.com","day_phone":12345}"#).await;
        assert_field_error(result, ErrorCode::InvalidPhone, "day_phone", "Invalid phone number");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        assert!(matches!(extract("{not json").await, Err(AppError::BadRequest { .. })));
    }

    #[test]
    fn test_query_checks() {
        assert!(digits(&Field::Present("20".to_string())).is_ok());
        assert!(digits(&Field::Present("2x".to_string())).is_err());
        assert!(sort_order(&Field::Present("DESC".to_string())).is_ok());
        assert!(sort_order(&Field::Present("up".to_string())).is_err());
        assert!(on_off(&Field::Present("off".to_string())).is_ok());
        assert!(on_off(&Field::Present("yes".to_string())).is_err());
        assert!(digits(&Field::Missing).is_ok());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), Some(42));
        for raw in ["", "4a", "-1", "1.5", "99999999999"] {
            assert_eq!(parse_id(raw), None, "{raw}");
        }
    }
}
