use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Claims carried by a customer access token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (customer ID)
    pub sub: String,
    /// Customer email
    pub email: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Creates claims valid for `expiration_hours` from now
    ///
    /// # Arguments
    /// * `customer_id` - The customer's ID
    /// * `email` - The customer's email
    /// * `expiration_hours` - Token validity duration in hours
    pub fn new(customer_id: i32, email: String, expiration_hours: i64) -> Self {
        Self::issued_at(customer_id, email, Timestamp::now(), expiration_hours)
    }

    fn issued_at(customer_id: i32, email: String, now: Timestamp, expiration_hours: i64) -> Self {
        let lifetime = SignedDuration::from_hours(expiration_hours);

        Self {
            sub: customer_id.to_string(),
            email,
            iat: now.as_second(),
            exp: now.as_second() + lifetime.as_secs(),
        }
    }

    /// Customer id stored in `sub`
    pub fn customer_id(&self) -> AppResult<i32> {
        self.sub.parse().map_err(|_| AppError::invalid_token())
    }
}

/// Signs an HS256 access token for a customer
///
/// # Arguments
/// * `customer_id` - The customer's ID
/// * `email` - The customer's email
/// * `secret` - The secret key for signing the token
/// * `expiration_hours` - Token validity duration in hours
///
/// # Returns
/// The encoded JWT token string, without the `Bearer ` prefix
pub fn generate_access_token(
    customer_id: i32,
    email: String,
    secret: &str,
    expiration_hours: i64,
) -> AppResult<String> {
    let claims = Claims::new(customer_id, email, expiration_hours);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
    })
}

/// Validates and decodes an access token
///
/// Every failure, expiry included, is reported as `AUT_02`.
///
/// # Example
/// ```ignore
/// let claims = validate_access_token(&token, "secret")?;
/// println!("Customer ID: {}", claims.sub);
/// ```
pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Token validation failed");
        AppError::invalid_token()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    const TEST_SECRET: &str = "test_secret_key_for_jwt_testing_0123456789";

    #[test]
    fn test_generate_access_token() {
        let token = generate_access_token(1, "ada@example.com".to_string(), TEST_SECRET, 24)
            .expect("token");

        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_validate_round_trip() {
        let token =
            generate_access_token(7, "ada@example.com".to_string(), TEST_SECRET, 24).unwrap();

        let claims = validate_access_token(&token, TEST_SECRET).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.customer_id().unwrap(), 7);
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_wrong_secret_is_invalid_token() {
        let token =
            generate_access_token(1, "ada@example.com".to_string(), TEST_SECRET, 1).unwrap();

        let err = validate_access_token(&token, "another_secret_entirely_0123456789").unwrap_err();
        assert!(matches!(
            err,
            AppError::Unauthorized { code: ErrorCode::AuthUnauthorized, .. }
        ));
    }

    #[test]
    fn test_expired_token_is_invalid_token() {
        let issued = Timestamp::now() - SignedDuration::from_hours(48);
        let claims = Claims::issued_at(1, "ada@example.com".to_string(), issued, 24);
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            validate_access_token(&token, TEST_SECRET),
            Err(AppError::Unauthorized { code: ErrorCode::AuthUnauthorized, .. })
        ));
    }

    #[test]
    fn test_garbage_token() {
        assert!(validate_access_token("not.a.token", TEST_SECRET).is_err());
        assert!(validate_access_token("", TEST_SECRET).is_err());
    }

    #[test]
    fn test_non_numeric_subject() {
        let claims = Claims {
            sub: "abc".to_string(),
            email: "ada@example.com".to_string(),
            iat: 0,
            exp: 0,
        };
        assert!(claims.customer_id().is_err());
    }
}
