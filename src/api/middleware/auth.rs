//! Customer authentication.
//!
//! Protected handlers take an [`AuthCustomer`] argument; extracting it
//! validates the token carried by the request.

use axum::{extract::FromRequestParts, http::HeaderMap, http::request::Parts};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt::validate_access_token;

/// Headers a token may arrive in, checked in this order.
const TOKEN_HEADERS: [&str; 3] = ["authorization", "user-key", "x-access-token"];

/// The customer a request was authenticated as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCustomer {
    pub customer_id: i32,
    pub email: String,
}

/// Finds the raw token, with any `Bearer` scheme removed.
///
/// A scheme with nothing after it counts as no token at all. Hyper drops
/// trailing whitespace, so `"Bearer "` usually arrives as `"Bearer"`.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = TOKEN_HEADERS
        .iter()
        .find_map(|name| headers.get(*name))?
        .to_str()
        .ok()?
        .trim_start();

    let token = ["Bearer", "bearer"]
        .iter()
        .find_map(|scheme| {
            value
                .strip_prefix(scheme)
                .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
        })
        .unwrap_or(value)
        .trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthCustomer {
    type Rejection = AppError;

    /// # Errors
    /// `AUT_01` without a token, `AUT_02` when it fails verification
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(&parts.headers).ok_or_else(AppError::missing_token)?;
        let claims = validate_access_token(token, &state.jwt_config.secret)?;

        Ok(Self {
            customer_id: claims.customer_id()?,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_bearer_prefix_is_optional() {
        let map = headers(&[("authorization", "Bearer abc.def.ghi")]);
        assert_eq!(bearer_token(&map), Some("abc.def.ghi"));
        let map = headers(&[("authorization", "abc.def.ghi")]);
        assert_eq!(bearer_token(&map), Some("abc.def.ghi"));
    }

    #[test]
    fn test_alternative_headers() {
        let map = headers(&[("user-key", "Bearer from-user-key")]);
        assert_eq!(bearer_token(&map), Some("from-user-key"));
        let map = headers(&[("x-access-token", "from-access-token")]);
        assert_eq!(bearer_token(&map), Some("from-access-token"));
    }

    #[test]
    fn test_authorization_wins() {
        let map = headers(&[("x-access-token", "second"), ("authorization", "Bearer first")]);
        assert_eq!(bearer_token(&map), Some("first"));
    }

    #[test]
    fn test_missing_or_blank() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        let map = headers(&[("authorization", "Bearer ")]);
        assert_eq!(bearer_token(&map), None);
    }

    #[test]
    fn test_bare_scheme_is_no_token() {
        for value in ["Bearer", "bearer", "  Bearer  ", "Bearer \t"] {
            let map = headers(&[("authorization", value)]);
            assert_eq!(bearer_token(&map), None, "{value:?}");
        }
        let map = headers(&[("authorization", "BearerToken")]);
        assert_eq!(bearer_token(&map), Some("BearerToken"));
    }
}
