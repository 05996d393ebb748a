//! Trims the top-level string values of JSON request bodies.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};
use serde_json::Value;

use crate::error::AppError;

/// Largest body the middleware buffers.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Routes whose raw body must reach the handler untouched.
const EXEMPT_SUFFIXES: [&str; 1] = ["/stripe/webhooks"];

/// Left as sent, spaces included
const UNTRIMMED_KEY: &str = "password";

fn is_json(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Trims every top-level string except the password.
///
/// # Returns
/// `None` when there is nothing to change
fn trim_values(body: &[u8]) -> Option<Vec<u8>> {
    let Ok(Value::Object(mut object)) = serde_json::from_slice::<Value>(body) else {
        return None;
    };

    let mut changed = false;
    for (key, value) in object.iter_mut() {
        if key == UNTRIMMED_KEY {
            continue;
        }
        if let Value::String(text) = value {
            let trimmed = text.trim();
            if trimmed.len() != text.len() {
                *text = trimmed.to_string();
                changed = true;
            }
        }
    }

    if !changed {
        return None;
    }
    serde_json::to_vec(&Value::Object(object)).ok()
}

/// Middleware that rewrites JSON bodies with trimmed values.
pub async fn trim_body_middleware(request: Request, next: Next) -> Result<Response, AppError> {
    let exempt = EXEMPT_SUFFIXES
        .iter()
        .any(|suffix| request.uri().path().ends_with(suffix));
    if exempt || !is_json(&request) {
        return Ok(next.run(request).await);
    }

    let (mut parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| AppError::BadRequest {
            message: format!("Failed to read request body: {e}"),
        })?;

    let body = match trim_values(&bytes) {
        Some(trimmed) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            Body::from(trimmed)
        }
        None => Body::from(bytes),
    };

    Ok(next.run(Request::from_parts(parts, body)).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn trimmed(input: Value) -> Option<Value> {
        trim_values(&serde_json::to_vec(&input).unwrap())
            .map(|bytes| serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_top_level_strings_are_trimmed() {
        let result = trimmed(json!({
            "name": "  Ada ",
            "password": " keep me ",
            "shipping_region_id": 2,
            "nested": {"city": " Lagos "}
        }));
        assert_eq!(
            result,
            Some(json!({
                "name": "Ada",
                "password": " keep me ",
                "shipping_region_id": 2,
                "nested": {"city": " Lagos "}
            }))
        );
    }

    #[test]
    fn test_untouched_bodies() {
        assert_eq!(trimmed(json!({"name": "Ada"})), None);
        assert_eq!(trimmed(json!(["  a  "])), None);
        assert_eq!(trim_values(b"{broken"), None);
    }
}
