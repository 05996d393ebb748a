//! Payment handlers.
//!
//! The webhook route reads the raw body, the signature covers its exact
//! bytes. It is excluded from body trimming for the same reason.

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::STRIPE_TAG;
use crate::api::dto::{ChargeRequestBody, ErrorResponse, WebhookAck};
use crate::api::middleware::AuthCustomer;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::validate::{first_error, first_error_among};
use validator::Validate;

pub const SIGNATURE_HEADER: &str = "stripe-signature";

pub fn stripe_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(charge))
        .routes(routes!(webhooks))
}

/// Charges a card for an order.
///
/// Answers the charge object returned by the gateway.
#[utoipa::path(
    post,
    path = "/stripe/charge",
    tag = STRIPE_TAG,
    request_body = ChargeRequestBody,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Charge created", body = serde_json::Value),
        (status = 400, description = "USR_02 or USR_10", body = ErrorResponse),
        (status = 401, description = "AUT_01 or AUT_02", body = ErrorResponse),
        (status = 404, description = "ORD_01", body = ErrorResponse),
        (status = 502, description = "Gateway failure", body = ErrorResponse)
    )
)]
async fn charge(
    State(state): State<AppState>,
    _auth: AuthCustomer,
    body: Result<Json<ChargeRequestBody>, JsonRejection>,
) -> AppResult<Json<serde_json::Value>> {
    let Json(body) = body?;

    // Token and order id are reported before the order lookup, the rest after
    let errors = body.validate().err();
    let early = errors.as_ref().and_then(|errors| {
        first_error_among::<ChargeRequestBody>(errors, ChargeRequestBody::CHECKED_BEFORE_ORDER)
    });
    if let Some(error) = early {
        return Err(error);
    }
    if let Some(order_id) = body.order_id() {
        state.services.orders.ensure_exists(order_id).await?;
    }
    if let Some(errors) = errors {
        return Err(first_error::<ChargeRequestBody>(&errors));
    }

    let charge = state.services.payments.charge(body.into_input()).await?;
    Ok(Json(charge))
}

/// Receives gateway events.
#[utoipa::path(
    post,
    path = "/stripe/webhooks",
    tag = STRIPE_TAG,
    request_body(content = String, content_type = "application/json"),
    params(("Stripe-Signature" = String, Header, description = "t=<unix>,v1=<hex>")),
    responses(
        (status = 200, description = "Event accepted", body = WebhookAck),
        (status = 400, description = "Bad signature or payload", body = ErrorResponse)
    )
)]
async fn webhooks(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Bytes,
) -> AppResult<Json<WebhookAck>> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::InvalidSignature {
            message: "Missing Stripe-Signature header".to_string(),
        })?;

    state
        .services
        .payments
        .handle_webhook(&payload, signature)
        .await?;
    Ok(Json(WebhookAck { received: true }))
}
