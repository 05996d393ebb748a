//! Order handlers. Every route requires a customer token.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::ORDER_TAG;
use crate::api::dto::{CreateOrderRequest, ErrorResponse};
use crate::api::middleware::AuthCustomer;
use crate::error::AppResult;
use crate::models::{CreatedOrder, OrderLine, OrderSummary};
use crate::state::AppState;
use crate::utils::validate::{PathId, ValidatedJson};

/// Creates the order routes
///
/// # Routes
/// - `POST /orders` - Order the contents of a cart
/// - `GET /orders/{id}` - Order lines
/// - `GET /orders/shortDetail/{id}`
/// - `GET /orders/inCustomer` - Orders of the authenticated customer
pub fn order_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_order))
        .routes(routes!(orders_of_customer))
        .routes(routes!(order_lines))
        .routes(routes!(order_short_details))
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = ORDER_TAG,
    request_body = CreateOrderRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Order created, cart emptied", body = CreatedOrder),
        (status = 400, description = "USR_02 or USR_10", body = ErrorResponse),
        (status = 401, description = "AUT_01 or AUT_02", body = ErrorResponse)
    )
)]
async fn create_order(
    State(state): State<AppState>,
    auth: AuthCustomer,
    ValidatedJson(body): ValidatedJson<CreateOrderRequest>,
) -> AppResult<Json<CreatedOrder>> {
    let cart_id = body.cart_id.into_value().unwrap_or_default();
    let shipping_id = body.shipping_id.into_value().unwrap_or_default();
    let tax_id = body.tax_id.into_value().unwrap_or_default();

    let order = state
        .services
        .orders
        .create(&cart_id, auth.customer_id, shipping_id, tax_id)
        .await?;
    Ok(Json(order))
}

#[utoipa::path(
    get,
    path = "/orders/inCustomer",
    tag = ORDER_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Orders of the customer", body = Vec<OrderSummary>),
        (status = 401, description = "AUT_01 or AUT_02", body = ErrorResponse)
    )
)]
async fn orders_of_customer(
    State(state): State<AppState>,
    auth: AuthCustomer,
) -> AppResult<Json<Vec<OrderSummary>>> {
    Ok(Json(
        state.services.orders.by_customer(auth.customer_id).await?,
    ))
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order id")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Order lines", body = Vec<OrderLine>),
        (status = 401, description = "AUT_01 or AUT_02", body = ErrorResponse),
        (status = 404, description = "ORD_01", body = ErrorResponse)
    )
)]
async fn order_lines(
    State(state): State<AppState>,
    _auth: AuthCustomer,
    PathId(id): PathId,
) -> AppResult<Json<Vec<OrderLine>>> {
    Ok(Json(state.services.orders.lines(id).await?))
}

#[utoipa::path(
    get,
    path = "/orders/shortDetail/{id}",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order id")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Order summary", body = OrderSummary),
        (status = 401, description = "AUT_01 or AUT_02", body = ErrorResponse),
        (status = 404, description = "ORD_01", body = ErrorResponse)
    )
)]
async fn order_short_details(
    State(state): State<AppState>,
    _auth: AuthCustomer,
    PathId(id): PathId,
) -> AppResult<Json<OrderSummary>> {
    Ok(Json(state.services.orders.short_details(id).await?))
}
