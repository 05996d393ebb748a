//! Shopping cart handlers.
//!
//! `{cart_id}` routes check the cart exists first; `{item_id}` routes
//! check the path id and then the cart line.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::SHOPPING_CART_TAG;
use crate::api::dto::{AddToCartRequest, CartIdResponse, ErrorResponse, UpdateCartItemRequest};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{CartItem, CartTotal, SavedItem};
use crate::state::AppState;
use crate::utils::validate::{PathId, first_error, first_error_among};
use validator::Validate;

/// Creates the shopping cart routes
///
/// # Routes
/// - `GET /shoppingcart/generateUniqueId`
/// - `POST /shoppingcart/add`
/// - `GET /shoppingcart/{cart_id}`
/// - `PUT /shoppingcart/update/{item_id}`
/// - `DELETE /shoppingcart/removeProduct/{item_id}`
/// - `DELETE /shoppingcart/empty/{cart_id}`
/// - `GET /shoppingcart/moveToCart/{item_id}`
/// - `GET /shoppingcart/saveForLater/{item_id}`
/// - `GET /shoppingcart/getSaved/{cart_id}`
/// - `GET /shoppingcart/totalAmount/{cart_id}`
pub fn shopping_cart_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(generate_unique_id))
        .routes(routes!(add_product))
        .routes(routes!(cart_items))
        .routes(routes!(update_item))
        .routes(routes!(remove_product))
        .routes(routes!(empty_cart))
        .routes(routes!(move_to_cart))
        .routes(routes!(save_for_later))
        .routes(routes!(saved_items))
        .routes(routes!(total_amount))
}

#[utoipa::path(
    get,
    path = "/shoppingcart/generateUniqueId",
    tag = SHOPPING_CART_TAG,
    responses((status = 200, description = "A new cart id", body = CartIdResponse))
)]
async fn generate_unique_id(State(state): State<AppState>) -> AppResult<Json<CartIdResponse>> {
    let cart_id = state.services.carts.generate_unique_id().await?;
    Ok(Json(CartIdResponse { cart_id }))
}

/// Adds a product, or bumps the quantity of an identical line.
#[utoipa::path(
    post,
    path = "/shoppingcart/add",
    tag = SHOPPING_CART_TAG,
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Items in the cart", body = Vec<CartItem>),
        (status = 400, description = "USR_02 or USR_10", body = ErrorResponse),
        (status = 404, description = "CAR_01 or PRO_01", body = ErrorResponse)
    )
)]
async fn add_product(
    State(state): State<AppState>,
    body: Result<Json<AddToCartRequest>, JsonRejection>,
) -> AppResult<Json<Vec<CartItem>>> {
    let Json(body) = body?;

    // The cart id is checked and looked up before the product fields
    let errors = body.validate().err();
    let early = errors.as_ref().and_then(|errors| {
        first_error_among::<AddToCartRequest>(errors, AddToCartRequest::CHECKED_BEFORE_CART)
    });
    if let Some(error) = early {
        return Err(error);
    }
    if let Some(cart_id) = body.cart_id() {
        state.services.carts.ensure_cart(cart_id).await?;
    }
    if let Some(errors) = errors {
        return Err(first_error::<AddToCartRequest>(&errors));
    }

    let cart_id = body.cart_id.require("cart_id")?;
    let product_id = body.product_id.require("product_id")?;
    let attributes = body.attributes.require("attributes")?;

    let items = state
        .services
        .carts
        .add(&cart_id, product_id, &attributes)
        .await?;
    Ok(Json(items))
}

#[utoipa::path(
    get,
    path = "/shoppingcart/{cart_id}",
    tag = SHOPPING_CART_TAG,
    params(("cart_id" = String, Path, description = "Cart id")),
    responses(
        (status = 200, description = "Items in the cart", body = Vec<CartItem>),
        (status = 404, description = "CAR_01", body = ErrorResponse)
    )
)]
async fn cart_items(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
) -> AppResult<Json<Vec<CartItem>>> {
    Ok(Json(state.services.carts.items(&cart_id).await?))
}

/// Sets the quantity of a line; zero or less removes it.
#[utoipa::path(
    put,
    path = "/shoppingcart/update/{item_id}",
    tag = SHOPPING_CART_TAG,
    params(("item_id" = i32, Path, description = "Cart line id")),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Items in the cart", body = Vec<CartItem>),
        (status = 400, description = "USR_10", body = ErrorResponse),
        (status = 404, description = "ITM_01", body = ErrorResponse)
    )
)]
async fn update_item(
    State(state): State<AppState>,
    PathId(item_id): PathId,
    body: Result<Json<UpdateCartItemRequest>, JsonRejection>,
) -> AppResult<Json<Vec<CartItem>>> {
    let line = state.services.carts.ensure_item(item_id).await?;
    let Json(body) = body?;
    let quantity = body.quantity().ok_or_else(|| {
        AppError::validation(ErrorCode::InvalidField, "quantity", "Invalid quantity")
    })?;

    Ok(Json(state.services.carts.update(&line, quantity).await?))
}

#[utoipa::path(
    delete,
    path = "/shoppingcart/removeProduct/{item_id}",
    tag = SHOPPING_CART_TAG,
    params(("item_id" = i32, Path, description = "Cart line id")),
    responses(
        (status = 200, description = "Line removed"),
        (status = 404, description = "ITM_01", body = ErrorResponse)
    )
)]
async fn remove_product(
    State(state): State<AppState>,
    PathId(item_id): PathId,
) -> AppResult<StatusCode> {
    state.services.carts.remove(item_id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/shoppingcart/empty/{cart_id}",
    tag = SHOPPING_CART_TAG,
    params(("cart_id" = String, Path, description = "Cart id")),
    responses(
        (status = 200, description = "Always an empty list", body = Vec<CartItem>),
        (status = 404, description = "CAR_01", body = ErrorResponse)
    )
)]
async fn empty_cart(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
) -> AppResult<Json<Vec<CartItem>>> {
    Ok(Json(state.services.carts.empty(&cart_id).await?))
}

#[utoipa::path(
    get,
    path = "/shoppingcart/moveToCart/{item_id}",
    tag = SHOPPING_CART_TAG,
    params(("item_id" = i32, Path, description = "Cart line id")),
    responses(
        (status = 200, description = "Line moved back to the cart"),
        (status = 404, description = "ITM_01", body = ErrorResponse)
    )
)]
async fn move_to_cart(
    State(state): State<AppState>,
    PathId(item_id): PathId,
) -> AppResult<StatusCode> {
    state.services.carts.move_to_cart(item_id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/shoppingcart/saveForLater/{item_id}",
    tag = SHOPPING_CART_TAG,
    params(("item_id" = i32, Path, description = "Cart line id")),
    responses(
        (status = 200, description = "Line saved for later"),
        (status = 404, description = "ITM_01", body = ErrorResponse)
    )
)]
async fn save_for_later(
    State(state): State<AppState>,
    PathId(item_id): PathId,
) -> AppResult<StatusCode> {
    state.services.carts.save_for_later(item_id).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/shoppingcart/getSaved/{cart_id}",
    tag = SHOPPING_CART_TAG,
    params(("cart_id" = String, Path, description = "Cart id")),
    responses(
        (status = 200, description = "Lines saved for later", body = Vec<SavedItem>),
        (status = 404, description = "CAR_01", body = ErrorResponse)
    )
)]
async fn saved_items(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
) -> AppResult<Json<Vec<SavedItem>>> {
    Ok(Json(state.services.carts.saved(&cart_id).await?))
}

#[utoipa::path(
    get,
    path = "/shoppingcart/totalAmount/{cart_id}",
    tag = SHOPPING_CART_TAG,
    params(("cart_id" = String, Path, description = "Cart id")),
    responses(
        (status = 200, description = "Sum of the cart lines", body = CartTotal),
        (status = 404, description = "CAR_01", body = ErrorResponse)
    )
)]
async fn total_amount(
    State(state): State<AppState>,
    Path(cart_id): Path<String>,
) -> AppResult<Json<CartTotal>> {
    Ok(Json(state.services.carts.total(&cart_id).await?))
}
