//! Product handlers.
//!
//! Listings answer `{count, rows}`. The category and department
//! listings check the path id and its owner before the query string.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::PRODUCT_TAG;
use crate::api::dto::{CountedRows, ErrorResponse, ProductListQuery, ReviewRequest, SearchQuery};
use crate::api::middleware::AuthCustomer;
use crate::error::AppResult;
use crate::models::{ProductDetails, ProductInfo, ProductLocation, ProductReview, ProductSummary};
use crate::services::ProductPage;
use crate::state::AppState;
use crate::utils::validate::{PathId, ValidatedQuery, check};

/// Page size of `GET /products`.
const LIST_LIMIT: i64 = 200;
/// Page size of the category and department listings.
const SECTION_LIMIT: i64 = 20;

/// Creates the product routes
///
/// # Routes
/// - `GET /products` - Every product
/// - `GET /products/search` - Full text search
/// - `GET /products/inCategory/{id}`
/// - `GET /products/inDepartment/{id}`
/// - `GET /products/{id}` and its `details`, `locations` and `reviews`
/// - `POST /products/{id}/reviews` (auth)
pub fn product_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_products))
        .routes(routes!(search_products))
        .routes(routes!(products_in_category))
        .routes(routes!(products_in_department))
        .routes(routes!(get_product))
        .routes(routes!(product_details))
        .routes(routes!(product_locations))
        .routes(routes!(product_reviews, create_review))
}

fn counted(page: ProductPage) -> Json<CountedRows<ProductSummary>> {
    Json(CountedRows {
        count: page.count,
        rows: page.rows,
    })
}

#[utoipa::path(
    get,
    path = "/products",
    tag = PRODUCT_TAG,
    params(ProductListQuery),
    responses(
        (status = 200, description = "A page of products", body = CountedRows<ProductSummary>),
        (status = 400, description = "USR_10", body = ErrorResponse)
    )
)]
async fn list_products(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ProductListQuery>,
) -> AppResult<Json<CountedRows<ProductSummary>>> {
    let page = state
        .services
        .products
        .list(query.page_request(LIST_LIMIT))
        .await?;
    Ok(counted(page))
}

#[utoipa::path(
    get,
    path = "/products/search",
    tag = PRODUCT_TAG,
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products", body = CountedRows<ProductSummary>),
        (status = 400, description = "USR_02 or USR_10", body = ErrorResponse)
    )
)]
async fn search_products(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SearchQuery>,
) -> AppResult<Json<CountedRows<ProductSummary>>> {
    let page = state
        .services
        .products
        .search(query.query(), query.all_words(), query.page_request())
        .await?;
    Ok(counted(page))
}

#[utoipa::path(
    get,
    path = "/products/inCategory/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Category id"), ProductListQuery),
    responses(
        (status = 200, description = "Products of the category", body = CountedRows<ProductSummary>),
        (status = 404, description = "CAT_01", body = ErrorResponse)
    )
)]
async fn products_in_category(
    State(state): State<AppState>,
    PathId(id): PathId,
    query: Result<Query<ProductListQuery>, QueryRejection>,
) -> AppResult<Json<CountedRows<ProductSummary>>> {
    state.services.catalog.category(id).await?;
    let Query(query) = query?;
    check(&query)?;

    let page = state
        .services
        .products
        .in_category(id, query.page_request(SECTION_LIMIT))
        .await?;
    Ok(counted(page))
}

#[utoipa::path(
    get,
    path = "/products/inDepartment/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Department id"), ProductListQuery),
    responses(
        (status = 200, description = "Products of the department", body = CountedRows<ProductSummary>),
        (status = 404, description = "DEP_02", body = ErrorResponse)
    )
)]
async fn products_in_department(
    State(state): State<AppState>,
    PathId(id): PathId,
    query: Result<Query<ProductListQuery>, QueryRejection>,
) -> AppResult<Json<CountedRows<ProductSummary>>> {
    state.services.catalog.ensure_department(id).await?;
    let Query(query) = query?;
    check(&query)?;

    let page = state
        .services
        .products
        .on_department(id, query.page_request(SECTION_LIMIT))
        .await?;
    Ok(counted(page))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = ProductInfo),
        (status = 404, description = "PRO_01", body = ErrorResponse)
    )
)]
async fn get_product(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<ProductInfo>> {
    Ok(Json(state.services.products.product(id).await?))
}

#[utoipa::path(
    get,
    path = "/products/{id}/details",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product details", body = ProductDetails),
        (status = 404, description = "PRO_01", body = ErrorResponse)
    )
)]
async fn product_details(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<ProductDetails>> {
    Ok(Json(state.services.products.details(id).await?))
}

/// Answers an empty object when the product is not filed anywhere.
#[utoipa::path(
    get,
    path = "/products/{id}/locations",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product id")),
    responses((status = 200, description = "Category and department of the product", body = ProductLocation))
)]
async fn product_locations(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Response> {
    let response = match state.services.products.location(id).await? {
        Some(location) => Json(location).into_response(),
        None => Json(serde_json::json!({})).into_response(),
    };
    Ok(response)
}

#[utoipa::path(
    get,
    path = "/products/{id}/reviews",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product id")),
    responses((status = 200, description = "Reviews, newest first", body = Vec<ProductReview>))
)]
async fn product_reviews(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Vec<ProductReview>>> {
    Ok(Json(state.services.products.reviews(id).await?))
}

/// Reviews a product as the authenticated customer.
#[utoipa::path(
    post,
    path = "/products/{id}/reviews",
    tag = PRODUCT_TAG,
    params(("id" = i32, Path, description = "Product id")),
    request_body = ReviewRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Review created"),
        (status = 400, description = "USR_02 or USR_10", body = ErrorResponse),
        (status = 401, description = "AUT_01 or AUT_02", body = ErrorResponse),
        (status = 404, description = "PRO_01", body = ErrorResponse)
    )
)]
async fn create_review(
    State(state): State<AppState>,
    auth: AuthCustomer,
    PathId(id): PathId,
    body: Result<Json<ReviewRequest>, JsonRejection>,
) -> AppResult<StatusCode> {
    state.services.products.ensure_exists(id).await?;
    let Json(body) = body?;
    check(&body)?;

    let review = body.review.into_value().unwrap_or_default();
    let rating = body.rating.into_value().unwrap_or_default();
    state
        .services
        .products
        .add_review(auth.customer_id, id, &review, rating)
        .await?;
    Ok(StatusCode::OK)
}
