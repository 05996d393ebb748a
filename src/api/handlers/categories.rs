//! Category handlers.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CATEGORY_TAG;
use crate::api::dto::{CategoryListQuery, CategoryPage, ErrorResponse};
use crate::error::AppResult;
use crate::models::{Category, ProductCategory};
use crate::services::Paged;
use crate::state::AppState;
use crate::utils::validate::{PathId, ValidatedQuery};

/// Creates the category routes
///
/// # Routes
/// - `GET /categories` - Sorted, optionally paged
/// - `GET /categories/{id}`
/// - `GET /categories/inProduct/{id}`
/// - `GET /categories/inDepartment/{id}`
pub fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_categories))
        .routes(routes!(get_category))
        .routes(routes!(categories_of_product))
        .routes(routes!(categories_in_department))
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = CATEGORY_TAG,
    params(CategoryListQuery),
    responses(
        (status = 200, description = "A page of categories", body = CategoryPage<Category>),
        (status = 400, description = "PAG_01 or USR_10", body = ErrorResponse)
    )
)]
async fn list_categories(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CategoryListQuery>,
) -> AppResult<Json<CategoryPage<Category>>> {
    let Paged {
        count,
        rows,
        limit,
        page,
    } = state
        .services
        .catalog
        .categories(query.descending(), query.page(), query.limit())
        .await?;

    Ok(Json(CategoryPage {
        count,
        rows,
        limit,
        page,
    }))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "The category", body = Category),
        (status = 404, description = "CAT_01", body = ErrorResponse)
    )
)]
async fn get_category(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Category>> {
    Ok(Json(state.services.catalog.category(id).await?))
}

#[utoipa::path(
    get,
    path = "/categories/inProduct/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Product id")),
    responses((status = 200, description = "Category of the product", body = Vec<ProductCategory>))
)]
async fn categories_of_product(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Vec<ProductCategory>>> {
    Ok(Json(state.services.catalog.categories_of_product(id).await?))
}

#[utoipa::path(
    get,
    path = "/categories/inDepartment/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Department id")),
    responses((status = 200, description = "Categories of the department", body = Vec<Category>))
)]
async fn categories_in_department(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.services.catalog.categories_in_department(id).await?))
}
