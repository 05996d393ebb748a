//! Product attribute handlers.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::ATTRIBUTE_TAG;
use crate::api::dto::ErrorResponse;
use crate::error::AppResult;
use crate::models::{Attribute, AttributeValue, ProductAttribute};
use crate::state::AppState;
use crate::utils::validate::PathId;

/// Creates the attribute routes
///
/// # Routes
/// - `GET /attributes`
/// - `GET /attributes/{id}`
/// - `GET /attributes/values/{id}`
/// - `GET /attributes/inProduct/{id}`
pub fn attribute_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_attributes))
        .routes(routes!(get_attribute))
        .routes(routes!(attribute_values))
        .routes(routes!(product_attributes))
}

#[utoipa::path(
    get,
    path = "/attributes",
    tag = ATTRIBUTE_TAG,
    responses((status = 200, description = "All attributes", body = Vec<Attribute>))
)]
async fn list_attributes(State(state): State<AppState>) -> AppResult<Json<Vec<Attribute>>> {
    Ok(Json(state.services.catalog.attributes().await?))
}

#[utoipa::path(
    get,
    path = "/attributes/{id}",
    tag = ATTRIBUTE_TAG,
    params(("id" = i32, Path, description = "Attribute id")),
    responses(
        (status = 200, description = "The attribute", body = Attribute),
        (status = 404, description = "ATT_01", body = ErrorResponse)
    )
)]
async fn get_attribute(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Attribute>> {
    Ok(Json(state.services.catalog.attribute(id).await?))
}

/// Values an attribute can take, e.g. the sizes of `Size`.
#[utoipa::path(
    get,
    path = "/attributes/values/{id}",
    tag = ATTRIBUTE_TAG,
    params(("id" = i32, Path, description = "Attribute id")),
    responses((status = 200, description = "Attribute values", body = Vec<AttributeValue>))
)]
async fn attribute_values(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Vec<AttributeValue>>> {
    Ok(Json(state.services.catalog.attribute_values(id).await?))
}

#[utoipa::path(
    get,
    path = "/attributes/inProduct/{id}",
    tag = ATTRIBUTE_TAG,
    params(("id" = i32, Path, description = "Product id")),
    responses((status = 200, description = "Attributes of the product", body = Vec<ProductAttribute>))
)]
async fn product_attributes(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Vec<ProductAttribute>>> {
    Ok(Json(state.services.catalog.product_attributes(id).await?))
}
