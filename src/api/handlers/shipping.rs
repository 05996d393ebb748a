//! Shipping region handlers.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::SHIPPING_TAG;
use crate::api::dto::ErrorResponse;
use crate::error::AppResult;
use crate::models::{ShippingOption, ShippingRegion};
use crate::state::AppState;
use crate::utils::validate::PathId;

pub fn shipping_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_regions))
        .routes(routes!(region_options))
}

#[utoipa::path(
    get,
    path = "/shipping/regions",
    tag = SHIPPING_TAG,
    responses((status = 200, description = "All shipping regions", body = Vec<ShippingRegion>))
)]
async fn list_regions(State(state): State<AppState>) -> AppResult<Json<Vec<ShippingRegion>>> {
    Ok(Json(state.services.shipping.regions().await?))
}

#[utoipa::path(
    get,
    path = "/shipping/regions/{id}",
    tag = SHIPPING_TAG,
    params(("id" = i32, Path, description = "Shipping region id")),
    responses(
        (status = 200, description = "Shipping options of the region", body = Vec<ShippingOption>),
        (status = 404, description = "USR_09", body = ErrorResponse)
    )
)]
async fn region_options(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<Vec<ShippingOption>>> {
    Ok(Json(state.services.shipping.options(id).await?))
}
