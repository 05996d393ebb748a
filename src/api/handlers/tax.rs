//! Tax handlers.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::TAX_TAG;
use crate::api::dto::ErrorResponse;
use crate::error::AppResult;
use crate::models::Tax;
use crate::state::AppState;
use crate::utils::validate::PathId;

pub fn tax_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_taxes))
        .routes(routes!(get_tax))
}

#[utoipa::path(
    get,
    path = "/tax",
    tag = TAX_TAG,
    responses((status = 200, description = "All taxes", body = Vec<Tax>))
)]
async fn list_taxes(State(state): State<AppState>) -> AppResult<Json<Vec<Tax>>> {
    Ok(Json(state.services.shipping.taxes().await?))
}

#[utoipa::path(
    get,
    path = "/tax/{id}",
    tag = TAX_TAG,
    params(("id" = i32, Path, description = "Tax id")),
    responses(
        (status = 200, description = "The tax", body = Tax),
        (status = 404, description = "TAX_01", body = ErrorResponse)
    )
)]
async fn get_tax(State(state): State<AppState>, PathId(id): PathId) -> AppResult<Json<Tax>> {
    Ok(Json(state.services.shipping.tax(id).await?))
}
