//! Department handlers.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::DEPARTMENT_TAG;
use crate::api::dto::ErrorResponse;
use crate::error::AppResult;
use crate::models::Department;
use crate::state::AppState;
use crate::utils::validate::DepartmentId;

/// Creates the department routes
///
/// # Routes
/// - `GET /departments`
/// - `GET /departments/{id}`
pub fn department_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_departments))
        .routes(routes!(get_department))
}

#[utoipa::path(
    get,
    path = "/departments",
    tag = DEPARTMENT_TAG,
    responses((status = 200, description = "All departments", body = Vec<Department>))
)]
async fn list_departments(State(state): State<AppState>) -> AppResult<Json<Vec<Department>>> {
    Ok(Json(state.services.catalog.departments().await?))
}

#[utoipa::path(
    get,
    path = "/departments/{id}",
    tag = DEPARTMENT_TAG,
    params(("id" = i32, Path, description = "Department id")),
    responses(
        (status = 200, description = "The department", body = Department),
        (status = 400, description = "DEP_01", body = ErrorResponse),
        (status = 404, description = "DEP_02", body = ErrorResponse)
    )
)]
async fn get_department(
    State(state): State<AppState>,
    DepartmentId(id): DepartmentId,
) -> AppResult<Json<Department>> {
    Ok(Json(state.services.catalog.department(id).await?))
}
