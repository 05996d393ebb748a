//! Customer account handlers.
//!
//! Sign up and login answer a bearer token; the remaining routes act on
//! the authenticated customer.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::CUSTOMER_TAG;
use crate::api::dto::{
    AddressRequest, AuthResponse, CreditCardRequest, ErrorResponse, LoginRequest, RegisterRequest,
    UpdateCustomerRequest,
};
use crate::api::middleware::AuthCustomer;
use crate::error::AppResult;
use crate::models::Customer;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates the customer routes
///
/// # Routes
/// - `POST /customers` - Sign up
/// - `POST /customers/login`
/// - `GET /customer` and `PUT /customer` (auth)
/// - `PUT /customers/address` (auth)
/// - `PUT /customers/creditCard` (auth)
pub fn customer_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(login))
        .routes(routes!(get_customer, update_customer))
        .routes(routes!(update_address))
        .routes(routes!(update_credit_card))
}

/// Signs a customer up.
#[utoipa::path(
    post,
    path = "/customers",
    tag = CUSTOMER_TAG,
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Customer created and logged in", body = AuthResponse),
        (status = 400, description = "Invalid field or USR_04", body = ErrorResponse)
    )
)]
async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    let session = state
        .services
        .customers
        .register(body.into_registration()?)
        .await?;
    Ok(Json(AuthResponse::new("User successfully created", session)))
}

#[utoipa::path(
    post,
    path = "/customers/login",
    tag = CUSTOMER_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 401, description = "USR_01", body = ErrorResponse),
        (status = 404, description = "USR_05", body = ErrorResponse)
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (email, password) = body.credentials();
    let session = state.services.customers.login(email, password).await?;
    Ok(Json(AuthResponse::new("User successfully logged in", session)))
}

#[utoipa::path(
    get,
    path = "/customer",
    tag = CUSTOMER_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "The authenticated customer", body = Customer),
        (status = 401, description = "AUT_01 or AUT_02", body = ErrorResponse)
    )
)]
async fn get_customer(
    State(state): State<AppState>,
    auth: AuthCustomer,
) -> AppResult<Json<Customer>> {
    Ok(Json(state.services.customers.profile(auth.customer_id).await?))
}

/// Updates name, email, phones and optionally the password.
#[utoipa::path(
    put,
    path = "/customer",
    tag = CUSTOMER_TAG,
    request_body = UpdateCustomerRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "The updated customer", body = Customer),
        (status = 400, description = "Invalid field or USR_04", body = ErrorResponse),
        (status = 401, description = "AUT_01 or AUT_02", body = ErrorResponse)
    )
)]
async fn update_customer(
    State(state): State<AppState>,
    auth: AuthCustomer,
    ValidatedJson(body): ValidatedJson<UpdateCustomerRequest>,
) -> AppResult<Json<Customer>> {
    let customer = state
        .services
        .customers
        .update_account(auth.customer_id, body.into_changes()?)
        .await?;
    Ok(Json(customer))
}

#[utoipa::path(
    put,
    path = "/customers/address",
    tag = CUSTOMER_TAG,
    request_body = AddressRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "The updated customer", body = Customer),
        (status = 400, description = "USR_02, USR_09 or USR_10", body = ErrorResponse),
        (status = 401, description = "AUT_01 or AUT_02", body = ErrorResponse)
    )
)]
async fn update_address(
    State(state): State<AppState>,
    auth: AuthCustomer,
    ValidatedJson(body): ValidatedJson<AddressRequest>,
) -> AppResult<Json<Customer>> {
    let customer = state
        .services
        .customers
        .update_address(auth.customer_id, body.into_update())
        .await?;
    Ok(Json(customer))
}

#[utoipa::path(
    put,
    path = "/customers/creditCard",
    tag = CUSTOMER_TAG,
    request_body = CreditCardRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "The updated customer", body = Customer),
        (status = 400, description = "USR_02 or USR_08", body = ErrorResponse),
        (status = 401, description = "AUT_01 or AUT_02", body = ErrorResponse)
    )
)]
async fn update_credit_card(
    State(state): State<AppState>,
    auth: AuthCustomer,
    ValidatedJson(body): ValidatedJson<CreditCardRequest>,
) -> AppResult<Json<Customer>> {
    let customer = state
        .services
        .customers
        .update_credit_card(auth.customer_id, &body.into_card())
        .await?;
    Ok(Json(customer))
}
