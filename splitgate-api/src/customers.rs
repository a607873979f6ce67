use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use splitgate_core::customer::Customer;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CustomerRequest {
    pub tenant_id: String,
    #[serde(flatten)]
    pub customer: Customer,
}

#[derive(Debug, Deserialize)]
pub struct ListCustomersQuery {
    pub tenant_id: String,
    pub name: Option<String>,
    pub document: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub code: Option<String>,
    pub page: Option<i32>,
    pub size: Option<i32>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route("/customers/{customer_id}", put(update_customer))
}

/// POST /customers
/// Register a customer with the provider under the tenant's account.
async fn create_customer(
    State(state): State<AppState>,
    Json(req): Json<CustomerRequest>,
) -> Result<Json<Value>, AppError> {
    let tenant = state.tenants.resolve(&req.tenant_id)?;

    if req.customer.name.trim().is_empty() {
        return Err(AppError::ValidationError(
            "customer name is required".to_string(),
        ));
    }

    let customer = state
        .gateway
        .post(
            &tenant.secret_key,
            "/customers",
            &req.customer.to_registration_payload(),
        )
        .await?;

    Ok(Json(json!({ "success": true, "customer": customer })))
}

/// GET /customers
/// List the tenant's customers, with optional provider-side filters.
async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<ListCustomersQuery>,
) -> Result<Json<Value>, AppError> {
    let tenant = state.tenants.resolve(&query.tenant_id)?;

    let mut params: Vec<(String, String)> = Vec::new();
    for (key, value) in [
        ("name", &query.name),
        ("document", &query.document),
        ("email", &query.email),
        ("gender", &query.gender),
        ("code", &query.code),
    ] {
        if let Some(value) = value {
            if !value.is_empty() {
                params.push((key.to_string(), value.clone()));
            }
        }
    }
    params.push(("page".to_string(), query.page.unwrap_or(1).to_string()));
    params.push(("size".to_string(), query.size.unwrap_or(10).to_string()));

    let customers = state
        .gateway
        .get(&tenant.secret_key, "/customers", &params)
        .await?;

    Ok(Json(json!({ "success": true, "customers": customers })))
}

/// PUT /customers/{customer_id}
/// Update a customer already registered with the provider.
async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Json(req): Json<CustomerRequest>,
) -> Result<Json<Value>, AppError> {
    let tenant = state.tenants.resolve(&req.tenant_id)?;

    if customer_id.trim().is_empty() {
        return Err(AppError::ValidationError(
            "customer id is required".to_string(),
        ));
    }

    let customer = state
        .gateway
        .put(
            &tenant.secret_key,
            &format!("/customers/{customer_id}"),
            &req.customer.to_registration_payload(),
        )
        .await?;

    Ok(Json(json!({ "success": true, "customer": customer })))
}
