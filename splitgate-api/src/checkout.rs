use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use splitgate_core::{CheckoutPayloadAdapter, PayloadAdapter, PaymentRequest};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub tenant_id: String,
    #[serde(flatten)]
    pub checkout: PaymentRequest,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/checkout", post(create_checkout))
}

/// POST /checkout
/// Legacy simplified checkout: fixed payment windows and installment
/// setup, returning only the hosted checkout URL.
async fn create_checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<Value>, AppError> {
    let tenant = state.tenants.resolve(&req.tenant_id)?;

    let adapter = CheckoutPayloadAdapter;
    let payload = adapter.project(&req.checkout)?;

    let link = state
        .gateway
        .post(&tenant.secret_key, adapter.path(), &payload)
        .await?;

    match link["url"].as_str().filter(|u| !u.is_empty()) {
        Some(url) => Ok(Json(json!({ "checkout_url": url }))),
        None => Err(AppError::UpstreamError(format!(
            "checkout url not present in gateway response: {link}"
        ))),
    }
}
