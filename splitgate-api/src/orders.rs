use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use splitgate_core::payment::PaymentMethod;
use splitgate_core::{OrderPayloadAdapter, PayloadAdapter, PaymentRequest};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub tenant_id: String,
    #[serde(flatten)]
    pub order: PaymentRequest,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/pix", post(create_pix_order))
        .route("/orders/boleto", post(create_boleto_order))
        .route("/orders/credit-card", post(create_credit_card_order))
}

/// POST /orders
/// Create an order with an optional split using the provider's Order API.
async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<Value>, AppError> {
    submit_order(&state, req).await
}

/// POST /orders/pix — convenience route forcing the PIX method.
async fn create_pix_order(
    State(state): State<AppState>,
    Json(mut req): Json<CreateOrderRequest>,
) -> Result<Json<Value>, AppError> {
    req.order.payment_method = Some(PaymentMethod::Pix);
    submit_order(&state, req).await
}

/// POST /orders/boleto — convenience route forcing the boleto method.
async fn create_boleto_order(
    State(state): State<AppState>,
    Json(mut req): Json<CreateOrderRequest>,
) -> Result<Json<Value>, AppError> {
    req.order.payment_method = Some(PaymentMethod::Boleto);
    submit_order(&state, req).await
}

/// POST /orders/credit-card — convenience route forcing credit card.
async fn create_credit_card_order(
    State(state): State<AppState>,
    Json(mut req): Json<CreateOrderRequest>,
) -> Result<Json<Value>, AppError> {
    req.order.payment_method = Some(PaymentMethod::CreditCard);
    submit_order(&state, req).await
}

async fn submit_order(state: &AppState, req: CreateOrderRequest) -> Result<Json<Value>, AppError> {
    let tenant = state.tenants.resolve(&req.tenant_id)?;

    let adapter = OrderPayloadAdapter;
    let payload = adapter.project(&req.order)?;

    tracing::debug!(tenant = %req.tenant_id, "submitting order to gateway");
    let order = state
        .gateway
        .post(&tenant.secret_key, adapter.path(), &payload)
        .await?;

    let mut response = Map::new();
    response.insert("success".to_string(), json!(true));
    for (key, value) in charge_outcome(&order) {
        response.insert(key, value);
    }
    response.insert("order".to_string(), order);

    Ok(Json(Value::Object(response)))
}

/// Pull the caller-relevant fields out of the provider's order
/// response, keyed by the transaction type of the first charge.
fn charge_outcome(order: &Value) -> Map<String, Value> {
    let mut outcome = Map::new();

    let Some(charge) = order["charges"].get(0) else {
        return outcome;
    };
    let last_transaction = &charge["last_transaction"];

    match last_transaction["transaction_type"].as_str().unwrap_or("") {
        "pix" => {
            outcome.insert(
                "pix_qr_code".to_string(),
                json!(last_transaction["qr_code"].as_str().unwrap_or_default()),
            );
            outcome.insert(
                "pix_qr_code_url".to_string(),
                json!(last_transaction["qr_code_url"].as_str().unwrap_or_default()),
            );
        }
        "boleto" => {
            outcome.insert(
                "boleto_url".to_string(),
                json!(last_transaction["url"].as_str().unwrap_or_default()),
            );
            outcome.insert(
                "boleto_barcode".to_string(),
                json!(last_transaction["barcode"].as_str().unwrap_or_default()),
            );
            outcome.insert(
                "boleto_pdf".to_string(),
                json!(last_transaction["pdf"].as_str().unwrap_or_default()),
            );
        }
        "credit_card" | "debit_card" => {
            outcome.insert(
                "transaction_id".to_string(),
                json!(last_transaction["id"].as_str().unwrap_or_default()),
            );
            outcome.insert(
                "status".to_string(),
                json!(charge["status"].as_str().unwrap_or_default()),
            );
        }
        _ => {}
    }

    outcome
}
