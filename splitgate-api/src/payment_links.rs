use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use splitgate_core::{PayloadAdapter, PaymentLinkPayloadAdapter, PaymentRequest};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePaymentLinkRequest {
    pub tenant_id: String,
    #[serde(flatten)]
    pub link: PaymentRequest,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/payment-links", post(create_payment_link))
}

/// POST /payment-links
/// Create a provider-hosted checkout link with an optional split.
/// The returned URL can be sent to the customer, who fills in their
/// own payment data.
async fn create_payment_link(
    State(state): State<AppState>,
    Json(req): Json<CreatePaymentLinkRequest>,
) -> Result<Json<Value>, AppError> {
    let tenant = state.tenants.resolve(&req.tenant_id)?;

    let adapter = PaymentLinkPayloadAdapter;
    let payload = adapter.project(&req.link)?;

    tracing::debug!(tenant = %req.tenant_id, "creating payment link");
    let link = state
        .gateway
        .post(&tenant.secret_key, adapter.path(), &payload)
        .await?;

    let mut response = Map::new();
    response.insert("success".to_string(), json!(true));
    for (key, value) in link_summary(&link) {
        response.insert(key, value);
    }
    response.insert("payment_link".to_string(), link);

    Ok(Json(Value::Object(response)))
}

/// Lift the checkout URL and link identifiers out of the provider
/// response when they are present.
fn link_summary(link: &Value) -> Map<String, Value> {
    let mut summary = Map::new();

    if let Some(url) = link["url"].as_str().filter(|u| !u.is_empty()) {
        summary.insert("checkout_url".to_string(), json!(url));
    }
    if let Some(id) = link["id"].as_str() {
        summary.insert("link_id".to_string(), json!(id));
    }
    if let Some(short_url) = link["short_url"].as_str().filter(|u| !u.is_empty()) {
        summary.insert("short_url".to_string(), json!(short_url));
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lifts_url_id_and_short_url() {
        let link = json!({
            "id": "pl_123",
            "url": "https://pay.example.test/pl_123",
            "short_url": "https://pay.gg/x1",
        });
        let summary = link_summary(&link);
        assert_eq!(summary["checkout_url"], "https://pay.example.test/pl_123");
        assert_eq!(summary["link_id"], "pl_123");
        assert_eq!(summary["short_url"], "https://pay.gg/x1");
    }

    #[test]
    fn empty_fields_are_left_out() {
        let summary = link_summary(&json!({"id": "pl_123", "url": ""}));
        assert!(summary.get("checkout_url").is_none());
        assert_eq!(summary["link_id"], "pl_123");
        assert!(summary.get("short_url").is_none());
    }
}
