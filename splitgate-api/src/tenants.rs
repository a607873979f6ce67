use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/tenants", get(list_tenants))
}

/// GET /tenants
/// List configured tenants without exposing secret keys.
async fn list_tenants(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "tenants": state.tenants.public_view(),
    }))
}
