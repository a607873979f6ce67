use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod checkout;
pub mod customers;
pub mod error;
pub mod orders;
pub mod payment_links;
pub mod state;
pub mod tenants;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .merge(orders::routes())
        .merge(payment_links::routes())
        .merge(checkout::routes())
        .merge(customers::routes())
        .merge(tenants::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
