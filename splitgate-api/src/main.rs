use splitgate_api::{app, AppState};
use splitgate_gateway::{HttpGateway, TenantRegistry};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "splitgate_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = splitgate_gateway::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Splitgate API on port {}", config.server.port);

    let gateway = HttpGateway::new(
        &config.gateway.base_url,
        Duration::from_secs(config.gateway.timeout_seconds),
    )
    .expect("Failed to build gateway client");

    let state = AppState {
        gateway: Arc::new(gateway),
        tenants: Arc::new(TenantRegistry::new(config.tenants)),
    };

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
