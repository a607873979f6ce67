use splitgate_gateway::{GatewayTransport, TenantRegistry};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn GatewayTransport>,
    pub tenants: Arc<TenantRegistry>,
}
