pub mod app_config;
pub mod client;
pub mod tenants;

pub use client::{GatewayError, GatewayTransport, HttpGateway};
pub use tenants::{TenantConfig, TenantError, TenantRegistry};
