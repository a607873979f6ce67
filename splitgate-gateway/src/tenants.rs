use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

/// A recipient registered with the provider for one tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientConfig {
    /// Provider recipient id (rp_* / re_*).
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub liable: bool,
}

/// Per-tenant provider credentials and recipient roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantConfig {
    pub name: String,
    pub secret_key: String,
    pub public_key: Option<String>,
    #[serde(default)]
    pub recipients: Vec<RecipientConfig>,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TenantError {
    #[error("unknown tenant or tenant has no key configured: {0}")]
    UnknownTenant(String),
}

/// Keyed tenant lookup, loaded once at startup. Keys are matched
/// case-insensitively; an unknown key is an explicit error, never a
/// null.
#[derive(Debug, Clone, Default)]
pub struct TenantRegistry {
    tenants: HashMap<String, TenantConfig>,
}

impl TenantRegistry {
    pub fn new(tenants: HashMap<String, TenantConfig>) -> Self {
        let tenants = tenants
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Self { tenants }
    }

    pub fn resolve(&self, tenant_id: &str) -> Result<&TenantConfig, TenantError> {
        self.tenants
            .get(&tenant_id.to_lowercase())
            .ok_or_else(|| TenantError::UnknownTenant(tenant_id.to_string()))
    }

    /// Listing safe to hand to callers: everything except the secret
    /// key.
    pub fn public_view(&self) -> Value {
        let view: serde_json::Map<String, Value> = self
            .tenants
            .iter()
            .map(|(id, tenant)| {
                (
                    id.clone(),
                    json!({
                        "name": tenant.name,
                        "public_key": tenant.public_key,
                        "recipients": tenant.recipients,
                    }),
                )
            })
            .collect();
        Value::Object(view)
    }
}
