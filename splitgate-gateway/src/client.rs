use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Non-success response from the provider; the body is carried
    /// verbatim so the caller sees exactly what the provider said.
    #[error("gateway error [{status}]: {body}")]
    Upstream { status: u16, body: String },

    #[error("gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The one suspension point in the system: sending a fully built
/// payload to the provider and consuming the response. At-most-once,
/// no retries.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    async fn post(&self, secret_key: &str, path: &str, payload: &Value)
        -> Result<Value, GatewayError>;

    async fn get(
        &self,
        secret_key: &str,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Value, GatewayError>;

    async fn put(&self, secret_key: &str, path: &str, payload: &Value)
        -> Result<Value, GatewayError>;
}

/// reqwest-backed transport talking to the provider API.
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The provider authenticates with Basic auth over the secret key
    /// followed by a colon and an empty password.
    fn auth_header(secret_key: &str) -> String {
        format!("Basic {}", BASE64.encode(format!("{secret_key}:")))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn consume(response: reqwest::Response) -> Result<Value, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "gateway rejected request");
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl GatewayTransport for HttpGateway {
    async fn post(
        &self,
        secret_key: &str,
        path: &str,
        payload: &Value,
    ) -> Result<Value, GatewayError> {
        let response = self
            .http
            .post(self.url(path))
            .header("Authorization", Self::auth_header(secret_key))
            .json(payload)
            .send()
            .await?;
        Self::consume(response).await
    }

    async fn get(
        &self,
        secret_key: &str,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Value, GatewayError> {
        let response = self
            .http
            .get(self.url(path))
            .header("Authorization", Self::auth_header(secret_key))
            .query(query)
            .send()
            .await?;
        Self::consume(response).await
    }

    async fn put(
        &self,
        secret_key: &str,
        path: &str,
        payload: &Value,
    ) -> Result<Value, GatewayError> {
        let response = self
            .http
            .put(self.url(path))
            .header("Authorization", Self::auth_header(secret_key))
            .json(payload)
            .send()
            .await?;
        Self::consume(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_header_encodes_key_with_trailing_colon() {
        // base64("sk_test_123:")
        assert_eq!(
            HttpGateway::auth_header("sk_test_123"),
            "Basic c2tfdGVzdF8xMjM6"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let gateway =
            HttpGateway::new("https://api.example.test/core/v5/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            gateway.url("/orders"),
            "https://api.example.test/core/v5/orders"
        );
    }
}
