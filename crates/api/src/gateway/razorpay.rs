//! Razorpay REST client.
//!
//! Orders API: `POST /v1/orders` and `GET /v1/orders/{id}`, authenticated
//! with HTTP basic auth (key id / key secret). Calls are made once; a
//! failure surfaces to the caller as [`GatewayError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::{CreateOrderRequest, GatewayError, GatewayOrder, PaymentGateway};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.razorpay.com/v1";

/// HTTP request timeout for a single gateway call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Gateway credentials and signing secrets.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Public key id, also used as the basic-auth username.
    pub key_id: String,
    /// Secret for basic auth and for payment signatures.
    pub key_secret: String,
    /// Secret configured on the dashboard for webhook signatures.
    pub webhook_secret: String,
    /// API root, overridable for sandboxes.
    pub base_url: String,
}

impl std::fmt::Debug for RazorpayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"<redacted>")
            .field("webhook_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl RazorpayConfig {
    /// Load gateway configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default                       |
    /// |---------------------------|----------|-------------------------------|
    /// | `RAZORPAY_KEY_ID`         | **yes**  | --                            |
    /// | `RAZORPAY_KEY_SECRET`     | **yes**  | --                            |
    /// | `RAZORPAY_WEBHOOK_SECRET` | **yes**  | --                            |
    /// | `RAZORPAY_BASE_URL`       | no       | `https://api.razorpay.com/v1` |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or empty.
    pub fn from_env() -> Self {
        Self {
            key_id: required_env("RAZORPAY_KEY_ID"),
            key_secret: required_env("RAZORPAY_KEY_SECRET"),
            webhook_secret: required_env("RAZORPAY_WEBHOOK_SECRET"),
            base_url: std::env::var("RAZORPAY_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

fn required_env(name: &str) -> String {
    let value = std::env::var(name).unwrap_or_else(|_| panic!("{name} must be set in the environment"));
    assert!(!value.is_empty(), "{name} must not be empty");
    value
}

/// [`PaymentGateway`] backed by the Razorpay Orders API.
pub struct RazorpayClient {
    client: reqwest::Client,
    config: RazorpayConfig,
}

impl RazorpayClient {
    /// Create a client with a pre-configured HTTP connection pool.
    pub fn new(config: RazorpayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Turn a non-success response into [`GatewayError::Status`].
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<GatewayOrder, GatewayError> {
        let response = self
            .client
            .post(self.url("orders"))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(request)
            .send()
            .await?;

        let order = Self::check(response).await?.json::<GatewayOrder>().await?;
        tracing::debug!(order_id = %order.id, "Gateway order created");
        Ok(order)
    }

    async fn fetch_order(&self, order_id: &str) -> Result<Option<GatewayOrder>, GatewayError> {
        let response = self
            .client
            .get(self.url(&format!("orders/{order_id}")))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .send()
            .await?;

        // Unknown ids come back as 400 BAD_REQUEST_ERROR or 404 depending
        // on the id format.
        if matches!(
            response.status(),
            StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST
        ) {
            tracing::debug!(order_id, status = %response.status(), "Gateway order not found");
            return Ok(None);
        }

        let order = Self::check(response).await?.json::<GatewayOrder>().await?;
        Ok(Some(order))
    }
}
