#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use khcrf_api::auth::jwt::{issue_access_token, JwtConfig};
use khcrf_api::config::ServerConfig;
use khcrf_api::gateway::razorpay::{RazorpayConfig, DEFAULT_BASE_URL};
use khcrf_api::gateway::{CreateOrderRequest, GatewayError, GatewayOrder, PaymentGateway};
use khcrf_api::router::build_app_router;
use khcrf_api::state::AppState;
use khcrf_api::uploads::UploadStore;
use khcrf_core::roles::{ROLE_ADMIN, ROLE_USER};

pub const KEY_SECRET: &str = "test_key_secret";
pub const WEBHOOK_SECRET: &str = "test_webhook_secret";

/// Build a test `ServerConfig` with fixed secrets and the given upload dir.
pub fn test_config(upload_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:4550".to_string()],
        request_timeout_secs: 30,
        upload_dir,
        max_upload_bytes: 5 * 1024 * 1024,
        jwt: JwtConfig {
            secret: "test-jwt-secret-for-integration-tests".to_string(),
            issuer: None,
            access_token_expiry_mins: 15,
        },
        razorpay: RazorpayConfig {
            key_id: "rzp_test_key".to_string(),
            key_secret: KEY_SECRET.to_string(),
            webhook_secret: WEBHOOK_SECRET.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        },
    }
}

// ---------------------------------------------------------------------------
// In-memory gateway
// ---------------------------------------------------------------------------

/// Payment gateway double that keeps orders in memory.
#[derive(Default)]
pub struct MockGateway {
    orders: Mutex<HashMap<String, GatewayOrder>>,
    next_id: AtomicU64,
}

impl MockGateway {
    /// Register an order as if it had been created earlier.
    pub fn insert_order(&self, id: &str, amount: i64, notes: &[(&str, &str)]) -> GatewayOrder {
        let order = GatewayOrder {
            id: id.to_string(),
            amount,
            currency: "INR".to_string(),
            receipt: Some(format!("receipt_{id}")),
            status: Some("created".to_string()),
            notes: notes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            extra: serde_json::Map::new(),
        };
        self.orders
            .lock()
            .unwrap()
            .insert(order.id.clone(), order.clone());
        order
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<GatewayOrder, GatewayError> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mut extra = serde_json::Map::new();
        extra.insert("entity".into(), "order".into());
        extra.insert("amount_due".into(), request.amount.into());
        let order = GatewayOrder {
            id: format!("order_test_{n}"),
            amount: request.amount,
            currency: request.currency.clone(),
            receipt: Some(request.receipt.clone()),
            status: Some("created".to_string()),
            notes: request.notes.clone(),
            extra,
        };
        self.orders
            .lock()
            .unwrap()
            .insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn fetch_order(&self, order_id: &str) -> Result<Option<GatewayOrder>, GatewayError> {
        Ok(self.orders.lock().unwrap().get(order_id).cloned())
    }
}

// ---------------------------------------------------------------------------
// Test application
// ---------------------------------------------------------------------------

/// Application state plus the handles tests inspect.
pub struct TestApp {
    pub state: AppState,
    pub gateway: Arc<MockGateway>,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn new(pool: PgPool) -> Self {
        let upload_dir = tempfile::tempdir().expect("create upload tempdir");
        let config = test_config(upload_dir.path().to_path_buf());
        let gateway = Arc::new(MockGateway::default());

        let state = AppState {
            pool,
            uploads: Arc::new(UploadStore::new(config.upload_dir.clone())),
            config: Arc::new(config),
            gateway: gateway.clone(),
        };

        Self {
            state,
            gateway,
            upload_dir,
        }
    }

    /// A fresh router over the shared state, mirroring `main.rs`.
    pub fn router(&self) -> Router {
        build_app_router(self.state.clone(), &self.state.config)
    }

    pub fn admin_token(&self) -> String {
        issue_access_token(1, ROLE_ADMIN, &self.state.config.jwt).unwrap()
    }

    pub fn user_token(&self) -> String {
        issue_access_token(2, ROLE_USER, &self.state.config.jwt).unwrap()
    }

    /// Number of files currently in the upload directory.
    pub fn stored_file_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn builder(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header("authorization", format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, builder("GET", uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, builder("GET", uri, Some(token)).body(Body::empty()).unwrap()).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        builder("DELETE", uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn json_request(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let request = builder(method, uri, token)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, "POST", uri, None, body).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    json_request(app, "POST", uri, Some(token), body).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    json_request(app, "PUT", uri, Some(token), body).await
}

/// POST raw bytes with extra headers (webhook deliveries).
pub async fn post_raw(
    app: Router,
    uri: &str,
    headers: &[(&str, &str)],
    body: Vec<u8>,
) -> Response<Body> {
    let mut request = builder("POST", uri, None).header("content-type", "application/json");
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    send(app, request.body(Body::from(body)).unwrap()).await
}

pub async fn multipart_request(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    form: MultipartBody,
) -> Response<Body> {
    let (content_type, body) = form.finish();
    let request = builder(method, uri, token)
        .header("content-type", content_type)
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Multipart body builder
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "khcrf-integration-boundary";

/// Minimal `multipart/form-data` encoder for tests.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, contents: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(contents);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (
            format!("multipart/form-data; boundary={BOUNDARY}"),
            self.body,
        )
    }
}
