use std::sync::Arc;

use crate::config::ServerConfig;
use crate::gateway::PaymentGateway;
use crate::uploads::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: khcrf_db::DbPool,
    /// Server configuration (JWT and gateway secrets included).
    pub config: Arc<ServerConfig>,
    /// Payment gateway client. Tests substitute an in-memory double.
    pub gateway: Arc<dyn PaymentGateway>,
    /// Local disk storage for uploaded files.
    pub uploads: Arc<UploadStore>,
}
