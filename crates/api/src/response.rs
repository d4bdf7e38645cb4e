//! Shared response envelope types for API handlers.
//!
//! Every success response uses a `{ "data": ... }` envelope. Use
//! [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`.

use khcrf_core::types::DbId;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Payload returned by every delete endpoint.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub id: DbId,
    pub message: String,
}

impl DeletedResponse {
    /// `"<Entity> deleted successfully"` for the given record.
    pub fn new(entity: &str, id: DbId) -> DataResponse<Self> {
        DataResponse {
            data: Self {
                id,
                message: format!("{entity} deleted successfully"),
            },
        }
    }
}
