//! Handlers for contact and collaboration form submissions.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use khcrf_core::contact::validate_message_kind;
use khcrf_core::error::CoreError;
use khcrf_core::types::DbId;
use khcrf_db::models::contact_message::CreateContactMessage;
use khcrf_db::repositories::ContactMessageRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

const ENTITY: &str = "ContactMessage";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// Query parameters for `GET /contact`.
#[derive(Debug, Deserialize)]
pub struct ContactListParams {
    pub kind: Option<String>,
}

/// POST /api/v1/contact
pub async fn submit_message(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<CreateContactMessage>,
) -> AppResult<impl IntoResponse> {
    input.trim();
    input.validate()?;
    if let Some(kind) = &input.kind {
        validate_message_kind(kind)?;
    }

    let message = ContactMessageRepo::create(&state.pool, &input).await?;

    tracing::info!(
        message_id = message.id,
        kind = %message.kind,
        "Contact message received",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// GET /api/v1/contact?kind=
pub async fn list_messages(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ContactListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(kind) = &params.kind {
        validate_message_kind(kind)?;
    }
    let messages = ContactMessageRepo::list(&state.pool, params.kind.as_deref()).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// GET /api/v1/contact/{id}
pub async fn get_message(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(message_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let message = ContactMessageRepo::find_by_id(&state.pool, message_id)
        .await?
        .ok_or_else(|| not_found(message_id))?;
    Ok(Json(DataResponse { data: message }))
}

/// DELETE /api/v1/contact/{id}
pub async fn delete_message(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(message_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ContactMessageRepo::delete(&state.pool, message_id).await? {
        return Err(not_found(message_id));
    }

    tracing::info!(
        message_id,
        user_id = admin.user_id,
        token_id = %admin.token_id,
        "Contact message deleted",
    );

    Ok(Json(DeletedResponse::new(ENTITY, message_id)))
}
