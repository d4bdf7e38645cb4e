//! Handlers for the legislative-lobby directory.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use khcrf_core::error::CoreError;
use khcrf_core::types::DbId;
use khcrf_db::models::legislative_lobby::{CreateLegislativeLobby, UpdateLegislativeLobby};
use khcrf_db::repositories::LegislativeLobbyRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

const ENTITY: &str = "LegislativeLobby";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// GET /api/v1/legislative-lobby
pub async fn list_lobbies(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let lobbies = LegislativeLobbyRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: lobbies }))
}

/// GET /api/v1/legislative-lobby/{id}
pub async fn get_lobby(
    State(state): State<AppState>,
    AppPath(lobby_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let lobby = LegislativeLobbyRepo::find_by_id(&state.pool, lobby_id)
        .await?
        .ok_or_else(|| not_found(lobby_id))?;
    Ok(Json(DataResponse { data: lobby }))
}

/// POST /api/v1/legislative-lobby
pub async fn create_lobby(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppJson(mut input): AppJson<CreateLegislativeLobby>,
) -> AppResult<impl IntoResponse> {
    input.trim();
    input.validate()?;
    let lobby = LegislativeLobbyRepo::create(&state.pool, &input).await?;

    tracing::info!(
        lobby_id = lobby.id,
        name = %lobby.name,
        user_id = admin.user_id,
        token_id = %admin.token_id,
        "Legislative lobby created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: lobby })))
}

/// PUT /api/v1/legislative-lobby/{id}
pub async fn update_lobby(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(lobby_id): AppPath<DbId>,
    AppJson(mut input): AppJson<UpdateLegislativeLobby>,
) -> AppResult<impl IntoResponse> {
    input.trim();
    input.validate()?;
    let lobby = LegislativeLobbyRepo::update(&state.pool, lobby_id, &input)
        .await?
        .ok_or_else(|| not_found(lobby_id))?;

    tracing::info!(
        lobby_id,
        user_id = admin.user_id,
        token_id = %admin.token_id,
        "Legislative lobby updated",
    );

    Ok(Json(DataResponse { data: lobby }))
}

/// DELETE /api/v1/legislative-lobby/{id}
pub async fn delete_lobby(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(lobby_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !LegislativeLobbyRepo::delete(&state.pool, lobby_id).await? {
        return Err(not_found(lobby_id));
    }

    tracing::info!(
        lobby_id,
        user_id = admin.user_id,
        token_id = %admin.token_id,
        "Legislative lobby deleted",
    );

    Ok(Json(DeletedResponse::new(ENTITY, lobby_id)))
}
