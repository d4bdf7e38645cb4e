//! Handlers for advocacy posts.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use khcrf_core::error::CoreError;
use khcrf_core::types::DbId;
use khcrf_core::uploads::{UploadKind, MAX_ADVOCACY_IMAGES};
use khcrf_db::models::advocacy::{CreateAdvocacyPost, UpdateAdvocacyPost};
use khcrf_db::repositories::AdvocacyRepo;
use validator::Validate;

use super::discard_on_error;
use crate::error::{AppError, AppResult};
use crate::extract::{AppMultipart, AppPath};
use crate::middleware::rbac::RequireAdmin;
use crate::multipart::{FilePart, FormData};
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

const ENTITY: &str = "AdvocacyPost";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

fn take_images(form: &mut FormData) -> AppResult<Vec<FilePart>> {
    let images = form.take_files("images");
    if images.len() > MAX_ADVOCACY_IMAGES {
        return Err(AppError::Core(CoreError::Validation(format!(
            "At most {MAX_ADVOCACY_IMAGES} images may be attached ({} given)",
            images.len()
        ))));
    }
    Ok(images)
}

/// GET /api/v1/advocacy
pub async fn list_posts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let posts = AdvocacyRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/v1/advocacy/{id}
pub async fn get_post(
    State(state): State<AppState>,
    AppPath(post_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = AdvocacyRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or_else(|| not_found(post_id))?;
    Ok(Json(DataResponse { data: post }))
}

/// POST /api/v1/advocacy
///
/// Multipart fields: `title`, `content` and up to five `images`.
pub async fn create_post(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<impl IntoResponse> {
    let mut form = FormData::from_multipart(multipart).await?;
    let images = take_images(&mut form)?;

    let mut input = CreateAdvocacyPost {
        title: form.required_text("title")?,
        content: form.required_text("content")?,
        images: Vec::new(),
    };
    input.validate()?;

    input.images = state.uploads.save_all(UploadKind::Image, &images).await?;
    let created = AdvocacyRepo::create(&state.pool, &input)
        .await
        .map_err(AppError::from);
    let post = discard_on_error(&state.uploads, &input.images, created).await?;

    tracing::info!(
        post_id = post.id,
        images = post.images.len(),
        user_id = admin.user_id,
        token_id = %admin.token_id,
        "Advocacy post created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// PUT /api/v1/advocacy/{id}
///
/// Any `images` submitted replace the whole stored list.
pub async fn update_post(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(post_id): AppPath<DbId>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<impl IntoResponse> {
    let mut form = FormData::from_multipart(multipart).await?;
    let images = take_images(&mut form)?;

    let existing = AdvocacyRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or_else(|| not_found(post_id))?;

    let mut input = UpdateAdvocacyPost {
        title: form.text("title"),
        content: form.text("content"),
        images: None,
    };
    input.validate()?;

    let stored = state.uploads.save_all(UploadKind::Image, &images).await?;
    if !stored.is_empty() {
        input.images = Some(stored.clone());
    }
    let updated = AdvocacyRepo::update(&state.pool, post_id, &input)
        .await
        .map_err(AppError::from)
        .and_then(|post| post.ok_or_else(|| not_found(post_id)));
    let post = discard_on_error(&state.uploads, &stored, updated).await?;

    if input.images.is_some() {
        state.uploads.discard(&existing.images).await;
    }

    tracing::info!(
        post_id,
        user_id = admin.user_id,
        token_id = %admin.token_id,
        "Advocacy post updated",
    );

    Ok(Json(DataResponse { data: post }))
}

/// DELETE /api/v1/advocacy/{id}
pub async fn delete_post(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(post_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = AdvocacyRepo::find_by_id(&state.pool, post_id)
        .await?
        .ok_or_else(|| not_found(post_id))?;

    if !AdvocacyRepo::delete(&state.pool, post_id).await? {
        return Err(not_found(post_id));
    }
    state.uploads.discard(&existing.images).await;

    tracing::info!(
        post_id,
        user_id = admin.user_id,
        token_id = %admin.token_id,
        "Advocacy post deleted",
    );

    Ok(Json(DeletedResponse::new(ENTITY, post_id)))
}
