//! Handlers for sustainability badge applications.
//!
//! Businesses apply publicly with a multipart form and up to
//! [`MAX_BADGE_APPLICATION_FILES`] supporting files. Review and cleanup are
//! admin-only and use JSON bodies.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use khcrf_core::error::CoreError;
use khcrf_core::list_field::ListInput;
use khcrf_core::types::DbId;
use khcrf_core::uploads::{UploadKind, MAX_BADGE_APPLICATION_FILES};
use khcrf_db::models::badge_application::{CreateBadgeApplication, UpdateBadgeApplication};
use khcrf_db::repositories::BadgeApplicationRepo;
use serde::Deserialize;
use validator::Validate;

use super::discard_on_error;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppMultipart, AppPath};
use crate::middleware::rbac::RequireAdmin;
use crate::multipart::FormData;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

const ENTITY: &str = "BadgeApplication";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// JSON body for `PUT /badge-applications/{id}`.
///
/// List fields may be native arrays or JSON-encoded strings.
#[derive(Debug, Deserialize)]
pub struct UpdateBadgeApplicationRequest {
    pub business_name: Option<String>,
    pub contact_person: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
    pub business_address: Option<String>,
    pub badges: Option<ListInput>,
    pub business_description: Option<String>,
    pub production_methods: Option<String>,
    pub supporting_documentation: Option<ListInput>,
    pub other_documentation: Option<String>,
    pub certification: Option<bool>,
}

impl UpdateBadgeApplicationRequest {
    fn into_update(self) -> AppResult<UpdateBadgeApplication> {
        Ok(UpdateBadgeApplication {
            business_name: self.business_name,
            contact_person: self.contact_person,
            email_address: self.email_address,
            phone_number: self.phone_number,
            business_address: self.business_address,
            badges: self.badges.map(|b| b.into_vec("badges")).transpose()?,
            business_description: self.business_description,
            production_methods: self.production_methods,
            supporting_documentation: self
                .supporting_documentation
                .map(|d| d.into_vec("supporting_documentation"))
                .transpose()?,
            other_documentation: self.other_documentation,
            certification: self.certification,
        })
    }
}

/// POST /api/v1/badge-applications
pub async fn submit_application(
    State(state): State<AppState>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<impl IntoResponse> {
    let mut form = FormData::from_multipart(multipart).await?;

    let files = form.take_files("uploaded_files");
    if files.len() > MAX_BADGE_APPLICATION_FILES {
        return Err(AppError::Core(CoreError::Validation(format!(
            "At most {MAX_BADGE_APPLICATION_FILES} files may be uploaded ({} given)",
            files.len()
        ))));
    }

    let input = CreateBadgeApplication {
        business_name: form.required_text("business_name")?,
        contact_person: form.required_text("contact_person")?,
        email_address: form.required_text("email_address")?,
        phone_number: form.text("phone_number"),
        business_address: form.text("business_address"),
        badges: form.list("badges")?.unwrap_or_default(),
        business_description: form.text("business_description"),
        production_methods: form.text("production_methods"),
        supporting_documentation: form.list("supporting_documentation")?.unwrap_or_default(),
        other_documentation: form.text("other_documentation"),
        certification: form.flag("certification")?.unwrap_or(false),
        uploaded_files: Vec::new(),
    };
    input.validate()?;

    let uploaded_files = state.uploads.save_all(UploadKind::Document, &files).await?;
    let input = CreateBadgeApplication {
        uploaded_files: uploaded_files.clone(),
        ..input
    };
    let created = BadgeApplicationRepo::create(&state.pool, &input)
        .await
        .map_err(AppError::from);
    let application = discard_on_error(&state.uploads, &uploaded_files, created).await?;

    tracing::info!(
        application_id = application.id,
        files = application.uploaded_files.len(),
        "Badge application submitted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: application })))
}

/// GET /api/v1/badge-applications
pub async fn list_applications(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let applications = BadgeApplicationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: applications }))
}

/// GET /api/v1/badge-applications/{id}
pub async fn get_application(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(application_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let application = BadgeApplicationRepo::find_by_id(&state.pool, application_id)
        .await?
        .ok_or_else(|| not_found(application_id))?;
    Ok(Json(DataResponse { data: application }))
}

/// PUT /api/v1/badge-applications/{id}
pub async fn update_application(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(application_id): AppPath<DbId>,
    AppJson(body): AppJson<UpdateBadgeApplicationRequest>,
) -> AppResult<impl IntoResponse> {
    let input = body.into_update()?;
    input.validate()?;

    let application = BadgeApplicationRepo::update(&state.pool, application_id, &input)
        .await?
        .ok_or_else(|| not_found(application_id))?;

    tracing::info!(
        application_id,
        user_id = admin.user_id,
        token_id = %admin.token_id,
        "Badge application updated",
    );

    Ok(Json(DataResponse { data: application }))
}

/// DELETE /api/v1/badge-applications/{id}
pub async fn delete_application(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(application_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = BadgeApplicationRepo::find_by_id(&state.pool, application_id)
        .await?
        .ok_or_else(|| not_found(application_id))?;

    if !BadgeApplicationRepo::delete(&state.pool, application_id).await? {
        return Err(not_found(application_id));
    }
    state.uploads.discard(&existing.uploaded_files).await;

    tracing::info!(
        application_id,
        user_id = admin.user_id,
        token_id = %admin.token_id,
        "Badge application deleted",
    );

    Ok(Json(DeletedResponse::new(ENTITY, application_id)))
}
