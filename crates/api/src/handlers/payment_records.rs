//! Admin listings of donations, memberships and certifications.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use khcrf_core::error::CoreError;
use khcrf_core::types::DbId;
use khcrf_db::repositories::{CertificationRepo, DonationRepo, MemberRepo};

use crate::error::{AppError, AppResult};
use crate::extract::AppPath;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/donations
pub async fn list_donations(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let donations = DonationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: donations }))
}

/// GET /api/v1/admin/donations/{id}
pub async fn get_donation(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let donation = DonationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Donation",
            id,
        }))?;
    Ok(Json(DataResponse { data: donation }))
}

/// GET /api/v1/admin/members
pub async fn list_members(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let members = MemberRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: members }))
}

/// GET /api/v1/admin/members/{id}
pub async fn get_member(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let member = MemberRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Member",
            id,
        }))?;
    Ok(Json(DataResponse { data: member }))
}

/// GET /api/v1/admin/certifications
pub async fn list_certifications(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let certifications = CertificationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: certifications,
    }))
}

/// GET /api/v1/admin/certifications/{id}
pub async fn get_certification(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let certification = CertificationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Certification",
            id,
        }))?;
    Ok(Json(DataResponse {
        data: certification,
    }))
}
