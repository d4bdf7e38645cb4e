//! Tests for the bearer-token and admin-role extractors.

mod common;

use assert_matches::assert_matches;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::Request;
use common::TestApp;
use khcrf_api::auth::jwt::validate_token;
use khcrf_api::error::AppError;
use khcrf_api::middleware::auth::AuthUser;
use khcrf_api::middleware::rbac::RequireAdmin;
use khcrf_core::error::CoreError;
use sqlx::PgPool;

fn parts_with_bearer(token: &str) -> Parts {
    let (parts, _) = Request::builder()
        .uri("/api/v1/books")
        .header("authorization", format!("Bearer {token}"))
        .body(())
        .unwrap()
        .into_parts();
    parts
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_auth_user_carries_token_id(pool: PgPool) {
    let app = TestApp::new(pool);
    let token = app.admin_token();
    let claims = validate_token(&token, &app.state.config.jwt).unwrap();

    let mut parts = parts_with_bearer(&token);
    let user = AuthUser::from_request_parts(&mut parts, &app.state).await.unwrap();

    assert_eq!(user.user_id, 1);
    assert_eq!(user.role, "admin");
    assert_eq!(user.token_id, claims.jti);
    assert!(!user.token_id.is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_require_admin_rejects_plain_users(pool: PgPool) {
    let app = TestApp::new(pool);

    let mut parts = parts_with_bearer(&app.user_token());
    let result = RequireAdmin::from_request_parts(&mut parts, &app.state).await;
    assert_matches!(result, Err(AppError::Core(CoreError::Forbidden(_))));

    let mut parts = parts_with_bearer(&app.admin_token());
    let RequireAdmin(admin) = RequireAdmin::from_request_parts(&mut parts, &app.state)
        .await
        .unwrap();
    assert_eq!(admin.user_id, 1);
}
