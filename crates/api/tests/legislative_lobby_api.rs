mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, post_json, post_json_auth, put_json_auth, TestApp};
use serde_json::json;
use sqlx::PgPool;

fn lobby_body() -> serde_json::Value {
    json!({
        "name": "Priya Nair",
        "location": "Thiruvananthapuram",
        "title": "Member of Legislative Assembly",
        "image": "uploads/priya.png",
        "hover_image": "uploads/priya-hover.png"
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_lobby_crud(pool: PgPool) {
    let app = TestApp::new(pool);
    let token = app.admin_token();

    let response = post_json_auth(app.router(), "/api/v1/legislative-lobby", &token, lobby_body()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await["data"].clone();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "Priya Nair");
    assert_eq!(created["hover_image"], "uploads/priya-hover.png");

    let response = get(app.router(), &format!("/api/v1/legislative-lobby/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json_auth(
        app.router(),
        &format!("/api/v1/legislative-lobby/{id}"),
        &token,
        json!({"location": "Kochi"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();
    assert_eq!(updated["location"], "Kochi");
    assert_eq!(updated["title"], "Member of Legislative Assembly");

    let response = delete_auth(app.router(), &format!("/api/v1/legislative-lobby/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app.router(), &format!("/api/v1/legislative-lobby/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_lobby_mutations_require_admin(pool: PgPool) {
    let app = TestApp::new(pool);

    let response = post_json(app.router(), "/api/v1/legislative-lobby", lobby_body()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");

    let token = app.user_token();
    let response = post_json_auth(app.router(), "/api/v1/legislative-lobby", &token, lobby_body()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.router(), "/api/v1/legislative-lobby/1", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(app.router(), "/api/v1/legislative-lobby").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_lobby_blank_name_returns_400(pool: PgPool) {
    let app = TestApp::new(pool);
    let token = app.admin_token();
    let mut body = lobby_body();
    body["name"] = json!("");

    let response = post_json_auth(app.router(), "/api/v1/legislative-lobby", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"]
        .as_str()
        .unwrap()
        .contains("name"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_lobby_whitespace_fields_return_400(pool: PgPool) {
    let app = TestApp::new(pool);
    let token = app.admin_token();
    let mut body = lobby_body();
    body["name"] = json!("   ");

    let response = post_json_auth(app.router(), "/api/v1/legislative-lobby", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let mut body = lobby_body();
    body["name"] = json!("  Priya Nair  ");
    let response = post_json_auth(app.router(), "/api/v1/legislative-lobby", &token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await["data"].clone();
    assert_eq!(created["name"], "Priya Nair");

    let response = put_json_auth(
        app.router(),
        &format!("/api/v1/legislative-lobby/{}", created["id"]),
        &token,
        json!({"title": " "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_lobby_list_is_newest_first(pool: PgPool) {
    let app = TestApp::new(pool);
    let token = app.admin_token();
    for name in ["first", "second"] {
        let mut body = lobby_body();
        body["name"] = json!(name);
        let response = post_json_auth(app.router(), "/api/v1/legislative-lobby", &token, body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(app.router(), "/api/v1/legislative-lobby").await;
    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["second", "first"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_missing_lobby_returns_404(pool: PgPool) {
    let app = TestApp::new(pool);
    let token = app.admin_token();
    let response = delete_auth(app.router(), "/api/v1/legislative-lobby/424242", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
