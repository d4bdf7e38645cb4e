//! Request extractors whose rejections render as [`AppError`].
//!
//! Axum's own `Json`, `Path`, `Query` and `Multipart` reject with plain-text
//! bodies (and `422` for JSON that parses but does not fit the target type).
//! These wrappers turn every rejection into a `400` with the usual
//! `{ "error", "code" }` body.

use axum::extract::{FromRequest, FromRequestParts, Multipart, Request};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Query-string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// A `multipart/form-data` body.
pub struct AppMultipart(pub Multipart);

impl<S> FromRequest<S> for AppMultipart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(Multipart::from_request(req, state).await?))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header::CONTENT_TYPE, Request as HttpRequest, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Deserialize)]
    struct Amount {
        #[allow(dead_code)]
        amount: i64,
    }

    async fn take_json(AppJson(_): AppJson<Amount>) -> StatusCode {
        StatusCode::OK
    }

    async fn take_path(AppPath(_): AppPath<i64>) -> StatusCode {
        StatusCode::OK
    }

    async fn take_multipart(AppMultipart(_): AppMultipart) -> StatusCode {
        StatusCode::OK
    }

    fn app() -> Router {
        Router::new()
            .route("/json", post(take_json))
            .route("/path/{id}", get(take_path))
            .route("/form", post(take_multipart))
    }

    async fn send(request: HttpRequest<Body>) -> (StatusCode, serde_json::Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn json_post(body: &'static str) -> HttpRequest<Body> {
        HttpRequest::post("/json")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn truncated_json_is_a_bad_request_envelope() {
        let (status, body) = send(json_post("{")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn mistyped_json_is_400_not_422() {
        let (status, body) = send(json_post(r#"{"amount": 500.5}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn missing_json_content_type_is_400() {
        let request = HttpRequest::post("/json")
            .body(Body::from(r#"{"amount": 5}"#))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn unparsable_path_id_is_a_bad_request_envelope() {
        let request = HttpRequest::get("/path/abc").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn non_multipart_body_is_a_bad_request_envelope() {
        let request = HttpRequest::post("/form")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }
}
