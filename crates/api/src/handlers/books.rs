//! Handlers for the e-publication library.
//!
//! Reads are public. Creating, updating and deleting books requires the
//! admin role and takes multipart bodies carrying the cover image and PDF.

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use khcrf_core::books::validate_book_category;
use khcrf_core::error::CoreError;
use khcrf_core::types::DbId;
use khcrf_core::uploads::{extension_of, UploadKind};
use khcrf_db::models::book::{CreateBook, UpdateBook};
use khcrf_db::repositories::BookRepo;
use validator::Validate;

use super::discard_on_error;
use crate::error::{AppError, AppResult};
use crate::extract::{AppMultipart, AppPath};
use crate::middleware::rbac::RequireAdmin;
use crate::multipart::FormData;
use crate::response::{DataResponse, DeletedResponse};
use crate::state::AppState;

const ENTITY: &str = "Book";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// GET /api/v1/books
pub async fn list_books(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let books = BookRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: books }))
}

/// GET /api/v1/books/category/{category}
///
/// Unknown categories are a 400 rather than an empty list.
pub async fn list_books_by_category(
    State(state): State<AppState>,
    AppPath(category): AppPath<String>,
) -> AppResult<impl IntoResponse> {
    validate_book_category(&category)?;
    let books = BookRepo::list_by_category(&state.pool, &category).await?;
    Ok(Json(DataResponse { data: books }))
}

/// GET /api/v1/books/{id}
pub async fn get_book(
    State(state): State<AppState>,
    AppPath(book_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let book = BookRepo::find_by_id(&state.pool, book_id)
        .await?
        .ok_or_else(|| not_found(book_id))?;
    Ok(Json(DataResponse { data: book }))
}

/// GET /api/v1/books/pdf/{filename}
///
/// Send a stored PDF for in-browser viewing.
pub async fn serve_pdf(
    State(state): State<AppState>,
    AppPath(filename): AppPath<String>,
) -> AppResult<Response> {
    let path = state
        .uploads
        .resolve(&filename)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid file name: '{filename}'")))?;
    if extension_of(&filename).as_deref() != Some("pdf") {
        return Err(AppError::BadRequest(format!(
            "'{filename}' is not a PDF file"
        )));
    }

    let bytes = tokio::fs::read(&path).await?;

    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (CONTENT_DISPOSITION, format!("inline; filename=\"{filename}\"")),
        ],
        Body::from(bytes),
    )
        .into_response())
}

/// POST /api/v1/books
///
/// Multipart fields: `title`, `author`, `category`, `cover` (image) and
/// `pdf`. All are required.
pub async fn create_book(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<impl IntoResponse> {
    let mut form = FormData::from_multipart(multipart).await?;

    let title = form.required_text("title")?;
    let author = form.required_text("author")?;
    let category = form.required_text("category")?;
    validate_book_category(&category)?;

    let cover = form
        .take_file("cover")?
        .ok_or_else(|| AppError::Core(CoreError::Validation("'cover' file is required".into())))?;
    let pdf = form
        .take_file("pdf")?
        .ok_or_else(|| AppError::Core(CoreError::Validation("'pdf' file is required".into())))?;

    let cover_image = state.uploads.save(UploadKind::Image, &cover).await?;
    let saved_pdf = state.uploads.save(UploadKind::Pdf, &pdf).await;
    let pdf_file =
        discard_on_error(&state.uploads, std::slice::from_ref(&cover_image), saved_pdf).await?;
    let stored = [cover_image.clone(), pdf_file.clone()];

    let input = CreateBook {
        title,
        author,
        category,
        cover_image,
        pdf_file,
    };
    let result = match input.validate() {
        Ok(()) => BookRepo::create(&state.pool, &input).await.map_err(AppError::from),
        Err(e) => Err(e.into()),
    };
    let book = discard_on_error(&state.uploads, &stored, result).await?;

    tracing::info!(
        book_id = book.id,
        category = %book.category,
        user_id = admin.user_id,
        token_id = %admin.token_id,
        "Book created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: book })))
}

/// PUT /api/v1/books/{id}
///
/// Same fields as create, all optional. A new `cover` or `pdf` replaces the
/// stored file.
pub async fn update_book(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(book_id): AppPath<DbId>,
    AppMultipart(multipart): AppMultipart,
) -> AppResult<impl IntoResponse> {
    let mut form = FormData::from_multipart(multipart).await?;

    let existing = BookRepo::find_by_id(&state.pool, book_id)
        .await?
        .ok_or_else(|| not_found(book_id))?;

    let category = form.text("category");
    if let Some(category) = &category {
        validate_book_category(category)?;
    }
    let cover = form.take_file("cover")?;
    let pdf = form.take_file("pdf")?;

    let mut stored = Vec::new();
    let mut input = UpdateBook {
        title: form.text("title"),
        author: form.text("author"),
        category,
        ..Default::default()
    };
    if let Some(cover) = &cover {
        let path = state.uploads.save(UploadKind::Image, cover).await?;
        stored.push(path.clone());
        input.cover_image = Some(path);
    }
    if let Some(pdf) = &pdf {
        let saved = state.uploads.save(UploadKind::Pdf, pdf).await;
        let path = discard_on_error(&state.uploads, &stored, saved).await?;
        stored.push(path.clone());
        input.pdf_file = Some(path);
    }

    let result = match input.validate() {
        Ok(()) => BookRepo::update(&state.pool, book_id, &input)
            .await
            .map_err(AppError::from)
            .and_then(|book| book.ok_or_else(|| not_found(book_id))),
        Err(e) => Err(e.into()),
    };
    let book = discard_on_error(&state.uploads, &stored, result).await?;

    let mut replaced = Vec::new();
    if input.cover_image.is_some() {
        replaced.push(existing.cover_image);
    }
    if input.pdf_file.is_some() {
        replaced.push(existing.pdf_file);
    }
    state.uploads.discard(&replaced).await;

    tracing::info!(
        book_id,
        user_id = admin.user_id,
        token_id = %admin.token_id,
        "Book updated",
    );

    Ok(Json(DataResponse { data: book }))
}

/// DELETE /api/v1/books/{id}
pub async fn delete_book(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(book_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = BookRepo::find_by_id(&state.pool, book_id)
        .await?
        .ok_or_else(|| not_found(book_id))?;

    if !BookRepo::delete(&state.pool, book_id).await? {
        return Err(not_found(book_id));
    }
    state
        .uploads
        .discard(&[existing.cover_image, existing.pdf_file])
        .await;

    tracing::info!(
        book_id,
        user_id = admin.user_id,
        token_id = %admin.token_id,
        "Book deleted",
    );

    Ok(Json(DeletedResponse::new(ENTITY, book_id)))
}
