use axum::routing::get;
use axum::Router;

use crate::handlers::books;
use crate::state::AppState;

/// Book routes mounted at `/books`.
///
/// ```text
/// GET    /                     -> list_books
/// POST   /                     -> create_book (admin, multipart)
/// GET    /category/{category}  -> list_books_by_category
/// GET    /pdf/{filename}       -> serve_pdf
/// GET    /{id}                 -> get_book
/// PUT    /{id}                 -> update_book (admin, multipart)
/// DELETE /{id}                 -> delete_book (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(books::list_books).post(books::create_book))
        .route("/category/{category}", get(books::list_books_by_category))
        .route("/pdf/{filename}", get(books::serve_pdf))
        .route(
            "/{id}",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
}
