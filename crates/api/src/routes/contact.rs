use axum::routing::get;
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Contact form routes mounted at `/contact`.
///
/// ```text
/// POST   /      -> submit_message (public)
/// GET    /      -> list_messages (admin, ?kind=)
/// GET    /{id}  -> get_message (admin)
/// DELETE /{id}  -> delete_message (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::list_messages).post(contact::submit_message))
        .route(
            "/{id}",
            get(contact::get_message).delete(contact::delete_message),
        )
}
