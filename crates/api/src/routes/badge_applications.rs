use axum::routing::get;
use axum::Router;

use crate::handlers::badge_applications;
use crate::state::AppState;

/// Badge application routes mounted at `/badge-applications`.
///
/// ```text
/// POST   /      -> submit_application (public, multipart)
/// GET    /      -> list_applications (admin)
/// GET    /{id}  -> get_application (admin)
/// PUT    /{id}  -> update_application (admin)
/// DELETE /{id}  -> delete_application (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(badge_applications::list_applications)
                .post(badge_applications::submit_application),
        )
        .route(
            "/{id}",
            get(badge_applications::get_application)
                .put(badge_applications::update_application)
                .delete(badge_applications::delete_application),
        )
}
