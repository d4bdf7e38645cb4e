use axum::routing::get;
use axum::Router;

use crate::handlers::advocacy;
use crate::state::AppState;

/// Advocacy post routes mounted at `/advocacy`.
///
/// ```text
/// GET    /      -> list_posts
/// POST   /      -> create_post (admin, multipart)
/// GET    /{id}  -> get_post
/// PUT    /{id}  -> update_post (admin, multipart)
/// DELETE /{id}  -> delete_post (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(advocacy::list_posts).post(advocacy::create_post))
        .route(
            "/{id}",
            get(advocacy::get_post)
                .put(advocacy::update_post)
                .delete(advocacy::delete_post),
        )
}
