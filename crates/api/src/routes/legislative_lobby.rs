use axum::routing::get;
use axum::Router;

use crate::handlers::legislative_lobby;
use crate::state::AppState;

/// Legislative lobby routes mounted at `/legislative-lobby`.
///
/// ```text
/// GET    /      -> list_lobbies
/// POST   /      -> create_lobby (admin)
/// GET    /{id}  -> get_lobby
/// PUT    /{id}  -> update_lobby (admin)
/// DELETE /{id}  -> delete_lobby (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(legislative_lobby::list_lobbies).post(legislative_lobby::create_lobby),
        )
        .route(
            "/{id}",
            get(legislative_lobby::get_lobby)
                .put(legislative_lobby::update_lobby)
                .delete(legislative_lobby::delete_lobby),
        )
}
