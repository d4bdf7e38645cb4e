use axum::routing::get;
use axum::Router;

use crate::handlers::payment_records;
use crate::state::AppState;

/// Admin payment-record routes mounted at `/admin`.
///
/// ```text
/// GET /donations            -> list_donations
/// GET /donations/{id}       -> get_donation
/// GET /members              -> list_members
/// GET /members/{id}         -> get_member
/// GET /certifications       -> list_certifications
/// GET /certifications/{id}  -> get_certification
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/donations", get(payment_records::list_donations))
        .route("/donations/{id}", get(payment_records::get_donation))
        .route("/members", get(payment_records::list_members))
        .route("/members/{id}", get(payment_records::get_member))
        .route("/certifications", get(payment_records::list_certifications))
        .route(
            "/certifications/{id}",
            get(payment_records::get_certification),
        )
}
