use axum::routing::post;
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// Payment routes mounted at `/payments`.
///
/// ```text
/// POST /orders   -> create_order
/// POST /verify   -> verify_payment
/// POST /webhook  -> razorpay_webhook
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", post(payments::create_order))
        .route("/verify", post(payments::verify_payment))
        .route("/webhook", post(payments::razorpay_webhook))
}
