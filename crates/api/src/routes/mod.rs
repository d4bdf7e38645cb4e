pub mod admin;
pub mod advocacy;
pub mod badge_applications;
pub mod books;
pub mod contact;
pub mod health;
pub mod legislative_lobby;
pub mod payments;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /books                               list (public), create (admin)
/// /books/category/{category}           list by category (public)
/// /books/pdf/{filename}                inline PDF (public)
/// /books/{id}                          get (public), update, delete (admin)
///
/// /legislative-lobby                   list (public), create (admin)
/// /legislative-lobby/{id}              get (public), update, delete (admin)
///
/// /badge-applications                  submit (public), list (admin)
/// /badge-applications/{id}             get, update, delete (admin)
///
/// /advocacy                            list (public), create (admin)
/// /advocacy/{id}                       get (public), update, delete (admin)
///
/// /contact                             submit (public), list (admin)
/// /contact/{id}                        get, delete (admin)
///
/// /payments/orders                     create gateway order (public)
/// /payments/verify                     verify checkout signature (public)
/// /payments/webhook                    gateway webhook (signature-checked)
///
/// /admin/donations[/{id}]              list, get (admin)
/// /admin/members[/{id}]                list, get (admin)
/// /admin/certifications[/{id}]         list, get (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/books", books::router())
        .nest("/legislative-lobby", legislative_lobby::router())
        .nest("/badge-applications", badge_applications::router())
        .nest("/advocacy", advocacy::router())
        .nest("/contact", contact::router())
        .nest("/payments", payments::router())
        .nest("/admin", admin::router())
}
