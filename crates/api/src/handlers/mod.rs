pub mod advocacy;
pub mod badge_applications;
pub mod books;
pub mod contact;
pub mod legislative_lobby;
pub mod payment_records;
pub mod payments;

use crate::error::AppResult;
use crate::uploads::UploadStore;

/// Remove freshly stored uploads when the step that records them fails.
pub(crate) async fn discard_on_error<T>(
    uploads: &UploadStore,
    stored: &[String],
    result: AppResult<T>,
) -> AppResult<T> {
    if result.is_err() {
        uploads.discard(stored).await;
    }
    result
}
