//! Repository for the `contact_messages` table.

use khcrf_core::contact::KIND_CONTACT;
use khcrf_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact_message::{ContactMessage, CreateContactMessage};

const COLUMNS: &str =
    "id, kind, name, email, phone, organization, subject, message, created_at, updated_at";

pub struct ContactMessageRepo;

impl ContactMessageRepo {
    /// Insert a submission. A missing `kind` is stored as `contact`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContactMessage,
    ) -> Result<ContactMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_messages \
                 (kind, name, email, phone, organization, subject, message) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(input.kind.as_deref().unwrap_or(KIND_CONTACT))
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.organization)
            .bind(&input.subject)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContactMessage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contact_messages WHERE id = $1");
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List submissions newest first, optionally narrowed to one kind.
    pub async fn list(
        pool: &PgPool,
        kind: Option<&str>,
    ) -> Result<Vec<ContactMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contact_messages \
             WHERE ($1::TEXT IS NULL OR kind = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(kind)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
