//! Repository for the `certifications` table.

use khcrf_core::payments::{STATUS_APPROVED, STATUS_PENDING};
use khcrf_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::payment::{Certification, CreateCertification};

const COLUMNS: &str = "\
    id, cert_type, cert_name, amount_paid, currency, first_name, last_name, email, \
    phone, gateway_order_id, gateway_payment_id, payment_method, status, \
    created_at, updated_at";

pub struct CertificationRepo;

impl CertificationRepo {
    /// Insert a pending certification inside the caller's transaction.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateCertification,
    ) -> Result<Certification, sqlx::Error> {
        let query = format!(
            "INSERT INTO certifications \
                 (cert_type, cert_name, amount_paid, currency, first_name, last_name, email, \
                  phone, gateway_order_id, gateway_payment_id, payment_method, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Certification>(&query)
            .bind(&input.cert_type)
            .bind(&input.cert_name)
            .bind(input.amount_paid)
            .bind(&input.currency)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.gateway_order_id)
            .bind(&input.gateway_payment_id)
            .bind(&input.payment_method)
            .bind(STATUS_PENDING)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Certification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM certifications WHERE id = $1");
        sqlx::query_as::<_, Certification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_order_id(
        pool: &PgPool,
        gateway_order_id: &str,
    ) -> Result<Option<Certification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM certifications WHERE gateway_order_id = $1");
        sqlx::query_as::<_, Certification>(&query)
            .bind(gateway_order_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Certification>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM certifications ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Certification>(&query)
            .fetch_all(pool)
            .await
    }

    /// Move the pending certification for a gateway order to `approved`.
    pub async fn approve_by_order_id(
        pool: &PgPool,
        gateway_order_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE certifications SET status = $2 \
             WHERE gateway_order_id = $1 AND status = $3",
        )
        .bind(gateway_order_id)
        .bind(STATUS_APPROVED)
        .bind(STATUS_PENDING)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
