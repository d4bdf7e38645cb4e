//! Repository for the `donations` table.

use khcrf_core::payments::{STATUS_APPROVED, STATUS_PENDING};
use khcrf_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::payment::{CreateDonation, Donation};

const COLUMNS: &str = "\
    id, donation_type, first_name, last_name, email, phone, amount, currency, \
    message, gateway_order_id, gateway_payment_id, payment_method, status, \
    created_at, updated_at";

pub struct DonationRepo;

impl DonationRepo {
    /// Insert a pending donation inside the caller's transaction.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateDonation,
    ) -> Result<Donation, sqlx::Error> {
        let query = format!(
            "INSERT INTO donations \
                 (donation_type, first_name, last_name, email, phone, amount, currency, \
                  message, gateway_order_id, gateway_payment_id, payment_method, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(&input.donation_type)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.amount)
            .bind(&input.currency)
            .bind(&input.message)
            .bind(&input.gateway_order_id)
            .bind(&input.gateway_payment_id)
            .bind(&input.payment_method)
            .bind(STATUS_PENDING)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donations WHERE id = $1");
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_order_id(
        pool: &PgPool,
        gateway_order_id: &str,
    ) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donations WHERE gateway_order_id = $1");
        sqlx::query_as::<_, Donation>(&query)
            .bind(gateway_order_id)
            .fetch_optional(pool)
            .await
    }

    /// List all donations, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Donation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donations ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Donation>(&query).fetch_all(pool).await
    }

    /// Move the pending donation for a gateway order to `approved`.
    ///
    /// Returns the number of rows changed (0 or 1).
    pub async fn approve_by_order_id(
        pool: &PgPool,
        gateway_order_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE donations SET status = $2 \
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
