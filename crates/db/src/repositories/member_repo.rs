//! Repository for the `members` table.

use khcrf_core::payments::{STATUS_APPROVED, STATUS_PENDING};
use khcrf_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::payment::{CreateMember, Member};

const COLUMNS: &str = "\
    id, first_name, last_name, full_name, email, phone, dob, gender, nationality, \
    membership_type, address, amount_paid, currency, gateway_order_id, \
    gateway_payment_id, payment_method, status, created_at, updated_at";

pub struct MemberRepo;

impl MemberRepo {
    /// Insert a pending membership inside the caller's transaction.
    ///
    /// `full_name` is derived from the first and last names.
    pub async fn create(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateMember,
    ) -> Result<Member, sqlx::Error> {
        let query = format!(
            "INSERT INTO members \
                 (first_name, last_name, full_name, email, phone, dob, gender, nationality, \
                  membership_type, address, amount_paid, currency, gateway_order_id, \
                  gateway_payment_id, payment_method, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(format!("{} {}", input.first_name, input.last_name))
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.dob)
            .bind(&input.gender)
            .bind(&input.nationality)
            .bind(&input.membership_type)
            .bind(&input.address)
            .bind(input.amount_paid)
            .bind(&input.currency)
            .bind(&input.gateway_order_id)
            .bind(&input.gateway_payment_id)
            .bind(&input.payment_method)
            .bind(STATUS_PENDING)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE id = $1");
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_order_id(
        pool: &PgPool,
        gateway_order_id: &str,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE gateway_order_id = $1");
        sqlx::query_as::<_, Member>(&query)
            .bind(gateway_order_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Member>(&query).fetch_all(pool).await
    }

    /// Move the pending membership for a gateway order to `approved`.
    pub async fn approve_by_order_id(
        pool: &PgPool,
        gateway_order_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE members SET status = $2 \
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
