//! Repository for the `badge_applications` table.

use khcrf_core::types::DbId;
use sqlx::PgPool;

use crate::models::badge_application::{
    BadgeApplication, CreateBadgeApplication, UpdateBadgeApplication,
};

const COLUMNS: &str = "\
    id, business_name, contact_person, email_address, phone_number, \
    business_address, badges, business_description, production_methods, \
    supporting_documentation, other_documentation, certification, \
    uploaded_files, created_at, updated_at";

/// Provides CRUD operations for badge applications.
pub struct BadgeApplicationRepo;

impl BadgeApplicationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateBadgeApplication,
    ) -> Result<BadgeApplication, sqlx::Error> {
        let query = format!(
            "INSERT INTO badge_applications \
                 (business_name, contact_person, email_address, phone_number, \
                  business_address, badges, business_description, production_methods, \
                  supporting_documentation, other_documentation, certification, uploaded_files) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BadgeApplication>(&query)
            .bind(&input.business_name)
            .bind(&input.contact_person)
            .bind(&input.email_address)
            .bind(&input.phone_number)
            .bind(&input.business_address)
            .bind(&input.badges)
            .bind(&input.business_description)
            .bind(&input.production_methods)
            .bind(&input.supporting_documentation)
            .bind(&input.other_documentation)
            .bind(input.certification)
            .bind(&input.uploaded_files)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BadgeApplication>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM badge_applications WHERE id = $1");
        sqlx::query_as::<_, BadgeApplication>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all applications, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<BadgeApplication>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM badge_applications ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, BadgeApplication>(&query)
            .fetch_all(pool)
            .await
    }

    /// Partially update an application. List fields given as `Some` replace
    /// the stored list. Returns `None` if the application does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBadgeApplication,
    ) -> Result<Option<BadgeApplication>, sqlx::Error> {
        let query = format!(
            "UPDATE badge_applications SET \
                 business_name = COALESCE($2, business_name), \
                 contact_person = COALESCE($3, contact_person), \
                 email_address = COALESCE($4, email_address), \
                 phone_number = COALESCE($5, phone_number), \
                 business_address = COALESCE($6, business_address), \
                 badges = COALESCE($7, badges), \
                 business_description = COALESCE($8, business_description), \
                 production_methods = COALESCE($9, production_methods), \
                 supporting_documentation = COALESCE($10, supporting_documentation), \
                 other_documentation = COALESCE($11, other_documentation), \
                 certification = COALESCE($12, certification) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BadgeApplication>(&query)
            .bind(id)
            .bind(&input.business_name)
            .bind(&input.contact_person)
            .bind(&input.email_address)
            .bind(&input.phone_number)
            .bind(&input.business_address)
            .bind(&input.badges)
            .bind(&input.business_description)
            .bind(&input.production_methods)
            .bind(&input.supporting_documentation)
            .bind(&input.other_documentation)
            .bind(input.certification)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM badge_applications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
