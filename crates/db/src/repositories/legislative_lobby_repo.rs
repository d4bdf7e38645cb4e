//! Repository for the `legislative_lobbies` table.

use khcrf_core::types::DbId;
use sqlx::PgPool;

use crate::models::legislative_lobby::{
    CreateLegislativeLobby, LegislativeLobby, UpdateLegislativeLobby,
};

const COLUMNS: &str = "id, name, location, title, image, hover_image, created_at, updated_at";

/// Provides CRUD operations for legislative lobby entries.
pub struct LegislativeLobbyRepo;

impl LegislativeLobbyRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateLegislativeLobby,
    ) -> Result<LegislativeLobby, sqlx::Error> {
        let query = format!(
            "INSERT INTO legislative_lobbies (name, location, title, image, hover_image) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LegislativeLobby>(&query)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.title)
            .bind(&input.image)
            .bind(&input.hover_image)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LegislativeLobby>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM legislative_lobbies WHERE id = $1");
        sqlx::query_as::<_, LegislativeLobby>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all entries, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<LegislativeLobby>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM legislative_lobbies ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, LegislativeLobby>(&query)
            .fetch_all(pool)
            .await
    }

    /// Partially update an entry. Returns `None` if it does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLegislativeLobby,
    ) -> Result<Option<LegislativeLobby>, sqlx::Error> {
        let query = format!(
            "UPDATE legislative_lobbies SET \
                 name = COALESCE($2, name), \
                 location = COALESCE($3, location), \
                 title = COALESCE($4, title), \
                 image = COALESCE($5, image), \
                 hover_image = COALESCE($6, hover_image) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LegislativeLobby>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.title)
            .bind(&input.image)
            .bind(&input.hover_image)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM legislative_lobbies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
