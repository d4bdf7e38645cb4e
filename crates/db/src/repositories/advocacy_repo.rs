//! Repository for the `advocacy_posts` table.

use khcrf_core::types::DbId;
use sqlx::PgPool;

use crate::models::advocacy::{AdvocacyPost, CreateAdvocacyPost, UpdateAdvocacyPost};

const COLUMNS: &str = "id, title, content, images, created_at, updated_at";

pub struct AdvocacyRepo;

impl AdvocacyRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateAdvocacyPost,
    ) -> Result<AdvocacyPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO advocacy_posts (title, content, images) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdvocacyPost>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.images)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AdvocacyPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM advocacy_posts WHERE id = $1");
        sqlx::query_as::<_, AdvocacyPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<AdvocacyPost>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM advocacy_posts ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, AdvocacyPost>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdvocacyPost,
    ) -> Result<Option<AdvocacyPost>, sqlx::Error> {
        let query = format!(
            "UPDATE advocacy_posts SET \
                 title = COALESCE($2, title), \
                 content = COALESCE($3, content), \
                 images = COALESCE($4, images) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdvocacyPost>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.images)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM advocacy_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
