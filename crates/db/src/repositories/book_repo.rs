//! Repository for the `books` table.

use khcrf_core::types::DbId;
use sqlx::PgPool;

use crate::models::book::{Book, CreateBook, UpdateBook};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, author, category, cover_image, pdf_file, created_at, updated_at";

/// Provides CRUD operations for books.
pub struct BookRepo;

impl BookRepo {
    /// Insert a new book, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBook) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books (title, author, category, cover_image, pdf_file) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.category)
            .bind(&input.cover_image)
            .bind(&input.pdf_file)
            .fetch_one(pool)
            .await
    }

    /// Find a book by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all books, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Book>(&query).fetch_all(pool).await
    }

    /// List books in one category, newest first.
    pub async fn list_by_category(pool: &PgPool, category: &str) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM books WHERE category = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// Update a book. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBook,
    ) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "UPDATE books SET \
                 title = COALESCE($2, title), \
                 author = COALESCE($3, author), \
                 category = COALESCE($4, category), \
                 cover_image = COALESCE($5, cover_image), \
                 pdf_file = COALESCE($6, pdf_file) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.category)
            .bind(&input.cover_image)
            .bind(&input.pdf_file)
            .fetch_optional(pool)
            .await
    }

    /// Delete a book by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
