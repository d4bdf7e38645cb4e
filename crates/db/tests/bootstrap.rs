use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    khcrf_db::health_check(&pool).await.unwrap();

    let tables = [
        "books",
        "legislative_lobbies",
        "badge_applications",
        "advocacy_posts",
        "contact_messages",
        "donations",
        "members",
        "certifications",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The category CHECK constraint mirrors the core allow-list.
#[sqlx::test(migrations = "./migrations")]
async fn test_book_category_constraint(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO books (title, author, category, cover_image, pdf_file) \
         VALUES ('T', 'A', 'novel', 'c.png', 'p.pdf')",
    )
    .execute(&pool)
    .await;

    let err = result.expect_err("unknown category must violate the check constraint");
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("ck_books_category"));
}

/// `updated_at` is maintained by trigger.
#[sqlx::test(migrations = "./migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    let (id, created): (i64, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
        "INSERT INTO advocacy_posts (title, content) VALUES ('t', 'c') \
         RETURNING id, updated_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let (updated,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("UPDATE advocacy_posts SET title = 't2' WHERE id = $1 RETURNING updated_at")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(updated > created);
}
