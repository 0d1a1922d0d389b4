//! Database migrations for the board tables

use sqlx::SqlitePool;

use super::repos::DbError;

/// Run all migrations
///
/// Timestamps are TEXT columns written by the repositories; only
/// `completed` carries a database-side default.
pub async fn run(pool: &SqlitePool) -> Result<(), DbError> {
    tracing::info!("Running board migrations...");

    // Create lists table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            position INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create cards table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            position INTEGER NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            due_date TEXT,
            list_id INTEGER NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for common queries
    create_indexes(pool).await?;

    tracing::info!("Board migrations complete");
    Ok(())
}

async fn create_indexes(pool: &SqlitePool) -> Result<(), DbError> {
    // List indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_lists_position ON lists(position)")
        .execute(pool)
        .await?;

    // Card indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_cards_list ON cards(list_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_cards_position ON cards(position)")
        .execute(pool)
        .await?;

    Ok(())
}
