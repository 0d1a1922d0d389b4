//! List repository
//!
//! Handles list CRUD plus the ordering rules that back the board:
//! - create: position = stored maximum + 1, so new lists land at the end
//! - bulk_update: full-row updates in one transaction, all-or-nothing

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, SqlitePool};

/// List record from database
#[derive(Debug, Clone, FromRow)]
pub struct List {
    pub id: i64,
    pub title: String,
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full-row update payload for one list in a bulk update.
///
/// Fields are optional only so that missing values reach the database as
/// NULL and fail the NOT NULL constraints there, instead of being
/// rejected up front.
#[derive(Debug, Clone, Deserialize)]
pub struct ListUpdate {
    pub id: i64,
    pub title: Option<String>,
    pub position: Option<i64>,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

/// List repository
pub struct ListRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ListRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Next free position: max(position) + 1, or 0 for an empty table.
    pub async fn next_position(&self) -> Result<i64, DbError> {
        let next: i64 = sqlx::query_scalar("SELECT COALESCE(MAX(position) + 1, 0) FROM lists")
            .fetch_one(self.pool)
            .await?;
        Ok(next)
    }

    /// Create a list at the end of the board.
    ///
    /// A missing title is passed through as NULL and rejected by the
    /// NOT NULL constraint.
    pub async fn create(&self, title: Option<String>) -> Result<List, DbError> {
        let position = self.next_position().await?;
        let now = Utc::now();

        let list: List = sqlx::query_as(
            r#"
            INSERT INTO lists (title, position, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, position, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(position)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(list)
    }

    /// All lists, ordered by position.
    pub async fn list(&self) -> Result<Vec<List>, DbError> {
        let lists: Vec<List> = sqlx::query_as(
            r#"
            SELECT id, title, position, created_at, updated_at
            FROM lists
            ORDER BY position ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(lists)
    }

    /// Delete a list by id. Cards referencing it go with it via
    /// ON DELETE CASCADE.
    ///
    /// Returns false when no row matched.
    pub async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM lists WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Overwrite title and position for each item, atomically.
    ///
    /// Any unknown id rolls the whole batch back with `NotFound`.
    /// Returned rows keep the input order, not board order.
    pub async fn bulk_update(&self, items: &[ListUpdate]) -> Result<Vec<List>, DbError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let mut updated = Vec::with_capacity(items.len());

        for item in items {
            let row: Option<List> = sqlx::query_as(
                r#"
                UPDATE lists
                SET title = ?, position = ?, updated_at = ?
                WHERE id = ?
                RETURNING id, title, position, created_at, updated_at
                "#,
            )
            .bind(item.title.as_deref())
            .bind(item.position)
            .bind(now)
            .bind(item.id)
            .fetch_optional(&mut *tx)
            .await?;

            // Early return drops the transaction, which rolls it back
            let row = row.ok_or_else(|| DbError::NotFound {
                resource: "list",
                id: item.id.to_string(),
            })?;
            updated.push(row);
        }

        tx.commit().await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{migrations, pool::create_memory_pool};

    async fn setup() -> SqlitePool {
        let pool = create_memory_pool().await.expect("pool");
        migrations::run(&pool).await.expect("migrations");
        pool
    }

    #[tokio::test]
    async fn create_assigns_sequential_positions() {
        let pool = setup().await;
        let repo = ListRepo::new(&pool);

        let first = repo.create(Some("Backlog".into())).await.expect("create");
        let second = repo.create(Some("Doing".into())).await.expect("create");

        assert_eq!(first.position, 0);
        assert_eq!(second.position, 1);
    }

    #[tokio::test]
    async fn create_without_title_hits_not_null_constraint() {
        let pool = setup().await;
        let repo = ListRepo::new(&pool);

        let err = repo.create(None).await.expect_err("NULL title must fail");
        assert!(matches!(err, DbError::Sqlx(_)));
    }

    #[tokio::test]
    async fn list_orders_by_position() {
        let pool = setup().await;
        let repo = ListRepo::new(&pool);

        let a = repo.create(Some("A".into())).await.expect("create");
        let b = repo.create(Some("B".into())).await.expect("create");
        let c = repo.create(Some("C".into())).await.expect("create");

        repo.bulk_update(&[
            ListUpdate { id: a.id, title: Some("A".into()), position: Some(2) },
            ListUpdate { id: b.id, title: Some("B".into()), position: Some(0) },
            ListUpdate { id: c.id, title: Some("C".into()), position: Some(1) },
        ])
        .await
        .expect("bulk update");

        let titles: Vec<String> = repo
            .list()
            .await
            .expect("list")
            .into_iter()
            .map(|l| l.title)
            .collect();
        assert_eq!(titles, vec!["B", "C", "A"]);
    }

    #[tokio::test]
    async fn bulk_update_returns_rows_in_input_order() {
        let pool = setup().await;
        let repo = ListRepo::new(&pool);

        let a = repo.create(Some("A".into())).await.expect("create");
        let b = repo.create(Some("B".into())).await.expect("create");

        let updated = repo
            .bulk_update(&[
                ListUpdate { id: b.id, title: Some("B".into()), position: Some(0) },
                ListUpdate { id: a.id, title: Some("A".into()), position: Some(1) },
            ])
            .await
            .expect("bulk update");

        let ids: Vec<i64> = updated.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn bulk_update_unknown_id_rolls_back() {
        let pool = setup().await;
        let repo = ListRepo::new(&pool);

        let a = repo.create(Some("Keep me".into())).await.expect("create");

        let err = repo
            .bulk_update(&[
                ListUpdate { id: a.id, title: Some("Changed".into()), position: Some(9) },
                ListUpdate { id: 999, title: Some("Ghost".into()), position: Some(0) },
            ])
            .await
            .expect_err("unknown id must fail the batch");
        assert!(matches!(err, DbError::NotFound { .. }));

        // Nothing from the batch stuck, including the valid first item
        let lists = repo.list().await.expect("list");
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].title, "Keep me");
        assert_eq!(lists[0].position, 0);
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() {
        let pool = setup().await;
        let repo = ListRepo::new(&pool);

        let a = repo.create(Some("Doomed".into())).await.expect("create");
        assert!(repo.delete(a.id).await.expect("delete"));
        assert!(!repo.delete(a.id).await.expect("second delete"));
    }
}
