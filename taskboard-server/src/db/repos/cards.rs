//! Card repository
//!
//! Same shape as the list repository, with two extra rules:
//! - positions are scoped per list, so each list's cards count from 0
//! - list_id is a foreign key; inserts against a missing list fail at
//!   the constraint, there is no existence check up front

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, SqlitePool};

use super::DbError;

/// Card record from database
#[derive(Debug, Clone, FromRow)]
pub struct Card {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub position: i64,
    pub completed: bool,
    pub due_date: Option<DateTime<Utc>>,
    pub list_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full-row update payload for one card in a bulk update.
///
/// As with lists, optional fields become NULL binds; NOT NULL and
/// foreign key constraints do the rejecting.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardUpdate {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub position: Option<i64>,
    pub completed: Option<bool>,
    pub due_date: Option<DateTime<Utc>>,
    pub list_id: Option<i64>,
}

/// Card repository
pub struct CardRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CardRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Next free position within one list: max(position) + 1, or 0 for
    /// a list without cards.
    ///
    /// A NULL list_id matches no rows and yields 0; the insert that
    /// follows is the one that fails.
    pub async fn next_position(&self, list_id: Option<i64>) -> Result<i64, DbError> {
        let next: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(position) + 1, 0) FROM cards WHERE list_id = ?")
                .bind(list_id)
                .fetch_one(self.pool)
                .await?;
        Ok(next)
    }

    /// Create a card at the end of its list.
    ///
    /// Description and due date start NULL, completed starts false via
    /// the column default.
    pub async fn create(&self, title: Option<String>, list_id: Option<i64>) -> Result<Card, DbError> {
        let position = self.next_position(list_id).await?;
        let now = Utc::now();

        let card: Card = sqlx::query_as(
            r#"
            INSERT INTO cards (title, position, list_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, title, description, position, completed, due_date, list_id, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(position)
        .bind(list_id)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(card)
    }

    /// All cards across every list, ordered by position.
    pub async fn list(&self) -> Result<Vec<Card>, DbError> {
        let cards: Vec<Card> = sqlx::query_as(
            r#"
            SELECT id, title, description, position, completed, due_date, list_id, created_at, updated_at
            FROM cards
            ORDER BY position ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(cards)
    }

    /// Cards belonging to one list, ordered by position.
    ///
    /// An unknown list id is not an error here; it just matches nothing.
    pub async fn list_for_list(&self, list_id: i64) -> Result<Vec<Card>, DbError> {
        let cards: Vec<Card> = sqlx::query_as(
            r#"
            SELECT id, title, description, position, completed, due_date, list_id, created_at, updated_at
            FROM cards
            WHERE list_id = ?
            ORDER BY position ASC
            "#,
        )
        .bind(list_id)
        .fetch_all(self.pool)
        .await?;

        Ok(cards)
    }

    /// Delete a card by id. Returns false when no row matched.
    pub async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM cards WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Overwrite every mutable field for each item, atomically.
    ///
    /// Any unknown id rolls the whole batch back with `NotFound`.
    /// Returned rows keep the input order.
    pub async fn bulk_update(&self, items: &[CardUpdate]) -> Result<Vec<Card>, DbError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let mut updated = Vec::with_capacity(items.len());

        for item in items {
            let row: Option<Card> = sqlx::query_as(
                r#"
                UPDATE cards
                SET title = ?, description = ?, position = ?, completed = ?, due_date = ?,
                    list_id = ?, updated_at = ?
                WHERE id = ?
                RETURNING id, title, description, position, completed, due_date, list_id, created_at, updated_at
                "#,
            )
            .bind(item.title.as_deref())
            .bind(item.description.as_deref())
            .bind(item.position)
            .bind(item.completed)
            .bind(item.due_date)
            .bind(item.list_id)
            .bind(now)
            .bind(item.id)
            .fetch_optional(&mut *tx)
            .await?;

            // Early return drops the transaction, which rolls it back
            let row = row.ok_or_else(|| DbError::NotFound {
                resource: "card",
                id: item.id.to_string(),
            })?;
            updated.push(row);
        }

        tx.commit().await?;
        Ok(updated)
    }
}
