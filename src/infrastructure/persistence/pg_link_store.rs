//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::Link;
use crate::domain::repositories::{InsertOutcome, LinkStore};
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_code;

#[derive(sqlx::FromRow)]
struct LinkRow {
    code: String,
    url: String,
    clicks: i64,
    last_clicked: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Self {
            code: row.code,
            url: row.url,
            clicks: row.clicks,
            last_clicked: row.last_clicked,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL store backed by the `links` table.
///
/// Resolution runs inside a transaction holding a `FOR UPDATE` row lock, so
/// increments for one code are totally ordered and a concurrent `DELETE`
/// waits for the in-flight resolution to commit. Dropping the future before
/// commit drops the transaction, which rolls it back.
pub struct PgLinkStore {
    pool: Arc<PgPool>,
}

impl PgLinkStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn lookup(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT code, url, clicks, last_clicked, created_at
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn insert_if_absent(&self, code: &str, url: &str) -> Result<InsertOutcome, AppError> {
        let result = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (code, url)
            VALUES ($1, $2)
            RETURNING code, url, clicks, last_clicked, created_at
            "#,
        )
        .bind(code)
        .bind(url)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(InsertOutcome::Inserted(row.into())),
            Err(e) if is_unique_violation_on_code(&e) => {
                debug!(code, "Insert rejected by uniqueness constraint");
                Ok(InsertOutcome::Conflict)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn resolve_and_increment(&self, code: &str) -> Result<Option<String>, AppError> {
        let mut tx = self.pool.begin().await?;

        let url: Option<String> =
            sqlx::query_scalar("SELECT url FROM links WHERE code = $1 FOR UPDATE")
                .bind(code)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(url) = url else {
            tx.rollback().await?;
            return Ok(None);
        };

        // clock_timestamp() rather than now(): a transaction that started
        // earlier may acquire the lock later.
        sqlx::query(
            r#"
            UPDATE links
            SET clicks = clicks + 1,
                last_clicked = GREATEST(last_clicked, clock_timestamp())
            WHERE code = $1
            "#,
        )
        .bind(code)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(url))
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT code, url, clicks, last_clicked, created_at
            FROM links
            ORDER BY created_at DESC, code
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn ping(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}
