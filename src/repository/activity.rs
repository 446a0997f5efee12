//! Activity log repository
//!
//! The log is append-only: nothing here updates or deletes entries.

use sqlx::{PgExecutor, Pool, Postgres};

use crate::{
    error::AppResult,
    models::activity::{ActivityLog, NewActivity},
};

/// Append an activity entry.
///
/// Takes any executor so lifecycle operations can record inside their own
/// transaction and plain CRUD can record straight on the pool.
pub async fn record<'e, E>(executor: E, entry: &NewActivity) -> AppResult<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO activity_logs (user_id, action, entity, entity_id, description, metadata)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(entry.user_id)
    .bind(entry.action)
    .bind(entry.entity)
    .bind(entry.entity_id)
    .bind(&entry.description)
    .bind(&entry.metadata)
    .execute(executor)
    .await?;

    Ok(())
}

#[derive(Clone)]
pub struct ActivityRepository {
    pool: Pool<Postgres>,
}

impl ActivityRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Append an entry outside any transaction
    pub async fn record(&self, entry: &NewActivity) -> AppResult<()> {
        record(&self.pool, entry).await
    }

    /// Most recent entries, newest first
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<ActivityLog>> {
        let entries = sqlx::query_as::<_, ActivityLog>(
            "SELECT * FROM activity_logs ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
