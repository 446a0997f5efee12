//! SIM cards repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::SimStatus,
        sim::{CreateSim, Sim, SimQuery, UpdateSim},
    },
};

/// One cell of the SIM status breakdown
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct SimStatusCount {
    pub status: SimStatus,
    pub count: i64,
}

#[derive(Clone)]
pub struct SimsRepository {
    pool: Pool<Postgres>,
}

impl SimsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get SIM by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Sim> {
        sqlx::query_as::<_, Sim>("SELECT * FROM sims WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("SIM {} not found", id)))
    }

    /// Get SIM by number
    pub async fn get_by_number(&self, number: &str) -> AppResult<Option<Sim>> {
        let sim = sqlx::query_as::<_, Sim>("SELECT * FROM sims WHERE number = $1")
            .bind(number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(sim)
    }

    /// List SIMs with optional filters
    pub async fn list(&self, query: &SimQuery) -> AppResult<Vec<Sim>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.status.is_some() {
            conditions.push(format!("status = ${}", idx));
            idx += 1;
        }
        if query.brand.is_some() {
            conditions.push(format!("brand ILIKE '%' || ${} || '%'", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!("SELECT * FROM sims {} ORDER BY created_at DESC", where_clause);

        let mut q = sqlx::query_as::<_, Sim>(&sql);
        if let Some(status) = query.status {
            q = q.bind(status);
        }
        if let Some(ref brand) = query.brand {
            q = q.bind(brand.clone());
        }

        Ok(q.fetch_all(&self.pool).await?)
    }

    /// Create a new SIM (always AVAILABLE)
    pub async fn create(&self, sim: &CreateSim) -> AppResult<Sim> {
        let created = sqlx::query_as::<_, Sim>(
            r#"
            INSERT INTO sims (brand, number, serial_number, status)
            VALUES ($1, $2, $3, 'AVAILABLE')
            RETURNING *
            "#,
        )
        .bind(&sim.brand)
        .bind(&sim.number)
        .bind(&sim.serial_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update SIM fields (absent fields left unchanged)
    pub async fn update(&self, id: Uuid, update: &UpdateSim) -> AppResult<Sim> {
        let now = Utc::now();

        let mut sets = vec!["updated_at = $1".to_string()];
        let mut param_idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, param_idx));
                    param_idx += 1;
                }
            };
        }

        add_field!(update.brand, "brand");
        add_field!(update.serial_number, "serial_number");
        add_field!(update.status, "status");

        let sql = format!(
            "UPDATE sims SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            param_idx
        );

        let mut q = sqlx::query_as::<_, Sim>(&sql).bind(now);
        if let Some(ref v) = update.brand {
            q = q.bind(v.clone());
        }
        if let Some(ref v) = update.serial_number {
            q = q.bind(v.clone());
        }
        if let Some(v) = update.status {
            q = q.bind(v);
        }
        q = q.bind(id);

        q.fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("SIM {} not found", id)))
    }

    /// Delete a SIM (caller is responsible for the not-assigned check)
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM sims WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("SIM {} not found", id)));
        }
        Ok(())
    }

    /// Total SIM count
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sims")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Breakdown by status for inventory stats
    pub async fn count_grouped(&self) -> AppResult<Vec<SimStatusCount>> {
        let rows = sqlx::query("SELECT status, COUNT(*) as count FROM sims GROUP BY status")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| SimStatusCount {
                status: row.get("status"),
                count: row.get("count"),
            })
            .collect())
    }
}
