//! Renewals repository
//!
//! Renewal rows are created by the assignments repository alongside each
//! assignment; this repository reads them and applies the renew operation.

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, FromRow, Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        activity::NewActivity,
        client::ClientSummary,
        enums::{ActivityAction, ActivityEntity},
        renewal::{Renewal, RenewalDetails, RenewalQuery},
        vehicle::VehicleSummary,
    },
    repository::activity,
};

const RENEWAL_DETAILS_SELECT: &str = r#"
    SELECT r.*,
           c.name as c_name,
           v.make as v_make, v.model as v_model, v.plate_number as v_plate
    FROM renewals r
    JOIN clients c ON r.client_id = c.id
    JOIN vehicles v ON r.vehicle_id = v.id
"#;

fn renewal_details_from_row(row: &PgRow) -> Result<RenewalDetails, sqlx::Error> {
    let renewal = Renewal::from_row(row)?;
    Ok(RenewalDetails {
        client: ClientSummary {
            id: renewal.client_id,
            name: row.get("c_name"),
        },
        vehicle: VehicleSummary {
            id: renewal.vehicle_id,
            make: row.get("v_make"),
            model: row.get("v_model"),
            plate_number: row.get("v_plate"),
        },
        renewal,
    })
}

#[derive(Clone)]
pub struct RenewalsRepository {
    pool: Pool<Postgres>,
}

impl RenewalsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get renewal by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Renewal> {
        sqlx::query_as::<_, Renewal>("SELECT * FROM renewals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Renewal {} not found", id)))
    }

    /// List renewals with optional filters, soonest expiry first
    pub async fn list(&self, query: &RenewalQuery) -> AppResult<Vec<RenewalDetails>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.status.is_some() {
            conditions.push(format!("r.status = ${}", idx));
            idx += 1;
        }
        if query.client_id.is_some() {
            conditions.push(format!("r.client_id = ${}", idx));
            idx += 1;
        }
        if query.platform.is_some() {
            conditions.push(format!("r.platform ILIKE '%' || ${} || '%'", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "{} {} ORDER BY r.subscription_expiry ASC",
            RENEWAL_DETAILS_SELECT, where_clause
        );

        let mut q = sqlx::query(&sql);
        if let Some(status) = query.status {
            q = q.bind(status);
        }
        if let Some(client_id) = query.client_id {
            q = q.bind(client_id);
        }
        if let Some(ref platform) = query.platform {
            q = q.bind(platform.clone());
        }

        let rows = q.fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| renewal_details_from_row(row).map_err(AppError::from))
            .collect()
    }

    /// Renewals expiring within the next `days` days, already-renewed excluded
    pub async fn upcoming(&self, days: i64) -> AppResult<Vec<RenewalDetails>> {
        let sql = format!(
            "{} WHERE r.status <> 'RENEWED'
               AND r.subscription_expiry <= NOW() + ($1 || ' days')::interval
             ORDER BY r.subscription_expiry ASC",
            RENEWAL_DETAILS_SELECT
        );

        let rows = sqlx::query(&sql)
            .bind(days.to_string())
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| renewal_details_from_row(row).map_err(AppError::from))
            .collect()
    }

    /// Mark a renewal as renewed with a new subscription expiry
    pub async fn renew(
        &self,
        id: Uuid,
        new_expiry: DateTime<Utc>,
        remarks: Option<&str>,
        actor: Uuid,
    ) -> AppResult<Renewal> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let renewal = sqlx::query_as::<_, Renewal>(
            r#"
            UPDATE renewals
            SET status = 'RENEWED',
                subscription_expiry = $2,
                renewal_date = $3,
                renewal_remarks = $4,
                renewed_by = $5,
                updated_at = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new_expiry)
        .bind(now)
        .bind(remarks)
        .bind(actor)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Renewal {} not found", id)))?;

        activity::record(
            &mut *tx,
            &NewActivity::new(
                actor,
                ActivityAction::Renew,
                ActivityEntity::Renewal,
                renewal.id,
                format!("Renewed subscription for vehicle {}", renewal.vehicle_id),
            )
            .with_metadata(serde_json::json!({
                "subscription_expiry": new_expiry,
            })),
        )
        .await?;

        tx.commit().await?;
        Ok(renewal)
    }

    /// Flip UPCOMING renewals past their expiry to EXPIRED; returns rows changed
    pub async fn mark_expired(&self) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE renewals SET status = 'EXPIRED', updated_at = NOW()
             WHERE status = 'UPCOMING' AND subscription_expiry < NOW()",
        )
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Count renewals with a given status
    pub async fn count_by_status(
        &self,
        status: crate::models::enums::RenewalStatus,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM renewals WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
