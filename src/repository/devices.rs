//! Devices repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        assignment::AssignmentSummary,
        client::ClientSummary,
        device::{CreateDevice, Device, DeviceDetails, DeviceQuery, UpdateDevice},
        enums::{DeviceOwnership, DeviceStatus},
        vehicle::VehicleSummary,
    },
};

/// One cell of the device status/ownership breakdown
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct DeviceStatusCount {
    pub status: DeviceStatus,
    pub ownership: DeviceOwnership,
    pub count: i64,
}

#[derive(Clone)]
pub struct DevicesRepository {
    pool: Pool<Postgres>,
}

impl DevicesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get device by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Device> {
        sqlx::query_as::<_, Device>("SELECT * FROM devices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Device {} not found", id)))
    }

    /// Get device by IMEI
    pub async fn get_by_imei(&self, imei: &str) -> AppResult<Option<Device>> {
        let device = sqlx::query_as::<_, Device>("SELECT * FROM devices WHERE imei = $1")
            .bind(imei)
            .fetch_optional(&self.pool)
            .await?;
        Ok(device)
    }

    /// List devices with optional filters
    pub async fn list(&self, query: &DeviceQuery) -> AppResult<Vec<Device>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.status.is_some() {
            conditions.push(format!("status = ${}", idx));
            idx += 1;
        }
        if query.ownership.is_some() {
            conditions.push(format!("ownership = ${}", idx));
            idx += 1;
        }
        if query.brand.is_some() {
            conditions.push(format!("brand ILIKE '%' || ${} || '%'", idx));
            idx += 1;
        }
        if query.model.is_some() {
            conditions.push(format!("model ILIKE '%' || ${} || '%'", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT * FROM devices {} ORDER BY created_at DESC",
            where_clause
        );

        let mut q = sqlx::query_as::<_, Device>(&sql);
        if let Some(status) = query.status {
            q = q.bind(status);
        }
        if let Some(ownership) = query.ownership {
            q = q.bind(ownership);
        }
        if let Some(ref brand) = query.brand {
            q = q.bind(brand.clone());
        }
        if let Some(ref model) = query.model {
            q = q.bind(model.clone());
        }

        Ok(q.fetch_all(&self.pool).await?)
    }

    /// Get device with its client and the 10 most recent assignments
    pub async fn get_details(&self, id: Uuid) -> AppResult<DeviceDetails> {
        let device = self.get_by_id(id).await?;

        let client = match device.client_id {
            Some(client_id) => sqlx::query("SELECT id, name FROM clients WHERE id = $1")
                .bind(client_id)
                .fetch_optional(&self.pool)
                .await?
                .map(|row| ClientSummary {
                    id: row.get("id"),
                    name: row.get("name"),
                }),
            None => None,
        };

        let rows = sqlx::query(
            r#"
            SELECT a.id, a.job_type, a.platform, a.installation_date, a.created_at,
                   v.id as vehicle_id, v.make, v.model as vehicle_model, v.plate_number,
                   c.id as client_id, c.name as client_name
            FROM assignments a
            JOIN vehicles v ON a.vehicle_id = v.id
            JOIN clients c ON a.client_id = c.id
            WHERE a.device_id = $1
            ORDER BY a.created_at DESC
            LIMIT 10
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let assignments = rows
            .into_iter()
            .map(|row| AssignmentSummary {
                id: row.get("id"),
                job_type: row.get("job_type"),
                platform: row.get("platform"),
                vehicle: VehicleSummary {
                    id: row.get("vehicle_id"),
                    make: row.get("make"),
                    model: row.get("vehicle_model"),
                    plate_number: row.get("plate_number"),
                },
                client: ClientSummary {
                    id: row.get("client_id"),
                    name: row.get("client_name"),
                },
                installation_date: row.get("installation_date"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(DeviceDetails {
            device,
            client,
            assignments,
        })
    }

    /// Create a new device (inventory intake, always AVAILABLE)
    pub async fn create(&self, device: &CreateDevice) -> AppResult<Device> {
        let created = sqlx::query_as::<_, Device>(
            r#"
            INSERT INTO devices (brand, model, imei, serial_number, ownership, status)
            VALUES ($1, $2, $3, $4, $5, 'AVAILABLE')
            RETURNING *
            "#,
        )
        .bind(&device.brand)
        .bind(&device.model)
        .bind(&device.imei)
        .bind(&device.serial_number)
        .bind(device.ownership.unwrap_or(DeviceOwnership::Leasing))
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update device fields (absent fields left unchanged)
    pub async fn update(&self, id: Uuid, update: &UpdateDevice) -> AppResult<Device> {
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
        add_field!(update.model, "model");
        add_field!(update.serial_number, "serial_number");
        add_field!(update.status, "status");
        add_field!(update.ownership, "ownership");

        let sql = format!(
            "UPDATE devices SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            param_idx
        );

        let mut q = sqlx::query_as::<_, Device>(&sql).bind(now);
        if let Some(ref v) = update.brand {
            q = q.bind(v.clone());
        }
        if let Some(ref v) = update.model {
            q = q.bind(v.clone());
        }
        if let Some(ref v) = update.serial_number {
            q = q.bind(v.clone());
        }
        if let Some(v) = update.status {
            q = q.bind(v);
        }
        if let Some(v) = update.ownership {
            q = q.bind(v);
        }
        q = q.bind(id);

        q.fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Device {} not found", id)))
    }

    /// Delete a device (caller is responsible for the not-assigned check)
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Device {} not found", id)));
        }
        Ok(())
    }

    /// Total device count
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM devices")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count devices with a given status
    pub async fn count_by_status(&self, status: DeviceStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM devices WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Breakdown by status and ownership for inventory stats
    pub async fn count_grouped(&self) -> AppResult<Vec<DeviceStatusCount>> {
        let rows = sqlx::query(
            "SELECT status, ownership, COUNT(*) as count FROM devices GROUP BY status, ownership",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| DeviceStatusCount {
                status: row.get("status"),
                ownership: row.get("ownership"),
                count: row.get("count"),
            })
            .collect())
    }
}
