//! Assignments, replacements, and removals repository
//!
//! Every lifecycle operation here runs as one transaction: the primary record,
//! the device/SIM status transition, the dependent renewal row, and the
//! activity log entry commit or roll back together. The availability
//! check-then-mutate race is closed with conditional updates
//! (`... WHERE status = 'AVAILABLE'`): zero rows affected means another
//! request won the device, and the whole operation rolls back with a conflict.

use chrono::Utc;
use sqlx::{postgres::PgRow, FromRow, Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    inventory,
    models::{
        activity::NewActivity,
        assignment::{
            Assignment, AssignmentDetails, AssignmentQuery, CreateRemoval, CreateReplacement,
            NewAssignment, Removal, RemovalDetails, Replacement, ReplacementDetails,
            UpdateAssignment,
        },
        client::ClientSummary,
        device::{Device, DeviceSummary},
        enums::{ActivityAction, ActivityEntity, JobType},
        sim::SimSummary,
        user::UserSummary,
        vehicle::VehicleSummary,
    },
    repository::activity,
};

const ASSIGNMENT_DETAILS_SELECT: &str = r#"
    SELECT a.*,
           d.brand as d_brand, d.model as d_model, d.imei as d_imei,
           d.status as d_status, d.ownership as d_ownership,
           s.brand as s_brand, s.number as s_number,
           v.make as v_make, v.model as v_model, v.plate_number as v_plate,
           c.name as c_name,
           u.name as u_name, u.email as u_email
    FROM assignments a
    JOIN devices d ON a.device_id = d.id
    LEFT JOIN sims s ON a.sim_id = s.id
    JOIN vehicles v ON a.vehicle_id = v.id
    JOIN clients c ON a.client_id = c.id
    LEFT JOIN users u ON a.added_by = u.id
"#;

fn assignment_details_from_row(row: &PgRow) -> Result<AssignmentDetails, sqlx::Error> {
    let assignment = Assignment::from_row(row)?;

    let sim = assignment.sim_id.map(|sim_id| SimSummary {
        id: sim_id,
        brand: row.get("s_brand"),
        number: row.get("s_number"),
    });

    let user = row
        .get::<Option<String>, _>("u_name")
        .map(|name| UserSummary {
            id: assignment.added_by,
            name,
            email: row.get::<Option<String>, _>("u_email").unwrap_or_default(),
        });

    Ok(AssignmentDetails {
        device: DeviceSummary {
            id: assignment.device_id,
            brand: row.get("d_brand"),
            model: row.get("d_model"),
            imei: row.get("d_imei"),
            status: row.get("d_status"),
            ownership: row.get("d_ownership"),
        },
        sim,
        vehicle: VehicleSummary {
            id: assignment.vehicle_id,
            make: row.get("v_make"),
            model: row.get("v_model"),
            plate_number: row.get("v_plate"),
        },
        client: ClientSummary {
            id: assignment.client_id,
            name: row.get("c_name"),
        },
        user,
        assignment,
    })
}

#[derive(Clone)]
pub struct AssignmentsRepository {
    pool: Pool<Postgres>,
}

impl AssignmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get assignment by ID (bare row, no relations)
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Assignment> {
        sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Assignment {} not found", id)))
    }

    /// Get assignment with all relations resolved
    pub async fn get_details(&self, id: Uuid) -> AppResult<AssignmentDetails> {
        let sql = format!("{} WHERE a.id = $1", ASSIGNMENT_DETAILS_SELECT);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Assignment {} not found", id)))?;

        Ok(assignment_details_from_row(&row)?)
    }

    /// List assignments with optional filters, newest first
    pub async fn list(&self, query: &AssignmentQuery) -> AppResult<Vec<AssignmentDetails>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.job_type.is_some() {
            conditions.push(format!("a.job_type = ${}", idx));
            idx += 1;
        }
        if query.client_id.is_some() {
            conditions.push(format!("a.client_id = ${}", idx));
            idx += 1;
        }
        if query.platform.is_some() {
            conditions.push(format!("a.platform ILIKE '%' || ${} || '%'", idx));
            idx += 1;
        }
        if query.location.is_some() {
            conditions.push(format!("a.location ILIKE '%' || ${} || '%'", idx));
            idx += 1;
        }
        if query.start_date.is_some() && query.end_date.is_some() {
            conditions.push(format!(
                "a.installation_date >= ${} AND a.installation_date <= ${}",
                idx,
                idx + 1
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "{} {} ORDER BY a.created_at DESC",
            ASSIGNMENT_DETAILS_SELECT, where_clause
        );

        let mut q = sqlx::query(&sql);
        if let Some(job_type) = query.job_type {
            q = q.bind(job_type);
        }
        if let Some(client_id) = query.client_id {
            q = q.bind(client_id);
        }
        if let Some(ref platform) = query.platform {
            q = q.bind(platform.clone());
        }
        if let Some(ref location) = query.location {
            q = q.bind(location.clone());
        }
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            q = q.bind(start).bind(end);
        }

        let rows = q.fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| assignment_details_from_row(row).map_err(AppError::from))
            .collect()
    }

    /// Create an assignment: insert the row, acquire device/SIM when the job
    /// type takes inventory, spawn the mirrored renewal, and log — atomically.
    pub async fn create(&self, new: &NewAssignment) -> AppResult<Assignment> {
        let mut tx = self.pool.begin().await?;

        let assignment = sqlx::query_as::<_, Assignment>(
            r#"
            INSERT INTO assignments (
                job_type, device_id, sim_id, vehicle_id, client_id, platform,
                installation_date, activation_date, certificate_expiry,
                subscription_expiry, installer_name, location, accessories,
                remarks, added_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(new.job_type)
        .bind(new.device_id)
        .bind(new.sim_id)
        .bind(new.vehicle_id)
        .bind(new.client_id)
        .bind(&new.platform)
        .bind(new.installation_date)
        .bind(new.activation_date)
        .bind(new.certificate_expiry)
        .bind(new.subscription_expiry)
        .bind(&new.installer_name)
        .bind(&new.location)
        .bind(&new.accessories)
        .bind(&new.remarks)
        .bind(new.added_by)
        .fetch_one(&mut *tx)
        .await?;

        if new.job_type.acquires_inventory() {
            // New installations may only take an AVAILABLE device; replacements
            // re-assert the existing assignment and update unconditionally.
            let device_update = if new.job_type == JobType::NewInstallation {
                sqlx::query(
                    "UPDATE devices SET status = 'ASSIGNED', client_id = $2, updated_at = NOW()
                     WHERE id = $1 AND status = 'AVAILABLE'",
                )
            } else {
                sqlx::query(
                    "UPDATE devices SET status = 'ASSIGNED', client_id = $2, updated_at = NOW()
                     WHERE id = $1",
                )
            };

            let updated = device_update
                .bind(new.device_id)
                .bind(new.client_id)
                .execute(&mut *tx)
                .await?;

            if updated.rows_affected() == 0 {
                return Err(AppError::Conflict("Device is not available".to_string()));
            }

            if let Some(sim_id) = new.sim_id {
                let updated = sqlx::query(
                    "UPDATE sims SET status = 'ASSIGNED', updated_at = NOW()
                     WHERE id = $1 AND status = 'AVAILABLE'",
                )
                .bind(sim_id)
                .execute(&mut *tx)
                .await?;

                if updated.rows_affected() == 0 {
                    return Err(AppError::Conflict("SIM is not available".to_string()));
                }
            }
        }

        sqlx::query(
            r#"
            INSERT INTO renewals (
                assignment_id, vehicle_id, client_id, platform,
                activation_date, certificate_expiry, subscription_expiry, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'UPCOMING')
            "#,
        )
        .bind(assignment.id)
        .bind(new.vehicle_id)
        .bind(new.client_id)
        .bind(&new.platform)
        .bind(assignment.activation_date)
        .bind(assignment.certificate_expiry)
        .bind(assignment.subscription_expiry)
        .execute(&mut *tx)
        .await?;

        activity::record(
            &mut *tx,
            &NewActivity::new(
                new.added_by,
                ActivityAction::Create,
                ActivityEntity::Assignment,
                assignment.id,
                format!("Created {} for vehicle {}", new.job_type, new.vehicle_id),
            )
            .with_metadata(serde_json::json!({
                "job_type": new.job_type,
                "platform": new.platform,
                "location": new.location,
            })),
        )
        .await?;

        tx.commit().await?;
        Ok(assignment)
    }

    /// Update assignment fields (direct merge, no state-machine interaction)
    pub async fn update(
        &self,
        id: Uuid,
        update: &UpdateAssignment,
        actor: Uuid,
    ) -> AppResult<Assignment> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

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

        add_field!(update.platform, "platform");
        add_field!(update.installation_date, "installation_date");
        add_field!(update.activation_date, "activation_date");
        add_field!(update.certificate_expiry, "certificate_expiry");
        add_field!(update.subscription_expiry, "subscription_expiry");
        add_field!(update.installer_name, "installer_name");
        add_field!(update.location, "location");
        add_field!(update.accessories, "accessories");
        add_field!(update.remarks, "remarks");

        let sql = format!(
            "UPDATE assignments SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            param_idx
        );

        let mut q = sqlx::query_as::<_, Assignment>(&sql).bind(now);
        if let Some(ref v) = update.platform {
            q = q.bind(v.clone());
        }
        if let Some(v) = update.installation_date {
            q = q.bind(v);
        }
        if let Some(v) = update.activation_date {
            q = q.bind(v);
        }
        if let Some(v) = update.certificate_expiry {
            q = q.bind(v);
        }
        if let Some(v) = update.subscription_expiry {
            q = q.bind(v);
        }
        if let Some(ref v) = update.installer_name {
            q = q.bind(v.clone());
        }
        if let Some(ref v) = update.location {
            q = q.bind(v.clone());
        }
        if let Some(ref v) = update.accessories {
            q = q.bind(v.clone());
        }
        if let Some(ref v) = update.remarks {
            q = q.bind(v.clone());
        }
        q = q.bind(id);

        let assignment = q
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Assignment {} not found", id)))?;

        activity::record(
            &mut *tx,
            &NewActivity::new(
                actor,
                ActivityAction::Update,
                ActivityEntity::Assignment,
                assignment.id,
                format!("Updated assignment for vehicle {}", assignment.vehicle_id),
            ),
        )
        .await?;

        tx.commit().await?;
        Ok(assignment)
    }

    /// Delete an assignment, releasing its device (per current ownership) and
    /// SIM back to inventory. The paired renewal row is deliberately left in
    /// place so the billing trail survives.
    pub async fn delete(&self, id: Uuid, actor: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        // Locked so a concurrent delete of the same assignment waits here and
        // then sees no row, instead of double-releasing and double-logging.
        let assignment =
            sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Assignment {} not found", id)))?;

        // Ownership is read fresh here, not from the assignment: it may have
        // changed while the device was in service.
        let device = sqlx::query_as::<_, Device>("SELECT * FROM devices WHERE id = $1 FOR UPDATE")
            .bind(assignment.device_id)
            .fetch_one(&mut *tx)
            .await?;

        release_device_in_tx(&mut tx, &device).await?;

        if let Some(sim_id) = assignment.sim_id {
            sqlx::query("UPDATE sims SET status = 'AVAILABLE', updated_at = NOW() WHERE id = $1")
                .bind(sim_id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        activity::record(
            &mut *tx,
            &NewActivity::new(
                actor,
                ActivityAction::Delete,
                ActivityEntity::Assignment,
                id,
                format!("Deleted assignment for vehicle {}", assignment.vehicle_id),
            ),
        )
        .await?;

        tx.commit().await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Replacements
    // -----------------------------------------------------------------------

    /// Atomic device swap: release the old device, acquire the new one.
    pub async fn create_replacement(
        &self,
        req: &CreateReplacement,
        actor: Uuid,
    ) -> AppResult<Replacement> {
        let mut tx = self.pool.begin().await?;

        let old_device =
            sqlx::query_as::<_, Device>("SELECT * FROM devices WHERE id = $1 FOR UPDATE")
                .bind(req.old_device_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Device {} not found", req.old_device_id))
                })?;

        let replacement = sqlx::query_as::<_, Replacement>(
            r#"
            INSERT INTO replacements (old_device_id, new_device_id, vehicle_id, client_id, reason, replaced_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(req.old_device_id)
        .bind(req.new_device_id)
        .bind(req.vehicle_id)
        .bind(req.client_id)
        .bind(&req.reason)
        .bind(actor)
        .fetch_one(&mut *tx)
        .await?;

        release_device_in_tx(&mut tx, &old_device).await?;

        let updated = sqlx::query(
            "UPDATE devices SET status = 'ASSIGNED', client_id = $2, updated_at = NOW()
             WHERE id = $1 AND status = 'AVAILABLE'",
        )
        .bind(req.new_device_id)
        .bind(req.client_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::Conflict("New device is not available".to_string()));
        }

        activity::record(
            &mut *tx,
            &NewActivity::new(
                actor,
                ActivityAction::Create,
                ActivityEntity::Replacement,
                replacement.id,
                format!("Replaced device on vehicle {}", req.vehicle_id),
            )
            .with_metadata(serde_json::json!({ "reason": req.reason })),
        )
        .await?;

        tx.commit().await?;
        Ok(replacement)
    }

    /// List replacements with relations, newest first
    pub async fn list_replacements(&self) -> AppResult<Vec<ReplacementDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT r.*,
                   od.brand as od_brand, od.model as od_model, od.imei as od_imei,
                   od.status as od_status, od.ownership as od_ownership,
                   nd.brand as nd_brand, nd.model as nd_model, nd.imei as nd_imei,
                   nd.status as nd_status, nd.ownership as nd_ownership,
                   v.make as v_make, v.model as v_model, v.plate_number as v_plate,
                   c.name as c_name,
                   u.name as u_name, u.email as u_email
            FROM replacements r
            JOIN devices od ON r.old_device_id = od.id
            JOIN devices nd ON r.new_device_id = nd.id
            JOIN vehicles v ON r.vehicle_id = v.id
            JOIN clients c ON r.client_id = c.id
            LEFT JOIN users u ON r.replaced_by = u.id
            ORDER BY r.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in &rows {
            let replacement = Replacement::from_row(row)?;
            result.push(ReplacementDetails {
                old_device: DeviceSummary {
                    id: replacement.old_device_id,
                    brand: row.get("od_brand"),
                    model: row.get("od_model"),
                    imei: row.get("od_imei"),
                    status: row.get("od_status"),
                    ownership: row.get("od_ownership"),
                },
                new_device: DeviceSummary {
                    id: replacement.new_device_id,
                    brand: row.get("nd_brand"),
                    model: row.get("nd_model"),
                    imei: row.get("nd_imei"),
                    status: row.get("nd_status"),
                    ownership: row.get("nd_ownership"),
                },
                vehicle: VehicleSummary {
                    id: replacement.vehicle_id,
                    make: row.get("v_make"),
                    model: row.get("v_model"),
                    plate_number: row.get("v_plate"),
                },
                client: ClientSummary {
                    id: replacement.client_id,
                    name: row.get("c_name"),
                },
                user: row
                    .get::<Option<String>, _>("u_name")
                    .map(|name| UserSummary {
                        id: replacement.replaced_by,
                        name,
                        email: row.get::<Option<String>, _>("u_email").unwrap_or_default(),
                    }),
                replacement,
            });
        }

        Ok(result)
    }

    // -----------------------------------------------------------------------
    // Removals
    // -----------------------------------------------------------------------

    /// Take a device out of service. No availability precondition: removal is
    /// the terminal act and applies regardless of the recorded status.
    pub async fn create_removal(&self, req: &CreateRemoval, actor: Uuid) -> AppResult<Removal> {
        let mut tx = self.pool.begin().await?;

        let device = sqlx::query_as::<_, Device>("SELECT * FROM devices WHERE id = $1 FOR UPDATE")
            .bind(req.device_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Device {} not found", req.device_id)))?;

        let removal = sqlx::query_as::<_, Removal>(
            r#"
            INSERT INTO removals (device_id, vehicle_id, client_id, reason, removed_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(req.device_id)
        .bind(req.vehicle_id)
        .bind(req.client_id)
        .bind(&req.reason)
        .bind(actor)
        .fetch_one(&mut *tx)
        .await?;

        release_device_in_tx(&mut tx, &device).await?;

        activity::record(
            &mut *tx,
            &NewActivity::new(
                actor,
                ActivityAction::Create,
                ActivityEntity::Removal,
                removal.id,
                format!("Removed device from vehicle {}", req.vehicle_id),
            )
            .with_metadata(serde_json::json!({ "reason": req.reason })),
        )
        .await?;

        tx.commit().await?;
        Ok(removal)
    }

    /// List removals with relations, newest first
    pub async fn list_removals(&self) -> AppResult<Vec<RemovalDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT r.*,
                   d.brand as d_brand, d.model as d_model, d.imei as d_imei,
                   d.status as d_status, d.ownership as d_ownership,
                   v.make as v_make, v.model as v_model, v.plate_number as v_plate,
                   c.name as c_name,
                   u.name as u_name, u.email as u_email
            FROM removals r
            JOIN devices d ON r.device_id = d.id
            JOIN vehicles v ON r.vehicle_id = v.id
            JOIN clients c ON r.client_id = c.id
            LEFT JOIN users u ON r.removed_by = u.id
            ORDER BY r.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in &rows {
            let removal = Removal::from_row(row)?;
            result.push(RemovalDetails {
                device: DeviceSummary {
                    id: removal.device_id,
                    brand: row.get("d_brand"),
                    model: row.get("d_model"),
                    imei: row.get("d_imei"),
                    status: row.get("d_status"),
                    ownership: row.get("d_ownership"),
                },
                vehicle: VehicleSummary {
                    id: removal.vehicle_id,
                    make: row.get("v_make"),
                    model: row.get("v_model"),
                    plate_number: row.get("v_plate"),
                },
                client: ClientSummary {
                    id: removal.client_id,
                    name: row.get("c_name"),
                },
                user: row
                    .get::<Option<String>, _>("u_name")
                    .map(|name| UserSummary {
                        id: removal.removed_by,
                        name,
                        email: row.get::<Option<String>, _>("u_email").unwrap_or_default(),
                    }),
                removal,
            });
        }

        Ok(result)
    }
}

/// Apply the release transition to a device inside a transaction.
///
/// Single write path for removal, replacement (old device), and assignment
/// deletion, driven by [`inventory::release_device`].
async fn release_device_in_tx(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    device: &Device,
) -> AppResult<()> {
    let release = inventory::release_device(device.ownership);

    if release.clear_client {
        sqlx::query(
            "UPDATE devices SET status = $2, client_id = NULL, updated_at = NOW() WHERE id = $1",
        )
        .bind(device.id)
        .bind(release.status)
        .execute(&mut **tx)
        .await?;
    } else {
        sqlx::query("UPDATE devices SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(device.id)
            .bind(release.status)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}
