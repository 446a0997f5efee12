//! Reporting service
//!
//! Period-based reports for operations review. Like analytics, these are
//! read-only queries against the pool.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::activity::ActivityLog,
    repository::Repository,
};

/// Report period; defaults to the last 30 days when omitted
#[derive(Debug, Deserialize, IntoParams)]
pub struct ReportPeriod {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl ReportPeriod {
    fn resolve(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let end = self.end_date.unwrap_or_else(Utc::now);
        let start = self
            .start_date
            .unwrap_or_else(|| end - chrono::Duration::days(30));
        (start, end)
    }
}

/// Per-platform installation counts over a period.
///
/// Keyed by the platform values found on the assignments themselves, unioned
/// with the master list so zero-count platforms still appear as rows.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlatformReportRow {
    pub platform: String,
    pub installations: i64,
    pub removals: i64,
}

/// Union the observed platform counts with the master platform names. The
/// platform column on assignments is free text, so counts must key off the
/// observed values; master platforms without activity get zero rows.
fn merge_platform_counts(
    master: &[String],
    installations: &[(String, i64)],
    removals: &[(String, i64)],
) -> Vec<PlatformReportRow> {
    let mut merged: std::collections::BTreeMap<String, (i64, i64)> =
        master.iter().map(|name| (name.clone(), (0, 0))).collect();

    for (platform, count) in installations {
        merged.entry(platform.clone()).or_insert((0, 0)).0 += count;
    }
    for (platform, count) in removals {
        merged.entry(platform.clone()).or_insert((0, 0)).1 += count;
    }

    merged
        .into_iter()
        .map(|(platform, (installations, removals))| PlatformReportRow {
            platform,
            installations,
            removals,
        })
        .collect()
}

/// Assignment volume report over a period
#[derive(Debug, Serialize, ToSchema)]
pub struct InstallationReport {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_assignments: i64,
    pub total_removals: i64,
    pub platforms: Vec<PlatformReportRow>,
}

/// One lifecycle event in the period union report
#[derive(Debug, Serialize, ToSchema)]
pub struct LifecycleEvent {
    pub id: Uuid,
    /// Job type for assignments, REPLACEMENT / REMOVAL / RENEWAL otherwise
    pub event_type: String,
    pub occurred_at: DateTime<Utc>,
    pub plate_number: String,
    pub client_name: String,
}

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Installation/removal volume per platform over a period
    pub async fn installation_report(&self, period: &ReportPeriod) -> AppResult<InstallationReport> {
        let (start, end) = period.resolve();

        let platforms = self.repository.masterdata.list_all_platforms().await?;

        let assignment_rows = sqlx::query(
            r#"
            SELECT platform, COUNT(*) as count
            FROM assignments
            WHERE created_at >= $1 AND created_at <= $2
            GROUP BY platform
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.repository.pool)
        .await?;

        let removal_rows = sqlx::query(
            r#"
            SELECT a.platform, COUNT(*) as count
            FROM removals r
            JOIN assignments a ON a.device_id = r.device_id
            WHERE r.created_at >= $1 AND r.created_at <= $2
            GROUP BY a.platform
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.repository.pool)
        .await?;

        let as_counts = |rows: Vec<sqlx::postgres::PgRow>| -> Vec<(String, i64)> {
            rows.into_iter()
                .map(|row| (row.get("platform"), row.get("count")))
                .collect()
        };

        let master: Vec<String> = platforms.into_iter().map(|p| p.name).collect();
        let report_rows = merge_platform_counts(
            &master,
            &as_counts(assignment_rows),
            &as_counts(removal_rows),
        );

        Ok(InstallationReport {
            start_date: start,
            end_date: end,
            total_assignments: report_rows.iter().map(|r| r.installations).sum(),
            total_removals: report_rows.iter().map(|r| r.removals).sum(),
            platforms: report_rows,
        })
    }

    /// Chronological union of lifecycle events (installations, transfers,
    /// replacements, removals, renewals) over a period, newest first
    pub async fn lifecycle_report(&self, period: &ReportPeriod) -> AppResult<Vec<LifecycleEvent>> {
        let (start, end) = period.resolve();

        let rows = sqlx::query(
            r#"
            SELECT a.id, a.job_type::text as event_type, a.created_at as occurred_at,
                   v.plate_number, c.name as client_name
            FROM assignments a
            JOIN vehicles v ON a.vehicle_id = v.id
            JOIN clients c ON a.client_id = c.id
            WHERE a.created_at >= $1 AND a.created_at <= $2
            UNION ALL
            SELECT r.id, 'REPLACEMENT', r.created_at,
                   v.plate_number, c.name
            FROM replacements r
            JOIN vehicles v ON r.vehicle_id = v.id
            JOIN clients c ON r.client_id = c.id
            WHERE r.created_at >= $1 AND r.created_at <= $2
            UNION ALL
            SELECT r.id, 'REMOVAL', r.created_at,
                   v.plate_number, c.name
            FROM removals r
            JOIN vehicles v ON r.vehicle_id = v.id
            JOIN clients c ON r.client_id = c.id
            WHERE r.created_at >= $1 AND r.created_at <= $2
            UNION ALL
            SELECT r.id, 'RENEWAL', r.renewal_date,
                   v.plate_number, c.name
            FROM renewals r
            JOIN vehicles v ON r.vehicle_id = v.id
            JOIN clients c ON r.client_id = c.id
            WHERE r.renewal_date IS NOT NULL
              AND r.renewal_date >= $1 AND r.renewal_date <= $2
            ORDER BY occurred_at DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.repository.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| LifecycleEvent {
                id: row.get("id"),
                event_type: row.get("event_type"),
                occurred_at: row.get("occurred_at"),
                plate_number: row.get("plate_number"),
                client_name: row.get("client_name"),
            })
            .collect())
    }

    /// Most recent activity log entries
    pub async fn recent_activity(&self, limit: i64) -> AppResult<Vec<ActivityLog>> {
        self.repository.activity.recent(limit.clamp(1, 200)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_platforms_missing_from_master_list() {
        let master = vec!["Wialon".to_string()];
        let installations = vec![("Wialon".to_string(), 2), ("GpsGate".to_string(), 3)];
        let removals = vec![("GpsGate".to_string(), 1)];

        let rows = merge_platform_counts(&master, &installations, &removals);

        assert_eq!(rows.len(), 2);
        let gpsgate = rows.iter().find(|r| r.platform == "GpsGate").unwrap();
        assert_eq!(gpsgate.installations, 3);
        assert_eq!(gpsgate.removals, 1);

        let total: i64 = rows.iter().map(|r| r.installations).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn merge_reports_zero_rows_for_idle_master_platforms() {
        let master = vec!["Wialon".to_string(), "Navixy".to_string()];
        let installations = vec![("Wialon".to_string(), 1)];

        let rows = merge_platform_counts(&master, &installations, &[]);

        let navixy = rows.iter().find(|r| r.platform == "Navixy").unwrap();
        assert_eq!(navixy.installations, 0);
        assert_eq!(navixy.removals, 0);
    }
}
