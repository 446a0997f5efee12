//! Analytics service: dashboard counters and installation metrics
//!
//! Read-only aggregate queries straight against the pool; nothing here
//! mutates state or writes activity entries.

use serde::Serialize;
use sqlx::Row;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::enums::{DeviceStatus, RenewalStatus},
    repository::Repository,
};

/// Top-of-dashboard counters
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_devices: i64,
    pub available_devices: i64,
    pub assigned_devices: i64,
    pub total_sims: i64,
    pub total_vehicles: i64,
    pub total_clients: i64,
    pub upcoming_renewals: i64,
    pub expired_renewals: i64,
}

/// Installations attributed to one installer
#[derive(Debug, Serialize, ToSchema)]
pub struct InstallerPerformance {
    pub installer_name: String,
    pub total_jobs: i64,
    pub locations_covered: i64,
}

/// One bucket of the installation metrics breakdown
#[derive(Debug, Serialize, ToSchema)]
pub struct MetricBucket {
    pub key: String,
    pub count: i64,
}

/// Installation volume grouped three ways
#[derive(Debug, Serialize, ToSchema)]
pub struct InstallationMetrics {
    pub by_month: Vec<MetricBucket>,
    pub by_location: Vec<MetricBucket>,
    pub by_platform: Vec<MetricBucket>,
}

#[derive(Clone)]
pub struct AnalyticsService {
    repository: Repository,
}

impl AnalyticsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn dashboard(&self) -> AppResult<DashboardStats> {
        Ok(DashboardStats {
            total_devices: self.repository.devices.count().await?,
            available_devices: self
                .repository
                .devices
                .count_by_status(DeviceStatus::Available)
                .await?,
            assigned_devices: self
                .repository
                .devices
                .count_by_status(DeviceStatus::Assigned)
                .await?,
            total_sims: self.repository.sims.count().await?,
            total_vehicles: self.repository.masterdata.count_vehicles().await?,
            total_clients: self.repository.clients.count().await?,
            upcoming_renewals: self
                .repository
                .renewals
                .count_by_status(RenewalStatus::Upcoming)
                .await?,
            expired_renewals: self
                .repository
                .renewals
                .count_by_status(RenewalStatus::Expired)
                .await?,
        })
    }

    /// Jobs per installer, busiest first. Assignments without an installer
    /// name are excluded.
    pub async fn installer_performance(&self) -> AppResult<Vec<InstallerPerformance>> {
        let rows = sqlx::query(
            r#"
            SELECT installer_name,
                   COUNT(*) as total_jobs,
                   COUNT(DISTINCT location) as locations_covered
            FROM assignments
            WHERE installer_name IS NOT NULL
            GROUP BY installer_name
            ORDER BY total_jobs DESC
            "#,
        )
        .fetch_all(&self.repository.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| InstallerPerformance {
                installer_name: row.get("installer_name"),
                total_jobs: row.get("total_jobs"),
                locations_covered: row.get("locations_covered"),
            })
            .collect())
    }

    pub async fn installation_metrics(&self) -> AppResult<InstallationMetrics> {
        let by_month = sqlx::query(
            r#"
            SELECT TO_CHAR(created_at, 'YYYY-MM') as key, COUNT(*) as count
            FROM assignments
            GROUP BY TO_CHAR(created_at, 'YYYY-MM')
            ORDER BY key DESC
            LIMIT 12
            "#,
        )
        .fetch_all(&self.repository.pool)
        .await?;

        let by_location = sqlx::query(
            r#"
            SELECT COALESCE(location, 'Unknown') as key, COUNT(*) as count
            FROM assignments
            GROUP BY location
            ORDER BY count DESC
            "#,
        )
        .fetch_all(&self.repository.pool)
        .await?;

        let by_platform = sqlx::query(
            r#"
            SELECT platform as key, COUNT(*) as count
            FROM assignments
            GROUP BY platform
            ORDER BY count DESC
            "#,
        )
        .fetch_all(&self.repository.pool)
        .await?;

        let bucket = |rows: Vec<sqlx::postgres::PgRow>| {
            rows.into_iter()
                .map(|row| MetricBucket {
                    key: row.get("key"),
                    count: row.get("count"),
                })
                .collect()
        };

        Ok(InstallationMetrics {
            by_month: bucket(by_month),
            by_location: bucket(by_location),
            by_platform: bucket(by_platform),
        })
    }
}
