//! Shared domain enums
//!
//! Every status field in the schema is a closed enum backed by a Postgres
//! enum type, so the state machine can match exhaustively and a new status
//! cannot be silently mishandled.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// DeviceStatus
// ---------------------------------------------------------------------------

/// Inventory status of a tracking device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "device_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceStatus {
    Available,
    Assigned,
    /// OWNED devices returning from service are held for internal transfer,
    /// not put back in the public AVAILABLE pool.
    TransferAvailable,
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DeviceStatus::Available => "AVAILABLE",
            DeviceStatus::Assigned => "ASSIGNED",
            DeviceStatus::TransferAvailable => "TRANSFER_AVAILABLE",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// SimStatus
// ---------------------------------------------------------------------------

/// Inventory status of a SIM card (no transfer pool for SIMs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sim_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimStatus {
    Available,
    Assigned,
}

impl std::fmt::Display for SimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SimStatus::Available => "AVAILABLE",
            SimStatus::Assigned => "ASSIGNED",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// DeviceOwnership
// ---------------------------------------------------------------------------

/// Whether a device is company-owned or leased from a third party.
/// Controls where the device goes when it is released from service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "device_ownership", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceOwnership {
    Owned,
    Leasing,
}

// ---------------------------------------------------------------------------
// JobType
// ---------------------------------------------------------------------------

/// Kind of field job an assignment or task represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "job_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    NewInstallation,
    TransferInstallation,
    DeviceReplacement,
    Removal,
}

impl JobType {
    /// Job types that take the device (and SIM) out of the available pool.
    pub fn acquires_inventory(self) -> bool {
        matches!(self, JobType::NewInstallation | JobType::DeviceReplacement)
    }
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            JobType::NewInstallation => "NEW_INSTALLATION",
            JobType::TransferInstallation => "TRANSFER_INSTALLATION",
            JobType::DeviceReplacement => "DEVICE_REPLACEMENT",
            JobType::Removal => "REMOVAL",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// RenewalStatus
// ---------------------------------------------------------------------------

/// Subscription renewal tracking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "renewal_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenewalStatus {
    Upcoming,
    Renewed,
    Expired,
}

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Work task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Done,
    Cancelled,
}

// ---------------------------------------------------------------------------
// ActivityAction
// ---------------------------------------------------------------------------

/// Audited action kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "activity_action", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    Create,
    Update,
    Delete,
    Renew,
}

// ---------------------------------------------------------------------------
// ActivityEntity
// ---------------------------------------------------------------------------

/// Entity kinds referenced from the activity log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "activity_entity", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityEntity {
    Device,
    Sim,
    Vehicle,
    Client,
    Assignment,
    Replacement,
    Removal,
    Renewal,
    Task,
    User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquiring_job_types() {
        assert!(JobType::NewInstallation.acquires_inventory());
        assert!(JobType::DeviceReplacement.acquires_inventory());
        assert!(!JobType::TransferInstallation.acquires_inventory());
        assert!(!JobType::Removal.acquires_inventory());
    }

    #[test]
    fn status_serializes_screaming_snake() {
        let s = serde_json::to_string(&DeviceStatus::TransferAvailable).unwrap();
        assert_eq!(s, "\"TRANSFER_AVAILABLE\"");
    }
}
