//! Assignment, replacement, and removal models
//!
//! An assignment records installing/activating a device (+ optional SIM) in a
//! vehicle for a client. Replacements and removals are the other two
//! lifecycle records that move devices back through the inventory pools.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::client::ClientSummary;
use super::device::DeviceSummary;
use super::enums::JobType;
use super::sim::SimSummary;
use super::user::UserSummary;
use super::vehicle::VehicleSummary;

/// Assignment model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assignment {
    pub id: Uuid,
    pub job_type: JobType,
    pub device_id: Uuid,
    pub sim_id: Option<Uuid>,
    pub vehicle_id: Uuid,
    pub client_id: Uuid,
    pub platform: String,
    pub installation_date: DateTime<Utc>,
    pub activation_date: DateTime<Utc>,
    pub certificate_expiry: DateTime<Utc>,
    pub subscription_expiry: DateTime<Utc>,
    pub installer_name: Option<String>,
    pub location: Option<String>,
    /// Opaque accessory list; the lifecycle logic never looks inside it.
    pub accessories: Option<serde_json::Value>,
    pub remarks: Option<String>,
    pub added_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short assignment representation for device/client history views
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssignmentSummary {
    pub id: Uuid,
    pub job_type: JobType,
    pub platform: String,
    pub vehicle: VehicleSummary,
    pub client: ClientSummary,
    pub installation_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Assignment with all related records resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssignmentDetails {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub device: DeviceSummary,
    pub sim: Option<SimSummary>,
    pub vehicle: VehicleSummary,
    pub client: ClientSummary,
    pub user: Option<UserSummary>,
}

/// Assignment list filters
#[derive(Debug, Deserialize, IntoParams)]
pub struct AssignmentQuery {
    pub job_type: Option<JobType>,
    pub client_id: Option<Uuid>,
    /// Case-insensitive substring match
    pub platform: Option<String>,
    /// Case-insensitive substring match
    pub location: Option<String>,
    /// Installation date range (both bounds required to take effect)
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Create assignment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssignment {
    pub job_type: JobType,
    pub device_id: Uuid,
    pub sim_id: Option<Uuid>,
    pub vehicle_id: Uuid,
    pub client_id: Uuid,
    #[validate(length(min = 1, message = "Platform is required"))]
    pub platform: String,
    /// Defaults to now
    pub installation_date: Option<DateTime<Utc>>,
    /// Defaults to now
    pub activation_date: Option<DateTime<Utc>>,
    /// Defaults to one year from now
    pub certificate_expiry: Option<DateTime<Utc>>,
    /// Defaults to one year from now
    pub subscription_expiry: Option<DateTime<Utc>>,
    pub installer_name: Option<String>,
    pub location: Option<String>,
    pub accessories: Option<serde_json::Value>,
    pub remarks: Option<String>,
}

/// Fully-resolved assignment ready for insertion, defaults applied
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub job_type: JobType,
    pub device_id: Uuid,
    pub sim_id: Option<Uuid>,
    pub vehicle_id: Uuid,
    pub client_id: Uuid,
    pub platform: String,
    pub installation_date: DateTime<Utc>,
    pub activation_date: DateTime<Utc>,
    pub certificate_expiry: DateTime<Utc>,
    pub subscription_expiry: DateTime<Utc>,
    pub installer_name: Option<String>,
    pub location: Option<String>,
    pub accessories: Option<serde_json::Value>,
    pub remarks: Option<String>,
    pub added_by: Uuid,
}

/// Update assignment request.
///
/// Direct field merge, no state-machine interaction: absent → unchanged,
/// explicit null clears nullable fields.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAssignment {
    pub platform: Option<String>,
    pub installation_date: Option<DateTime<Utc>>,
    pub activation_date: Option<DateTime<Utc>>,
    pub certificate_expiry: Option<DateTime<Utc>>,
    pub subscription_expiry: Option<DateTime<Utc>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub installer_name: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub accessories: Option<Option<serde_json::Value>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub remarks: Option<Option<String>>,
}

/// Replacement model from database (atomic device swap)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Replacement {
    pub id: Uuid,
    pub old_device_id: Uuid,
    pub new_device_id: Uuid,
    pub vehicle_id: Uuid,
    pub client_id: Uuid,
    pub reason: String,
    pub replaced_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Replacement with related records resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReplacementDetails {
    #[serde(flatten)]
    pub replacement: Replacement,
    pub old_device: DeviceSummary,
    pub new_device: DeviceSummary,
    pub vehicle: VehicleSummary,
    pub client: ClientSummary,
    pub user: Option<UserSummary>,
}

/// Create replacement request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReplacement {
    pub old_device_id: Uuid,
    pub new_device_id: Uuid,
    pub vehicle_id: Uuid,
    pub client_id: Uuid,
    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
}

/// Removal model from database (device taken out of service)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Removal {
    pub id: Uuid,
    pub device_id: Uuid,
    pub vehicle_id: Uuid,
    pub client_id: Uuid,
    pub reason: String,
    pub removed_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Removal with related records resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RemovalDetails {
    #[serde(flatten)]
    pub removal: Removal,
    pub device: DeviceSummary,
    pub vehicle: VehicleSummary,
    pub client: ClientSummary,
    pub user: Option<UserSummary>,
}

/// Create removal request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRemoval {
    pub device_id: Uuid,
    pub vehicle_id: Uuid,
    pub client_id: Uuid,
    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
}
