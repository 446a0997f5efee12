//! Tracking device model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::assignment::AssignmentSummary;
use super::client::ClientSummary;
use super::enums::{DeviceOwnership, DeviceStatus};

/// Device model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Device {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub imei: String,
    pub serial_number: Option<String>,
    pub status: DeviceStatus,
    pub ownership: DeviceOwnership,
    /// Owning client, set while the device is assigned (and retained for
    /// OWNED devices after release).
    pub client_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short device representation for embedding in other payloads
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeviceSummary {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub imei: String,
    pub status: DeviceStatus,
    pub ownership: DeviceOwnership,
}

/// Device with its client and recent assignment history
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeviceDetails {
    #[serde(flatten)]
    pub device: Device,
    pub client: Option<ClientSummary>,
    pub assignments: Vec<AssignmentSummary>,
}

/// Device list filters
#[derive(Debug, Deserialize, IntoParams)]
pub struct DeviceQuery {
    pub status: Option<DeviceStatus>,
    pub ownership: Option<DeviceOwnership>,
    /// Case-insensitive substring match
    pub brand: Option<String>,
    /// Case-insensitive substring match
    pub model: Option<String>,
}

/// Create device request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDevice {
    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,
    #[validate(length(min = 10, message = "IMEI must be at least 10 characters"))]
    pub imei: String,
    pub serial_number: Option<String>,
    /// Defaults to LEASING when omitted
    pub ownership: Option<DeviceOwnership>,
}

/// Update device request.
///
/// Merge rule: field absent → unchanged; field present → set. Nullable
/// columns use a double Option so an explicit `null` clears the value.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateDevice {
    pub brand: Option<String>,
    pub model: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub serial_number: Option<Option<String>>,
    pub status: Option<DeviceStatus>,
    pub ownership: Option<DeviceOwnership>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_merge_distinguishes_absent_from_null() {
        let absent: UpdateDevice = serde_json::from_str(r#"{"brand":"Teltonika"}"#).unwrap();
        assert!(absent.serial_number.is_none());

        let cleared: UpdateDevice = serde_json::from_str(r#"{"serial_number":null}"#).unwrap();
        assert_eq!(cleared.serial_number, Some(None));

        let set: UpdateDevice = serde_json::from_str(r#"{"serial_number":"TEL-1000"}"#).unwrap();
        assert_eq!(set.serial_number, Some(Some("TEL-1000".to_string())));
    }
}
