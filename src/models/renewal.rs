//! Subscription renewal model and related types
//!
//! A renewal row is created 1:1 with every assignment and tracks the
//! subscription expiry; it survives assignment deletion so the billing trail
//! is never lost.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::client::ClientSummary;
use super::enums::RenewalStatus;
use super::vehicle::VehicleSummary;

/// Renewal model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Renewal {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub vehicle_id: Uuid,
    pub client_id: Uuid,
    pub platform: String,
    pub activation_date: DateTime<Utc>,
    pub certificate_expiry: DateTime<Utc>,
    pub subscription_expiry: DateTime<Utc>,
    pub status: RenewalStatus,
    pub renewal_date: Option<DateTime<Utc>>,
    pub renewal_remarks: Option<String>,
    pub renewed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Renewal with related records resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RenewalDetails {
    #[serde(flatten)]
    pub renewal: Renewal,
    pub client: ClientSummary,
    pub vehicle: VehicleSummary,
}

/// Renewal list filters
#[derive(Debug, Deserialize, IntoParams)]
pub struct RenewalQuery {
    pub status: Option<RenewalStatus>,
    pub client_id: Option<Uuid>,
    /// Case-insensitive substring match
    pub platform: Option<String>,
}

/// Renew subscription request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RenewSubscription {
    pub renewal_remarks: Option<String>,
}
