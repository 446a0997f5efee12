//! SIM card model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::enums::SimStatus;

/// SIM card model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Sim {
    pub id: Uuid,
    pub brand: String,
    pub number: String,
    pub serial_number: Option<String>,
    pub status: SimStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short SIM representation for embedding in other payloads
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SimSummary {
    pub id: Uuid,
    pub brand: String,
    pub number: String,
}

/// SIM list filters
#[derive(Debug, Deserialize, IntoParams)]
pub struct SimQuery {
    pub status: Option<SimStatus>,
    /// Case-insensitive substring match
    pub brand: Option<String>,
}

/// Create SIM request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSim {
    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,
    #[validate(length(min = 1, message = "Number is required"))]
    pub number: String,
    pub serial_number: Option<String>,
}

/// Update SIM request (absent → unchanged; explicit null clears nullable fields)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSim {
    pub brand: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub serial_number: Option<Option<String>>,
    pub status: Option<SimStatus>,
}
