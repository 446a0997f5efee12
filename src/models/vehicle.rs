//! Vehicle model (static reference data)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Vehicle model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Vehicle {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub plate_number: String,
    pub chassis_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Short vehicle representation for embedding in other payloads
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VehicleSummary {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub plate_number: String,
}

/// Create vehicle request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVehicle {
    #[validate(length(min = 1, message = "Make is required"))]
    pub make: String,
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,
    #[validate(length(min = 1, message = "Plate number is required"))]
    pub plate_number: String,
    pub chassis_number: Option<String>,
}
