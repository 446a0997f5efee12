//! Master data lookup tables (platforms, locations, installers, accessories)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Tracking platform offered to clients
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Platform {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
}

/// Service location (emirate/city)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
}

/// Field installer / technician
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Installer {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub is_active: bool,
}

/// Accessory type installable alongside a device
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Accessory {
    pub id: Uuid,
    #[sqlx(rename = "accessory_type")]
    #[serde(rename = "type")]
    pub accessory_type: String,
    pub description: Option<String>,
}
