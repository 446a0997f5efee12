//! Client (fleet customer) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Client model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short client representation for embedding in other payloads
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientSummary {
    pub id: Uuid,
    pub name: String,
}

/// Client row with device/assignment counts for list views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClientWithCounts {
    #[serde(flatten)]
    pub client: Client,
    pub device_count: i64,
    pub assignment_count: i64,
}

/// Client list filters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ClientQuery {
    /// Case-insensitive substring match on name or email
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

/// Create client request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClient {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Update client request (absent → unchanged; explicit null clears nullable fields)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateClient {
    pub name: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub address: Option<Option<String>>,
    pub is_active: Option<bool>,
}
