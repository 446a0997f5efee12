//! Activity log model
//!
//! Append-only audit trail: every mutating operation with an authenticated
//! actor records exactly one entry, in the same transaction as the mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::enums::{ActivityAction, ActivityEntity};

/// Activity log entry from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ActivityLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: ActivityAction,
    pub entity: ActivityEntity,
    pub entity_id: Uuid,
    pub description: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// New activity log entry
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub user_id: Uuid,
    pub action: ActivityAction,
    pub entity: ActivityEntity,
    pub entity_id: Uuid,
    pub description: String,
    pub metadata: Option<serde_json::Value>,
}

impl NewActivity {
    pub fn new(
        user_id: Uuid,
        action: ActivityAction,
        entity: ActivityEntity,
        entity_id: Uuid,
        description: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            action,
            entity,
            entity_id,
            description: description.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
