//! Work task model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::enums::{JobType, TaskStatus};
use super::user::UserSummary;

/// Task model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Task {
    pub id: Uuid,
    pub job_type: JobType,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub assigned_to: Option<Uuid>,
    pub created_by: Uuid,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Task with assignee/creator resolved
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TaskDetails {
    #[serde(flatten)]
    pub task: Task,
    pub assignee: Option<UserSummary>,
    pub creator: Option<UserSummary>,
}

/// Task list filters
#[derive(Debug, Deserialize, IntoParams)]
pub struct TaskQuery {
    pub status: Option<TaskStatus>,
    pub job_type: Option<JobType>,
    pub assigned_to: Option<Uuid>,
}

/// Create task request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    pub job_type: JobType,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Update task request (absent → unchanged; explicit null clears nullable fields)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTask {
    pub status: Option<TaskStatus>,
    pub title: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub assigned_to: Option<Option<Uuid>>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}
