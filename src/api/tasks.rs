//! Work task endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        task::{CreateTask, Task, TaskDetails, TaskQuery, UpdateTask},
        user::UserRole,
    },
    AppState,
};

use super::AuthenticatedUser;

const TASK_WRITERS: &[UserRole] = &[UserRole::Admin, UserRole::Manager, UserRole::Support];
const TASK_DELETERS: &[UserRole] = &[UserRole::Admin, UserRole::Manager];

/// List tasks with optional filters
#[utoipa::path(
    get,
    path = "/tasks",
    tag = "tasks",
    security(("bearer_auth" = [])),
    params(TaskQuery),
    responses(
        (status = 200, description = "Task list", body = Vec<TaskDetails>)
    )
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<TaskQuery>,
) -> AppResult<Json<Vec<TaskDetails>>> {
    let tasks = state.services.tasks.list(&query).await?;
    Ok(Json(tasks))
}

/// Get a task
#[utoipa::path(
    get,
    path = "/tasks/{id}",
    tag = "tasks",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task details", body = TaskDetails),
        (status = 404, description = "Task not found")
    )
)]
pub async fn get_task(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TaskDetails>> {
    let task = state.services.tasks.get(id).await?;
    Ok(Json(task))
}

/// Create a task
#[utoipa::path(
    post,
    path = "/tasks",
    tag = "tasks",
    security(("bearer_auth" = [])),
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created", body = Task)
    )
)]
pub async fn create_task(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    claims.require_role(TASK_WRITERS)?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let task = state
        .services
        .tasks
        .create(&request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Update a task
#[utoipa::path(
    put,
    path = "/tasks/{id}",
    tag = "tasks",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Task ID")),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 404, description = "Task not found")
    )
)]
pub async fn update_task(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    claims.require_role(TASK_WRITERS)?;

    let task = state
        .services
        .tasks
        .update(id, &request, claims.user_id)
        .await?;
    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    tag = "tasks",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Task ID")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn delete_task(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    claims.require_role(TASK_DELETERS)?;

    state.services.tasks.delete(id, claims.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
