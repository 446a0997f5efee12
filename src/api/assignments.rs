//! Assignment lifecycle endpoints: installations, replacements, removals

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
        assignment::{
            Assignment, AssignmentDetails, AssignmentQuery, CreateAssignment, CreateRemoval,
            CreateReplacement, Removal, RemovalDetails, Replacement, ReplacementDetails,
            UpdateAssignment,
        },
        user::UserRole,
    },
    AppState,
};

use super::AuthenticatedUser;

const ASSIGNMENT_CREATORS: &[UserRole] = &[
    UserRole::Admin,
    UserRole::Manager,
    UserRole::Support,
    UserRole::Sales,
];
const ASSIGNMENT_EDITORS: &[UserRole] = &[UserRole::Admin, UserRole::Manager, UserRole::Support];
const ASSIGNMENT_DELETERS: &[UserRole] = &[UserRole::Admin, UserRole::Manager];

/// List assignments with optional filters
#[utoipa::path(
    get,
    path = "/assignments",
    tag = "assignments",
    security(("bearer_auth" = [])),
    params(AssignmentQuery),
    responses(
        (status = 200, description = "Assignment list", body = Vec<AssignmentDetails>)
    )
)]
pub async fn list_assignments(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<AssignmentQuery>,
) -> AppResult<Json<Vec<AssignmentDetails>>> {
    let assignments = state.services.assignments.list(&query).await?;
    Ok(Json(assignments))
}

/// Get an assignment with all related records
#[utoipa::path(
    get,
    path = "/assignments/{id}",
    tag = "assignments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment details", body = AssignmentDetails),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn get_assignment(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AssignmentDetails>> {
    let assignment = state.services.assignments.get(id).await?;
    Ok(Json(assignment))
}

/// Create an assignment (install a device in a vehicle)
#[utoipa::path(
    post,
    path = "/assignments",
    tag = "assignments",
    security(("bearer_auth" = [])),
    request_body = CreateAssignment,
    responses(
        (status = 201, description = "Assignment created", body = AssignmentDetails),
        (status = 404, description = "Device, vehicle or client not found"),
        (status = 409, description = "Device or SIM not available")
    )
)]
pub async fn create_assignment(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateAssignment>,
) -> AppResult<(StatusCode, Json<AssignmentDetails>)> {
    claims.require_role(ASSIGNMENT_CREATORS)?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let assignment = state
        .services
        .assignments
        .create(request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// Update assignment details
#[utoipa::path(
    put,
    path = "/assignments/{id}",
    tag = "assignments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Assignment ID")),
    request_body = UpdateAssignment,
    responses(
        (status = 200, description = "Assignment updated", body = Assignment),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn update_assignment(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAssignment>,
) -> AppResult<Json<Assignment>> {
    claims.require_role(ASSIGNMENT_EDITORS)?;

    let assignment = state
        .services
        .assignments
        .update(id, &request, claims.user_id)
        .await?;
    Ok(Json(assignment))
}

/// Delete an assignment, returning its device and SIM to inventory
#[utoipa::path(
    delete,
    path = "/assignments/{id}",
    tag = "assignments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 204, description = "Assignment deleted"),
        (status = 404, description = "Assignment not found")
    )
)]
pub async fn delete_assignment(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    claims.require_role(ASSIGNMENT_DELETERS)?;

    state
        .services
        .assignments
        .delete(id, claims.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Replacements
// ---------------------------------------------------------------------------

/// List device replacements
#[utoipa::path(
    get,
    path = "/replacements",
    tag = "assignments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Replacement list", body = Vec<ReplacementDetails>)
    )
)]
pub async fn list_replacements(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<ReplacementDetails>>> {
    let replacements = state.services.assignments.list_replacements().await?;
    Ok(Json(replacements))
}

/// Replace a device on a vehicle
#[utoipa::path(
    post,
    path = "/replacements",
    tag = "assignments",
    security(("bearer_auth" = [])),
    request_body = CreateReplacement,
    responses(
        (status = 201, description = "Replacement recorded", body = Replacement),
        (status = 404, description = "Device, vehicle or client not found"),
        (status = 409, description = "New device not available")
    )
)]
pub async fn create_replacement(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateReplacement>,
) -> AppResult<(StatusCode, Json<Replacement>)> {
    claims.require_role(ASSIGNMENT_EDITORS)?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let replacement = state
        .services
        .assignments
        .create_replacement(&request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(replacement)))
}

// ---------------------------------------------------------------------------
// Removals
// ---------------------------------------------------------------------------

/// List device removals
#[utoipa::path(
    get,
    path = "/removals",
    tag = "assignments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Removal list", body = Vec<RemovalDetails>)
    )
)]
pub async fn list_removals(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<RemovalDetails>>> {
    let removals = state.services.assignments.list_removals().await?;
    Ok(Json(removals))
}

/// Remove a device from a vehicle
#[utoipa::path(
    post,
    path = "/removals",
    tag = "assignments",
    security(("bearer_auth" = [])),
    request_body = CreateRemoval,
    responses(
        (status = 201, description = "Removal recorded", body = Removal),
        (status = 404, description = "Device, vehicle or client not found")
    )
)]
pub async fn create_removal(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateRemoval>,
) -> AppResult<(StatusCode, Json<Removal>)> {
    claims.require_role(ASSIGNMENT_EDITORS)?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let removal = state
        .services
        .assignments
        .create_removal(&request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(removal)))
}
