//! Client management endpoints

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
        assignment::AssignmentDetails,
        client::{Client, ClientQuery, ClientWithCounts, CreateClient, UpdateClient},
        user::UserRole,
    },
    AppState,
};

use super::AuthenticatedUser;

const CLIENT_WRITERS: &[UserRole] = &[
    UserRole::Admin,
    UserRole::Manager,
    UserRole::Support,
    UserRole::Sales,
];
const CLIENT_DELETERS: &[UserRole] = &[UserRole::Admin, UserRole::Manager];

/// List clients with device and assignment counts
#[utoipa::path(
    get,
    path = "/clients",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(ClientQuery),
    responses(
        (status = 200, description = "Client list", body = Vec<ClientWithCounts>)
    )
)]
pub async fn list_clients(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<ClientQuery>,
) -> AppResult<Json<Vec<ClientWithCounts>>> {
    let clients = state.services.clients.list(&query).await?;
    Ok(Json(clients))
}

/// Get a client
#[utoipa::path(
    get,
    path = "/clients/{id}",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client details", body = Client),
        (status = 404, description = "Client not found")
    )
)]
pub async fn get_client(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Client>> {
    let client = state.services.clients.get(id).await?;
    Ok(Json(client))
}

/// Assignment history for a client
#[utoipa::path(
    get,
    path = "/clients/{id}/history",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client assignment history", body = Vec<AssignmentDetails>),
        (status = 404, description = "Client not found")
    )
)]
pub async fn client_history(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<AssignmentDetails>>> {
    let history = state.services.clients.history(id).await?;
    Ok(Json(history))
}

/// Create a client
#[utoipa::path(
    post,
    path = "/clients",
    tag = "clients",
    security(("bearer_auth" = [])),
    request_body = CreateClient,
    responses(
        (status = 201, description = "Client created", body = Client)
    )
)]
pub async fn create_client(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    claims.require_role(CLIENT_WRITERS)?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let client = state
        .services
        .clients
        .create(&request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// Update a client
#[utoipa::path(
    put,
    path = "/clients/{id}",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Client ID")),
    request_body = UpdateClient,
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 404, description = "Client not found")
    )
)]
pub async fn update_client(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateClient>,
) -> AppResult<Json<Client>> {
    claims.require_role(CLIENT_WRITERS)?;

    let client = state
        .services
        .clients
        .update(id, &request, claims.user_id)
        .await?;
    Ok(Json(client))
}

/// Delete a client
#[utoipa::path(
    delete,
    path = "/clients/{id}",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 404, description = "Client not found"),
        (status = 409, description = "Client still has assignments")
    )
)]
pub async fn delete_client(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    claims.require_role(CLIENT_DELETERS)?;

    state.services.clients.delete(id, claims.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
