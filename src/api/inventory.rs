//! Device and SIM inventory endpoints

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
        device::{CreateDevice, Device, DeviceDetails, DeviceQuery, UpdateDevice},
        sim::{CreateSim, Sim, SimQuery, UpdateSim},
        user::UserRole,
    },
    services::inventory::InventoryStats,
    AppState,
};

use super::AuthenticatedUser;

const INVENTORY_WRITERS: &[UserRole] = &[UserRole::Admin, UserRole::Manager, UserRole::Support];
const INVENTORY_DELETERS: &[UserRole] = &[UserRole::Admin, UserRole::Manager];

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

/// List devices with optional filters
#[utoipa::path(
    get,
    path = "/devices",
    tag = "inventory",
    security(("bearer_auth" = [])),
    params(DeviceQuery),
    responses(
        (status = 200, description = "Device list", body = Vec<Device>)
    )
)]
pub async fn list_devices(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<DeviceQuery>,
) -> AppResult<Json<Vec<Device>>> {
    let devices = state.services.inventory.list_devices(&query).await?;
    Ok(Json(devices))
}

/// Get a device with its client and recent assignment history
#[utoipa::path(
    get,
    path = "/devices/{id}",
    tag = "inventory",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Device ID")),
    responses(
        (status = 200, description = "Device details", body = DeviceDetails),
        (status = 404, description = "Device not found")
    )
)]
pub async fn get_device(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DeviceDetails>> {
    let device = state.services.inventory.get_device(id).await?;
    Ok(Json(device))
}

/// Add a device to inventory
#[utoipa::path(
    post,
    path = "/devices",
    tag = "inventory",
    security(("bearer_auth" = [])),
    request_body = CreateDevice,
    responses(
        (status = 201, description = "Device created", body = Device),
        (status = 409, description = "IMEI already registered")
    )
)]
pub async fn create_device(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateDevice>,
) -> AppResult<(StatusCode, Json<Device>)> {
    claims.require_role(INVENTORY_WRITERS)?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let device = state
        .services
        .inventory
        .create_device(&request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(device)))
}

/// Update a device
#[utoipa::path(
    put,
    path = "/devices/{id}",
    tag = "inventory",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Device ID")),
    request_body = UpdateDevice,
    responses(
        (status = 200, description = "Device updated", body = Device),
        (status = 404, description = "Device not found")
    )
)]
pub async fn update_device(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDevice>,
) -> AppResult<Json<Device>> {
    claims.require_role(INVENTORY_WRITERS)?;

    let device = state
        .services
        .inventory
        .update_device(id, &request, claims.user_id)
        .await?;
    Ok(Json(device))
}

/// Delete a device
#[utoipa::path(
    delete,
    path = "/devices/{id}",
    tag = "inventory",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Device ID")),
    responses(
        (status = 204, description = "Device deleted"),
        (status = 404, description = "Device not found"),
        (status = 409, description = "Device is currently assigned")
    )
)]
pub async fn delete_device(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    claims.require_role(INVENTORY_DELETERS)?;

    state
        .services
        .inventory
        .delete_device(id, claims.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// SIMs
// ---------------------------------------------------------------------------

/// List SIM cards with optional filters
#[utoipa::path(
    get,
    path = "/sims",
    tag = "inventory",
    security(("bearer_auth" = [])),
    params(SimQuery),
    responses(
        (status = 200, description = "SIM list", body = Vec<Sim>)
    )
)]
pub async fn list_sims(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<SimQuery>,
) -> AppResult<Json<Vec<Sim>>> {
    let sims = state.services.inventory.list_sims(&query).await?;
    Ok(Json(sims))
}

/// Get a SIM card
#[utoipa::path(
    get,
    path = "/sims/{id}",
    tag = "inventory",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "SIM ID")),
    responses(
        (status = 200, description = "SIM details", body = Sim),
        (status = 404, description = "SIM not found")
    )
)]
pub async fn get_sim(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Sim>> {
    let sim = state.services.inventory.get_sim(id).await?;
    Ok(Json(sim))
}

/// Add a SIM card to inventory
#[utoipa::path(
    post,
    path = "/sims",
    tag = "inventory",
    security(("bearer_auth" = [])),
    request_body = CreateSim,
    responses(
        (status = 201, description = "SIM created", body = Sim),
        (status = 409, description = "Number already registered")
    )
)]
pub async fn create_sim(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateSim>,
) -> AppResult<(StatusCode, Json<Sim>)> {
    claims.require_role(INVENTORY_WRITERS)?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let sim = state
        .services
        .inventory
        .create_sim(&request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(sim)))
}

/// Update a SIM card
#[utoipa::path(
    put,
    path = "/sims/{id}",
    tag = "inventory",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "SIM ID")),
    request_body = UpdateSim,
    responses(
        (status = 200, description = "SIM updated", body = Sim),
        (status = 404, description = "SIM not found")
    )
)]
pub async fn update_sim(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSim>,
) -> AppResult<Json<Sim>> {
    claims.require_role(INVENTORY_WRITERS)?;

    let sim = state
        .services
        .inventory
        .update_sim(id, &request, claims.user_id)
        .await?;
    Ok(Json(sim))
}

/// Delete a SIM card
#[utoipa::path(
    delete,
    path = "/sims/{id}",
    tag = "inventory",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "SIM ID")),
    responses(
        (status = 204, description = "SIM deleted"),
        (status = 404, description = "SIM not found"),
        (status = 409, description = "SIM is currently assigned")
    )
)]
pub async fn delete_sim(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    claims.require_role(INVENTORY_DELETERS)?;

    state
        .services
        .inventory
        .delete_sim(id, claims.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Stock level breakdown across devices and SIMs
#[utoipa::path(
    get,
    path = "/inventory/stats",
    tag = "inventory",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Inventory statistics", body = InventoryStats)
    )
)]
pub async fn inventory_stats(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<InventoryStats>> {
    let stats = state.services.inventory.stats().await?;
    Ok(Json(stats))
}
