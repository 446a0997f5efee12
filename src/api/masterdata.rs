//! Vehicle and master data endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        masterdata::{Accessory, Installer, Location, Platform},
        user::UserRole,
        vehicle::{CreateVehicle, Vehicle},
    },
    AppState,
};

use super::AuthenticatedUser;

const VEHICLE_WRITERS: &[UserRole] = &[
    UserRole::Admin,
    UserRole::Manager,
    UserRole::Support,
    UserRole::Sales,
];

/// List vehicles
#[utoipa::path(
    get,
    path = "/vehicles",
    tag = "masterdata",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Vehicle list", body = Vec<Vehicle>)
    )
)]
pub async fn list_vehicles(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Vehicle>>> {
    let vehicles = state.services.masterdata.list_vehicles().await?;
    Ok(Json(vehicles))
}

/// Get a vehicle
#[utoipa::path(
    get,
    path = "/vehicles/{id}",
    tag = "masterdata",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle details", body = Vehicle),
        (status = 404, description = "Vehicle not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vehicle>> {
    let vehicle = state.services.masterdata.get_vehicle(id).await?;
    Ok(Json(vehicle))
}

/// Register a vehicle
#[utoipa::path(
    post,
    path = "/vehicles",
    tag = "masterdata",
    security(("bearer_auth" = [])),
    request_body = CreateVehicle,
    responses(
        (status = 201, description = "Vehicle registered", body = Vehicle),
        (status = 409, description = "Plate number already registered")
    )
)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateVehicle>,
) -> AppResult<(StatusCode, Json<Vehicle>)> {
    claims.require_role(VEHICLE_WRITERS)?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let vehicle = state
        .services
        .masterdata
        .create_vehicle(&request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// Active tracking platforms
#[utoipa::path(
    get,
    path = "/masterdata/platforms",
    tag = "masterdata",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Platform list", body = Vec<Platform>)
    )
)]
pub async fn list_platforms(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Platform>>> {
    let platforms = state.services.masterdata.list_platforms().await?;
    Ok(Json(platforms))
}

/// Service locations
#[utoipa::path(
    get,
    path = "/masterdata/locations",
    tag = "masterdata",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Location list", body = Vec<Location>)
    )
)]
pub async fn list_locations(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Location>>> {
    let locations = state.services.masterdata.list_locations().await?;
    Ok(Json(locations))
}

/// Active field installers
#[utoipa::path(
    get,
    path = "/masterdata/installers",
    tag = "masterdata",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Installer list", body = Vec<Installer>)
    )
)]
pub async fn list_installers(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Installer>>> {
    let installers = state.services.masterdata.list_installers().await?;
    Ok(Json(installers))
}

/// Accessory types
#[utoipa::path(
    get,
    path = "/masterdata/accessories",
    tag = "masterdata",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Accessory list", body = Vec<Accessory>)
    )
)]
pub async fn list_accessories(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Accessory>>> {
    let accessories = state.services.masterdata.list_accessories().await?;
    Ok(Json(accessories))
}
