//! Master data service: vehicles and the assignment form lookup tables

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        activity::NewActivity,
        enums::{ActivityAction, ActivityEntity},
        masterdata::{Accessory, Installer, Location, Platform},
        vehicle::{CreateVehicle, Vehicle},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct MasterDataService {
    repository: Repository,
}

impl MasterDataService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        self.repository.masterdata.list_vehicles().await
    }

    pub async fn get_vehicle(&self, id: Uuid) -> AppResult<Vehicle> {
        self.repository.masterdata.get_vehicle(id).await
    }

    /// Register a vehicle; plate number must be unique
    pub async fn create_vehicle(&self, req: &CreateVehicle, actor: Uuid) -> AppResult<Vehicle> {
        if self
            .repository
            .masterdata
            .get_vehicle_by_plate(&req.plate_number)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "Vehicle with plate number {} already exists",
                req.plate_number
            )));
        }

        let vehicle = self.repository.masterdata.create_vehicle(req).await?;

        self.repository
            .activity
            .record(&NewActivity::new(
                actor,
                ActivityAction::Create,
                ActivityEntity::Vehicle,
                vehicle.id,
                format!("Registered vehicle {} ({} {})", vehicle.plate_number, vehicle.make, vehicle.model),
            ))
            .await?;

        Ok(vehicle)
    }

    pub async fn list_platforms(&self) -> AppResult<Vec<Platform>> {
        self.repository.masterdata.list_platforms().await
    }

    pub async fn list_locations(&self) -> AppResult<Vec<Location>> {
        self.repository.masterdata.list_locations().await
    }

    pub async fn list_installers(&self) -> AppResult<Vec<Installer>> {
        self.repository.masterdata.list_installers().await
    }

    pub async fn list_accessories(&self) -> AppResult<Vec<Accessory>> {
        self.repository.masterdata.list_accessories().await
    }
}
