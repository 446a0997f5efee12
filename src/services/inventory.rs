//! Inventory service: device and SIM CRUD plus stock statistics
//!
//! Plain CRUD lives here; the transactional lifecycle operations that move
//! inventory between pools are in the assignments service.

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        activity::NewActivity,
        device::{CreateDevice, Device, DeviceDetails, DeviceQuery, UpdateDevice},
        enums::{ActivityAction, ActivityEntity, DeviceStatus, SimStatus},
        sim::{CreateSim, Sim, SimQuery, UpdateSim},
    },
    repository::{DeviceStatusCount, Repository, SimStatusCount},
};

/// Stock level breakdown for the inventory dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryStats {
    pub total_devices: i64,
    pub total_sims: i64,
    pub devices: Vec<DeviceStatusCount>,
    pub sims: Vec<SimStatusCount>,
}

#[derive(Clone)]
pub struct InventoryService {
    repository: Repository,
}

impl InventoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // -----------------------------------------------------------------------
    // Devices
    // -----------------------------------------------------------------------

    pub async fn list_devices(&self, query: &DeviceQuery) -> AppResult<Vec<Device>> {
        self.repository.devices.list(query).await
    }

    pub async fn get_device(&self, id: Uuid) -> AppResult<DeviceDetails> {
        self.repository.devices.get_details(id).await
    }

    /// Intake a new device; IMEI must be unique
    pub async fn create_device(&self, req: &CreateDevice, actor: Uuid) -> AppResult<Device> {
        if self.repository.devices.get_by_imei(&req.imei).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Device with IMEI {} already exists",
                req.imei
            )));
        }

        let device = self.repository.devices.create(req).await?;

        self.repository
            .activity
            .record(&NewActivity::new(
                actor,
                ActivityAction::Create,
                ActivityEntity::Device,
                device.id,
                format!("Added device {} {} ({})", device.brand, device.model, device.imei),
            ))
            .await?;

        Ok(device)
    }

    pub async fn update_device(
        &self,
        id: Uuid,
        req: &UpdateDevice,
        actor: Uuid,
    ) -> AppResult<Device> {
        let device = self.repository.devices.update(id, req).await?;

        self.repository
            .activity
            .record(&NewActivity::new(
                actor,
                ActivityAction::Update,
                ActivityEntity::Device,
                device.id,
                format!("Updated device {}", device.imei),
            ))
            .await?;

        Ok(device)
    }

    /// Delete a device; refused while the device is assigned
    pub async fn delete_device(&self, id: Uuid, actor: Uuid) -> AppResult<()> {
        let device = self.repository.devices.get_by_id(id).await?;
        if device.status == DeviceStatus::Assigned {
            return Err(AppError::Conflict(
                "Cannot delete a device that is currently assigned".to_string(),
            ));
        }

        self.repository.devices.delete(id).await?;

        self.repository
            .activity
            .record(&NewActivity::new(
                actor,
                ActivityAction::Delete,
                ActivityEntity::Device,
                id,
                format!("Deleted device {}", device.imei),
            ))
            .await?;

        Ok(())
    }

    // -----------------------------------------------------------------------
    // SIMs
    // -----------------------------------------------------------------------

    pub async fn list_sims(&self, query: &SimQuery) -> AppResult<Vec<Sim>> {
        self.repository.sims.list(query).await
    }

    pub async fn get_sim(&self, id: Uuid) -> AppResult<Sim> {
        self.repository.sims.get_by_id(id).await
    }

    /// Intake a new SIM; number must be unique
    pub async fn create_sim(&self, req: &CreateSim, actor: Uuid) -> AppResult<Sim> {
        if self.repository.sims.get_by_number(&req.number).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "SIM with number {} already exists",
                req.number
            )));
        }

        let sim = self.repository.sims.create(req).await?;

        self.repository
            .activity
            .record(&NewActivity::new(
                actor,
                ActivityAction::Create,
                ActivityEntity::Sim,
                sim.id,
                format!("Added SIM {} ({})", sim.number, sim.brand),
            ))
            .await?;

        Ok(sim)
    }

    pub async fn update_sim(&self, id: Uuid, req: &UpdateSim, actor: Uuid) -> AppResult<Sim> {
        let sim = self.repository.sims.update(id, req).await?;

        self.repository
            .activity
            .record(&NewActivity::new(
                actor,
                ActivityAction::Update,
                ActivityEntity::Sim,
                sim.id,
                format!("Updated SIM {}", sim.number),
            ))
            .await?;

        Ok(sim)
    }

    /// Delete a SIM; refused while the SIM is assigned
    pub async fn delete_sim(&self, id: Uuid, actor: Uuid) -> AppResult<()> {
        let sim = self.repository.sims.get_by_id(id).await?;
        if sim.status == SimStatus::Assigned {
            return Err(AppError::Conflict(
                "Cannot delete a SIM that is currently assigned".to_string(),
            ));
        }

        self.repository.sims.delete(id).await?;

        self.repository
            .activity
            .record(&NewActivity::new(
                actor,
                ActivityAction::Delete,
                ActivityEntity::Sim,
                id,
                format!("Deleted SIM {}", sim.number),
            ))
            .await?;

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Stats
    // -----------------------------------------------------------------------

    pub async fn stats(&self) -> AppResult<InventoryStats> {
        Ok(InventoryStats {
            total_devices: self.repository.devices.count().await?,
            total_sims: self.repository.sims.count().await?,
            devices: self.repository.devices.count_grouped().await?,
            sims: self.repository.sims.count_grouped().await?,
        })
    }
}
