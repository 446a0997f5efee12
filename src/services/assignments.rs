//! Assignment lifecycle service
//!
//! Validates references and availability up front, resolves date defaults,
//! then hands off to the repository which performs the whole operation in one
//! transaction. The pre-checks exist for friendly errors; correctness under
//! concurrency comes from the conditional updates inside the transaction.

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::AppResult,
    inventory,
    models::assignment::{
        Assignment, AssignmentDetails, AssignmentQuery, CreateAssignment, CreateRemoval,
        CreateReplacement, NewAssignment, Removal, RemovalDetails, Replacement,
        ReplacementDetails, UpdateAssignment,
    },
    repository::Repository,
    services::renewals::add_one_year,
};

#[derive(Clone)]
pub struct AssignmentsService {
    repository: Repository,
}

impl AssignmentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &AssignmentQuery) -> AppResult<Vec<AssignmentDetails>> {
        self.repository.assignments.list(query).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<AssignmentDetails> {
        self.repository.assignments.get_details(id).await
    }

    /// Create an assignment, acquiring inventory per the job type. Returns
    /// the created assignment with device, SIM, vehicle and client resolved.
    pub async fn create(&self, req: CreateAssignment, actor: Uuid) -> AppResult<AssignmentDetails> {
        let device = self.repository.devices.get_by_id(req.device_id).await?;
        self.repository.masterdata.get_vehicle(req.vehicle_id).await?;
        self.repository.clients.get_by_id(req.client_id).await?;

        // Only new installations require the device to come from the
        // AVAILABLE pool; replacements and transfers work with the device as
        // it stands.
        if req.job_type == crate::models::enums::JobType::NewInstallation {
            inventory::ensure_device_available(device.status)?;
        }

        if let Some(sim_id) = req.sim_id {
            let sim = self.repository.sims.get_by_id(sim_id).await?;
            inventory::ensure_sim_available(sim.status)?;
        }

        let now = Utc::now();
        let new = NewAssignment {
            job_type: req.job_type,
            device_id: req.device_id,
            sim_id: req.sim_id,
            vehicle_id: req.vehicle_id,
            client_id: req.client_id,
            platform: req.platform,
            installation_date: req.installation_date.unwrap_or(now),
            activation_date: req.activation_date.unwrap_or(now),
            certificate_expiry: req.certificate_expiry.unwrap_or_else(|| add_one_year(now)),
            subscription_expiry: req.subscription_expiry.unwrap_or_else(|| add_one_year(now)),
            installer_name: req.installer_name,
            location: req.location,
            accessories: req.accessories,
            remarks: req.remarks,
            added_by: actor,
        };

        let assignment = self.repository.assignments.create(&new).await?;
        self.repository.assignments.get_details(assignment.id).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        req: &UpdateAssignment,
        actor: Uuid,
    ) -> AppResult<Assignment> {
        self.repository.assignments.update(id, req, actor).await
    }

    /// Delete an assignment, releasing its device and SIM back to inventory
    pub async fn delete(&self, id: Uuid, actor: Uuid) -> AppResult<()> {
        self.repository.assignments.delete(id, actor).await
    }

    // -----------------------------------------------------------------------
    // Replacements
    // -----------------------------------------------------------------------

    /// Swap a device on a vehicle: old device released, new device acquired
    pub async fn create_replacement(
        &self,
        req: &CreateReplacement,
        actor: Uuid,
    ) -> AppResult<Replacement> {
        self.repository.devices.get_by_id(req.old_device_id).await?;
        let new_device = self.repository.devices.get_by_id(req.new_device_id).await?;
        inventory::ensure_device_available(new_device.status)?;
        self.repository.masterdata.get_vehicle(req.vehicle_id).await?;
        self.repository.clients.get_by_id(req.client_id).await?;

        self.repository.assignments.create_replacement(req, actor).await
    }

    pub async fn list_replacements(&self) -> AppResult<Vec<ReplacementDetails>> {
        self.repository.assignments.list_replacements().await
    }

    // -----------------------------------------------------------------------
    // Removals
    // -----------------------------------------------------------------------

    /// Take a device out of service and return it to the proper pool
    pub async fn create_removal(&self, req: &CreateRemoval, actor: Uuid) -> AppResult<Removal> {
        self.repository.devices.get_by_id(req.device_id).await?;
        self.repository.masterdata.get_vehicle(req.vehicle_id).await?;
        self.repository.clients.get_by_id(req.client_id).await?;

        self.repository.assignments.create_removal(req, actor).await
    }

    pub async fn list_removals(&self) -> AppResult<Vec<RemovalDetails>> {
        self.repository.assignments.list_removals().await
    }
}
