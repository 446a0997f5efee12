//! Client management service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        activity::NewActivity,
        assignment::{AssignmentDetails, AssignmentQuery},
        client::{Client, ClientQuery, ClientWithCounts, CreateClient, UpdateClient},
        enums::{ActivityAction, ActivityEntity},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ClientsService {
    repository: Repository,
}

impl ClientsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &ClientQuery) -> AppResult<Vec<ClientWithCounts>> {
        self.repository.clients.list(query).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Client> {
        self.repository.clients.get_by_id(id).await
    }

    /// Assignment history for a client, newest first
    pub async fn history(&self, id: Uuid) -> AppResult<Vec<AssignmentDetails>> {
        self.repository.clients.get_by_id(id).await?;

        let query = AssignmentQuery {
            job_type: None,
            client_id: Some(id),
            platform: None,
            location: None,
            start_date: None,
            end_date: None,
        };
        self.repository.assignments.list(&query).await
    }

    pub async fn create(&self, req: &CreateClient, actor: Uuid) -> AppResult<Client> {
        let client = self.repository.clients.create(req).await?;

        self.repository
            .activity
            .record(&NewActivity::new(
                actor,
                ActivityAction::Create,
                ActivityEntity::Client,
                client.id,
                format!("Created client {}", client.name),
            ))
            .await?;

        Ok(client)
    }

    pub async fn update(&self, id: Uuid, req: &UpdateClient, actor: Uuid) -> AppResult<Client> {
        let client = self.repository.clients.update(id, req).await?;

        self.repository
            .activity
            .record(&NewActivity::new(
                actor,
                ActivityAction::Update,
                ActivityEntity::Client,
                client.id,
                format!("Updated client {}", client.name),
            ))
            .await?;

        Ok(client)
    }

    /// Delete a client; refused while assignments still reference it
    pub async fn delete(&self, id: Uuid, actor: Uuid) -> AppResult<()> {
        let client = self.repository.clients.get_by_id(id).await?;

        let assignments = self.repository.clients.assignment_count(id).await?;
        if assignments > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete client with {} active assignment(s)",
                assignments
            )));
        }

        self.repository.clients.delete(id).await?;

        self.repository
            .activity
            .record(&NewActivity::new(
                actor,
                ActivityAction::Delete,
                ActivityEntity::Client,
                id,
                format!("Deleted client {}", client.name),
            ))
            .await?;

        Ok(())
    }
}
