//! Work task service

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        activity::NewActivity,
        enums::{ActivityAction, ActivityEntity, TaskStatus},
        task::{CreateTask, Task, TaskDetails, TaskQuery, UpdateTask},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct TasksService {
    repository: Repository,
}

impl TasksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &TaskQuery) -> AppResult<Vec<TaskDetails>> {
        self.repository.tasks.list(query).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<TaskDetails> {
        self.repository.tasks.get_details(id).await
    }

    pub async fn create(&self, req: &CreateTask, actor: Uuid) -> AppResult<Task> {
        let task = self.repository.tasks.create(req, actor).await?;

        self.repository
            .activity
            .record(&NewActivity::new(
                actor,
                ActivityAction::Create,
                ActivityEntity::Task,
                task.id,
                format!("Created task: {}", task.title),
            ))
            .await?;

        Ok(task)
    }

    /// Update a task; moving to DONE stamps `completed_at` if not supplied
    pub async fn update(&self, id: Uuid, req: &UpdateTask, actor: Uuid) -> AppResult<Task> {
        let mut update = UpdateTask {
            status: req.status,
            title: req.title.clone(),
            description: req.description.clone(),
            assigned_to: req.assigned_to,
            due_date: req.due_date,
            completed_at: req.completed_at,
        };

        if update.status == Some(TaskStatus::Done) && update.completed_at.is_none() {
            update.completed_at = Some(Utc::now());
        }

        let task = self.repository.tasks.update(id, &update).await?;

        self.repository
            .activity
            .record(&NewActivity::new(
                actor,
                ActivityAction::Update,
                ActivityEntity::Task,
                task.id,
                format!("Updated task: {}", task.title),
            ))
            .await?;

        Ok(task)
    }

    pub async fn delete(&self, id: Uuid, actor: Uuid) -> AppResult<()> {
        let task = self.repository.tasks.get_details(id).await?;
        self.repository.tasks.delete(id).await?;

        self.repository
            .activity
            .record(&NewActivity::new(
                actor,
                ActivityAction::Delete,
                ActivityEntity::Task,
                id,
                format!("Deleted task: {}", task.task.title),
            ))
            .await?;

        Ok(())
    }
}
