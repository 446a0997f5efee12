//! Work tasks repository

use chrono::Utc;
use sqlx::{postgres::PgRow, FromRow, Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        task::{CreateTask, Task, TaskDetails, TaskQuery, UpdateTask},
        user::UserSummary,
    },
};

const TASK_DETAILS_SELECT: &str = r#"
    SELECT t.*,
           a.name as a_name, a.email as a_email,
           cr.name as cr_name, cr.email as cr_email
    FROM tasks t
    LEFT JOIN users a ON t.assigned_to = a.id
    LEFT JOIN users cr ON t.created_by = cr.id
"#;

fn task_details_from_row(row: &PgRow) -> Result<TaskDetails, sqlx::Error> {
    let task = Task::from_row(row)?;

    let assignee = match (task.assigned_to, row.get::<Option<String>, _>("a_name")) {
        (Some(id), Some(name)) => Some(UserSummary {
            id,
            name,
            email: row.get::<Option<String>, _>("a_email").unwrap_or_default(),
        }),
        _ => None,
    };

    let creator = row
        .get::<Option<String>, _>("cr_name")
        .map(|name| UserSummary {
            id: task.created_by,
            name,
            email: row.get::<Option<String>, _>("cr_email").unwrap_or_default(),
        });

    Ok(TaskDetails {
        task,
        assignee,
        creator,
    })
}

#[derive(Clone)]
pub struct TasksRepository {
    pool: Pool<Postgres>,
}

impl TasksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get task by ID with assignee/creator resolved
    pub async fn get_details(&self, id: Uuid) -> AppResult<TaskDetails> {
        let sql = format!("{} WHERE t.id = $1", TASK_DETAILS_SELECT);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))?;

        Ok(task_details_from_row(&row)?)
    }

    /// List tasks with optional filters, newest first
    pub async fn list(&self, query: &TaskQuery) -> AppResult<Vec<TaskDetails>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.status.is_some() {
            conditions.push(format!("t.status = ${}", idx));
            idx += 1;
        }
        if query.job_type.is_some() {
            conditions.push(format!("t.job_type = ${}", idx));
            idx += 1;
        }
        if query.assigned_to.is_some() {
            conditions.push(format!("t.assigned_to = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "{} {} ORDER BY t.created_at DESC",
            TASK_DETAILS_SELECT, where_clause
        );

        let mut q = sqlx::query(&sql);
        if let Some(status) = query.status {
            q = q.bind(status);
        }
        if let Some(job_type) = query.job_type {
            q = q.bind(job_type);
        }
        if let Some(assigned_to) = query.assigned_to {
            q = q.bind(assigned_to);
        }

        let rows = q.fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| task_details_from_row(row).map_err(AppError::from))
            .collect()
    }

    /// Create a new task (starts PENDING)
    pub async fn create(&self, task: &CreateTask, created_by: Uuid) -> AppResult<Task> {
        let created = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (job_type, title, description, status, assigned_to, created_by, due_date)
            VALUES ($1, $2, $3, 'PENDING', $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(task.job_type)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.assigned_to)
        .bind(created_by)
        .bind(task.due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update task fields (absent → unchanged; explicit null clears)
    pub async fn update(&self, id: Uuid, update: &UpdateTask) -> AppResult<Task> {
        let now = Utc::now();

        let mut sets = vec!["updated_at = $1".to_string()];
        let mut param_idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, param_idx));
                    param_idx += 1;
                }
            };
        }

        add_field!(update.status, "status");
        add_field!(update.title, "title");
        add_field!(update.description, "description");
        add_field!(update.assigned_to, "assigned_to");
        add_field!(update.due_date, "due_date");
        add_field!(update.completed_at, "completed_at");

        let sql = format!(
            "UPDATE tasks SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            param_idx
        );

        let mut q = sqlx::query_as::<_, Task>(&sql).bind(now);
        if let Some(v) = update.status {
            q = q.bind(v);
        }
        if let Some(ref v) = update.title {
            q = q.bind(v.clone());
        }
        if let Some(ref v) = update.description {
            q = q.bind(v.clone());
        }
        if let Some(v) = update.assigned_to {
            q = q.bind(v);
        }
        if let Some(v) = update.due_date {
            q = q.bind(v);
        }
        if let Some(v) = update.completed_at {
            q = q.bind(v);
        }
        q = q.bind(id);

        q.fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))
    }

    /// Delete a task
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Task {} not found", id)));
        }
        Ok(())
    }
}
