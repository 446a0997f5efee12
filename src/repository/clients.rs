//! Clients repository for database operations

use chrono::Utc;
use sqlx::{FromRow, Pool, Postgres, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::client::{Client, ClientQuery, ClientWithCounts, CreateClient, UpdateClient},
};

#[derive(Clone)]
pub struct ClientsRepository {
    pool: Pool<Postgres>,
}

impl ClientsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get client by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Client> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))
    }

    /// List clients with device/assignment counts
    pub async fn list(&self, query: &ClientQuery) -> AppResult<Vec<ClientWithCounts>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.search.is_some() {
            conditions.push(format!(
                "(c.name ILIKE '%' || ${} || '%' OR c.email ILIKE '%' || ${} || '%')",
                idx, idx
            ));
            idx += 1;
        }
        if query.is_active.is_some() {
            conditions.push(format!("c.is_active = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            r#"
            SELECT c.*,
                   (SELECT COUNT(*) FROM devices d WHERE d.client_id = c.id) as device_count,
                   (SELECT COUNT(*) FROM assignments a WHERE a.client_id = c.id) as assignment_count
            FROM clients c
            {}
            ORDER BY c.name ASC
            "#,
            where_clause
        );

        let mut q = sqlx::query(&sql);
        if let Some(ref search) = query.search {
            q = q.bind(search.clone());
        }
        if let Some(is_active) = query.is_active {
            q = q.bind(is_active);
        }

        let rows = q.fetch_all(&self.pool).await?;
        let mut result = Vec::with_capacity(rows.len());
        for row in &rows {
            result.push(ClientWithCounts {
                client: Client::from_row(row)?,
                device_count: row.get("device_count"),
                assignment_count: row.get("assignment_count"),
            });
        }

        Ok(result)
    }

    /// Create a new client
    pub async fn create(&self, client: &CreateClient) -> AppResult<Client> {
        let created = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, email, phone, address)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update client fields (absent → unchanged; explicit null clears)
    pub async fn update(&self, id: Uuid, update: &UpdateClient) -> AppResult<Client> {
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

        add_field!(update.name, "name");
        add_field!(update.email, "email");
        add_field!(update.phone, "phone");
        add_field!(update.address, "address");
        add_field!(update.is_active, "is_active");

        let sql = format!(
            "UPDATE clients SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            param_idx
        );

        let mut q = sqlx::query_as::<_, Client>(&sql).bind(now);
        if let Some(ref v) = update.name {
            q = q.bind(v.clone());
        }
        if let Some(ref v) = update.email {
            q = q.bind(v.clone());
        }
        if let Some(ref v) = update.phone {
            q = q.bind(v.clone());
        }
        if let Some(ref v) = update.address {
            q = q.bind(v.clone());
        }
        if let Some(v) = update.is_active {
            q = q.bind(v);
        }
        q = q.bind(id);

        q.fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))
    }

    /// Delete a client (caller is responsible for the no-assignments check)
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Client {} not found", id)));
        }
        Ok(())
    }

    /// Number of assignments referencing this client
    pub async fn assignment_count(&self, id: Uuid) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM assignments WHERE client_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Total client count
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
