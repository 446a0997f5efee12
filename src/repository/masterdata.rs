//! Master data repository: vehicles plus the lookup tables backing the
//! assignment form (platforms, locations, installers, accessories).

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        masterdata::{Accessory, Installer, Location, Platform},
        vehicle::{CreateVehicle, Vehicle},
    },
};

#[derive(Clone)]
pub struct MasterDataRepository {
    pool: Pool<Postgres>,
}

impl MasterDataRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // -----------------------------------------------------------------------
    // Vehicles
    // -----------------------------------------------------------------------

    /// Get vehicle by ID
    pub async fn get_vehicle(&self, id: Uuid) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", id)))
    }

    /// Get vehicle by plate number
    pub async fn get_vehicle_by_plate(&self, plate_number: &str) -> AppResult<Option<Vehicle>> {
        let vehicle =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE plate_number = $1")
                .bind(plate_number)
                .fetch_optional(&self.pool)
                .await?;
        Ok(vehicle)
    }

    /// List all vehicles, newest first
    pub async fn list_vehicles(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(vehicles)
    }

    /// Create a new vehicle
    pub async fn create_vehicle(&self, vehicle: &CreateVehicle) -> AppResult<Vehicle> {
        let created = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (make, model, plate_number, chassis_number)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(&vehicle.plate_number)
        .bind(&vehicle.chassis_number)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Total vehicle count
    pub async fn count_vehicles(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // -----------------------------------------------------------------------
    // Lookup tables
    // -----------------------------------------------------------------------

    /// Active tracking platforms
    pub async fn list_platforms(&self) -> AppResult<Vec<Platform>> {
        let platforms = sqlx::query_as::<_, Platform>(
            "SELECT * FROM platforms WHERE is_active = TRUE ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(platforms)
    }

    /// All platforms including inactive (reporting master list)
    pub async fn list_all_platforms(&self) -> AppResult<Vec<Platform>> {
        let platforms =
            sqlx::query_as::<_, Platform>("SELECT * FROM platforms ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(platforms)
    }

    /// Service locations
    pub async fn list_locations(&self) -> AppResult<Vec<Location>> {
        let locations =
            sqlx::query_as::<_, Location>("SELECT * FROM locations ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(locations)
    }

    /// Active field installers
    pub async fn list_installers(&self) -> AppResult<Vec<Installer>> {
        let installers = sqlx::query_as::<_, Installer>(
            "SELECT * FROM installers WHERE is_active = TRUE ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(installers)
    }

    /// Accessory types
    pub async fn list_accessories(&self) -> AppResult<Vec<Accessory>> {
        let accessories = sqlx::query_as::<_, Accessory>(
            "SELECT * FROM accessories ORDER BY accessory_type ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(accessories)
    }
}
