//! Repository layer for database access
//!
//! One repository per aggregate, all sharing the same connection pool.
//! Lifecycle operations that touch several tables at once (assignments,
//! replacements, removals, renewals) own their transactions here.

pub mod activity;
pub mod assignments;
pub mod clients;
pub mod devices;
pub mod masterdata;
pub mod renewals;
pub mod sims;
pub mod tasks;
pub mod users;

use sqlx::{Pool, Postgres};

pub use activity::ActivityRepository;
pub use assignments::AssignmentsRepository;
pub use clients::ClientsRepository;
pub use devices::{DeviceStatusCount, DevicesRepository};
pub use masterdata::MasterDataRepository;
pub use renewals::RenewalsRepository;
pub use sims::{SimStatusCount, SimsRepository};
pub use tasks::TasksRepository;
pub use users::UsersRepository;

/// All repositories bundled with the shared pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: UsersRepository,
    pub devices: DevicesRepository,
    pub sims: SimsRepository,
    pub clients: ClientsRepository,
    pub assignments: AssignmentsRepository,
    pub renewals: RenewalsRepository,
    pub tasks: TasksRepository,
    pub activity: ActivityRepository,
    pub masterdata: MasterDataRepository,
}

impl Repository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: UsersRepository::new(pool.clone()),
            devices: DevicesRepository::new(pool.clone()),
            sims: SimsRepository::new(pool.clone()),
            clients: ClientsRepository::new(pool.clone()),
            assignments: AssignmentsRepository::new(pool.clone()),
            renewals: RenewalsRepository::new(pool.clone()),
            tasks: TasksRepository::new(pool.clone()),
            activity: ActivityRepository::new(pool.clone()),
            masterdata: MasterDataRepository::new(pool.clone()),
            pool,
        }
    }
}
