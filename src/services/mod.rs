//! Service layer: business rules on top of the repositories

pub mod analytics;
pub mod assignments;
pub mod auth;
pub mod clients;
pub mod inventory;
pub mod masterdata;
pub mod renewals;
pub mod reports;
pub mod tasks;

pub use analytics::AnalyticsService;
pub use assignments::AssignmentsService;
pub use auth::AuthService;
pub use clients::ClientsService;
pub use inventory::InventoryService;
pub use masterdata::MasterDataService;
pub use renewals::RenewalsService;
pub use reports::ReportsService;
pub use tasks::TasksService;

use crate::{config::AppConfig, repository::Repository};

/// All services bundled for handler access
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub inventory: InventoryService,
    pub assignments: AssignmentsService,
    pub renewals: RenewalsService,
    pub clients: ClientsService,
    pub tasks: TasksService,
    pub analytics: AnalyticsService,
    pub reports: ReportsService,
    pub masterdata: MasterDataService,
}

impl Services {
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        Self {
            auth: AuthService::new(repository.clone(), config.auth.clone()),
            inventory: InventoryService::new(repository.clone()),
            assignments: AssignmentsService::new(repository.clone()),
            renewals: RenewalsService::new(repository.clone()),
            clients: ClientsService::new(repository.clone()),
            tasks: TasksService::new(repository.clone()),
            analytics: AnalyticsService::new(repository.clone()),
            reports: ReportsService::new(repository.clone()),
            masterdata: MasterDataService::new(repository),
        }
    }
}
