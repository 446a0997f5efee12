//! OpenAPI documentation

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    analytics, assignments, auth, clients, health, inventory, masterdata, renewals, reports,
    tasks,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FleetTrack API",
        version = "1.0.0",
        description = "Fleet tracking device management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    modifiers(&SecurityAddon),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        auth::register,
        auth::list_users,
        auth::update_user,
        // Devices
        inventory::list_devices,
        inventory::get_device,
        inventory::create_device,
        inventory::update_device,
        inventory::delete_device,
        // SIMs
        inventory::list_sims,
        inventory::get_sim,
        inventory::create_sim,
        inventory::update_sim,
        inventory::delete_sim,
        inventory::inventory_stats,
        // Assignments
        assignments::list_assignments,
        assignments::get_assignment,
        assignments::create_assignment,
        assignments::update_assignment,
        assignments::delete_assignment,
        assignments::list_replacements,
        assignments::create_replacement,
        assignments::list_removals,
        assignments::create_removal,
        // Clients
        clients::list_clients,
        clients::get_client,
        clients::client_history,
        clients::create_client,
        clients::update_client,
        clients::delete_client,
        // Renewals
        renewals::list_renewals,
        renewals::upcoming_renewals,
        renewals::renew_subscription,
        // Tasks
        tasks::list_tasks,
        tasks::get_task,
        tasks::create_task,
        tasks::update_task,
        tasks::delete_task,
        // Analytics
        analytics::dashboard,
        analytics::installer_performance,
        analytics::installation_metrics,
        // Reports
        reports::installation_report,
        reports::lifecycle_report,
        reports::recent_activity,
        // Master data
        masterdata::list_vehicles,
        masterdata::get_vehicle,
        masterdata::create_vehicle,
        masterdata::list_platforms,
        masterdata::list_locations,
        masterdata::list_installers,
        masterdata::list_accessories,
    ),
    components(
        schemas(
            // Health
            health::HealthResponse,
            // Auth
            auth::LoginRequest,
            crate::services::auth::LoginResponse,
            crate::models::user::User,
            crate::models::user::UserSummary,
            crate::models::user::UserRole,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Enums
            crate::models::enums::DeviceStatus,
            crate::models::enums::SimStatus,
            crate::models::enums::DeviceOwnership,
            crate::models::enums::JobType,
            crate::models::enums::RenewalStatus,
            crate::models::enums::TaskStatus,
            crate::models::enums::ActivityAction,
            crate::models::enums::ActivityEntity,
            // Devices
            crate::models::device::Device,
            crate::models::device::DeviceSummary,
            crate::models::device::DeviceDetails,
            crate::models::device::CreateDevice,
            crate::models::device::UpdateDevice,
            crate::repository::DeviceStatusCount,
            // SIMs
            crate::models::sim::Sim,
            crate::models::sim::SimSummary,
            crate::models::sim::CreateSim,
            crate::models::sim::UpdateSim,
            crate::repository::SimStatusCount,
            crate::services::inventory::InventoryStats,
            // Assignments
            crate::models::assignment::Assignment,
            crate::models::assignment::AssignmentSummary,
            crate::models::assignment::AssignmentDetails,
            crate::models::assignment::CreateAssignment,
            crate::models::assignment::UpdateAssignment,
            crate::models::assignment::Replacement,
            crate::models::assignment::ReplacementDetails,
            crate::models::assignment::CreateReplacement,
            crate::models::assignment::Removal,
            crate::models::assignment::RemovalDetails,
            crate::models::assignment::CreateRemoval,
            // Clients
            crate::models::client::Client,
            crate::models::client::ClientSummary,
            crate::models::client::ClientWithCounts,
            crate::models::client::CreateClient,
            crate::models::client::UpdateClient,
            // Renewals
            crate::models::renewal::Renewal,
            crate::models::renewal::RenewalDetails,
            crate::models::renewal::RenewSubscription,
            // Tasks
            crate::models::task::Task,
            crate::models::task::TaskDetails,
            crate::models::task::CreateTask,
            crate::models::task::UpdateTask,
            // Analytics
            crate::services::analytics::DashboardStats,
            crate::services::analytics::InstallerPerformance,
            crate::services::analytics::MetricBucket,
            crate::services::analytics::InstallationMetrics,
            // Reports
            crate::services::reports::InstallationReport,
            crate::services::reports::PlatformReportRow,
            crate::services::reports::LifecycleEvent,
            crate::models::activity::ActivityLog,
            // Master data
            crate::models::vehicle::Vehicle,
            crate::models::vehicle::VehicleSummary,
            crate::models::vehicle::CreateVehicle,
            crate::models::masterdata::Platform,
            crate::models::masterdata::Location,
            crate::models::masterdata::Installer,
            crate::models::masterdata::Accessory,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Authentication and user management"),
        (name = "inventory", description = "Device and SIM inventory"),
        (name = "assignments", description = "Installation lifecycle"),
        (name = "clients", description = "Fleet clients"),
        (name = "renewals", description = "Subscription renewals"),
        (name = "tasks", description = "Work tasks"),
        (name = "analytics", description = "Dashboards and metrics"),
        (name = "reports", description = "Period reports"),
        (name = "masterdata", description = "Vehicles and lookup tables"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Swagger UI router serving the generated document
pub fn swagger_router() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
