//! FleetTrack Server - Fleet Tracking Device Management
//!
//! REST API server for managing GPS tracking devices, SIM cards, vehicles,
//! clients, and the installation lifecycle.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fleettrack_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("fleettrack_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting FleetTrack Server v{}", env!("CARGO_PKG_VERSION"));

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    let repository = Repository::new(pool);
    let services = Services::new(repository, &config);

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = create_router(state);

    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        .route("/auth/register", post(api::auth::register))
        // Users
        .route("/users", get(api::auth::list_users))
        .route("/users/:id", put(api::auth::update_user))
        // Devices
        .route("/devices", get(api::inventory::list_devices))
        .route("/devices", post(api::inventory::create_device))
        .route("/devices/:id", get(api::inventory::get_device))
        .route("/devices/:id", put(api::inventory::update_device))
        .route("/devices/:id", delete(api::inventory::delete_device))
        // SIMs
        .route("/sims", get(api::inventory::list_sims))
        .route("/sims", post(api::inventory::create_sim))
        .route("/sims/:id", get(api::inventory::get_sim))
        .route("/sims/:id", put(api::inventory::update_sim))
        .route("/sims/:id", delete(api::inventory::delete_sim))
        .route("/inventory/stats", get(api::inventory::inventory_stats))
        // Assignments
        .route("/assignments", get(api::assignments::list_assignments))
        .route("/assignments", post(api::assignments::create_assignment))
        .route("/assignments/:id", get(api::assignments::get_assignment))
        .route("/assignments/:id", put(api::assignments::update_assignment))
        .route(
            "/assignments/:id",
            delete(api::assignments::delete_assignment),
        )
        // Replacements
        .route("/replacements", get(api::assignments::list_replacements))
        .route("/replacements", post(api::assignments::create_replacement))
        // Removals
        .route("/removals", get(api::assignments::list_removals))
        .route("/removals", post(api::assignments::create_removal))
        // Clients
        .route("/clients", get(api::clients::list_clients))
        .route("/clients", post(api::clients::create_client))
        .route("/clients/:id", get(api::clients::get_client))
        .route("/clients/:id", put(api::clients::update_client))
        .route("/clients/:id", delete(api::clients::delete_client))
        .route("/clients/:id/history", get(api::clients::client_history))
        // Renewals
        .route("/renewals", get(api::renewals::list_renewals))
        .route("/renewals/upcoming", get(api::renewals::upcoming_renewals))
        .route("/renewals/:id/renew", post(api::renewals::renew_subscription))
        // Tasks
        .route("/tasks", get(api::tasks::list_tasks))
        .route("/tasks", post(api::tasks::create_task))
        .route("/tasks/:id", get(api::tasks::get_task))
        .route("/tasks/:id", put(api::tasks::update_task))
        .route("/tasks/:id", delete(api::tasks::delete_task))
        // Analytics
        .route("/analytics/dashboard", get(api::analytics::dashboard))
        .route(
            "/analytics/installers",
            get(api::analytics::installer_performance),
        )
        .route(
            "/analytics/installations",
            get(api::analytics::installation_metrics),
        )
        // Reports
        .route("/reports/installations", get(api::reports::installation_report))
        .route("/reports/lifecycle", get(api::reports::lifecycle_report))
        .route("/reports/activity", get(api::reports::recent_activity))
        // Vehicles and master data
        .route("/vehicles", get(api::masterdata::list_vehicles))
        .route("/vehicles", post(api::masterdata::create_vehicle))
        .route("/vehicles/:id", get(api::masterdata::get_vehicle))
        .route("/masterdata/platforms", get(api::masterdata::list_platforms))
        .route("/masterdata/locations", get(api::masterdata::list_locations))
        .route(
            "/masterdata/installers",
            get(api::masterdata::list_installers),
        )
        .route(
            "/masterdata/accessories",
            get(api::masterdata::list_accessories),
        );

    Router::new()
        .merge(api::openapi::swagger_router())
        .nest("/api/v1", api_v1)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
