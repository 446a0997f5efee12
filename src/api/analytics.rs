//! Analytics dashboard endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    services::analytics::{DashboardStats, InstallationMetrics, InstallerPerformance},
    AppState,
};

use super::AuthenticatedUser;

/// Dashboard counters
#[utoipa::path(
    get,
    path = "/analytics/dashboard",
    tag = "analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats)
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<DashboardStats>> {
    let stats = state.services.analytics.dashboard().await?;
    Ok(Json(stats))
}

/// Jobs per installer
#[utoipa::path(
    get,
    path = "/analytics/installers",
    tag = "analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Installer performance", body = Vec<InstallerPerformance>)
    )
)]
pub async fn installer_performance(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<InstallerPerformance>>> {
    let performance = state.services.analytics.installer_performance().await?;
    Ok(Json(performance))
}

/// Installation volume by month, location and platform
#[utoipa::path(
    get,
    path = "/analytics/installations",
    tag = "analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Installation metrics", body = InstallationMetrics)
    )
)]
pub async fn installation_metrics(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<InstallationMetrics>> {
    let metrics = state.services.analytics.installation_metrics().await?;
    Ok(Json(metrics))
}
