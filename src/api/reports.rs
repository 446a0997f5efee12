//! Reporting endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::activity::ActivityLog,
    services::reports::{InstallationReport, LifecycleEvent, ReportPeriod},
    AppState,
};

use super::AuthenticatedUser;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ActivityFeedQuery {
    /// Maximum number of entries (default 50, capped at 200)
    pub limit: Option<i64>,
}

/// Installation/removal volume per platform over a period
#[utoipa::path(
    get,
    path = "/reports/installations",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(ReportPeriod),
    responses(
        (status = 200, description = "Installation report", body = InstallationReport)
    )
)]
pub async fn installation_report(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(period): Query<ReportPeriod>,
) -> AppResult<Json<InstallationReport>> {
    let report = state.services.reports.installation_report(&period).await?;
    Ok(Json(report))
}

/// Lifecycle events (installations, transfers, replacements, removals,
/// renewals) over a period
#[utoipa::path(
    get,
    path = "/reports/lifecycle",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(ReportPeriod),
    responses(
        (status = 200, description = "Lifecycle event report", body = Vec<LifecycleEvent>)
    )
)]
pub async fn lifecycle_report(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(period): Query<ReportPeriod>,
) -> AppResult<Json<Vec<LifecycleEvent>>> {
    let events = state.services.reports.lifecycle_report(&period).await?;
    Ok(Json(events))
}

/// Recent activity log entries
#[utoipa::path(
    get,
    path = "/reports/activity",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(ActivityFeedQuery),
    responses(
        (status = 200, description = "Activity feed", body = Vec<ActivityLog>)
    )
)]
pub async fn recent_activity(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<ActivityFeedQuery>,
) -> AppResult<Json<Vec<ActivityLog>>> {
    let entries = state
        .services
        .reports
        .recent_activity(query.limit.unwrap_or(50))
        .await?;
    Ok(Json(entries))
}
