//! Subscription renewal endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        renewal::{Renewal, RenewalDetails, RenewalQuery, RenewSubscription},
        user::UserRole,
    },
    AppState,
};

use super::AuthenticatedUser;

const RENEWERS: &[UserRole] = &[
    UserRole::Admin,
    UserRole::Manager,
    UserRole::Support,
    UserRole::Accounts,
];

/// List renewals with optional filters
#[utoipa::path(
    get,
    path = "/renewals",
    tag = "renewals",
    security(("bearer_auth" = [])),
    params(RenewalQuery),
    responses(
        (status = 200, description = "Renewal list", body = Vec<RenewalDetails>)
    )
)]
pub async fn list_renewals(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<RenewalQuery>,
) -> AppResult<Json<Vec<RenewalDetails>>> {
    let renewals = state.services.renewals.list(&query).await?;
    Ok(Json(renewals))
}

/// Renewals due within the next 30 days
#[utoipa::path(
    get,
    path = "/renewals/upcoming",
    tag = "renewals",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Upcoming renewals", body = Vec<RenewalDetails>)
    )
)]
pub async fn upcoming_renewals(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<RenewalDetails>>> {
    let renewals = state.services.renewals.upcoming().await?;
    Ok(Json(renewals))
}

/// Renew a subscription for one more year
#[utoipa::path(
    post,
    path = "/renewals/{id}/renew",
    tag = "renewals",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Renewal ID")),
    request_body = RenewSubscription,
    responses(
        (status = 200, description = "Subscription renewed", body = Renewal),
        (status = 404, description = "Renewal not found")
    )
)]
pub async fn renew_subscription(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<RenewSubscription>,
) -> AppResult<Json<Renewal>> {
    claims.require_role(RENEWERS)?;

    let renewal = state
        .services
        .renewals
        .renew(id, &request, claims.user_id)
        .await?;
    Ok(Json(renewal))
}
