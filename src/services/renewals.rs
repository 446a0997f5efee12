//! Subscription renewal service

use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::renewal::{Renewal, RenewalDetails, RenewalQuery, RenewSubscription},
    repository::Repository,
};

/// Renewals expiring within this window count as "upcoming" on the dashboard.
const UPCOMING_WINDOW_DAYS: i64 = 30;

/// Add one calendar year, clamping Feb 29 to Feb 28 on non-leap years.
pub fn add_one_year(date: DateTime<Utc>) -> DateTime<Utc> {
    match date.with_year(date.year() + 1) {
        Some(d) => d,
        None => {
            // Feb 29 with no counterpart next year
            date.with_day(28)
                .and_then(|d| d.with_year(d.year() + 1))
                .unwrap_or(date)
        }
    }
}

#[derive(Clone)]
pub struct RenewalsService {
    repository: Repository,
}

impl RenewalsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List renewals, sweeping overdue UPCOMING rows into EXPIRED first so
    /// status filters and the dashboard counter stay truthful
    pub async fn list(&self, query: &RenewalQuery) -> AppResult<Vec<RenewalDetails>> {
        self.sweep_expired().await?;
        self.repository.renewals.list(query).await
    }

    /// Renewals due within the next 30 days, excluding already-renewed ones
    pub async fn upcoming(&self) -> AppResult<Vec<RenewalDetails>> {
        self.sweep_expired().await?;
        self.repository.renewals.upcoming(UPCOMING_WINDOW_DAYS).await
    }

    /// Extend a subscription by one calendar year from its current expiry
    pub async fn renew(
        &self,
        id: Uuid,
        req: &RenewSubscription,
        actor: Uuid,
    ) -> AppResult<Renewal> {
        let renewal = self.repository.renewals.get_by_id(id).await?;
        let new_expiry = add_one_year(renewal.subscription_expiry);

        self.repository
            .renewals
            .renew(id, new_expiry, req.renewal_remarks.as_deref(), actor)
            .await
    }

    async fn sweep_expired(&self) -> AppResult<()> {
        let expired = self.repository.renewals.mark_expired().await?;
        if expired > 0 {
            tracing::info!(count = expired, "Marked overdue renewals as expired");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn add_one_year_plain_date() {
        let d = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        assert_eq!(
            add_one_year(d),
            Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn add_one_year_clamps_leap_day() {
        let d = Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap();
        assert_eq!(
            add_one_year(d),
            Utc.with_ymd_and_hms(2025, 2, 28, 0, 0, 0).unwrap()
        );
    }
}
