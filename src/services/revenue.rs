//! Revenue aggregation service
//!
//! Fetches per-slot revenue facts for a date range and folds them into the
//! adaptive series (hourly for a single day, daily up to a month, monthly
//! beyond).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    domain::revenue::{self, Granularity, RevenueBucket},
    error::{AppError, AppResult},
    repository::Repository,
};

/// Headline counters for the operator dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub active_bookings: i64,
    pub upcoming_available_slots: i64,
    pub usable_discount_codes: i64,
}

/// Aggregated revenue series for a range
#[derive(Debug, Serialize, ToSchema)]
pub struct RevenueReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub granularity: Granularity,
    pub total: Decimal,
    pub buckets: Vec<RevenueBucket>,
}

#[derive(Clone)]
pub struct RevenueService {
    repository: Repository,
}

impl RevenueService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn report(&self, start_date: &str, end_date: &str) -> AppResult<RevenueReport> {
        let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid start_date (expected YYYY-MM-DD)".to_string()))?;
        let end = NaiveDate::parse_from_str(end_date, "%Y-%m-%d")
            .map_err(|_| AppError::Validation("Invalid end_date (expected YYYY-MM-DD)".to_string()))?;
        if end < start {
            return Err(AppError::Validation(
                "end_date must not be before start_date".to_string(),
            ));
        }

        let facts = self.repository.bookings.revenue_facts(start, end).await?;
        let buckets = revenue::bucketize(&facts, start, end);
        let total = buckets.iter().map(|b| b.amount).sum();

        Ok(RevenueReport {
            start_date: start,
            end_date: end,
            granularity: revenue::granularity_for(start, end),
            total,
            buckets,
        })
    }

    pub async fn summary(&self) -> AppResult<DashboardSummary> {
        Ok(DashboardSummary {
            active_bookings: self.repository.bookings.count_active().await?,
            upcoming_available_slots: self.repository.slots.count_upcoming_available().await?,
            usable_discount_codes: self.repository.discounts.count_active().await?,
        })
    }
}
