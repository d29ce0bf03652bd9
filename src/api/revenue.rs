//! Revenue reporting endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    services::revenue::{DashboardSummary, RevenueReport},
};

use super::Operator;

/// Inclusive date range for the revenue series
#[derive(Deserialize, IntoParams, ToSchema)]
pub struct RevenueQuery {
    /// Range start (YYYY-MM-DD)
    pub start_date: String,
    /// Range end (YYYY-MM-DD)
    pub end_date: String,
}

/// Revenue series for a range. Granularity adapts to the span: per start
/// time for a single day, per day up to a month, per month beyond.
#[utoipa::path(
    get,
    path = "/revenue",
    tag = "revenue",
    security(("bearer_auth" = [])),
    params(RevenueQuery),
    responses(
        (status = 200, description = "Aggregated revenue series", body = RevenueReport),
        (status = 400, description = "Invalid date range")
    )
)]
pub async fn get_revenue(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
    Query(query): Query<RevenueQuery>,
) -> AppResult<Json<RevenueReport>> {
    let report = state
        .services
        .revenue
        .report(&query.start_date, &query.end_date)
        .await?;
    Ok(Json(report))
}

/// Headline counters for the operator dashboard
#[utoipa::path(
    get,
    path = "/summary",
    tag = "revenue",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard counters", body = DashboardSummary)
    )
)]
pub async fn get_summary(
    State(state): State<crate::AppState>,
    Operator(_claims): Operator,
) -> AppResult<Json<DashboardSummary>> {
    let summary = state.services.revenue.summary().await?;
    Ok(Json(summary))
}
