//! Report handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::{query, MonthQuery};
use crate::{AppError, AppState};
use coach_core::models::{BudgetInsight, MonthlySummary, RecommendationsReport, Trajectory};

/// GET /api/summary/monthly - Spending and income totals for a month
pub async fn monthly_summary(
    State(state): State<Arc<AppState>>,
    params: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<MonthlySummary>, AppError> {
    let month = query(params)?.month()?;
    Ok(Json(state.db.monthly_summary(month)?))
}

/// Query parameters for budget insights
#[derive(Debug, Deserialize)]
pub struct BudgetInsightsQuery {
    pub year: Option<i64>,
    pub month: Option<i64>,
    /// Near-limit ratio, overrides the configured default
    pub threshold: Option<f64>,
}

/// GET /api/insights/budget - Classify each budget for a month
pub async fn budget_insights(
    State(state): State<Arc<AppState>>,
    params: Result<Query<BudgetInsightsQuery>, QueryRejection>,
) -> Result<Json<Vec<BudgetInsight>>, AppError> {
    let params = query(params)?;
    let month = MonthQuery {
        year: params.year,
        month: params.month,
    }
    .month()?;
    let threshold = params
        .threshold
        .unwrap_or(state.coach.near_limit_threshold);

    Ok(Json(state.db.budget_insights(month, threshold)?))
}

/// Query parameters for the trajectory report
#[derive(Debug, Deserialize)]
pub struct TrajectoryQuery {
    /// Number of most recent months to include (0 = all)
    pub months: Option<usize>,
}

/// GET /api/summary/trajectory - Month-over-month spending totals
pub async fn trajectory(
    State(state): State<Arc<AppState>>,
    params: Result<Query<TrajectoryQuery>, QueryRejection>,
) -> Result<Json<Trajectory>, AppError> {
    let window = query(params)?
        .months
        .unwrap_or(state.coach.trajectory_months);
    Ok(Json(state.db.trajectory(window)?))
}

/// GET /api/insights/recommendations - Reallocation suggestions for a month
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    params: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<RecommendationsReport>, AppError> {
    let month = query(params)?.month()?;
    let today = Utc::now().date_naive();

    Ok(Json(state.db.recommendations(
        month,
        state.coach.near_limit_threshold,
        today,
    )?))
}
