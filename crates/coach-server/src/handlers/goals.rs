//! Savings goal handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use super::json_body;
use crate::{AppError, AppState};
use coach_core::models::{Goal, GoalProgress, NewGoal};

/// GET /api/goals - List all goals
pub async fn list_goals(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Goal>>, AppError> {
    Ok(Json(state.db.list_goals()?))
}

/// POST /api/goals - Create a goal
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewGoal>, JsonRejection>,
) -> Result<Json<Goal>, AppError> {
    let goal = json_body(body)?;
    Ok(Json(state.db.create_goal(&goal)?))
}

#[derive(Debug, Deserialize)]
pub struct ContributionRequest {
    pub amount: f64,
}

/// POST /api/goals/:id/contribute - Add money to a goal
pub async fn contribute_to_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    body: Result<Json<ContributionRequest>, JsonRejection>,
) -> Result<Json<Goal>, AppError> {
    let contribution = json_body(body)?;
    Ok(Json(state.db.contribute_to_goal(id, contribution.amount)?))
}

/// GET /api/goals/progress - Progress toward every goal as of today
pub async fn goals_progress(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GoalProgress>>, AppError> {
    let today = Utc::now().date_naive();
    Ok(Json(state.db.goals_progress(today)?))
}
