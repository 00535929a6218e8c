//! Budget handlers

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};

use super::{json_body, query, MonthQuery};
use crate::{AppError, AppState};
use coach_core::models::{Budget, NewBudget};

/// GET /api/budgets - Budgets for a month
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    params: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Vec<Budget>>, AppError> {
    let month = query(params)?.month()?;
    Ok(Json(state.db.list_budgets(month)?))
}

/// POST /api/budgets - Create or replace a category budget
pub async fn upsert_budget(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewBudget>, JsonRejection>,
) -> Result<Json<Budget>, AppError> {
    let budget = json_body(body)?;
    Ok(Json(state.db.upsert_budget(&budget)?))
}
