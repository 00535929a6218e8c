//! Transaction handlers

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use super::query;
use crate::{AppError, AppState, MAX_PAGE_LIMIT, MAX_UPLOAD_SIZE};
use coach_core::models::{ImportStats, SignConvention, Transaction};

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/transactions - List transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListTransactionsQuery>, QueryRejection>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let params = query(params)?;
    let limit = params.limit.unwrap_or(50).clamp(1, MAX_PAGE_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    Ok(Json(state.db.list_transactions(limit, offset)?))
}

/// Query parameters for CSV import
#[derive(Debug, Deserialize)]
pub struct ImportQuery {
    /// Amounts in the file are positive for purchases
    pub expenses_positive: Option<bool>,
}

/// POST /api/import - Import a spending CSV sent as the request body
pub async fn import_csv(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ImportQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Json<ImportStats>, AppError> {
    let params = query(params)?;

    if body.is_empty() {
        return Err(AppError::bad_request("Request body must contain CSV data"));
    }
    if body.len() > MAX_UPLOAD_SIZE {
        return Err(AppError::bad_request(&format!(
            "File too large. Maximum size is {} MB",
            MAX_UPLOAD_SIZE / 1024 / 1024
        )));
    }

    let convention = match params.expenses_positive {
        Some(true) => SignConvention::ExpensesPositive,
        Some(false) => SignConvention::ExpensesNegative,
        None => state.coach.sign_convention,
    };

    let stats = state.db.import_csv(body.as_ref(), convention, &state.coach)?;
    info!(
        inserted = stats.inserted,
        duplicates = stats.duplicates,
        "CSV imported via API"
    );

    Ok(Json(stats))
}
