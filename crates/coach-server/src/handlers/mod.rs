//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod budgets;
pub mod goals;
pub mod health;
pub mod reports;
pub mod transactions;

// Re-export all handlers for use in router
pub use budgets::*;
pub use goals::*;
pub use health::*;
pub use reports::*;
pub use transactions::*;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;
use serde::Deserialize;

use crate::AppError;
use coach_core::YearMonth;

/// `?year=YYYY&month=M` query parameters
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i64>,
    pub month: Option<i64>,
}

impl MonthQuery {
    /// Validate into a month key, rejecting missing or out-of-range values
    pub fn month(&self) -> Result<YearMonth, AppError> {
        let (year, month) = match (self.year, self.month) {
            (Some(year), Some(month)) => (year, month),
            _ => return Err(AppError::bad_request("year and month are required")),
        };
        Ok(YearMonth::from_parts(year, month)?)
    }
}

/// Unwrap query parameters, answering malformed ones with a JSON 400
pub(crate) fn query<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    params
        .map(|Query(inner)| inner)
        .map_err(|e| AppError::bad_request(&e.body_text()))
}

/// Unwrap a JSON body, answering malformed ones with a JSON 400
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(inner)| inner)
        .map_err(|e| AppError::bad_request(&e.body_text()))
}
