//! Route assembly and shared handler helpers.

pub mod health;
pub mod kaizen;
pub mod recommendations;
pub mod team;
pub mod waste;

use axum::Router;
use leanbuild::{Row, from_row};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(waste::routes())
        .merge(recommendations::routes())
        .merge(team::routes())
        .merge(kaizen::routes())
        .with_state(state)
}

/// Require a field to be present in a request body.
pub(crate) fn require<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::validation(format!("{field} is required")))
}

/// Require a text field to be present and non-blank.
pub(crate) fn require_text(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ApiError::validation(format!("{field} is required"))),
    }
}

/// Decode the first returned row; a statement with `RETURNING` that yields
/// nothing is an internal error, not a client mistake.
pub(crate) fn single<T: DeserializeOwned>(rows: Vec<Row>) -> Result<T, ApiError> {
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::internal("statement returned no rows"))?;
    Ok(from_row(row)?)
}
