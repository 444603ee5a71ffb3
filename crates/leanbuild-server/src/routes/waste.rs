//! Waste observation CRUD.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use leanbuild::{Sql, from_rows, sql};
use serde::Deserialize;

use super::{require, require_text, single};
use crate::error::{ApiError, ApiResult};
use crate::models::WasteItem;
use crate::state::AppState;

const COLUMNS: &str = "id, project_id, category, description, cost_impact, status, created_at";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/waste", get(list_waste).post(create_waste))
        .route("/api/waste/:id", put(update_waste).delete(delete_waste))
}

#[derive(Debug, Deserialize)]
struct WasteFilter {
    project_id: Option<i64>,
    category: Option<String>,
}

async fn list_waste(
    State(state): State<AppState>,
    Query(filter): Query<WasteFilter>,
) -> ApiResult<Json<Vec<WasteItem>>> {
    let mut conditions = Sql::empty();
    if let Some(project_id) = filter.project_id {
        conditions.push(" AND project_id = ").push_bind(project_id);
    }
    if let Some(category) = filter.category {
        conditions.push(" AND category = ").push_bind(category);
    }

    let mut q = sql(format!("SELECT {COLUMNS} FROM waste_items WHERE 1=1"));
    q.push_sql(conditions).push(" ORDER BY created_at DESC");

    let rows = state.db.query(q.render()).await?;
    Ok(Json(from_rows(rows)?))
}

#[derive(Debug, Deserialize)]
struct CreateWasteItem {
    project_id: Option<i64>,
    category: Option<String>,
    description: Option<String>,
    cost_impact: Option<f64>,
}

async fn create_waste(
    State(state): State<AppState>,
    Json(body): Json<CreateWasteItem>,
) -> ApiResult<(StatusCode, Json<WasteItem>)> {
    let project_id = require(body.project_id, "project_id")?;
    let category = require_text(body.category, "category")?;
    let description = require_text(body.description, "description")?;

    let mut q = sql(
        "INSERT INTO waste_items (project_id, category, description, cost_impact, status) VALUES (",
    );
    q.push_bind(project_id)
        .push(", ")
        .push_bind(category)
        .push(", ")
        .push_bind(description)
        .push(", ")
        .push_bind(body.cost_impact)
        .push(", 'open') RETURNING ")
        .push(COLUMNS);

    let rows = state.db.query(q.render()).await?;
    Ok((StatusCode::CREATED, Json(single(rows)?)))
}

#[derive(Debug, Deserialize)]
struct UpdateWasteItem {
    status: Option<String>,
    cost_impact: Option<f64>,
}

async fn update_waste(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateWasteItem>,
) -> ApiResult<Json<WasteItem>> {
    let mut assignments = Sql::empty();
    if let Some(status) = body.status {
        assignments.push("status = ").push_bind(status);
    }
    if let Some(cost_impact) = body.cost_impact {
        if !assignments.is_empty() {
            assignments.push(", ");
        }
        assignments.push("cost_impact = ").push_bind(cost_impact);
    }
    if assignments.is_empty() {
        return Err(ApiError::validation("no fields to update"));
    }

    let mut q = sql("UPDATE waste_items SET ");
    q.push_sql(assignments)
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" RETURNING ")
        .push(COLUMNS);

    let rows = state.db.query(q.render()).await?;
    Ok(Json(single(rows)?))
}

async fn delete_waste(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let mut q = sql("DELETE FROM waste_items WHERE id = ");
    q.push_bind(id).push(" RETURNING id");

    let rows = state.db.query(q.render()).await?;
    Ok(Json(serde_json::json!({ "deleted": rows.len() })))
}
