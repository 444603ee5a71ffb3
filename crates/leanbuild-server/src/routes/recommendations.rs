//! Recommendation CRUD plus drag-and-drop reordering.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use leanbuild::{Sql, from_rows, sql};
use serde::Deserialize;

use super::{require, require_text, single};
use crate::error::{ApiError, ApiResult};
use crate::models::Recommendation;
use crate::state::AppState;

const COLUMNS: &str = "id, project_id, title, body, impact, effort, status, position, created_at";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/recommendations",
            get(list_recommendations).post(create_recommendation),
        )
        .route("/api/recommendations/reorder", put(reorder_recommendations))
        .route(
            "/api/recommendations/:id",
            put(update_recommendation).delete(delete_recommendation),
        )
}

#[derive(Debug, Deserialize)]
struct RecommendationFilter {
    project_id: Option<i64>,
}

async fn list_recommendations(
    State(state): State<AppState>,
    Query(filter): Query<RecommendationFilter>,
) -> ApiResult<Json<Vec<Recommendation>>> {
    let mut conditions = Sql::empty();
    if let Some(project_id) = filter.project_id {
        conditions.push(" AND project_id = ").push_bind(project_id);
    }

    let mut q = sql(format!("SELECT {COLUMNS} FROM recommendations WHERE 1=1"));
    q.push_sql(conditions).push(" ORDER BY position");

    let rows = state.db.query(q.render()).await?;
    Ok(Json(from_rows(rows)?))
}

#[derive(Debug, Deserialize)]
struct CreateRecommendation {
    project_id: Option<i64>,
    title: Option<String>,
    body: Option<String>,
    impact: Option<String>,
    effort: Option<String>,
}

async fn create_recommendation(
    State(state): State<AppState>,
    Json(req): Json<CreateRecommendation>,
) -> ApiResult<(StatusCode, Json<Recommendation>)> {
    let project_id = require(req.project_id, "project_id")?;
    let title = require_text(req.title, "title")?;

    // New entries land at the end of the project's list.
    let mut q = sql(
        "INSERT INTO recommendations (project_id, title, body, impact, effort, status, position) VALUES (",
    );
    q.push_bind(project_id)
        .push(", ")
        .push_bind(title)
        .push(", ")
        .push_bind(req.body)
        .push(", ")
        .push_bind(req.impact)
        .push(", ")
        .push_bind(req.effort)
        .push(
            ", 'proposed', (SELECT COALESCE(MAX(position) + 1, 0) FROM recommendations WHERE project_id = ",
        )
        .push_bind(project_id)
        .push(")) RETURNING ")
        .push(COLUMNS);

    let rows = state.db.query(q.render()).await?;
    Ok((StatusCode::CREATED, Json(single(rows)?)))
}

#[derive(Debug, Deserialize)]
struct UpdateRecommendation {
    title: Option<String>,
    body: Option<String>,
    impact: Option<String>,
    effort: Option<String>,
    status: Option<String>,
}

async fn update_recommendation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRecommendation>,
) -> ApiResult<Json<Recommendation>> {
    let mut assignments = Sql::empty();
    let fields = [
        ("title", req.title),
        ("body", req.body),
        ("impact", req.impact),
        ("effort", req.effort),
        ("status", req.status),
    ];
    for (column, value) in fields {
        if let Some(value) = value {
            if !assignments.is_empty() {
                assignments.push(", ");
            }
            assignments.push(column).push(" = ").push_bind(value);
        }
    }
    if assignments.is_empty() {
        return Err(ApiError::validation("no fields to update"));
    }

    let mut q = sql("UPDATE recommendations SET ");
    q.push_sql(assignments)
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" RETURNING ")
        .push(COLUMNS);

    let rows = state.db.query(q.render()).await?;
    Ok(Json(single(rows)?))
}

#[derive(Debug, Deserialize)]
struct ReorderRequest {
    ids: Option<Vec<i64>>,
}

/// Persist a drag-and-drop ordering: each listed id gets its index as the
/// new position. One statement per row; the list UI sends the full order.
async fn reorder_recommendations(
    State(state): State<AppState>,
    Json(req): Json<ReorderRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let ids = req.ids.unwrap_or_default();
    if ids.is_empty() {
        return Err(ApiError::validation("ids is required"));
    }

    for (position, id) in ids.iter().enumerate() {
        let mut q = sql("UPDATE recommendations SET position = ");
        q.push_bind(position as i64)
            .push(" WHERE id = ")
            .push_bind(*id);
        state.db.query(q.render()).await?;
    }

    Ok(Json(serde_json::json!({ "updated": ids.len() })))
}

async fn delete_recommendation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let mut q = sql("DELETE FROM recommendations WHERE id = ");
    q.push_bind(id).push(" RETURNING id");

    let rows = state.db.query(q.render()).await?;
    Ok(Json(serde_json::json!({ "deleted": rows.len() })))
}
