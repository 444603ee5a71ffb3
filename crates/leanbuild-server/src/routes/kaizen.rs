//! Kaizen event CRUD.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use leanbuild::{Sql, from_rows, sql};
use serde::Deserialize;

use super::{require, require_text, single};
use crate::error::{ApiError, ApiResult};
use crate::models::KaizenEvent;
use crate::state::AppState;

const COLUMNS: &str =
    "id, project_id, title, description, status, starts_on, ends_on, created_at";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/kaizen", get(list_events).post(create_event))
        .route("/api/kaizen/:id", put(update_event).delete(delete_event))
}

#[derive(Debug, Deserialize)]
struct KaizenFilter {
    project_id: Option<i64>,
    status: Option<String>,
}

async fn list_events(
    State(state): State<AppState>,
    Query(filter): Query<KaizenFilter>,
) -> ApiResult<Json<Vec<KaizenEvent>>> {
    let mut conditions = Sql::empty();
    if let Some(project_id) = filter.project_id {
        conditions.push(" AND project_id = ").push_bind(project_id);
    }
    if let Some(status) = filter.status {
        conditions.push(" AND status = ").push_bind(status);
    }

    let mut q = sql(format!("SELECT {COLUMNS} FROM kaizen_events WHERE 1=1"));
    q.push_sql(conditions).push(" ORDER BY created_at DESC");

    let rows = state.db.query(q.render()).await?;
    Ok(Json(from_rows(rows)?))
}

#[derive(Debug, Deserialize)]
struct CreateKaizenEvent {
    project_id: Option<i64>,
    title: Option<String>,
    description: Option<String>,
    starts_on: Option<NaiveDate>,
    ends_on: Option<NaiveDate>,
}

async fn create_event(
    State(state): State<AppState>,
    Json(body): Json<CreateKaizenEvent>,
) -> ApiResult<(StatusCode, Json<KaizenEvent>)> {
    let project_id = require(body.project_id, "project_id")?;
    let title = require_text(body.title, "title")?;

    let mut q = sql(
        "INSERT INTO kaizen_events (project_id, title, description, status, starts_on, ends_on) VALUES (",
    );
    q.push_bind(project_id)
        .push(", ")
        .push_bind(title)
        .push(", ")
        .push_bind(body.description)
        .push(", 'planned', ")
        .push_bind(body.starts_on)
        .push(", ")
        .push_bind(body.ends_on)
        .push(") RETURNING ")
        .push(COLUMNS);

    let rows = state.db.query(q.render()).await?;
    Ok((StatusCode::CREATED, Json(single(rows)?)))
}

#[derive(Debug, Deserialize)]
struct UpdateKaizenEvent {
    description: Option<String>,
    status: Option<String>,
    starts_on: Option<NaiveDate>,
    ends_on: Option<NaiveDate>,
}

async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateKaizenEvent>,
) -> ApiResult<Json<KaizenEvent>> {
    let mut assignments = Sql::empty();
    if let Some(description) = body.description {
        assignments.push("description = ").push_bind(description);
    }
    if let Some(status) = body.status {
        if !assignments.is_empty() {
            assignments.push(", ");
        }
        assignments.push("status = ").push_bind(status);
    }
    if let Some(starts_on) = body.starts_on {
        if !assignments.is_empty() {
            assignments.push(", ");
        }
        assignments.push("starts_on = ").push_bind(starts_on);
    }
    if let Some(ends_on) = body.ends_on {
        if !assignments.is_empty() {
            assignments.push(", ");
        }
        assignments.push("ends_on = ").push_bind(ends_on);
    }
    if assignments.is_empty() {
        return Err(ApiError::validation("no fields to update"));
    }

    let mut q = sql("UPDATE kaizen_events SET ");
    q.push_sql(assignments)
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" RETURNING ")
        .push(COLUMNS);

    let rows = state.db.query(q.render()).await?;
    Ok(Json(single(rows)?))
}

async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let mut q = sql("DELETE FROM kaizen_events WHERE id = ");
    q.push_bind(id).push(" RETURNING id");

    let rows = state.db.query(q.render()).await?;
    Ok(Json(serde_json::json!({ "deleted": rows.len() })))
}
