//! Team member CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use leanbuild::{Sql, from_rows, sql};
use serde::Deserialize;

use super::{require_text, single};
use crate::error::{ApiError, ApiResult};
use crate::models::TeamMember;
use crate::state::AppState;

const COLUMNS: &str = "id, name, role, email, created_at";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/team", get(list_members).post(create_member))
        .route("/api/team/:id", put(update_member).delete(delete_member))
}

async fn list_members(State(state): State<AppState>) -> ApiResult<Json<Vec<TeamMember>>> {
    let q = sql(format!(
        "SELECT {COLUMNS} FROM team_members ORDER BY name"
    ));

    let rows = state.db.query(q.render()).await?;
    Ok(Json(from_rows(rows)?))
}

#[derive(Debug, Deserialize)]
struct CreateTeamMember {
    name: Option<String>,
    role: Option<String>,
    email: Option<String>,
}

async fn create_member(
    State(state): State<AppState>,
    Json(body): Json<CreateTeamMember>,
) -> ApiResult<(StatusCode, Json<TeamMember>)> {
    let name = require_text(body.name, "name")?;
    let role = require_text(body.role, "role")?;

    let mut q = sql("INSERT INTO team_members (name, role, email) VALUES (");
    q.push_bind(name)
        .push(", ")
        .push_bind(role)
        .push(", ")
        .push_bind(body.email)
        .push(") RETURNING ")
        .push(COLUMNS);

    let rows = state.db.query(q.render()).await?;
    Ok((StatusCode::CREATED, Json(single(rows)?)))
}

#[derive(Debug, Deserialize)]
struct UpdateTeamMember {
    name: Option<String>,
    role: Option<String>,
    email: Option<String>,
}

async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTeamMember>,
) -> ApiResult<Json<TeamMember>> {
    let mut assignments = Sql::empty();
    let fields = [
        ("name", body.name),
        ("role", body.role),
        ("email", body.email),
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

    let mut q = sql("UPDATE team_members SET ");
    q.push_sql(assignments)
        .push(" WHERE id = ")
        .push_bind(id)
        .push(" RETURNING ")
        .push(COLUMNS);

    let rows = state.db.query(q.render()).await?;
    Ok(Json(single(rows)?))
}

async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    let mut q = sql("DELETE FROM team_members WHERE id = ");
    q.push_bind(id).push(" RETURNING id");

    let rows = state.db.query(q.render()).await?;
    Ok(Json(serde_json::json!({ "deleted": rows.len() })))
}
