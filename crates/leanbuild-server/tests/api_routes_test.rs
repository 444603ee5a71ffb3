//! Route tests against an in-memory query executor.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use leanbuild::{DbError, DbResult, Fragment, QueryExecutor, Row, SqlValue};
use leanbuild_server::routes;
use leanbuild_server::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Records every fragment it receives and replays canned responses in order.
/// With no canned response queued, answers with an empty row set.
#[derive(Default)]
struct FakeDb {
    responses: Mutex<VecDeque<DbResult<Vec<Row>>>>,
    queries: Mutex<Vec<Fragment>>,
}

impl FakeDb {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn respond_with(&self, rows: Value) {
        self.responses
            .lock()
            .expect("lock")
            .push_back(Ok(rows_from(rows)));
    }

    fn fail_with(&self, err: DbError) {
        self.responses.lock().expect("lock").push_back(Err(err));
    }

    fn recorded(&self) -> Vec<Fragment> {
        self.queries.lock().expect("lock").clone()
    }
}

#[async_trait]
impl QueryExecutor for FakeDb {
    async fn query(&self, fragment: Fragment) -> DbResult<Vec<Row>> {
        self.queries.lock().expect("lock").push(fragment);
        self.responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

fn rows_from(value: Value) -> Vec<Row> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => map,
                other => panic!("expected object row, got {other}"),
            })
            .collect(),
        other => panic!("expected array of rows, got {other}"),
    }
}

fn app(db: &Arc<FakeDb>) -> Router {
    let db: Arc<dyn QueryExecutor> = db.clone();
    routes::router(AppState { db })
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("request executes");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

fn waste_row() -> Value {
    json!([{
        "id": 1,
        "project_id": 7,
        "category": "motion",
        "description": "Crew walks to the far laydown yard for fasteners",
        "cost_impact": 1200.5,
        "status": "open",
        "created_at": "2025-03-01T12:00:00Z"
    }])
}

#[tokio::test]
async fn health_answers_without_touching_db() {
    let db = FakeDb::new();
    let (status, body) = send(app(&db), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
    assert!(db.recorded().is_empty());
}

#[tokio::test]
async fn list_waste_composes_filters_as_placeholders() {
    let db = FakeDb::new();
    let (status, body) = send(app(&db), get("/api/waste?project_id=7&category=defects")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let queries = db.recorded();
    assert_eq!(queries.len(), 1);
    let fragment = &queries[0];
    assert!(
        fragment
            .text()
            .contains("WHERE 1=1 AND project_id = $1 AND category = $2"),
        "unexpected SQL: {}",
        fragment.text()
    );
    assert_eq!(
        fragment.params(),
        &[SqlValue::Int(7), SqlValue::Text("defects".to_string())]
    );
    assert!(!fragment.text().contains("defects"));
}

#[tokio::test]
async fn list_waste_without_filters_has_no_params() {
    let db = FakeDb::new();
    let (status, _) = send(app(&db), get("/api/waste")).await;

    assert_eq!(status, StatusCode::OK);
    let queries = db.recorded();
    assert!(queries[0].params().is_empty());
    assert!(queries[0].text().ends_with("ORDER BY created_at DESC"));
}

#[tokio::test]
async fn create_waste_requires_description() {
    let db = FakeDb::new();
    let (status, body) = send(
        app(&db),
        json_request(
            "POST",
            "/api/waste",
            json!({"project_id": 1, "category": "motion"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("description is required"));
    assert!(db.recorded().is_empty());
}

#[tokio::test]
async fn create_waste_rejects_blank_category() {
    let db = FakeDb::new();
    let (status, body) = send(
        app(&db),
        json_request(
            "POST",
            "/api/waste",
            json!({"project_id": 1, "category": "   ", "description": "x"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("category is required"));
}

#[tokio::test]
async fn create_waste_returns_created_row() {
    let db = FakeDb::new();
    db.respond_with(waste_row());

    let (status, body) = send(
        app(&db),
        json_request(
            "POST",
            "/api/waste",
            json!({
                "project_id": 7,
                "category": "motion",
                "description": "Crew walks to the far laydown yard for fasteners",
                "cost_impact": 1200.5
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["category"], json!("motion"));

    let queries = db.recorded();
    let fragment = &queries[0];
    assert!(fragment.text().starts_with("INSERT INTO waste_items"));
    // Every user value travels as a parameter, never in the text.
    assert!(!fragment.text().contains("motion"));
    assert!(!fragment.text().contains("laydown"));
    assert_eq!(fragment.params().len(), 4);
}

#[tokio::test]
async fn update_waste_with_no_fields_is_rejected() {
    let db = FakeDb::new();
    let (status, body) = send(app(&db), json_request("PUT", "/api/waste/3", json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("no fields to update"));
}

#[tokio::test]
async fn update_waste_builds_dynamic_set_clause() {
    let db = FakeDb::new();
    db.respond_with(waste_row());

    let (status, _) = send(
        app(&db),
        json_request(
            "PUT",
            "/api/waste/1",
            json!({"status": "resolved", "cost_impact": 0.0}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let queries = db.recorded();
    assert!(
        queries[0]
            .text()
            .starts_with("UPDATE waste_items SET status = $1, cost_impact = $2 WHERE id = $3"),
        "unexpected SQL: {}",
        queries[0].text()
    );
}

#[tokio::test]
async fn delete_waste_reports_count() {
    let db = FakeDb::new();
    db.respond_with(json!([{"id": 3}]));

    let (status, body) = send(
        app(&db),
        Request::builder()
            .method("DELETE")
            .uri("/api/waste/3")
            .body(Body::empty())
            .expect("request builds"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"deleted": 1}));
}

#[tokio::test]
async fn reorder_rewrites_positions_in_order() {
    let db = FakeDb::new();
    let (status, body) = send(
        app(&db),
        json_request(
            "PUT",
            "/api/recommendations/reorder",
            json!({"ids": [5, 3, 9]}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"updated": 3}));

    let queries = db.recorded();
    assert_eq!(queries.len(), 3);
    assert_eq!(
        queries[0].text(),
        "UPDATE recommendations SET position = $1 WHERE id = $2"
    );
    assert_eq!(queries[0].params(), &[SqlValue::Int(0), SqlValue::Int(5)]);
    assert_eq!(queries[2].params(), &[SqlValue::Int(2), SqlValue::Int(9)]);
}

#[tokio::test]
async fn reorder_with_empty_ids_is_rejected() {
    let db = FakeDb::new();
    let (status, body) = send(
        app(&db),
        json_request("PUT", "/api/recommendations/reorder", json!({"ids": []})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("ids is required"));
    assert!(db.recorded().is_empty());
}

#[tokio::test]
async fn create_recommendation_appends_at_end_of_list() {
    let db = FakeDb::new();
    db.respond_with(json!([{
        "id": 11,
        "project_id": 7,
        "title": "Stage materials near the pour",
        "body": null,
        "impact": null,
        "effort": null,
        "status": "proposed",
        "position": 4,
        "created_at": "2025-03-02T09:30:00Z"
    }]));

    let (status, body) = send(
        app(&db),
        json_request(
            "POST",
            "/api/recommendations",
            json!({"project_id": 7, "title": "Stage materials near the pour"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["position"], json!(4));

    let queries = db.recorded();
    let fragment = &queries[0];
    assert!(
        fragment
            .text()
            .contains("(SELECT COALESCE(MAX(position) + 1, 0) FROM recommendations WHERE project_id = $6)"),
        "unexpected SQL: {}",
        fragment.text()
    );
    // project_id is bound twice: once for the insert, once for the subselect.
    assert_eq!(fragment.params()[0], SqlValue::Int(7));
    assert_eq!(fragment.params()[5], SqlValue::Int(7));
}

#[tokio::test]
async fn create_team_member_requires_role() {
    let db = FakeDb::new();
    let (status, body) = send(
        app(&db),
        json_request("POST", "/api/team", json!({"name": "Ada"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("role is required"));
}

#[tokio::test]
async fn list_kaizen_splices_status_filter() {
    let db = FakeDb::new();
    let (status, _) = send(app(&db), get("/api/kaizen?project_id=2&status=planned")).await;

    assert_eq!(status, StatusCode::OK);
    let queries = db.recorded();
    assert!(
        queries[0]
            .text()
            .contains("AND project_id = $1 AND status = $2"),
        "unexpected SQL: {}",
        queries[0].text()
    );
}

#[tokio::test]
async fn executor_failure_maps_to_generic_500() {
    let db = FakeDb::new();
    db.fail_with(DbError::Transport("connection refused".to_string()));

    let (status, body) = send(app(&db), get("/api/team")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "internal server error"}));
}
