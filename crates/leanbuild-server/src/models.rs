//! Dashboard row models.
//!
//! Rows arrive from the proxy as JSON objects and are mapped with serde
//! (`leanbuild::from_row`), so every field name matches its column name.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One observed waste occurrence on a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteItem {
    pub id: i64,
    pub project_id: i64,
    /// One of the lean waste categories (transport, inventory, motion,
    /// waiting, overproduction, overprocessing, defects, unused talent).
    pub category: String,
    pub description: String,
    /// Estimated cost of the waste, if quantified.
    pub cost_impact: Option<f64>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// An improvement recommendation, ordered by `position` within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub body: Option<String>,
    pub impact: Option<String>,
    pub effort: Option<String>,
    pub status: String,
    /// Zero-based rank in the drag-and-drop list.
    pub position: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A scheduled Kaizen (continuous improvement) event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KaizenEvent {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
