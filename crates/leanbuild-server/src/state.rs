use std::sync::Arc;

use leanbuild::QueryExecutor;

/// Shared handler state: the query-execution handle.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn QueryExecutor>,
}
