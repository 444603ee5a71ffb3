//! Query execution trait and row mapping.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::{DbError, DbResult};
use crate::sql::Fragment;

/// A decoded result row: column name to JSON value.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// The seam between statement composition and transport.
///
/// Route handlers depend on this trait (usually as `Arc<dyn QueryExecutor>`)
/// rather than on the concrete proxy client, so tests can substitute an
/// in-memory implementation. Each call transmits exactly one [`Fragment`];
/// there are no implicit retries.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute a statement and return all result rows.
    async fn query(&self, fragment: Fragment) -> DbResult<Vec<Row>>;
}

/// Map a row into `T` via serde deserialization.
pub fn from_row<T: DeserializeOwned>(row: Row) -> DbResult<T> {
    serde_json::from_value(serde_json::Value::Object(row))
        .map_err(|e| DbError::decode(e.to_string()))
}

/// Map every row into `T`, failing on the first decode error.
pub fn from_rows<T: DeserializeOwned>(rows: Vec<Row>) -> DbResult<Vec<T>> {
    rows.into_iter().map(from_row).collect()
}
