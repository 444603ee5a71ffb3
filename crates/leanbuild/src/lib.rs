//! # leanbuild
//!
//! Data-access layer for the LeanBuild construction-lean dashboard.
//!
//! ## Features
//!
//! - **SQL explicit**: statements are composed with the [`Sql`] builder,
//!   which keeps text and parameters separate and renders `$1, $2, ...`
//!   placeholders only at the end
//! - **Injection-safe by construction**: bound values never touch the SQL
//!   text; they travel as an ordered parameter list
//! - **Composable**: builders splice into each other and placeholders are
//!   renumbered automatically; [`Sql::empty`] is the identity for optional
//!   clauses
//! - **Transport-agnostic callers**: handlers depend on [`QueryExecutor`],
//!   not on the HTTP proxy client
//!
//! ## Example
//!
//! ```ignore
//! use leanbuild::{sql, Sql};
//!
//! let mut q = sql("SELECT id, title FROM recommendations WHERE 1=1");
//! if let Some(project_id) = project_id {
//!     q.push(" AND project_id = ").push_bind(project_id);
//! }
//! q.push(" ORDER BY position");
//!
//! let rows = db.query(q.render()).await?;
//! ```

pub mod client;
pub mod error;
pub mod proxy;
pub mod sql;
pub mod value;

pub use client::{from_row, from_rows, QueryExecutor, Row};
pub use error::{DbError, DbResult};
pub use proxy::{ProxyClient, ProxyConfig, PROXY_SECRET_HEADER};
pub use sql::{sql, Fragment, Sql};
pub use value::SqlValue;
