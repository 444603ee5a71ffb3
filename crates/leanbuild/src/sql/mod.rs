//! Dynamic SQL composition.
//!
//! `Sql` keeps SQL text and parameters separate while a statement is being
//! assembled, then [`Sql::render`] produces an immutable [`Fragment`] with
//! `$1, $2, ...` placeholders and the ordered parameter list. Because
//! placeholder numbers are assigned at render time, spliced sub-statements
//! are renumbered automatically and `$k` always refers to the `k`-th
//! parameter.
//!
//! # Example
//!
//! ```ignore
//! use leanbuild::sql;
//!
//! let mut q = sql("SELECT id, category FROM waste_items WHERE 1=1");
//! if let Some(project_id) = project_id {
//!     q.push(" AND project_id = ").push_bind(project_id);
//! }
//! q.push(" ORDER BY created_at DESC");
//!
//! let rows = db.query(q.render()).await?;
//! ```

mod builder;
mod fragment;


pub use builder::Sql;
pub use fragment::Fragment;

/// Start building a SQL statement.
pub fn sql(initial_sql: impl Into<String>) -> Sql {
    Sql::new(initial_sql)
}
