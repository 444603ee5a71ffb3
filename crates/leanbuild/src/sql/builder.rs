use std::fmt::Write;

use super::fragment::Fragment;
use crate::value::SqlValue;

/// One piece of a statement under construction: literal SQL, or a marker
/// standing in for the next bound parameter.
#[derive(Debug, Clone)]
enum SqlPart {
    Raw(String),
    Param,
}

/// A parameter-safe dynamic SQL builder.
///
/// `Sql` stores SQL pieces and parameters separately; every bound value is
/// represented by a marker, never concatenated into the text. Placeholder
/// numbers do not exist until [`Sql::render`], so builders can be spliced
/// into each other freely without tracking indices.
#[must_use]
pub struct Sql {
    parts: Vec<SqlPart>,
    params: Vec<SqlValue>,
}

impl Sql {
    /// Create a new builder with an initial SQL piece.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            parts: vec![SqlPart::Raw(initial_sql.into())],
            params: Vec::new(),
        }
    }

    /// Create an empty builder.
    ///
    /// The empty builder is the identity for [`Sql::push_sql`]: splicing it
    /// leaves the surrounding text and parameters unchanged, which lets
    /// callers drop a conditional clause without branching the surrounding
    /// statement.
    pub fn empty() -> Self {
        Self {
            parts: Vec::new(),
            params: Vec::new(),
        }
    }

    /// True if nothing has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty() && self.params.is_empty()
    }

    /// Append raw SQL (no parameters).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }

        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(SqlPart::Raw(sql.to_string())),
        }
        self
    }

    /// Append a parameter placeholder and bind its value.
    pub fn push_bind(&mut self, value: impl Into<SqlValue>) -> &mut Self {
        self.parts.push(SqlPart::Param);
        self.params.push(value.into());
        self
    }

    /// Append a comma-separated list of placeholders, one per element.
    ///
    /// If `values` is empty, this appends `NULL` (so `IN (NULL)` stays valid
    /// SQL but matches no row). To bind a whole array as a single parameter
    /// for `ANY($n)`, pass a `Vec` to [`Sql::push_bind`] instead.
    pub fn push_bind_list(&mut self, values: impl IntoIterator<Item = impl Into<SqlValue>>) -> &mut Self {
        let mut iter = values.into_iter();
        let Some(first) = iter.next() else {
            return self.push("NULL");
        };

        self.push_bind(first);
        for v in iter {
            self.push(", ");
            self.push_bind(v);
        }
        self
    }

    /// Append another `Sql` builder, consuming it.
    ///
    /// The spliced builder's parts and parameters are appended in order, so
    /// the relative order of both parameter lists is preserved. Its
    /// placeholders are renumbered when the combined statement is rendered.
    pub fn push_sql(&mut self, mut other: Sql) -> &mut Self {
        self.parts.append(&mut other.parts);
        self.params.append(&mut other.params);
        self
    }

    /// Bind a parameter and return `self` (consuming version of [`Sql::push_bind`]).
    ///
    /// Useful when a sub-statement is built in one expression:
    ///
    /// ```ignore
    /// let active = sql("status = ").bind("active");
    /// ```
    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.push_bind(value);
        self
    }

    /// Render the statement: assign `$1, $2, ...` to parameter markers in
    /// order and freeze the result into an immutable [`Fragment`].
    pub fn render(&self) -> Fragment {
        let mut cap = 0;
        for part in &self.parts {
            match part {
                SqlPart::Raw(s) => cap += s.len(),
                SqlPart::Param => cap += 4,
            }
        }

        let mut text = String::with_capacity(cap);
        let mut idx = 0usize;
        for part in &self.parts {
            match part {
                SqlPart::Raw(s) => text.push_str(s),
                SqlPart::Param => {
                    idx += 1;
                    let _ = write!(text, "${idx}");
                }
            }
        }
        Fragment::new(text, self.params.clone())
    }
}
