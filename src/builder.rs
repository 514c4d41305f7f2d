//! Fluent SELECT statement builder.
//!
//! `StatementBuilder` accumulates pre-formatted clause fragments and joins
//! them, in a fixed clause order, into one SQL string on demand. Fragments
//! are stored verbatim; nothing is quoted or validated here.
//!
//! One builder is meant to be reused across several queries in a session.
//! `reset()` deliberately clears only the table, LIMIT and OFFSET fragments;
//! fields, joins, WHERE, GROUP BY, HAVING and ORDER BY persist until the
//! caller clears them with `reset_all()`.

use crate::error::{Error, Result};
use std::fmt;

/// Sort direction for ORDER BY fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order
    #[default]
    Asc,
    /// Descending order
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("ASC"),
            SortDirection::Desc => f.write_str("DESC"),
        }
    }
}

/// Incremental SELECT statement builder.
///
/// Clause fragments are assembled in a fixed order:
/// `SELECT [DISTINCT] fields FROM table [JOIN..] [WHERE..] [GROUP BY..]
/// [HAVING..] [ORDER BY..] [LIMIT] [OFFSET]`. Empty fragments are skipped.
#[derive(Debug, Clone)]
pub struct StatementBuilder {
    /// Current FROM target; empty means unset
    table: String,
    /// Projection list (default `*`)
    fields: String,
    /// JOIN clauses, pre-formatted
    joins: String,
    /// WHERE clause, pre-formatted
    wheres: String,
    /// GROUP BY clause
    groups: String,
    /// HAVING clause
    having: String,
    /// ORDER BY clause, grown by `order_by` calls
    order: String,
    /// DISTINCT token or empty
    distinct: String,
    /// LIMIT fragment
    limit: String,
    /// OFFSET fragment
    offset: String,
    /// Last compiled statement
    sql: String,
}

impl Default for StatementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementBuilder {
    /// Create an empty builder with the default `*` projection.
    pub fn new() -> Self {
        Self {
            table: String::new(),
            fields: "*".to_string(),
            joins: String::new(),
            wheres: String::new(),
            groups: String::new(),
            having: String::new(),
            order: String::new(),
            distinct: String::new(),
            limit: String::new(),
            offset: String::new(),
            sql: String::new(),
        }
    }

    /// Set the FROM table.
    pub fn table(&mut self, table: &str) -> &mut Self {
        self.table = table.to_string();
        self
    }

    /// Set the FROM table, optionally resetting table/LIMIT/OFFSET first.
    ///
    /// The reset is opt-in: `from("users", false)` leaves any previously
    /// set LIMIT/OFFSET in place.
    pub fn from(&mut self, table: &str, reset: bool) -> &mut Self {
        if reset {
            self.reset();
        }
        self.table = table.to_string();
        self
    }

    /// Clear the table, LIMIT and OFFSET fragments only.
    ///
    /// Fields, joins, WHERE, GROUP BY, HAVING and ORDER BY are kept. This
    /// narrow reset is the documented reuse contract; use [`reset_all`]
    /// for a clean slate.
    ///
    /// [`reset_all`]: StatementBuilder::reset_all
    pub fn reset(&mut self) {
        self.table.clear();
        self.limit.clear();
        self.offset.clear();
    }

    /// Clear every fragment, including the cached statement text, and
    /// restore the default `*` projection.
    pub fn reset_all(&mut self) {
        *self = Self::new();
    }

    /// Set the projection from a raw string, stored verbatim.
    pub fn fields(&mut self, fields: &str) -> &mut Self {
        self.fields = fields.to_string();
        self
    }

    /// Set the projection from a column list, comma-joined.
    pub fn field_list(&mut self, fields: &[&str]) -> &mut Self {
        self.fields = fields.join(",");
        self
    }

    /// Set LIMIT, and optionally OFFSET in the same call.
    ///
    /// `None` means leave the fragment unchanged, not clear it.
    pub fn limit(
        &mut self,
        limit: impl Into<Option<i64>>,
        offset: impl Into<Option<i64>>,
    ) -> &mut Self {
        if let Some(limit) = limit.into() {
            self.limit = format!("LIMIT {limit}");
        }
        if let Some(offset) = offset.into() {
            self.offset(offset, None);
        }
        self
    }

    /// Set OFFSET, and optionally LIMIT in the same call.
    ///
    /// `None` means leave the fragment unchanged, not clear it.
    pub fn offset(
        &mut self,
        offset: impl Into<Option<i64>>,
        limit: impl Into<Option<i64>>,
    ) -> &mut Self {
        if let Some(offset) = offset.into() {
            self.offset = format!("OFFSET {offset}");
        }
        if let Some(limit) = limit.into() {
            self.limit(limit, None);
        }
        self
    }

    /// Append `field ASC` to the ORDER BY fragment.
    pub fn order_by(&mut self, field: &str) -> &mut Self {
        self.push_order(field, SortDirection::Asc);
        self
    }

    /// Append `field DESC` to the ORDER BY fragment.
    pub fn order_by_desc(&mut self, field: &str) -> &mut Self {
        self.push_order(field, SortDirection::Desc);
        self
    }

    /// Append several fields to the ORDER BY fragment, all with the same
    /// direction.
    pub fn order_fields(&mut self, fields: &[&str], direction: SortDirection) -> &mut Self {
        for field in fields {
            self.push_order(field, direction);
        }
        self
    }

    fn push_order(&mut self, field: &str, direction: SortDirection) {
        if self.order.is_empty() {
            self.order = format!("ORDER BY {field} {direction}");
        } else {
            self.order.push_str(&format!(", {field} {direction}"));
        }
    }

    /// Add INNER JOIN.
    pub fn inner_join(&mut self, table: &str, on: &str) -> &mut Self {
        self.push_join(&format!("INNER JOIN {table} ON {on}"));
        self
    }

    /// Add LEFT JOIN.
    pub fn left_join(&mut self, table: &str, on: &str) -> &mut Self {
        self.push_join(&format!("LEFT JOIN {table} ON {on}"));
        self
    }

    /// Add RIGHT JOIN.
    pub fn right_join(&mut self, table: &str, on: &str) -> &mut Self {
        self.push_join(&format!("RIGHT JOIN {table} ON {on}"));
        self
    }

    fn push_join(&mut self, clause: &str) {
        if !self.joins.is_empty() {
            self.joins.push(' ');
        }
        self.joins.push_str(clause);
    }

    /// Append a pre-formatted WHERE condition.
    ///
    /// The first call writes `WHERE cond`; later calls append `AND cond`.
    pub fn where_raw(&mut self, condition: &str) -> &mut Self {
        if self.wheres.is_empty() {
            self.wheres = format!("WHERE {condition}");
        } else {
            self.wheres.push_str(&format!(" AND {condition}"));
        }
        self
    }

    /// Set the GROUP BY clause.
    pub fn group_by(&mut self, expr: &str) -> &mut Self {
        self.groups = format!("GROUP BY {expr}");
        self
    }

    /// Append a pre-formatted HAVING condition.
    pub fn having_raw(&mut self, condition: &str) -> &mut Self {
        if self.having.is_empty() {
            self.having = format!("HAVING {condition}");
        } else {
            self.having.push_str(&format!(" AND {condition}"));
        }
        self
    }

    /// Set or clear the DISTINCT token.
    pub fn distinct(&mut self, value: bool) -> &mut Self {
        self.distinct = if value { "DISTINCT".to_string() } else { String::new() };
        self
    }

    /// Assemble the SELECT statement from the current fragments.
    ///
    /// Pure with respect to the builder state: compiling twice without
    /// mutation yields byte-identical output. Fails with
    /// [`Error::TableUnset`] when no FROM table is configured.
    pub fn compile(&self) -> Result<String> {
        if self.table.is_empty() {
            return Err(Error::TableUnset);
        }

        let mut sql = String::from("SELECT");
        for fragment in [
            self.distinct.as_str(),
            self.fields.as_str(),
            "FROM",
            self.table.as_str(),
            self.joins.as_str(),
            self.wheres.as_str(),
            self.groups.as_str(),
            self.having.as_str(),
            self.order.as_str(),
            self.limit.as_str(),
            self.offset.as_str(),
        ] {
            if !fragment.is_empty() {
                sql.push(' ');
                sql.push_str(fragment);
            }
        }
        Ok(sql)
    }

    /// Compile the statement, optionally setting fields/LIMIT/OFFSET first,
    /// and cache it as the last compiled SQL.
    pub fn select(
        &mut self,
        fields: Option<&str>,
        limit: impl Into<Option<i64>>,
        offset: impl Into<Option<i64>>,
    ) -> Result<&mut Self> {
        if let Some(fields) = fields {
            self.fields = fields.to_string();
        }
        self.limit(limit, offset);
        self.sql = self.compile()?;
        Ok(self)
    }

    /// Override the statement text directly, bypassing the clause fragments.
    pub fn raw_sql(&mut self, sql: &str) -> &mut Self {
        self.sql = sql.trim().to_string();
        self
    }

    /// The last compiled (or raw-set) statement text.
    pub fn last_sql(&self) -> &str {
        &self.sql
    }

    /// The current FROM table, empty when unset.
    pub fn current_table(&self) -> &str {
        &self.table
    }

    /// The current projection fragment.
    pub fn current_fields(&self) -> &str {
        &self.fields
    }
}
