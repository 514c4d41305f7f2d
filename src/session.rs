//! Query session: builder + execution + statistics.
//!
//! A [`Session`] owns one execution capability (usually a
//! `tokio_postgres::Client`), one [`StatementBuilder`] and one
//! [`StatsLedger`]. It is a single-connection, single-caller object: there
//! is no internal locking, and reusing a session across tasks requires
//! external mutual exclusion. Once a statement is submitted it runs to
//! completion or failure; no cancellation or timeout is applied.

use crate::builder::{SortDirection, StatementBuilder};
use crate::client::Executor;
use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use crate::row::FromRow;
use crate::stats::{LedgerSummary, StatsLedger};
use std::time::Instant;
use tokio_postgres::Row;

/// A fluent query session over one database connection.
pub struct Session<C> {
    client: C,
    builder: StatementBuilder,
    ledger: StatsLedger,
    show_sql_on_error: bool,
}

impl Session<tokio_postgres::Client> {
    /// Connect to the database described by `config`.
    ///
    /// The single connection attempt happens here; failure is fatal and
    /// surfaces as [`Error::Connection`]. The driver's connection task is
    /// spawned onto the current runtime.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let (client, connection) = config
            .to_pg_config()
            .connect(tokio_postgres::NoTls)
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        tokio::spawn(async move {
            // The connection future resolves when the client is dropped; a
            // mid-session error surfaces on the next query instead.
            let _ = connection.await;
        });

        Ok(Self::new(client))
    }
}

impl<C: Executor> Session<C> {
    /// Create a session over an already-established execution capability.
    pub fn new(client: C) -> Self {
        Self {
            client,
            builder: StatementBuilder::new(),
            ledger: StatsLedger::new(),
            show_sql_on_error: true,
        }
    }

    /// Get a reference to the inner client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Whether failing SQL text is attached to query errors (default true).
    pub fn show_sql_on_error(&mut self, value: bool) -> &mut Self {
        self.show_sql_on_error = value;
        self
    }

    // ==================== Statement building ====================

    /// The owned statement builder.
    pub fn builder(&self) -> &StatementBuilder {
        &self.builder
    }

    /// Mutable access to the owned statement builder.
    pub fn builder_mut(&mut self) -> &mut StatementBuilder {
        &mut self.builder
    }

    /// Set the FROM table, optionally resetting table/LIMIT/OFFSET first.
    pub fn from(&mut self, table: &str, reset: bool) -> &mut Self {
        self.builder.from(table, reset);
        self
    }

    /// Set the projection from a raw string.
    pub fn fields(&mut self, fields: &str) -> &mut Self {
        self.builder.fields(fields);
        self
    }

    /// Set the projection from a column list.
    pub fn field_list(&mut self, fields: &[&str]) -> &mut Self {
        self.builder.field_list(fields);
        self
    }

    /// Append a pre-formatted WHERE condition.
    pub fn where_raw(&mut self, condition: &str) -> &mut Self {
        self.builder.where_raw(condition);
        self
    }

    /// Add INNER JOIN.
    pub fn inner_join(&mut self, table: &str, on: &str) -> &mut Self {
        self.builder.inner_join(table, on);
        self
    }

    /// Add LEFT JOIN.
    pub fn left_join(&mut self, table: &str, on: &str) -> &mut Self {
        self.builder.left_join(table, on);
        self
    }

    /// Add RIGHT JOIN.
    pub fn right_join(&mut self, table: &str, on: &str) -> &mut Self {
        self.builder.right_join(table, on);
        self
    }

    /// Set the GROUP BY clause.
    pub fn group_by(&mut self, expr: &str) -> &mut Self {
        self.builder.group_by(expr);
        self
    }

    /// Append a pre-formatted HAVING condition.
    pub fn having_raw(&mut self, condition: &str) -> &mut Self {
        self.builder.having_raw(condition);
        self
    }

    /// Append `field ASC` to the ORDER BY fragment.
    pub fn order_by(&mut self, field: &str) -> &mut Self {
        self.builder.order_by(field);
        self
    }

    /// Append `field DESC` to the ORDER BY fragment.
    pub fn order_by_desc(&mut self, field: &str) -> &mut Self {
        self.builder.order_by_desc(field);
        self
    }

    /// Append several ORDER BY fields with one direction.
    pub fn order_fields(&mut self, fields: &[&str], direction: SortDirection) -> &mut Self {
        self.builder.order_fields(fields, direction);
        self
    }

    /// Set LIMIT, and optionally OFFSET.
    pub fn limit(
        &mut self,
        limit: impl Into<Option<i64>>,
        offset: impl Into<Option<i64>>,
    ) -> &mut Self {
        self.builder.limit(limit, offset);
        self
    }

    /// Set OFFSET, and optionally LIMIT.
    pub fn offset(
        &mut self,
        offset: impl Into<Option<i64>>,
        limit: impl Into<Option<i64>>,
    ) -> &mut Self {
        self.builder.offset(offset, limit);
        self
    }

    /// Set or clear the DISTINCT token.
    pub fn distinct(&mut self, value: bool) -> &mut Self {
        self.builder.distinct(value);
        self
    }

    /// Override the statement text directly, bypassing the clause fragments.
    pub fn raw_sql(&mut self, sql: &str) -> &mut Self {
        self.builder.raw_sql(sql);
        self
    }

    /// The last compiled (or raw-set) statement text.
    ///
    /// A failed execution leaves this intact so the statement can be
    /// inspected or retried.
    pub fn last_sql(&self) -> &str {
        self.builder.last_sql()
    }

    // ==================== Statistics ====================

    /// Turn query recording on.
    pub fn enable_stats(&mut self) -> &mut Self {
        self.ledger.enable();
        self
    }

    /// Turn query recording off.
    pub fn disable_stats(&mut self) -> &mut Self {
        self.ledger.disable();
        self
    }

    /// The per-query ledger.
    pub fn ledger(&self) -> &StatsLedger {
        &self.ledger
    }

    /// Aggregate statistics, recomputed from the ledger.
    pub fn stats_summary(&self) -> LedgerSummary {
        self.ledger.summary()
    }

    // ==================== Execution ====================

    /// Compile the accumulated statement and fetch all rows.
    pub async fn fetch(&mut self) -> Result<Vec<Row>> {
        self.fetch_with(None, None, None).await
    }

    /// Set fields/LIMIT/OFFSET, compile, and fetch all rows.
    ///
    /// `None` arguments leave the corresponding fragment unchanged.
    pub async fn fetch_with(
        &mut self,
        fields: Option<&str>,
        limit: impl Into<Option<i64>>,
        offset: impl Into<Option<i64>>,
    ) -> Result<Vec<Row>> {
        self.builder.select(fields, limit, offset)?;
        let sql = self.builder.last_sql().to_string();

        let start = Instant::now();
        let result = self.client.query(&sql).await;
        let elapsed = start.elapsed();

        let rows = result.map_err(|e| self.wrap(e, &sql))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %sql, rows = rows.len(), ?elapsed, "query");
        self.ledger.record(&sql, elapsed, rows.len() as u64, 0);
        Ok(rows)
    }

    /// Compile and fetch all rows mapped to `T`.
    pub async fn fetch_all<T: FromRow>(&mut self) -> Result<Vec<T>> {
        let rows = self.fetch().await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Compile and fetch the first row, if any, mapped to `T`.
    pub async fn fetch_opt<T: FromRow>(&mut self) -> Result<Option<T>> {
        let rows = self.fetch().await?;
        rows.first().map(T::from_row).transpose()
    }

    /// Compile and fetch the first row mapped to `T`.
    ///
    /// Returns [`Error::NotFound`] when the statement yields no rows.
    pub async fn fetch_one<T: FromRow>(&mut self) -> Result<T> {
        match self.fetch_opt().await? {
            Some(value) => Ok(value),
            None => Err(Error::not_found("expected 1 row, got 0")),
        }
    }

    /// Execute an arbitrary statement and return the affected-row count.
    ///
    /// The statement text becomes the session's last SQL.
    pub async fn run(&mut self, sql: &str) -> Result<u64> {
        self.builder.raw_sql(sql);
        let sql = self.builder.last_sql().to_string();

        let start = Instant::now();
        let result = self.client.execute(&sql).await;
        let elapsed = start.elapsed();

        let affected = result.map_err(|e| self.wrap(e, &sql))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %sql, affected, ?elapsed, "execute");
        self.ledger.record(&sql, elapsed, 0, affected);
        Ok(affected)
    }

    fn wrap(&self, err: Error, sql: &str) -> Error {
        if self.show_sql_on_error {
            err.with_sql(sql)
        } else {
            err
        }
    }
}
