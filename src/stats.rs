//! Per-query statistics ledger.
//!
//! The ledger is an append-only log of executed queries. Aggregates are not
//! stored; `summary()` folds over the whole log on every read. Query counts
//! per session are small, so the O(n) recompute is preferred over
//! incremental bookkeeping.

use std::time::Duration;

/// One executed query as recorded by the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRecord {
    /// The statement text that was executed
    pub sql: String,
    /// Wall-clock execution time
    pub elapsed: Duration,
    /// Rows returned (0 for mutation statements)
    pub rows: u64,
    /// Rows affected (0 for SELECT statements)
    pub changes: u64,
}

/// Aggregates derived from the ledger, recomputed on every read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSummary {
    /// Sum of all recorded execution times
    pub total_time: Duration,
    /// Number of recorded queries
    pub num_queries: u64,
    /// Sum of rows returned
    pub num_rows: u64,
    /// Sum of rows affected
    pub num_changes: u64,
    /// `total_time / max(num_queries, 1)`
    pub avg_query_time: Duration,
}

/// Append-only, togglable log of executed queries.
///
/// Recording starts disabled. While disabled, [`record`] is a no-op;
/// [`summary`] works in either state and returns zeros for an empty log.
/// Prior records are never mutated, only appended to.
///
/// [`record`]: StatsLedger::record
/// [`summary`]: StatsLedger::summary
#[derive(Debug, Clone, Default)]
pub struct StatsLedger {
    enabled: bool,
    queries: Vec<QueryRecord>,
}

impl StatsLedger {
    /// Create a disabled, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn recording on.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Turn recording off. Already-recorded queries are kept.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Whether recording is currently on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append one query record. No-op while disabled.
    pub fn record(&mut self, sql: &str, elapsed: Duration, rows: u64, changes: u64) {
        if !self.enabled {
            return;
        }
        self.queries.push(QueryRecord {
            sql: sql.to_string(),
            elapsed,
            rows,
            changes,
        });
    }

    /// The recorded queries, in execution order.
    pub fn queries(&self) -> &[QueryRecord] {
        &self.queries
    }

    /// Fold the log into aggregate statistics.
    pub fn summary(&self) -> LedgerSummary {
        let mut summary = LedgerSummary::default();
        for record in &self.queries {
            summary.total_time += record.elapsed;
            summary.num_queries += 1;
            summary.num_rows += record.rows;
            summary.num_changes += record.changes;
        }
        summary.avg_query_time = summary.total_time / summary.num_queries.max(1) as u32;
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_folds_records() {
        let mut ledger = StatsLedger::new();
        ledger.enable();
        ledger.record("SELECT * FROM a", Duration::from_secs_f64(0.1), 5, 0);
        ledger.record("SELECT * FROM b", Duration::from_secs_f64(0.3), 2, 0);

        let summary = ledger.summary();
        assert_eq!(summary.total_time, Duration::from_secs_f64(0.4));
        assert_eq!(summary.num_queries, 2);
        assert_eq!(summary.num_rows, 7);
        assert_eq!(summary.num_changes, 0);
        assert_eq!(summary.avg_query_time, Duration::from_secs_f64(0.2));
    }

    #[test]
    fn empty_ledger_has_zero_average() {
        let ledger = StatsLedger::new();
        let summary = ledger.summary();
        assert_eq!(summary.num_queries, 0);
        assert_eq!(summary.avg_query_time, Duration::ZERO);
    }

    #[test]
    fn disabled_ledger_ignores_records() {
        let mut ledger = StatsLedger::new();
        ledger.record("SELECT 1", Duration::from_millis(1), 1, 0);
        assert_eq!(ledger.summary().num_queries, 0);

        ledger.enable();
        ledger.record("SELECT 1", Duration::from_millis(1), 1, 0);
        ledger.disable();
        ledger.record("SELECT 2", Duration::from_millis(1), 1, 0);

        // Disabling keeps prior records but stops new ones.
        assert_eq!(ledger.summary().num_queries, 1);
        assert_eq!(ledger.queries()[0].sql, "SELECT 1");
    }

    #[test]
    fn changes_and_rows_accumulate_separately() {
        let mut ledger = StatsLedger::new();
        ledger.enable();
        ledger.record("SELECT * FROM a", Duration::from_millis(2), 4, 0);
        ledger.record("UPDATE a SET x = 1", Duration::from_millis(2), 0, 3);

        let summary = ledger.summary();
        assert_eq!(summary.num_rows, 4);
        assert_eq!(summary.num_changes, 3);
    }
}
