//! End-to-end tests for the public session surface, using a stub executor
//! so no database is needed.

use pgfluent::{Error, Executor, Result, Session, SortDirection, StatementBuilder, StatsLedger};
use std::time::Duration;
use tokio_postgres::Row;

struct EmptyExecutor;

impl Executor for EmptyExecutor {
    async fn query(&self, _sql: &str) -> Result<Vec<Row>> {
        Ok(Vec::new())
    }

    async fn execute(&self, _sql: &str) -> Result<u64> {
        Ok(1)
    }
}

#[tokio::test]
async fn builder_state_survives_narrow_reset_across_queries() {
    let mut session = Session::new(EmptyExecutor);

    session
        .from("users", false)
        .field_list(&["id", "name"])
        .where_raw("deleted_at IS NULL")
        .limit(25, None);
    session.fetch().await.unwrap();
    assert_eq!(
        session.last_sql(),
        "SELECT id,name FROM users WHERE deleted_at IS NULL LIMIT 25"
    );

    // `from` with the reset flag drops table/LIMIT/OFFSET but keeps the
    // projection and WHERE fragments for the next query.
    session.from("accounts", true);
    session.fetch().await.unwrap();
    assert_eq!(
        session.last_sql(),
        "SELECT id,name FROM accounts WHERE deleted_at IS NULL"
    );
}

#[tokio::test]
async fn full_clause_surface_composes_in_fixed_order() {
    let mut session = Session::new(EmptyExecutor);
    session
        .from("users u", false)
        .distinct(true)
        .fields("u.id, COUNT(o.id) AS orders")
        .left_join("orders o", "o.user_id = u.id")
        .where_raw("u.status = 'active'")
        .group_by("u.id")
        .having_raw("COUNT(o.id) > 2")
        .order_fields(&["orders", "u.id"], SortDirection::Desc)
        .offset(40, 20);
    session.fetch().await.unwrap();

    assert_eq!(
        session.last_sql(),
        "SELECT DISTINCT u.id, COUNT(o.id) AS orders FROM users u \
         LEFT JOIN orders o ON o.user_id = u.id \
         WHERE u.status = 'active' GROUP BY u.id HAVING COUNT(o.id) > 2 \
         ORDER BY orders DESC, u.id DESC LIMIT 20 OFFSET 40"
    );
}

#[tokio::test]
async fn ledger_aggregates_match_recorded_queries() {
    let mut session = Session::new(EmptyExecutor);
    session.enable_stats();
    session.from("users", false);
    session.fetch().await.unwrap();
    session.run("UPDATE users SET seen = true").await.unwrap();

    let summary = session.stats_summary();
    assert_eq!(summary.num_queries, 2);
    assert_eq!(summary.num_changes, 1);
    assert_eq!(summary.total_time, {
        let records = session.ledger().queries();
        records[0].elapsed + records[1].elapsed
    });
}

#[test]
fn ledger_average_uses_max_one_divisor() {
    let ledger = StatsLedger::new();
    assert_eq!(ledger.summary().avg_query_time, Duration::ZERO);

    let mut ledger = StatsLedger::new();
    ledger.enable();
    ledger.record("SELECT 1", Duration::from_secs_f64(0.1), 5, 0);
    ledger.record("SELECT 2", Duration::from_secs_f64(0.3), 2, 0);
    let summary = ledger.summary();
    assert_eq!(summary.total_time, Duration::from_secs_f64(0.4));
    assert_eq!(summary.avg_query_time, Duration::from_secs_f64(0.2));
    assert_eq!(summary.num_rows, 7);
}

#[test]
fn standalone_builder_is_usable_without_a_session() {
    let mut builder = StatementBuilder::new();
    let err = builder.compile().unwrap_err();
    assert!(matches!(err, Error::TableUnset));

    builder.table("events").order_by("at").order_by_desc("id");
    assert_eq!(
        builder.compile().unwrap(),
        "SELECT * FROM events ORDER BY at ASC, id DESC"
    );
}
