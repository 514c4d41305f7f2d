//! Execution capability boundary.
//!
//! The builder and session never talk to the wire themselves; they hand a
//! compiled SQL string to an [`Executor`]. Implementing the trait for a stub
//! is how the crate's own tests run without a database.

use crate::error::Result;
use tokio_postgres::Row;

/// The injected database execution capability.
///
/// One connection per session; no pooling, retry or timeout handling beyond
/// what the underlying driver provides. Execution runs to completion or
/// failure, with no cancellation.
pub trait Executor: Send + Sync {
    /// Run a statement and return all rows.
    fn query(&self, sql: &str) -> impl std::future::Future<Output = Result<Vec<Row>>> + Send;

    /// Run a statement and return the number of affected rows.
    fn execute(&self, sql: &str) -> impl std::future::Future<Output = Result<u64>> + Send;
}

impl Executor for tokio_postgres::Client {
    async fn query(&self, sql: &str) -> Result<Vec<Row>> {
        Ok(tokio_postgres::Client::query(self, sql, &[]).await?)
    }

    async fn execute(&self, sql: &str) -> Result<u64> {
        Ok(tokio_postgres::Client::execute(self, sql, &[]).await?)
    }
}
