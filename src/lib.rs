//! # pgfluent
//!
//! A fluent SQL statement builder and thin execution layer for PostgreSQL.
//!
//! ## Features
//!
//! - **Incremental statements**: accumulate SELECT clauses across chained
//!   calls; compilation joins them in a fixed clause order
//! - **Thin execution**: compiled SQL goes straight to the driver through
//!   the [`Executor`] capability; no planning, pooling or transactions
//! - **Typed mapping**: rows map to structs via the [`FromRow`] trait,
//!   selected by a type parameter on the fetch call
//! - **Query ledger**: an optional append-only log of executed statements
//!   with lazily folded aggregate statistics
//!
//! ## Example
//!
//! ```ignore
//! use pgfluent::{ConnectionConfig, Session};
//!
//! let config = ConnectionConfig::new()
//!     .host("localhost")
//!     .database("app")
//!     .username("svc")
//!     .password("secret");
//!
//! let mut session = Session::connect(&config).await?;
//! session.enable_stats();
//!
//! let names: Vec<(String,)> = session
//!     .from("users", true)
//!     .fields("name")
//!     .where_raw("status = 'active'")
//!     .order_by("name")
//!     .limit(10, None)
//!     .fetch_all()
//!     .await?;
//!
//! println!("{:?}", session.stats_summary());
//! ```
//!
//! A session holds one connection and one mutable builder; it is not meant
//! to be shared across tasks without external mutual exclusion.

pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod row;
pub mod session;
pub mod stats;

pub use builder::{SortDirection, StatementBuilder};
pub use client::Executor;
pub use config::ConnectionConfig;
pub use error::{Error, Result};
pub use row::FromRow;
pub use session::Session;
pub use stats::{LedgerSummary, QueryRecord, StatsLedger};
