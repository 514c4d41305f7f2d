//! Error types for pgfluent

use thiserror::Error;

/// Result type alias for pgfluent operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for statement building and execution
#[derive(Debug, Error)]
pub enum Error {
    /// A SELECT statement was compiled with no FROM table configured
    #[error("no table set: call `from()` or `table()` before compiling a SELECT")]
    TableUnset,

    /// Database connection error (raised once, at construction)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error, optionally carrying the failing SQL text
    #[error("Query error: {message}{}", sql_suffix(.sql))]
    Query {
        message: String,
        sql: Option<String>,
    },

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Row decode/mapping error
    #[error("Decode error on column {column}: {message}")]
    Decode { column: String, message: String },
}

impl Error {
    /// Create a query error without attached SQL
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
            sql: None,
        }
    }

    /// Create a decode error for a specific column index or name
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Check if this is a missing-table error
    pub fn is_table_unset(&self) -> bool {
        matches!(self, Self::TableUnset)
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// The SQL text attached to a query error, if any
    pub fn sql(&self) -> Option<&str> {
        match self {
            Self::Query { sql, .. } => sql.as_deref(),
            _ => None,
        }
    }

    /// Attach the failing SQL text to a query error.
    ///
    /// Non-query errors are returned unchanged.
    pub(crate) fn with_sql(self, sql: &str) -> Self {
        match self {
            Self::Query { message, .. } => Self::Query {
                message,
                sql: Some(sql.to_string()),
            },
            other => other,
        }
    }
}

fn sql_suffix(sql: &Option<String>) -> String {
    match sql {
        Some(sql) => format!("\nSQL: {sql}"),
        None => String::new(),
    }
}

impl From<tokio_postgres::Error> for Error {
    fn from(err: tokio_postgres::Error) -> Self {
        Self::query(err.to_string())
    }
}
