//! Row mapping traits

use crate::error::{Error, Result};
use tokio_postgres::Row;
use tokio_postgres::types::FromSql;

/// Trait for converting a database row into a Rust value.
///
/// Implement this on result structs to use the typed fetch methods on
/// [`Session`](crate::Session):
///
/// ```ignore
/// struct User {
///     id: i64,
///     username: String,
/// }
///
/// impl FromRow for User {
///     fn from_row(row: &Row) -> pgfluent::Result<Self> {
///         Ok(Self {
///             id: row.try_get("id").map_err(|e| Error::decode("id", e.to_string()))?,
///             username: row.try_get("username").map_err(|e| Error::decode("username", e.to_string()))?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a row into `Self`.
    fn from_row(row: &Row) -> Result<Self>;
}

fn get_col<'a, T: FromSql<'a>>(row: &'a Row, idx: usize) -> Result<T> {
    row.try_get(idx)
        .map_err(|e| Error::decode(idx.to_string(), e.to_string()))
}

// Positional tuple impls for quick ad-hoc projections.
macro_rules! impl_from_row_tuple {
    ($($name:ident: $idx:tt),+) => {
        impl<$($name),+> FromRow for ($($name,)+)
        where
            $($name: for<'a> FromSql<'a>),+
        {
            fn from_row(row: &Row) -> Result<Self> {
                Ok(($(get_col::<$name>(row, $idx)?,)+))
            }
        }
    };
}

impl_from_row_tuple!(T0: 0);
impl_from_row_tuple!(T0: 0, T1: 1);
impl_from_row_tuple!(T0: 0, T1: 1, T2: 2);
impl_from_row_tuple!(T0: 0, T1: 1, T2: 2, T3: 3);
