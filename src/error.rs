//! Error types for the row store.

use thiserror::Error;

use crate::row::Field;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Every row slot of every page is taken.
    #[error("table full: {max} rows")]
    TableFull { max: usize },

    #[error("row {row} is out of bounds (max {max})")]
    RowOutOfBounds { row: usize, max: usize },

    #[error("{field} is {len} bytes, max is {max}")]
    FieldTooLong { field: Field, len: usize, max: usize },

    #[error("{field} contains a NUL byte")]
    EmbeddedNul { field: Field },

    #[error("{field} is not valid UTF-8")]
    InvalidUtf8 { field: Field },

    #[error("expected a {expected} byte row, got {actual}")]
    RowSize { expected: usize, actual: usize },
}
