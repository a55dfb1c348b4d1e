//! Error types for sheetwright-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetwright-core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u16, u16),

    /// Sheet index out of bounds
    #[error("Sheet index {0} out of bounds (count: {1})")]
    SheetOutOfBounds(usize, usize),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Calendar fields that do not form a representable date or time
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Negative, NaN or infinite column width / row height
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// NaN or infinite cell number
    #[error("Number {0} cannot be stored in a cell")]
    InvalidNumber(f64),

    /// String longer than a cell can hold
    #[error("String of {0} characters exceeds the cell limit of {max}", max = crate::MAX_STRING_LEN)]
    StringTooLong(usize),

    /// Empty or otherwise unusable number format code
    #[error("Invalid number format: {0}")]
    InvalidFormat(String),
}

impl Error {
    /// True for errors caused by a row or column outside the grid
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Error::RowOutOfBounds(..) | Error::ColumnOutOfBounds(..))
    }
}
