//! Error types for the sheetwright handles

use thiserror::Error;

use sheetwright_core::Error as CoreError;
use sheetwright_xlsx::XlsxError;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`SharedWorkbook`](crate::SharedWorkbook) and
/// `AsyncWorkbook`
#[derive(Debug, Error)]
pub enum Error {
    /// Row or column outside the worksheet grid
    #[error("Row/column limit exceeded: {0}")]
    InvalidIndex(String),

    /// Worksheet name violates the naming rules
    #[error("Invalid worksheet name: {0}")]
    InvalidName(String),

    /// Worksheet name already used in this workbook
    #[error("Worksheet name already exists: {0}")]
    DuplicateName(String),

    /// Calendar fields that do not form a supported date or time
    #[error("Date error: {0}")]
    InvalidDate(String),

    /// Any other rejected argument (non-finite number, long string, bad width)
    #[error("Invalid parameter: {0}")]
    InvalidArgument(String),

    /// No worksheet at the given index
    #[error("Worksheet not found at index: {0}")]
    SheetNotFound(u32),

    /// Destination could not be written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The model could not be serialized; indicates a bug
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The workbook was saved and no longer accepts changes
    #[error("Workbook has already been saved")]
    AlreadySaved,

    /// A previous operation panicked while holding the workbook
    #[error("Workbook lock poisoned by a panicked operation")]
    Poisoned,

    /// The task owning the workbook is gone
    #[error("Workbook actor has stopped")]
    ActorStopped,

    /// An async workbook was created outside a Tokio runtime
    #[error("No Tokio runtime available to run the workbook actor")]
    NoRuntime,
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::RowOutOfBounds(..) | CoreError::ColumnOutOfBounds(..) => {
                Error::InvalidIndex(err.to_string())
            }
            CoreError::SheetOutOfBounds(index, _) => {
                Error::SheetNotFound(u32::try_from(index).unwrap_or(u32::MAX))
            }
            CoreError::InvalidSheetName(msg) => Error::InvalidName(msg),
            CoreError::DuplicateSheetName(name) => Error::DuplicateName(name),
            CoreError::InvalidDate(msg) => Error::InvalidDate(msg),
            CoreError::InvalidAddress(_)
            | CoreError::InvalidDimension(_)
            | CoreError::InvalidNumber(_)
            | CoreError::StringTooLong(_)
            | CoreError::InvalidFormat(_) => Error::InvalidArgument(err.to_string()),
        }
    }
}

impl From<XlsxError> for Error {
    fn from(err: XlsxError) -> Self {
        match err {
            XlsxError::Io(e) => Error::Io(e),
            XlsxError::Zip(zip::result::ZipError::Io(e)) => Error::Io(e),
            XlsxError::Zip(e) => Error::Serialization(e.to_string()),
            XlsxError::Serialization(msg) => Error::Serialization(msg),
            XlsxError::Core(e) => Error::from(e),
        }
    }
}
