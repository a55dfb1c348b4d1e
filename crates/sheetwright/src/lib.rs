//! # sheetwright
//!
//! A Rust library for writing XLSX spreadsheets.
//!
//! The workbook model lives in [`sheetwright_core`] and the file format in
//! [`sheetwright_xlsx`]. This crate re-exports both and adds handles that
//! serialize access to a single workbook:
//!
//! - [`SharedWorkbook`] - `Clone + Send + Sync`, guarded by a mutex
//! - `AsyncWorkbook` - owned by an actor task, with `async` methods
//!   (enabled by the default `async` feature)
//!
//! Both handles address worksheets by index, report failures with the
//! [`Error`] taxonomy and refuse further changes once the workbook has been
//! saved.
//!
//! ## Example
//!
//! ```rust
//! use sheetwright::prelude::*;
//!
//! let workbook = SharedWorkbook::new();
//! let data = workbook.add_worksheet_with_name("Data").unwrap();
//! let summary = workbook.add_worksheet_with_name("Summary").unwrap();
//! assert_eq!((data, summary), (0, 1));
//!
//! workbook.write_string(data, 0, 0, "Hello").unwrap();
//! workbook.write_number(data, 1, 0, 3.14159).unwrap();
//! workbook
//!     .write_date(data, 2, 0, CalendarDate::new(2024, 12, 25))
//!     .unwrap();
//! workbook.set_column_width(data, 0, 20.0).unwrap();
//!
//! let bytes = workbook.save_to_buffer().unwrap();
//! assert_eq!(&bytes[..2], &[0x50, 0x4B]);
//! ```

pub mod error;
pub mod prelude;

#[cfg(feature = "async")]
mod actor;
mod session;
mod shared;

#[cfg(feature = "async")]
pub use actor::AsyncWorkbook;
pub use error::{Error, Result};
pub use shared::SharedWorkbook;

// Re-export core types
pub use sheetwright_core::{
    CalendarDate, CalendarDateTime, CellAddress, CellData, CellRange, CellValue, DateSystem,
    Workbook, WorkbookSettings, Worksheet, MAX_COLS, MAX_ROWS, MAX_SHEET_NAME_LEN, MAX_STRING_LEN,
};

// Re-export I/O types
pub use sheetwright_xlsx::{PackageOptions, XlsxError, XlsxWriter};

use std::path::Path;

/// Extension trait for Workbook to add file I/O
pub trait WorkbookExt {
    /// Save the workbook to a file, replacing it atomically
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Save the workbook into a new in-memory buffer
    fn save_to_buffer(&self) -> Result<Vec<u8>>;
}

impl WorkbookExt for Workbook {
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        Ok(XlsxWriter::write_file(self, path)?)
    }

    fn save_to_buffer(&self) -> Result<Vec<u8>> {
        Ok(XlsxWriter::write_to_buffer(self)?)
    }
}
