//! # sheetwright-core
//!
//! Core data structures for the sheetwright spreadsheet writer.
//!
//! This crate provides the in-memory model that the XLSX writer serializes:
//! - [`CellValue`] - Typed cell content (strings, numbers, integers, booleans, dates)
//! - [`CellAddress`] and [`CellRange`] - A1-style addressing
//! - [`SharedStringTable`] - Workbook-wide string deduplication
//! - [`NumberFormatRegistry`] - Number format codes and their ids
//! - [`Workbook`], [`Worksheet`] - The document structures
//!
//! ## Example
//!
//! ```rust
//! use sheetwright_core::{CalendarDate, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let data = workbook.add_worksheet_with_name("Data").unwrap();
//!
//! workbook.write_string(data, 0, 0, "Hello").unwrap();
//! workbook.write_number(data, 1, 0, 3.14159).unwrap();
//! workbook
//!     .write_date(data, 2, 0, CalendarDate::new(2024, 12, 25))
//!     .unwrap();
//!
//! assert_eq!(workbook.sheet_count(), 1);
//! ```

pub mod cell;
pub mod date;
pub mod error;
pub mod number_format;
pub mod shared_strings;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellData, CellRange, CellValue};
pub use date::{CalendarDate, CalendarDateTime, DateSystem};
pub use error::{Error, Result};
pub use number_format::NumberFormatRegistry;
pub use shared_strings::{SharedStringTable, StringId};
pub use workbook::{Workbook, WorkbookSettings};
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Maximum number of characters in a string cell
pub const MAX_STRING_LEN: usize = 32_767;
