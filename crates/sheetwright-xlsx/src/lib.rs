//! # sheetwright-xlsx
//!
//! XLSX (Office Open XML) writer for sheetwright.
//!
//! The writer works in two stages: [`writer::parts`] renders a
//! [`Workbook`](sheetwright_core::Workbook) into an ordered list of package
//! parts, and [`writer::package`] stores those parts in a ZIP container.
//!
//! ```rust
//! use sheetwright_core::Workbook;
//! use sheetwright_xlsx::XlsxWriter;
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.add_worksheet().unwrap();
//! workbook.write_string(sheet, 0, 0, "Hello").unwrap();
//!
//! let bytes = XlsxWriter::write_to_buffer(&workbook).unwrap();
//! assert_eq!(&bytes[..2], b"PK");
//! ```

pub mod error;
pub mod writer;

mod escape;
mod styles;

pub use error::{XlsxError, XlsxResult};
pub use writer::{PackageOptions, Part, XlsxWriter};
