//! Prelude module - common imports for sheetwright users
//!
//! ```rust
//! use sheetwright::prelude::*;
//! ```

#[cfg(feature = "async")]
pub use crate::AsyncWorkbook;
pub use crate::{
    CalendarDate,
    CalendarDateTime,
    CellValue,
    // Error types
    Error,
    PackageOptions,
    Result,
    // Handles
    SharedWorkbook,
    // Main types
    Workbook,
    // Extension traits
    WorkbookExt,
    WorkbookSettings,
    Worksheet,
    XlsxWriter,
};
