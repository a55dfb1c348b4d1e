//! Thread-safe workbook handle backed by a mutex

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use sheetwright_core::{CalendarDate, CalendarDateTime, Workbook, WorkbookSettings};
use sheetwright_xlsx::PackageOptions;

use crate::error::{Error, Result};
use crate::session::{CellInput, Session};

/// A workbook that can be shared between threads
///
/// Clones refer to the same workbook. Every call takes the workbook lock, so
/// at most one operation runs at a time. After a successful [`save`] or
/// [`save_to_buffer`] the workbook is sealed and mutating calls fail with
/// [`Error::AlreadySaved`].
///
/// [`save`]: SharedWorkbook::save
/// [`save_to_buffer`]: SharedWorkbook::save_to_buffer
///
/// ```rust
/// use sheetwright::SharedWorkbook;
///
/// let workbook = SharedWorkbook::new();
/// let data = workbook.add_worksheet_with_name("Data").unwrap();
/// workbook.write_string(data, 0, 0, "Hello").unwrap();
///
/// let bytes = workbook.save_to_buffer().unwrap();
/// assert_eq!(&bytes[..2], b"PK");
/// ```
#[derive(Debug, Clone)]
pub struct SharedWorkbook {
    inner: Arc<Mutex<Session>>,
}

impl SharedWorkbook {
    /// Create an empty workbook with default settings
    pub fn new() -> Self {
        Self::with_options(WorkbookSettings::default(), PackageOptions::default())
    }

    /// Create an empty workbook with the given settings and packaging options
    pub fn with_options(settings: WorkbookSettings, options: PackageOptions) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Session::new(settings, options))),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Session>> {
        self.inner.lock().map_err(|_| Error::Poisoned)
    }

    /// Add a worksheet named `SheetN`
    pub fn add_worksheet(&self) -> Result<u32> {
        self.lock()?.add_worksheet(None)
    }

    /// Add a worksheet with the given name
    pub fn add_worksheet_with_name(&self, name: &str) -> Result<u32> {
        self.lock()?.add_worksheet(Some(name))
    }

    /// Number of worksheets
    pub fn worksheet_count(&self) -> Result<u32> {
        Ok(self.lock()?.sheet_count())
    }

    pub fn write_string(&self, sheet: u32, row: u32, col: u16, value: &str) -> Result<()> {
        self.lock()?
            .write(sheet, row, col, CellInput::String(value.to_string()))
    }

    pub fn write_number(&self, sheet: u32, row: u32, col: u16, value: f64) -> Result<()> {
        self.lock()?.write(sheet, row, col, CellInput::Number(value))
    }

    pub fn write_integer(&self, sheet: u32, row: u32, col: u16, value: i64) -> Result<()> {
        self.lock()?.write(sheet, row, col, CellInput::Integer(value))
    }

    pub fn write_boolean(&self, sheet: u32, row: u32, col: u16, value: bool) -> Result<()> {
        self.lock()?.write(sheet, row, col, CellInput::Boolean(value))
    }

    /// Write a date shown as `yyyy-mm-dd`
    pub fn write_date(&self, sheet: u32, row: u32, col: u16, date: CalendarDate) -> Result<()> {
        self.lock()?.write(sheet, row, col, CellInput::Date(date))
    }

    /// Write a date and time shown as `yyyy-mm-dd hh:mm:ss`
    pub fn write_datetime(
        &self,
        sheet: u32,
        row: u32,
        col: u16,
        datetime: CalendarDateTime,
    ) -> Result<()> {
        self.lock()?
            .write(sheet, row, col, CellInput::DateTime(datetime))
    }

    /// Write a date shown with a custom number format
    pub fn write_date_with_format(
        &self,
        sheet: u32,
        row: u32,
        col: u16,
        date: CalendarDate,
        format: &str,
    ) -> Result<()> {
        self.lock()?.write(
            sheet,
            row,
            col,
            CellInput::FormattedDate(date, format.to_string()),
        )
    }

    /// Set a column width in characters; 0 hides the column
    pub fn set_column_width(&self, sheet: u32, col: u16, width: f64) -> Result<()> {
        self.lock()?.set_column_width(sheet, col, width)
    }

    /// Set a row height in points; 0 hides the row
    pub fn set_row_height(&self, sheet: u32, row: u32, height: f64) -> Result<()> {
        self.lock()?.set_row_height(sheet, row, height)
    }

    /// Save to a file, replacing it atomically
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.lock()?.save(path.as_ref())
    }

    /// Save into a new in-memory buffer
    pub fn save_to_buffer(&self) -> Result<Vec<u8>> {
        self.lock()?.save_to_buffer()
    }

    /// Check whether the workbook has been saved
    pub fn is_saved(&self) -> Result<bool> {
        Ok(self.lock()?.is_saved())
    }

    /// Run a closure with read access to the workbook model
    pub fn with_workbook<R>(&self, f: impl FnOnce(&Workbook) -> R) -> Result<R> {
        Ok(f(self.lock()?.workbook()))
    }
}

impl Default for SharedWorkbook {
    fn default() -> Self {
        Self::new()
    }
}
