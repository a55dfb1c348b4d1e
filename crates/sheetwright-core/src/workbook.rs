//! Workbook type - the main document structure

use chrono::{NaiveDate, NaiveDateTime};

use crate::cell::{CellAddress, CellData, CellValue};
use crate::date::{CalendarDate, CalendarDateTime, DateSystem};
use crate::error::{Error, Result};
use crate::number_format::{NumberFormatRegistry, DEFAULT_DATETIME_FORMAT, DEFAULT_DATE_FORMAT};
use crate::shared_strings::SharedStringTable;
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
///
/// A workbook owns its worksheets in creation order together with the
/// workbook-wide shared string table and number format registry. All cell
/// writes go through the workbook and address a sheet by its index.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    /// Worksheets in the workbook
    worksheets: Vec<Worksheet>,
    /// Strings referenced by string cells
    strings: SharedStringTable,
    /// Number formats referenced by cells
    formats: NumberFormatRegistry,
    /// Workbook settings
    settings: WorkbookSettings,
}

impl Workbook {
    /// Create a new workbook with no worksheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new workbook with the given settings
    pub fn with_settings(settings: WorkbookSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a worksheet by name (case-insensitive)
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.sheet_index(name).and_then(|i| self.worksheets.get(i))
    }

    /// Get the index of a worksheet by name (case-insensitive)
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        let name_lower = name.to_lowercase();
        self.worksheets
            .iter()
            .position(|ws| ws.name().to_lowercase() == name_lower)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Shared string table
    pub fn shared_strings(&self) -> &SharedStringTable {
        &self.strings
    }

    /// Number format registry
    pub fn number_formats(&self) -> &NumberFormatRegistry {
        &self.formats
    }

    /// Get workbook settings
    pub fn settings(&self) -> &WorkbookSettings {
        &self.settings
    }

    /// Get mutable workbook settings
    pub fn settings_mut(&mut self) -> &mut WorkbookSettings {
        &mut self.settings
    }

    // ==================== Worksheets ====================

    /// Add a new worksheet with default name
    pub fn add_worksheet(&mut self) -> Result<usize> {
        let name = self.generate_sheet_name();
        self.add_worksheet_with_name(&name)
    }

    /// Add a new worksheet with specified name
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;

        let index = self.worksheets.len();
        self.worksheets.push(Worksheet::new(name));
        log::trace!("added worksheet {:?} at index {}", name, index);

        Ok(index)
    }

    // ==================== Cell Writes ====================

    /// Write a string cell
    pub fn write_string(&mut self, sheet: usize, row: u32, col: u16, value: &str) -> Result<()> {
        self.check_target(sheet, row, col)?;
        let id = self.strings.intern(value)?;
        self.store(sheet, row, col, CellData::new(CellValue::String(id)))
    }

    /// Write a floating point cell
    pub fn write_number(&mut self, sheet: usize, row: u32, col: u16, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::InvalidNumber(value));
        }
        self.store(sheet, row, col, CellData::new(CellValue::Number(value)))
    }

    /// Write an integer cell
    pub fn write_integer(&mut self, sheet: usize, row: u32, col: u16, value: i64) -> Result<()> {
        self.store(sheet, row, col, CellData::new(CellValue::Integer(value)))
    }

    /// Write a boolean cell
    pub fn write_boolean(&mut self, sheet: usize, row: u32, col: u16, value: bool) -> Result<()> {
        self.store(sheet, row, col, CellData::new(CellValue::Boolean(value)))
    }

    /// Write a date cell displayed as `yyyy-mm-dd`
    pub fn write_date(
        &mut self,
        sheet: usize,
        row: u32,
        col: u16,
        date: CalendarDate,
    ) -> Result<()> {
        self.check_target(sheet, row, col)?;
        let date = self.resolve_date(date)?;
        let fmt = self.formats.intern(DEFAULT_DATE_FORMAT)?;
        self.store(sheet, row, col, CellData::with_format(CellValue::Date(date), fmt))
    }

    /// Write a date and time cell displayed as `yyyy-mm-dd hh:mm:ss`
    pub fn write_datetime(
        &mut self,
        sheet: usize,
        row: u32,
        col: u16,
        datetime: CalendarDateTime,
    ) -> Result<()> {
        self.check_target(sheet, row, col)?;
        let datetime = self.resolve_datetime(datetime)?;
        let fmt = self.formats.intern(DEFAULT_DATETIME_FORMAT)?;
        self.store(
            sheet,
            row,
            col,
            CellData::with_format(CellValue::DateTime(datetime), fmt),
        )
    }

    /// Write a date cell displayed with a custom number format
    pub fn write_date_with_format(
        &mut self,
        sheet: usize,
        row: u32,
        col: u16,
        date: CalendarDate,
        format: &str,
    ) -> Result<()> {
        self.check_target(sheet, row, col)?;
        let date = self.resolve_date(date)?;
        let fmt = self.formats.intern(format)?;
        let value = CellValue::FormattedDate {
            date,
            format: format.to_string(),
        };
        self.store(sheet, row, col, CellData::with_format(value, fmt))
    }

    // ==================== Sizing ====================

    /// Set a column width in characters; 0 hides the column
    pub fn set_column_width(&mut self, sheet: usize, col: u16, width: f64) -> Result<()> {
        self.sheet_mut(sheet)?.set_column_width(col, width)
    }

    /// Set a row height in points; 0 hides the row
    pub fn set_row_height(&mut self, sheet: usize, row: u32, height: f64) -> Result<()> {
        self.sheet_mut(sheet)?.set_row_height(row, height)
    }

    // ==================== Helpers ====================

    fn sheet_mut(&mut self, index: usize) -> Result<&mut Worksheet> {
        let count = self.worksheets.len();
        self.worksheets
            .get_mut(index)
            .ok_or(Error::SheetOutOfBounds(index, count))
    }

    /// Check sheet and grid bounds before anything is interned
    fn check_target(&self, sheet: usize, row: u32, col: u16) -> Result<()> {
        if sheet >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(sheet, self.worksheets.len()));
        }
        CellAddress::checked(row, col)?;
        Ok(())
    }

    fn store(&mut self, sheet: usize, row: u32, col: u16, data: CellData) -> Result<()> {
        self.sheet_mut(sheet)?.set_cell(row, col, data)
    }

    fn resolve_date(&self, date: CalendarDate) -> Result<NaiveDate> {
        let date = date.to_naive()?;
        // Reject dates the serializer could not turn into a serial
        self.settings.date_system().date_serial(date)?;
        Ok(date)
    }

    fn resolve_datetime(&self, datetime: CalendarDateTime) -> Result<NaiveDateTime> {
        let datetime = datetime.to_naive()?;
        self.settings.date_system().datetime_serial(datetime)?;
        Ok(datetime)
    }

    /// Validate a sheet name
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        // Check length
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        // Check for invalid characters
        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        for c in INVALID_CHARS {
            if name.contains(*c) {
                return Err(Error::InvalidSheetName(format!(
                    "Sheet name cannot contain '{}'",
                    c
                )));
            }
        }
        if name.starts_with('\'') || name.ends_with('\'') {
            return Err(Error::InvalidSheetName(
                "Sheet name cannot begin or end with an apostrophe".into(),
            ));
        }

        // Reserved by Excel for change tracking
        if name.eq_ignore_ascii_case("History") {
            return Err(Error::InvalidSheetName(
                "Sheet name 'History' is reserved".into(),
            ));
        }

        // Check for duplicate names (case-insensitive)
        if self.sheet_index(name).is_some() {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }

    /// Generate a unique sheet name
    fn generate_sheet_name(&self) -> String {
        let mut n = self.worksheets.len() + 1;
        loop {
            let name = format!("Sheet{}", n);
            if self.sheet_index(&name).is_none() {
                return name;
            }
            n += 1;
        }
    }
}

/// Workbook-level settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkbookSettings {
    /// Date system: false = 1900 (Windows), true = 1904 (Mac)
    pub date_1904: bool,
    /// Creation timestamp written to `docProps/core.xml`
    pub created: Option<NaiveDateTime>,
    /// Author written to `docProps/core.xml`
    pub author: Option<String>,
}

impl WorkbookSettings {
    /// Date system selected by `date_1904`
    pub fn date_system(&self) -> DateSystem {
        if self.date_1904 {
            DateSystem::Excel1904
        } else {
            DateSystem::Excel1900
        }
    }
}
