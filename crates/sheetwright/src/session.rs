//! Workbook state shared by the serialized handles

use std::path::Path;

use sheetwright_core::{
    CalendarDate, CalendarDateTime, Result as CoreResult, Workbook, WorkbookSettings,
};
use sheetwright_xlsx::{PackageOptions, XlsxWriter};

use crate::error::{Error, Result};

/// A typed value for a single cell write
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellInput {
    String(String),
    Number(f64),
    Integer(i64),
    Boolean(bool),
    Date(CalendarDate),
    DateTime(CalendarDateTime),
    FormattedDate(CalendarDate, String),
}

/// A workbook together with its writer and save state
///
/// Once a save has succeeded the session is sealed: every mutating call
/// fails with [`Error::AlreadySaved`]. Saving again is allowed and writes
/// the same content.
#[derive(Debug)]
pub(crate) struct Session {
    workbook: Workbook,
    writer: XlsxWriter,
    saved: bool,
}

impl Session {
    pub(crate) fn new(settings: WorkbookSettings, options: PackageOptions) -> Self {
        Self {
            workbook: Workbook::with_settings(settings),
            writer: XlsxWriter::with_options(options),
            saved: false,
        }
    }

    pub(crate) fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub(crate) fn is_saved(&self) -> bool {
        self.saved
    }

    pub(crate) fn sheet_count(&self) -> u32 {
        self.workbook.sheet_count() as u32
    }

    fn mutate<R>(&mut self, f: impl FnOnce(&mut Workbook) -> CoreResult<R>) -> Result<R> {
        if self.saved {
            return Err(Error::AlreadySaved);
        }
        Ok(f(&mut self.workbook)?)
    }

    pub(crate) fn add_worksheet(&mut self, name: Option<&str>) -> Result<u32> {
        let index = self.mutate(|wb| match name {
            Some(name) => wb.add_worksheet_with_name(name),
            None => wb.add_worksheet(),
        })?;
        Ok(index as u32)
    }

    pub(crate) fn write(&mut self, sheet: u32, row: u32, col: u16, value: CellInput) -> Result<()> {
        let sheet = sheet as usize;
        self.mutate(|wb| match value {
            CellInput::String(s) => wb.write_string(sheet, row, col, &s),
            CellInput::Number(n) => wb.write_number(sheet, row, col, n),
            CellInput::Integer(i) => wb.write_integer(sheet, row, col, i),
            CellInput::Boolean(b) => wb.write_boolean(sheet, row, col, b),
            CellInput::Date(d) => wb.write_date(sheet, row, col, d),
            CellInput::DateTime(dt) => wb.write_datetime(sheet, row, col, dt),
            CellInput::FormattedDate(d, format) => {
                wb.write_date_with_format(sheet, row, col, d, &format)
            }
        })
    }

    pub(crate) fn set_column_width(&mut self, sheet: u32, col: u16, width: f64) -> Result<()> {
        self.mutate(|wb| wb.set_column_width(sheet as usize, col, width))
    }

    pub(crate) fn set_row_height(&mut self, sheet: u32, row: u32, height: f64) -> Result<()> {
        self.mutate(|wb| wb.set_row_height(sheet as usize, row, height))
    }

    pub(crate) fn save(&mut self, path: &Path) -> Result<()> {
        self.writer.save(&self.workbook, path)?;
        self.saved = true;
        Ok(())
    }

    pub(crate) fn save_to_buffer(&mut self) -> Result<Vec<u8>> {
        let buffer = self.writer.save_to_buffer(&self.workbook)?;
        self.saved = true;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(WorkbookSettings::default(), PackageOptions::default())
    }

    #[test]
    fn test_sealed_after_save() {
        let mut s = session();
        let sheet = s.add_worksheet(None).unwrap();
        s.write(sheet, 0, 0, CellInput::Integer(1)).unwrap();

        let first = s.save_to_buffer().unwrap();
        assert!(s.is_saved());

        assert!(matches!(
            s.write(sheet, 1, 0, CellInput::Integer(2)),
            Err(Error::AlreadySaved)
        ));
        assert!(matches!(s.add_worksheet(Some("More")), Err(Error::AlreadySaved)));
        assert!(matches!(
            s.set_column_width(sheet, 0, 10.0),
            Err(Error::AlreadySaved)
        ));

        // Reads and repeated saves still work
        assert_eq!(s.sheet_count(), 1);
        assert_eq!(s.save_to_buffer().unwrap(), first);
    }

    #[test]
    fn test_failed_save_does_not_seal() {
        let mut s = session();
        s.add_worksheet(None).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir").join("out.xlsx");
        assert!(matches!(s.save(&missing), Err(Error::Io(_))));
        assert!(!s.is_saved());
        assert!(s.add_worksheet(None).is_ok());
    }

    #[test]
    fn test_errors_are_translated() {
        let mut s = session();
        assert!(matches!(
            s.write(0, 0, 0, CellInput::Boolean(true)),
            Err(Error::SheetNotFound(0))
        ));

        let sheet = s.add_worksheet(Some("Data")).unwrap();
        assert!(matches!(
            s.add_worksheet(Some("data")),
            Err(Error::DuplicateName(_))
        ));
        assert!(matches!(
            s.write(sheet, 1_048_576, 0, CellInput::Integer(0)),
            Err(Error::InvalidIndex(_))
        ));
        assert!(matches!(
            s.write(sheet, 0, 0, CellInput::Number(f64::NAN)),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            s.write(sheet, 0, 0, CellInput::Date(CalendarDate::new(2024, 2, 30))),
            Err(Error::InvalidDate(_))
        ));
    }
}
