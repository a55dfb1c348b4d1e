//! Worksheet type

use crate::cell::{CellAddress, CellData, CellRange, CellStorage, CellValue};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
///
/// Cell values are written through the owning [`Workbook`](crate::Workbook),
/// which holds the shared string table and the number format registry that
/// cells refer to. The worksheet itself owns the grid and the row/column
/// sizing.
#[derive(Debug, Clone)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell storage
    cells: CellStorage,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub(crate) fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellData>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cells.get(addr.row, addr.col))
    }

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(row, col)
    }

    /// Get cell value by indices
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Empty)
    }

    /// Store a cell, replacing any previous content
    pub(crate) fn set_cell(&mut self, row: u32, col: u16, data: CellData) -> Result<()> {
        CellAddress::checked(row, col)?;
        self.cells.set(row, col, data);
        Ok(())
    }

    /// Iterate over all non-empty cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.cells.iter()
    }

    /// Iterate over the cells of one row, ascending by column
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u16, &CellData)> {
        self.cells.iter_row(row)
    }

    /// Rows that carry cells or a custom height, ascending
    pub fn rows(&self) -> impl Iterator<Item = u32> + '_ {
        self.cells.row_indices()
    }

    /// Number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Get the used range (bounding box of all non-empty cells)
    pub fn used_range(&self) -> Option<CellRange> {
        self.cells
            .used_bounds()
            .map(|(min_row, min_col, max_row, max_col)| {
                CellRange::from_indices(min_row, min_col, max_row, max_col)
            })
    }

    // === Row/Column Sizing ===

    /// Set a column width in characters; 0 hides the column
    pub fn set_column_width(&mut self, col: u16, width: f64) -> Result<()> {
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        check_dimension("column width", width)?;
        self.cells.set_column_width(col, width);
        Ok(())
    }

    /// Set a row height in points; 0 hides the row
    pub fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        check_dimension("row height", height)?;
        self.cells.set_row_height(row, height);
        Ok(())
    }

    /// Custom width of a column, if set
    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.cells.column_width(col)
    }

    /// Custom height of a row, if set
    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.cells.row_height(row)
    }

    /// All custom column widths, ascending by column
    pub fn column_widths(&self) -> impl Iterator<Item = (u16, f64)> + '_ {
        self.cells
            .custom_column_widths()
            .iter()
            .map(|(&col, &width)| (col, width))
    }

    /// All custom row heights, ascending by row
    pub fn row_heights(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.cells
            .custom_row_heights()
            .iter()
            .map(|(&row, &height)| (row, height))
    }
}

fn check_dimension(what: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidDimension(format!(
            "{} must be a finite value >= 0, got {}",
            what, value
        )));
    }
    Ok(())
}
