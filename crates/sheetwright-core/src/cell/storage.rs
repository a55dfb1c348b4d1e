//! Cell storage implementation
//!
//! Sparse storage for worksheet cells. Only non-empty cells are stored,
//! using a row-based BTreeMap so that iteration is always in row-major
//! order, which is the order the sheet XML requires.

use std::collections::BTreeMap;

use super::CellData;

/// Sparse row-based storage for worksheet cells and sizing
///
/// Structure: `BTreeMap<row_index, BTreeMap<col_index, CellData>>`
#[derive(Debug, Default, Clone)]
pub struct CellStorage {
    /// Row index → column map
    rows: BTreeMap<u32, BTreeMap<u16, CellData>>,

    /// Custom row heights in points (0 = hidden)
    row_heights: BTreeMap<u32, f64>,

    /// Custom column widths in characters (0 = hidden)
    column_widths: BTreeMap<u16, f64>,
}

impl CellStorage {
    /// Create a new empty cell storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell
    pub fn get(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Set a cell, replacing whatever was there
    ///
    /// Empty cell data removes the cell.
    pub fn set(&mut self, row: u32, col: u16, data: CellData) -> Option<CellData> {
        if data.is_empty() {
            return self.remove(row, col);
        }
        self.rows.entry(row).or_default().insert(col, data)
    }

    /// Remove a cell
    pub fn remove(&mut self, row: u32, col: u16) -> Option<CellData> {
        let row_map = self.rows.get_mut(&row)?;
        let removed = row_map.remove(&col);
        if row_map.is_empty() {
            self.rows.remove(&row);
        }
        removed
    }

    /// Get the number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check if storage holds no cells
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the bounds of used cells
    ///
    /// Returns (min_row, min_col, max_row, max_col) or None if empty
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;

        let mut min_col = u16::MAX;
        let mut max_col = 0u16;
        for row_data in self.rows.values() {
            if let Some(&col) = row_data.keys().next() {
                min_col = min_col.min(col);
            }
            if let Some(&col) = row_data.keys().next_back() {
                max_col = max_col.max(col);
            }
        }

        Some((min_row, min_col, max_row, max_col))
    }

    /// Iterate over all cells in row order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, data)| (row, col, data)))
    }

    /// Iterate over cells in a specific row
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u16, &CellData)> {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|cols| cols.iter().map(|(&col, data)| (col, data)))
    }

    /// Iterate over row indices that have cells or a custom height, ascending
    pub fn row_indices(&self) -> impl Iterator<Item = u32> + '_ {
        let mut indices: Vec<u32> = self
            .rows
            .keys()
            .chain(self.row_heights.keys())
            .copied()
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices.into_iter()
    }

    /// Custom row height, if one was set
    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }

    /// Set custom row height
    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    /// Custom column width, if one was set
    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    /// Set custom column width
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    /// Get all custom row heights (row index → height in points).
    pub fn custom_row_heights(&self) -> &BTreeMap<u32, f64> {
        &self.row_heights
    }

    /// Get all custom column widths (column index → width in characters).
    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellValue;

    #[test]
    fn test_basic_operations() {
        let mut storage = CellStorage::new();

        storage.set(0, 0, CellData::new(CellValue::Number(42.0)));
        let cell = storage.get(0, 0).unwrap();
        assert_eq!(cell.value.as_number(), Some(42.0));

        assert!(storage.get(1, 1).is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let mut storage = CellStorage::new();

        storage.set(3, 3, CellData::with_format(CellValue::Number(1.0), 164));
        let previous = storage.set(3, 3, CellData::new(CellValue::Boolean(true)));

        assert_eq!(previous.unwrap().num_fmt_id, Some(164));
        assert_eq!(
            storage.get(3, 3),
            Some(&CellData::new(CellValue::Boolean(true)))
        );
        assert_eq!(storage.cell_count(), 1);
    }

    #[test]
    fn test_empty_cells_not_stored() {
        let mut storage = CellStorage::new();

        storage.set(0, 0, CellData::new(CellValue::Number(42.0)));
        storage.set(0, 0, CellData::default());

        assert_eq!(storage.cell_count(), 0);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_used_bounds() {
        let mut storage = CellStorage::new();
        assert!(storage.used_bounds().is_none());

        storage.set(5, 3, CellData::new(CellValue::Number(1.0)));
        storage.set(10, 7, CellData::new(CellValue::Number(2.0)));
        storage.set(2, 1, CellData::new(CellValue::Number(3.0)));

        assert_eq!(storage.used_bounds(), Some((2, 1, 10, 7)));
    }

    #[test]
    fn test_row_indices_include_sized_rows() {
        let mut storage = CellStorage::new();
        storage.set(4, 0, CellData::new(CellValue::Integer(1)));
        storage.set_row_height(2, 30.0);
        storage.set_row_height(4, 12.0);

        let rows: Vec<_> = storage.row_indices().collect();
        assert_eq!(rows, vec![2, 4]);
    }

    #[test]
    fn test_iteration_is_row_major() {
        let mut storage = CellStorage::new();
        storage.set(1, 0, CellData::new(CellValue::Number(3.0)));
        storage.set(0, 1, CellData::new(CellValue::Number(2.0)));
        storage.set(0, 0, CellData::new(CellValue::Number(1.0)));

        let order: Vec<_> = storage.iter().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0)]);
    }
}
