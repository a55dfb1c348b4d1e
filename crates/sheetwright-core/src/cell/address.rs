//! Cell address and range types

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "XFD1048576")
///
/// Rows and columns are 0-based internally. The A1 form uses letter-coded
/// columns (A-XFD) and 1-based row numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., XFD=16383)
    pub col: u16,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Create an address, rejecting coordinates outside the worksheet grid
    pub fn checked(row: u32, col: u16) -> Result<Self> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        Ok(Self { row, col })
    }

    /// Parse a cell address from A1-style notation
    ///
    /// `$` markers are accepted and ignored.
    ///
    /// # Examples
    /// ```
    /// use sheetwright_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("B2").unwrap();
    /// assert_eq!(addr.row, 1);
    /// assert_eq!(addr.col, 1);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let cleaned: String = s.chars().filter(|&c| c != '$').collect();
        let split = cleaned
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(cleaned.len());
        let (letters, digits) = cleaned.split_at(split);

        if letters.is_empty() {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }
        if digits.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }

        let col = Self::letters_to_column(letters)?;
        let row: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;

        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }

        Self::checked(row - 1, col)
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u16) -> String {
        let mut buf = [0u8; 4];
        let mut pos = buf.len();
        let mut n = col as u32 + 1;

        while n > 0 {
            n -= 1;
            pos -= 1;
            buf[pos] = b'A' + (n % 26) as u8;
            n /= 26;
        }

        buf[pos..].iter().map(|&b| b as char).collect()
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }
        if letters.len() > 3 {
            return Err(Error::InvalidAddress(format!(
                "column '{}' is beyond XFD",
                letters
            )));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        }

        let col = col - 1;
        if col >= MAX_COLS as u32 {
            return Err(Error::InvalidAddress(format!(
                "column '{}' is beyond XFD",
                letters
            )));
        }

        Ok(col as u16)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular range of cells (e.g., "A1:B10")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Top-left address
    pub start: CellAddress,
    /// Bottom-right address
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new range, normalizing the corners
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        Self {
            start: CellAddress::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellAddress::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    /// Create a range from row/column indices
    pub fn from_indices(start_row: u32, start_col: u16, end_row: u32, end_col: u16) -> Self {
        Self::new(
            CellAddress::new(start_row, start_col),
            CellAddress::new(end_row, end_col),
        )
    }

    /// Check if a cell is within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        (self.start.row..=self.end.row).contains(&addr.row)
            && (self.start.col..=self.end.col).contains(&addr.col)
    }

    /// Format as A1:B10, or A1 for a single cell
    pub fn to_a1_string(&self) -> String {
        if self.start == self.end {
            self.start.to_a1_string()
        } else {
            format!("{}:{}", self.start, self.end)
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(CellAddress::column_to_letters(0), "A");
        assert_eq!(CellAddress::column_to_letters(25), "Z");
        assert_eq!(CellAddress::column_to_letters(26), "AA");
        assert_eq!(CellAddress::column_to_letters(27), "AB");
        assert_eq!(CellAddress::column_to_letters(701), "ZZ");
        assert_eq!(CellAddress::column_to_letters(702), "AAA");
        assert_eq!(CellAddress::column_to_letters(16383), "XFD");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(CellAddress::letters_to_column("A").unwrap(), 0);
        assert_eq!(CellAddress::letters_to_column("AA").unwrap(), 26);
        assert_eq!(CellAddress::letters_to_column("xfd").unwrap(), 16383);
        assert!(CellAddress::letters_to_column("XFE").is_err());
        assert!(CellAddress::letters_to_column("AAAA").is_err());
    }

    #[test]
    fn test_cell_address_parse() {
        let addr = CellAddress::parse("C100").unwrap();
        assert_eq!((addr.row, addr.col), (99, 2));

        let addr = CellAddress::parse("$B$2").unwrap();
        assert_eq!((addr.row, addr.col), (1, 1));

        let addr = CellAddress::parse("XFD1048576").unwrap();
        assert_eq!((addr.row, addr.col), (1_048_575, 16_383));
    }

    #[test]
    fn test_cell_address_parse_errors() {
        assert!(CellAddress::parse("").is_err());
        assert!(CellAddress::parse("A").is_err());
        assert!(CellAddress::parse("1").is_err());
        assert!(CellAddress::parse("A0").is_err());
        assert!(CellAddress::parse("A1B").is_err());
        assert_eq!(
            CellAddress::parse("A1048577"),
            Err(Error::RowOutOfBounds(1_048_576, 1_048_575))
        );
    }

    #[test]
    fn test_checked_bounds() {
        assert!(CellAddress::checked(1_048_575, 16_383).is_ok());
        assert!(CellAddress::checked(1_048_576, 0).unwrap_err().is_out_of_bounds());
        assert!(CellAddress::checked(0, 16_384).unwrap_err().is_out_of_bounds());
    }

    #[test]
    fn test_range_display() {
        assert_eq!(CellRange::from_indices(0, 0, 0, 0).to_string(), "A1");
        assert_eq!(CellRange::from_indices(4, 3, 0, 0).to_string(), "A1:D5");
        assert!(CellRange::from_indices(0, 0, 4, 3).contains(&CellAddress::new(2, 2)));
    }

    proptest! {
        #[test]
        fn column_letters_round_trip(col in 0u16..MAX_COLS) {
            let letters = CellAddress::column_to_letters(col);
            prop_assert_eq!(CellAddress::letters_to_column(&letters).unwrap(), col);
        }

        #[test]
        fn a1_round_trip(row in 0u32..MAX_ROWS, col in 0u16..MAX_COLS) {
            let addr = CellAddress::new(row, col);
            prop_assert_eq!(CellAddress::parse(&addr.to_a1_string()).unwrap(), addr);
        }
    }
}
