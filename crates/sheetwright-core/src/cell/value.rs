//! Cell value types

use chrono::{NaiveDate, NaiveDateTime};

use crate::shared_strings::StringId;

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell (no value)
    #[default]
    Empty,

    /// String value, stored as an id into the workbook's shared string table
    String(StringId),

    /// Floating point value
    Number(f64),

    /// Integer value, written out exactly
    Integer(i64),

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Calendar date shown with the default date pattern
    Date(NaiveDate),

    /// Date and time shown with the default datetime pattern
    DateTime(NaiveDateTime),

    /// Calendar date shown with a caller-supplied pattern
    FormattedDate {
        date: NaiveDate,
        format: String,
    },
}

impl CellValue {
    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the value is rendered as a date serial
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            CellValue::Date(_) | CellValue::DateTime(_) | CellValue::FormattedDate { .. }
        )
    }

    /// Try to get the value as a number (integers widen to f64)
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the shared string id
    pub fn as_string_id(&self) -> Option<StringId> {
        match self {
            CellValue::String(id) => Some(*id),
            _ => None,
        }
    }

    /// Try to get the calendar date of a date-like value
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) | CellValue::FormattedDate { date: d, .. } => Some(*d),
            CellValue::DateTime(dt) => Some(dt.date()),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::String(_) => "string",
            CellValue::Number(_) => "number",
            CellValue::Integer(_) => "integer",
            CellValue::Boolean(_) => "boolean",
            CellValue::Date(_) => "date",
            CellValue::DateTime(_) => "datetime",
            CellValue::FormattedDate { .. } => "formatted_date",
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Integer(n)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

/// Complete data for a single cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellData {
    /// The cell's value
    pub value: CellValue,
    /// Number format id (`numFmtId`), `None` for General
    pub num_fmt_id: Option<u32>,
}

impl CellData {
    /// Create a new cell with a value and the General format
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            num_fmt_id: None,
        }
    }

    /// Create a new cell with a value and number format
    pub fn with_format(value: CellValue, num_fmt_id: u32) -> Self {
        Self {
            value,
            num_fmt_id: Some(num_fmt_id),
        }
    }

    /// Check if this cell holds nothing worth writing
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.num_fmt_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_conversions() {
        assert_eq!(CellValue::from(42i64), CellValue::Integer(42));
        assert_eq!(CellValue::from(3.14), CellValue::Number(3.14));
        assert_eq!(CellValue::from(true), CellValue::Boolean(true));
    }

    #[test]
    fn test_cell_value_accessors() {
        assert_eq!(CellValue::Number(42.0).as_number(), Some(42.0));
        assert_eq!(CellValue::Integer(-7).as_number(), Some(-7.0));
        assert_eq!(CellValue::Boolean(true).as_number(), None);
        assert_eq!(CellValue::String(3).as_string_id(), Some(3));
        assert_eq!(CellValue::Empty.as_bool(), None);

        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        let formatted = CellValue::FormattedDate {
            date,
            format: "dd/mm/yyyy".into(),
        };
        assert_eq!(formatted.as_date(), Some(date));
        assert!(formatted.is_temporal());
        assert!(!CellValue::Integer(1).is_temporal());
    }

    #[test]
    fn test_cell_data_empty() {
        assert!(CellData::default().is_empty());
        assert!(!CellData::new(CellValue::Boolean(false)).is_empty());
        assert!(!CellData::with_format(CellValue::Empty, 164).is_empty());
    }
}
