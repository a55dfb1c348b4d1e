//! Number format registry
//!
//! Maps format codes to the `numFmtId` values cells refer to. Codes that
//! match one of the spreadsheet built-in formats keep their reserved id and
//! are never written to `styles.xml`; every other code is allocated an id
//! from 164 upward.

use ahash::AHashMap;

use crate::error::{Error, Result};

/// Default display pattern for date cells
pub const DEFAULT_DATE_FORMAT: &str = "yyyy-mm-dd";

/// Default display pattern for datetime cells
pub const DEFAULT_DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// First id available to custom format codes
pub const FIRST_CUSTOM_ID: u32 = 164;

/// 0 - General
pub const ID_GENERAL: u32 = 0;

const BUILTIN_FORMATS: &[(u32, &str)] = &[
    (0, "General"),
    (1, "0"),
    (2, "0.00"),
    (3, "#,##0"),
    (4, "#,##0.00"),
    (9, "0%"),
    (10, "0.00%"),
    (11, "0.00E+00"),
    (12, "# ?/?"),
    (13, "# ??/??"),
    (14, "mm-dd-yy"),
    (15, "d-mmm-yy"),
    (16, "d-mmm"),
    (17, "mmm-yy"),
    (18, "h:mm AM/PM"),
    (19, "h:mm:ss AM/PM"),
    (20, "h:mm"),
    (21, "h:mm:ss"),
    (22, "m/d/yy h:mm"),
    (37, "#,##0 ;(#,##0)"),
    (38, "#,##0 ;[Red](#,##0)"),
    (39, "#,##0.00;(#,##0.00)"),
    (40, "#,##0.00;[Red](#,##0.00)"),
    (45, "mm:ss"),
    (46, "[h]:mm:ss"),
    (47, "mmss.0"),
    (48, "##0.0E+0"),
    (49, "@"),
];

/// Built-in id for a format code, if the code is one of the reserved formats
pub fn builtin_id(code: &str) -> Option<u32> {
    BUILTIN_FORMATS
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(id, _)| *id)
}

/// Format code of a built-in id
pub fn builtin_code(id: u32) -> Option<&'static str> {
    BUILTIN_FORMATS
        .iter()
        .find(|(i, _)| *i == id)
        .map(|(_, c)| *c)
}

/// Workbook-wide registry of number formats in use
///
/// Both built-in and custom formats are recorded in first-use order so that
/// the serializer can emit one cell format record per format.
#[derive(Debug, Clone)]
pub struct NumberFormatRegistry {
    /// Formats in first-use order: (numFmtId, code)
    entries: Vec<(u32, String)>,
    ids: AHashMap<String, u32>,
    next_custom_id: u32,
}

impl NumberFormatRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            ids: AHashMap::new(),
            next_custom_id: FIRST_CUSTOM_ID,
        }
    }

    /// Get the id for a format code, allocating one if needed
    pub fn intern(&mut self, code: &str) -> Result<u32> {
        if code.trim().is_empty() {
            return Err(Error::InvalidFormat("format code is empty".into()));
        }
        if let Some(&id) = self.ids.get(code) {
            return Ok(id);
        }

        let id = match builtin_id(code) {
            Some(id) => id,
            None => {
                let id = self.next_custom_id;
                self.next_custom_id += 1;
                id
            }
        };

        log::trace!("registered number format {} as id {}", code, id);
        self.entries.push((id, code.to_string()));
        self.ids.insert(code.to_string(), id);
        Ok(id)
    }

    /// Look up the id of a format code without registering it
    pub fn id_of(&self, code: &str) -> Option<u32> {
        self.ids
            .get(code)
            .copied()
            .or_else(|| builtin_id(code))
    }

    /// Format code for an id
    pub fn code(&self, id: u32) -> Option<&str> {
        self.entries
            .iter()
            .find(|(i, _)| *i == id)
            .map(|(_, c)| c.as_str())
            .or_else(|| builtin_code(id))
    }

    /// Iterate over registered formats in first-use order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries.iter().map(|(id, code)| (*id, code.as_str()))
    }

    /// Iterate over registered custom (non built-in) formats
    pub fn custom_formats(&self) -> impl Iterator<Item = (u32, &str)> {
        self.iter().filter(|(id, _)| *id >= FIRST_CUSTOM_ID)
    }

    /// Number of registered formats
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no format has been registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NumberFormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}
