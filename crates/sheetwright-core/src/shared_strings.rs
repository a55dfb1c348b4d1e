//! Shared string table
//!
//! Every string cell in a workbook refers to an entry in one table, which is
//! written out as `xl/sharedStrings.xml`. Ids are handed out in insertion
//! order and are never reclaimed, even if the cells that used a string are
//! overwritten later.

use std::sync::Arc;

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::MAX_STRING_LEN;

/// Index of a string in the [`SharedStringTable`]
pub type StringId = u32;

/// Deduplicating, insertion-ordered string table
#[derive(Debug, Default, Clone)]
pub struct SharedStringTable {
    strings: Vec<Arc<str>>,
    index: AHashMap<Arc<str>, StringId>,
}

impl SharedStringTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the id for a string, adding it if it is not in the table yet
    ///
    /// Fails with [`Error::StringTooLong`] for strings over the cell limit.
    pub fn intern(&mut self, s: &str) -> Result<StringId> {
        if let Some(&id) = self.index.get(s) {
            return Ok(id);
        }

        let chars = s.chars().count();
        if chars > MAX_STRING_LEN {
            return Err(Error::StringTooLong(chars));
        }

        let id = self.strings.len() as StringId;
        let shared: Arc<str> = Arc::from(s);
        self.strings.push(shared.clone());
        self.index.insert(shared, id);
        Ok(id)
    }

    /// Look up the id of a string without inserting it
    pub fn id_of(&self, s: &str) -> Option<StringId> {
        self.index.get(s).copied()
    }

    /// Get a string by id
    pub fn get(&self, id: StringId) -> Option<&str> {
        self.strings.get(id as usize).map(|s| s.as_ref())
    }

    /// Number of unique strings
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over all strings in id order
    pub fn iter(&self) -> impl Iterator<Item = (StringId, &str)> {
        self.strings
            .iter()
            .enumerate()
            .map(|(i, s)| (i as StringId, s.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_idempotent() {
        let mut table = SharedStringTable::new();

        let hello = table.intern("hello").unwrap();
        let world = table.intern("world").unwrap();
        let again = table.intern("hello").unwrap();

        assert_eq!(hello, 0);
        assert_eq!(world, 1);
        assert_eq!(again, hello);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_lookup() {
        let mut table = SharedStringTable::new();
        table.intern("a").unwrap();
        table.intern("b").unwrap();

        assert_eq!(table.get(1), Some("b"));
        assert_eq!(table.get(2), None);
        assert_eq!(table.id_of("a"), Some(0));
        assert_eq!(table.id_of("c"), None);

        let all: Vec<_> = table.iter().collect();
        assert_eq!(all, vec![(0, "a"), (1, "b")]);
    }

    #[test]
    fn test_length_limit_counts_characters() {
        let mut table = SharedStringTable::new();

        let at_limit = "é".repeat(MAX_STRING_LEN);
        assert!(table.intern(&at_limit).is_ok());

        let over = "x".repeat(MAX_STRING_LEN + 1);
        assert_eq!(
            table.intern(&over),
            Err(Error::StringTooLong(MAX_STRING_LEN + 1))
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_empty_string_is_a_real_entry() {
        let mut table = SharedStringTable::new();
        assert_eq!(table.intern("").unwrap(), 0);
        assert_eq!(table.get(0), Some(""));
    }
}
