//! XLSX writer

pub mod package;
pub mod parts;

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use crate::error::XlsxResult;
use sheetwright_core::Workbook;

pub use package::PackageOptions;
pub use parts::{render_parts, Part};

/// XLSX file writer
#[derive(Debug, Clone, Default)]
pub struct XlsxWriter {
    options: PackageOptions,
}

impl XlsxWriter {
    /// Create a writer with the given packaging options
    pub fn with_options(options: PackageOptions) -> Self {
        Self { options }
    }

    /// Packaging options in use
    pub fn options(&self) -> &PackageOptions {
        &self.options
    }

    /// Write a workbook to a file path with default options
    ///
    /// The file is replaced atomically: on error an existing file at `path`
    /// is left as it was.
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        Self::default().save(workbook, path)
    }

    /// Write a workbook to a writer with default options
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        Self::default().save_to_writer(workbook, writer)
    }

    /// Write a workbook into a new in-memory buffer with default options
    pub fn write_to_buffer(workbook: &Workbook) -> XlsxResult<Vec<u8>> {
        Self::default().save_to_buffer(workbook)
    }

    /// Write a workbook to a file path
    pub fn save<P: AsRef<Path>>(&self, workbook: &Workbook, path: P) -> XlsxResult<()> {
        let path = path.as_ref();
        let parts = render_parts(workbook)?;
        package::write_parts_atomic(&parts, path, &self.options)?;
        log::debug!(
            "wrote {} parts for {} sheets to {}",
            parts.len(),
            workbook.sheet_count(),
            path.display()
        );
        Ok(())
    }

    /// Write a workbook to a writer
    pub fn save_to_writer<W: Write + Seek>(&self, workbook: &Workbook, writer: W) -> XlsxResult<()> {
        let parts = render_parts(workbook)?;
        package::write_parts(&parts, writer, &self.options)?;
        Ok(())
    }

    /// Write a workbook into a new in-memory buffer
    pub fn save_to_buffer(&self, workbook: &Workbook) -> XlsxResult<Vec<u8>> {
        let parts = render_parts(workbook)?;
        let buffer = package::write_parts(&parts, Cursor::new(Vec::new()), &self.options)?
            .into_inner();
        log::debug!(
            "wrote {} parts for {} sheets into a {} byte buffer",
            parts.len(),
            workbook.sheet_count(),
            buffer.len()
        );
        Ok(buffer)
    }
}
