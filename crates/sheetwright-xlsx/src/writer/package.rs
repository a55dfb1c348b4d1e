//! ZIP container packaging

use std::fs;
use std::io::{Seek, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::parts::Part;
use crate::error::XlsxResult;

/// Options for the ZIP container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackageOptions {
    /// Deflate level (0-9); `None` uses the zip crate's default
    pub compression_level: Option<i64>,
}

impl PackageOptions {
    fn file_options(&self) -> SimpleFileOptions {
        // Fixed timestamps keep the archive reproducible
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(self.compression_level)
            .last_modified_time(DateTime::default())
    }
}

/// Store parts in a ZIP archive, in order, and return the finished writer
pub(crate) fn write_parts<W: Write + Seek>(
    parts: &[Part],
    writer: W,
    options: &PackageOptions,
) -> XlsxResult<W> {
    let mut zip = ZipWriter::new(writer);
    let file_options = options.file_options();

    for part in parts {
        zip.start_file(part.name.as_str(), file_options)?;
        zip.write_all(&part.data)?;
    }

    Ok(zip.finish()?)
}

/// Write parts to `dest` through a temp file in the same directory
///
/// The destination is only replaced once the archive is complete and synced,
/// so a failed save leaves any existing file untouched.
pub(crate) fn write_parts_atomic(
    parts: &[Part],
    dest: &Path,
    options: &PackageOptions,
) -> XlsxResult<()> {
    let dir = parent_dir_or_dot(dest);
    let mut tmp = NamedTempFile::new_in(dir)?;

    let written = write_parts(parts, tmp.as_file_mut(), options)
        .and_then(|file| file.flush().map_err(Into::into))
        .and_then(|()| tmp.as_file().sync_all().map_err(Into::into));
    if let Err(err) = written {
        discard(tmp);
        return Err(err);
    }

    if let Err(err) = tmp.persist(dest) {
        discard(err.file);
        return Err(err.error.into());
    }

    // The file is already in place; failing to sync the directory is not fatal.
    if let Err(err) = fs::File::open(dir).and_then(|d| d.sync_all()) {
        log::debug!("could not sync directory {}: {}", dir.display(), err);
    }

    Ok(())
}

fn discard(tmp: NamedTempFile) {
    let path = tmp.path().to_path_buf();
    if let Err(err) = tmp.close() {
        log::warn!("failed to remove temp file {}: {}", path.display(), err);
    }
}

fn parent_dir_or_dot(path: &Path) -> &Path {
    // `Path::parent` is `Some("")` for a bare file name
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parts() -> Vec<Part> {
        vec![
            Part {
                name: "[Content_Types].xml".into(),
                data: b"<Types/>".to_vec(),
            },
            Part {
                name: "xl/workbook.xml".into(),
                data: b"<workbook/>".to_vec(),
            },
        ]
    }

    #[test]
    fn test_archive_header_and_determinism() {
        let a = write_parts(&parts(), Cursor::new(Vec::new()), &PackageOptions::default())
            .unwrap()
            .into_inner();
        let b = write_parts(&parts(), Cursor::new(Vec::new()), &PackageOptions::default())
            .unwrap()
            .into_inner();

        assert_eq!(&a[..2], b"PK");
        assert_eq!(a, b);
    }

    #[test]
    fn test_parent_dir_or_dot() {
        assert_eq!(parent_dir_or_dot(Path::new("out.xlsx")), Path::new("."));
        assert_eq!(
            parent_dir_or_dot(Path::new("reports/out.xlsx")),
            Path::new("reports")
        );
    }

    #[test]
    fn test_atomic_write_replaces_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("book.xlsx");
        fs::write(&dest, b"old").unwrap();

        write_parts_atomic(&parts(), &dest, &PackageOptions::default()).unwrap();

        let written = fs::read(&dest).unwrap();
        assert_eq!(&written[..2], b"PK");
        // Only the destination remains, no temp files
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing").join("book.xlsx");

        let result = write_parts_atomic(&parts(), &dest, &PackageOptions::default());
        assert!(matches!(result, Err(crate::XlsxError::Io(_))));
        assert!(!dest.exists());
    }
}
