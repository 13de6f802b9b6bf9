//! Atomic JSON document writer.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error_handling::ExportError;

/// Writes `value` as 2-space-indented JSON to `path`, replacing any existing file.
///
/// The document is first written to a temporary file in the same directory
/// and then renamed over `path`, so readers see either the old file or the
/// complete new one. If anything fails the temporary file is removed and
/// `path` is left untouched. The parent directory is created if absent.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), ExportError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))?;

    let tmp = NamedTempFile::new_in(dir).map_err(|e| ExportError::io(dir, e))?;
    write_pretty(BufWriter::new(tmp.as_file()), value, tmp.path())?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| ExportError::io(tmp.path(), e))?;

    tmp.persist(path)
        .map_err(|e| ExportError::io(path, e.error))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Serializes `value` into `writer` and flushes it.
///
/// Failures of the underlying writer surface as [`ExportError::Io`] against
/// `path`; only data that cannot be represented as JSON is a
/// [`ExportError::Serialize`].
fn write_pretty<W: Write, T: Serialize>(
    mut writer: W,
    value: &T,
    path: &Path,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| {
        if e.is_io() {
            ExportError::io(path, e.into())
        } else {
            ExportError::Serialize(e)
        }
    })?;
    writer.flush().map_err(|e| ExportError::io(path, e))
}
