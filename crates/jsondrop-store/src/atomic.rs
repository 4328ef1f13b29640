//! Atomic file operations for crash-safe record writes.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::ser::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::{Result, StoreError};
use crate::resolve::temp_path;

/// Serializes a value as tab-indented JSON followed by a single newline.
pub fn to_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(128);
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Writes data to a file atomically.
///
/// The bytes go to `<path>.tmp` in the same directory first, then the temp
/// file is renamed over `path`. Readers see either the previous file or the
/// complete new one, never a partial write.
///
/// If the process dies between the temp write and the rename, the `.tmp`
/// file is left behind. Nothing cleans it up.
///
/// # Errors
/// Returns an error if creating the parent directory, the write, or the
/// rename fails.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| StoreError::DirectoryError {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let tmp = temp_path(path);
    let write_err = |source| StoreError::WriteError {
        path: tmp.clone(),
        source,
    };

    let mut file = fs::File::create(&tmp).map_err(write_err)?;
    file.write_all(data).map_err(write_err)?;
    file.sync_all().map_err(write_err)?;
    drop(file);

    fs::rename(&tmp, path).map_err(|source| StoreError::WriteError {
        path: path.to_path_buf(),
        source,
    })
}

/// Serializes a value and writes it to a file atomically.
pub fn atomic_write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = to_json_bytes(value)?;
    atomic_write(path, &bytes)
}

/// Reads and deserializes JSON from a file.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read(path).map_err(|source| StoreError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_slice(&data)?;
    Ok(value)
}
