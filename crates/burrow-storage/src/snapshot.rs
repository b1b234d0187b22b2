//! JSON snapshot of the whole mapping table.
//!
//! The snapshot is written as an array of `{"short_url", "original_url"}`
//! objects sorted by short code. A flat `{"<code>": "<url>"}` object is
//! also accepted when loading.

use burrow_core::{MappingEntry, ShortCode, StorageError};
use serde::Deserialize;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::Result;

pub type Table = HashMap<String, String>;

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Entries(Vec<MappingEntry>),
    Flat(HashMap<String, String>),
}

/// Parses snapshot bytes. Empty or whitespace-only input is an empty table.
///
/// Later entries win when an array lists the same code twice.
pub fn decode(bytes: &[u8]) -> Result<Table> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Table::new());
    }

    let document: Document =
        serde_json::from_slice(bytes).map_err(|e| StorageError::Decode(e.to_string()))?;

    let table = match document {
        Document::Entries(entries) => entries
            .into_iter()
            .map(|entry| (entry.short_url.into_string(), entry.original_url))
            .collect(),
        Document::Flat(table) => table,
    };

    Ok(table)
}

/// Serializes the table as a pretty-printed entry array, sorted by code.
pub fn encode(table: &Table) -> Result<Vec<u8>> {
    let mut entries: Vec<MappingEntry> = table
        .iter()
        .map(|(code, url)| MappingEntry::new(ShortCode::new_unchecked(code.as_str()), url.as_str()))
        .collect();
    entries.sort_by(|a, b| a.short_url.cmp(&b.short_url));

    serde_json::to_vec_pretty(&entries).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Reads the snapshot at `path`. A missing file is an empty table.
pub fn load(path: &Path) -> Result<Table> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Table::new()),
        Err(e) => return Err(io_error(path, e)),
    };

    decode(&bytes).map_err(|e| match e {
        StorageError::Decode(message) => {
            StorageError::Decode(format!("{}: {}", path.display(), message))
        }
        other => other,
    })
}

/// Replaces the snapshot at `path` with the serialized table.
///
/// The bytes go to a sibling `.tmp` file which is synced and then renamed
/// over `path`, so readers of the file see either the old or the new
/// snapshot, never a truncated one.
pub fn store(path: &Path, table: &Table) -> Result<()> {
    let bytes = encode(table)?;
    let tmp_path = temp_path(path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let written = write_synced(&tmp_path, &bytes).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error(path, e));
    }

    Ok(())
}

/// Path of the scratch file used by [`store`].
pub fn temp_path(path: &Path) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        StorageError::Io(format!("{}: snapshot path has no file name", path.display()))
    })?;

    let mut tmp_name = OsString::from(file_name);
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn io_error(path: &Path, err: io::Error) -> StorageError {
    StorageError::Io(format!("{}: {}", path.display(), err))
}
