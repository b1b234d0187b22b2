use crate::snapshot::{self, Table};
use crate::{Repository, Result, ShortCode, StorageError};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, error, info};

/// Repository that keeps the table in memory and mirrors it to a JSON snapshot.
///
/// The snapshot is read once by [`FileRepository::open`]. Every successful
/// mutation rewrites the whole snapshot while the write lock is still held,
/// so writers are serialized with their disk writes and each `set` costs
/// O(table size). Reads never touch the disk.
///
/// If the snapshot write fails the mutation is reported as failed, but the
/// in-memory table keeps the new entry. Memory and disk then disagree until
/// the next successful write.
#[derive(Debug)]
pub struct FileRepository {
    path: PathBuf,
    table: RwLock<Table>,
}

impl FileRepository {
    /// Loads the snapshot at `path` and returns a ready repository.
    ///
    /// A missing or empty file starts an empty table. An unreadable or
    /// malformed file is an error; no repository is built from a partial load.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let table = snapshot::load(&path).inspect_err(|err| {
            error!(path = %path.display(), error = %err, "failed to load snapshot");
        })?;

        info!(
            path = %path.display(),
            entries = table.len(),
            "loaded snapshot"
        );

        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, table: &Table) -> Result<()> {
        snapshot::store(&self.path, table)
            .inspect(|_| {
                debug!(path = %self.path.display(), entries = table.len(), "snapshot written");
            })
            .inspect_err(|err| {
                error!(path = %self.path.display(), error = %err, "failed to write snapshot");
            })
    }
}

impl Repository for FileRepository {
    fn get(&self, code: &ShortCode) -> Result<String> {
        let table = self.table.read().map_err(|_| StorageError::LockPoisoned)?;
        table
            .get(code.as_str())
            .cloned()
            .ok_or_else(|| StorageError::NotFound(code.to_string()))
    }

    fn set(&self, code: &ShortCode, original_url: &str) -> Result<()> {
        let mut table = self.table.write().map_err(|_| StorageError::LockPoisoned)?;
        table.insert(code.as_str().to_owned(), original_url.to_owned());
        self.persist(&table)
    }

    fn insert(&self, code: &ShortCode, original_url: &str) -> Result<()> {
        let mut table = self.table.write().map_err(|_| StorageError::LockPoisoned)?;
        if table.contains_key(code.as_str()) {
            return Err(StorageError::Conflict(code.to_string()));
        }
        table.insert(code.as_str().to_owned(), original_url.to_owned());
        self.persist(&table)
    }

    fn len(&self) -> Result<usize> {
        let table = self.table.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(table.len())
    }
}
