use crate::{FileRepository, InMemoryRepository, Repository, Result, ShortCode};
use std::path::PathBuf;
use tracing::info;

/// Which backend to run with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Keep the table in memory only.
    Memory,
    /// Keep the table in memory and mirror it to a snapshot file.
    File { path: PathBuf },
}

/// The backend selected at startup.
///
/// Callers only see the [`Repository`] contract; every call is forwarded to
/// the selected variant.
#[derive(Debug)]
pub enum Storage {
    Memory(InMemoryRepository),
    File(FileRepository),
}

impl Storage {
    /// Builds the backend described by `config`.
    ///
    /// For [`StorageConfig::File`] this loads the snapshot and fails if it
    /// cannot be read or parsed.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        let storage = match config {
            StorageConfig::Memory => Self::Memory(InMemoryRepository::new()),
            StorageConfig::File { path } => Self::File(FileRepository::open(path.clone())?),
        };

        info!(backend = storage.kind(), "storage backend ready");
        Ok(storage)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Storage::Memory(_) => "memory",
            Storage::File(_) => "file",
        }
    }
}

impl Repository for Storage {
    fn get(&self, code: &ShortCode) -> Result<String> {
        match self {
            Storage::Memory(repo) => repo.get(code),
            Storage::File(repo) => repo.get(code),
        }
    }

    fn set(&self, code: &ShortCode, original_url: &str) -> Result<()> {
        match self {
            Storage::Memory(repo) => repo.set(code, original_url),
            Storage::File(repo) => repo.set(code, original_url),
        }
    }

    fn insert(&self, code: &ShortCode, original_url: &str) -> Result<()> {
        match self {
            Storage::Memory(repo) => repo.insert(code, original_url),
            Storage::File(repo) => repo.insert(code, original_url),
        }
    }

    fn len(&self) -> Result<usize> {
        match self {
            Storage::Memory(repo) => repo.len(),
            Storage::File(repo) => repo.len(),
        }
    }
}
