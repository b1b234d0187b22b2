use crate::snapshot::Table;
use crate::{Repository, Result, ShortCode, StorageError};
use std::sync::RwLock;

/// In-memory implementation of the Repository trait.
///
/// The table sits behind a single reader/writer lock: lookups share the
/// read lock, mutations take the write lock. Nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    table: RwLock<Table>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: RwLock::new(Table::with_capacity(capacity)),
        }
    }
}

impl Repository for InMemoryRepository {
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
        Ok(())
    }

    fn insert(&self, code: &ShortCode, original_url: &str) -> Result<()> {
        let mut table = self.table.write().map_err(|_| StorageError::LockPoisoned)?;
        if table.contains_key(code.as_str()) {
            return Err(StorageError::Conflict(code.to_string()));
        }
        table.insert(code.as_str().to_owned(), original_url.to_owned());
        Ok(())
    }

    fn len(&self) -> Result<usize> {
        let table = self.table.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(table.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    #[test]
    fn set_and_get() {
        let repo = InMemoryRepository::new();

        repo.set(&code("abcdefgh"), "https://example.com").unwrap();

        assert_eq!(repo.get(&code("abcdefgh")).unwrap(), "https://example.com");
    }

    #[test]
    fn get_nonexistent() {
        let repo = InMemoryRepository::new();

        let err = repo.get(&code("nope")).unwrap_err();
        assert_eq!(err, StorageError::NotFound("nope".to_string()));
    }

    #[test]
    fn set_overwrites() {
        let repo = InMemoryRepository::new();

        repo.set(&code("abcdefgh"), "https://old.example").unwrap();
        repo.set(&code("abcdefgh"), "https://new.example").unwrap();

        assert_eq!(repo.get(&code("abcdefgh")).unwrap(), "https://new.example");
        assert_eq!(repo.len().unwrap(), 1);
    }

    #[test]
    fn set_same_value_twice_is_idempotent() {
        let repo = InMemoryRepository::new();

        repo.set(&code("abcdefgh"), "https://example.com").unwrap();
        repo.set(&code("abcdefgh"), "https://example.com").unwrap();

        assert_eq!(repo.get(&code("abcdefgh")).unwrap(), "https://example.com");
        assert_eq!(repo.len().unwrap(), 1);
    }

    #[test]
    fn insert_conflict_keeps_first_value() {
        let repo = InMemoryRepository::new();

        repo.insert(&code("abcdefgh"), "https://example.com").unwrap();
        let err = repo
            .insert(&code("abcdefgh"), "https://other.example")
            .unwrap_err();

        assert_eq!(err, StorageError::Conflict("abcdefgh".to_string()));
        assert_eq!(repo.get(&code("abcdefgh")).unwrap(), "https://example.com");
    }

    #[test]
    fn len_counts_entries() {
        let repo = InMemoryRepository::with_capacity(4);

        assert!(repo.is_empty().unwrap());

        repo.set(&code("abcdefgh"), "https://example.com").unwrap();
        repo.set(&code("ijklmnop"), "https://example.org").unwrap();

        assert!(!repo.is_empty().unwrap());
        assert_eq!(repo.len().unwrap(), 2);
    }

    #[test]
    fn concurrent_writers_on_distinct_keys() {
        let repo = Arc::new(InMemoryRepository::new());

        thread::scope(|scope| {
            for i in 0..16 {
                let repo = Arc::clone(&repo);
                scope.spawn(move || {
                    for j in 0..50 {
                        let c = code(&format!("code-{i:02}-{j:03}"));
                        repo.set(&c, &format!("https://example.com/{i}/{j}"))
                            .unwrap();
                        // Readers interleave with writers on other threads.
                        assert!(repo.get(&c).is_ok());
                    }
                });
            }
        });

        assert_eq!(repo.len().unwrap(), 16 * 50);
        for i in 0..16 {
            for j in 0..50 {
                let c = code(&format!("code-{i:02}-{j:03}"));
                assert_eq!(
                    repo.get(&c).unwrap(),
                    format!("https://example.com/{i}/{j}")
                );
            }
        }
    }
}
