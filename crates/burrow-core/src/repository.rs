use crate::error::StorageError;
use crate::shortcode::ShortCode;
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, StorageError>;

/// One short code to original URL mapping.
///
/// This is the record shape of the on-disk snapshot, shared by the load and
/// save paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub short_url: ShortCode,
    pub original_url: String,
}

impl MappingEntry {
    pub fn new(short_url: ShortCode, original_url: impl Into<String>) -> Self {
        Self {
            short_url,
            original_url: original_url.into(),
        }
    }
}

/// The storage contract every backend implements.
///
/// All operations are synchronous and run to completion while holding the
/// backend's table lock. A reader never observes a partially applied
/// mutation.
pub trait Repository: Send + Sync + 'static {
    /// Returns the original URL stored under `code`.
    /// Fails with [`StorageError::NotFound`] if there is no entry.
    fn get(&self, code: &ShortCode) -> Result<String>;

    /// Inserts or overwrites the entry for `code`.
    fn set(&self, code: &ShortCode, original_url: &str) -> Result<()>;

    /// Inserts the entry only if `code` is free.
    /// Fails with [`StorageError::Conflict`] and leaves the table untouched otherwise.
    fn insert(&self, code: &ShortCode, original_url: &str) -> Result<()>;

    /// Number of stored entries.
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<R: Repository + ?Sized> Repository for std::sync::Arc<R> {
    fn get(&self, code: &ShortCode) -> Result<String> {
        (**self).get(code)
    }

    fn set(&self, code: &ShortCode, original_url: &str) -> Result<()> {
        (**self).set(code, original_url)
    }

    fn insert(&self, code: &ShortCode, original_url: &str) -> Result<()> {
        (**self).insert(code, original_url)
    }

    fn len(&self) -> Result<usize> {
        (**self).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_uses_snapshot_field_names() {
        let entry = MappingEntry::new(ShortCode::new_unchecked("abcdefgh"), "https://example.com");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "short_url": "abcdefgh",
                "original_url": "https://example.com",
            })
        );
    }
}
