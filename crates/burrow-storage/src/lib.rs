//! Storage backends for the mapping table.
//!
//! Two backends implement [`Repository`]: [`InMemoryRepository`] keeps the
//! table in process memory only, [`FileRepository`] additionally mirrors
//! every mutation to a JSON snapshot. [`Storage`] picks one of them from a
//! [`StorageConfig`] at startup.

pub mod file;
pub mod memory;
pub mod snapshot;
pub mod store;

pub use burrow_core::repository::Result;
pub use burrow_core::{MappingEntry, Repository, ShortCode, StorageError};
pub use file::FileRepository;
pub use memory::InMemoryRepository;
pub use store::{Storage, StorageConfig};
