//! Core types and traits for the Burrow URL shortener.
//!
//! This crate provides the types shared by the storage backends, the
//! shortener service and the HTTP gateway: the [`ShortCode`] identifier,
//! the canonical [`MappingEntry`], the synchronous [`Repository`] contract
//! and the async [`Shortener`] service contract.

pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{ShortenerError, StorageError};
pub use repository::{MappingEntry, Repository};
pub use shortcode::ShortCode;
pub use shortener::Shortener;
