//! URL shortener service implementation.
//!
//! Ties a code [`Generator`](burrow_generator::Generator) to a
//! [`Repository`](burrow_core::Repository). Core types are re-exported from
//! `burrow_core`.

pub mod service;

pub use burrow_core::{ShortCode, Shortener, ShortenerError};
pub use service::{ShortenerService, MAX_GENERATE_ATTEMPTS};
