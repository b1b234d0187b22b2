pub mod random;

use burrow_core::ShortCode;

pub use random::{
    generate, RandomGenerator, ALPHABET, DEFAULT_CODE_LENGTH, MAX_CODE_LENGTH, MIN_CODE_LENGTH,
};

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// Nothing here promises uniqueness: callers that need a free code must
/// check it against the repository and retry.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    fn generate(&self) -> Self::Output;
}
