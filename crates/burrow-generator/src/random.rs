use crate::Generator;
use burrow_core::ShortCode;
use rand::Rng;
use typed_builder::TypedBuilder;

/// Letters a generated code is drawn from.
pub const ALPHABET: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Bounds a configured code length is clamped into. Codes longer than 32
/// would not be accepted back by `ShortCode::new`.
pub const MIN_CODE_LENGTH: usize = 1;
pub const MAX_CODE_LENGTH: usize = 32;

/// Returns `length` letters picked uniformly, with replacement, from [`ALPHABET`].
pub fn generate(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Random letter codes of a fixed length.
///
/// With the default length of 8 there are 52^8 (about 5.3e13) codes.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGenerator {
    #[builder(
        default = DEFAULT_CODE_LENGTH,
        setter(transform = |length: usize| length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH))
    )]
    length: usize,
}

impl RandomGenerator {
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        ShortCode::new_unchecked(generate(self.length))
    }
}
