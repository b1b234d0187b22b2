use async_trait::async_trait;
use burrow_core::{Repository, ShortCode, Shortener, ShortenerError, StorageError};
use burrow_generator::Generator;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How many generated codes are tried before giving up on a shorten call.
pub const MAX_GENERATE_ATTEMPTS: usize = 8;

/// A concrete implementation of the `Shortener` trait.
///
/// Generated codes are stored with [`Repository::insert`], which refuses a
/// code that is already taken. On such a collision a new code is generated,
/// up to [`MAX_GENERATE_ATTEMPTS`] times. An existing mapping is never
/// overwritten by `shorten`.
///
/// Repository calls are synchronous and may block on disk writes, so each
/// one runs on tokio's blocking thread pool.
#[derive(Debug)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    pub fn new(repository: R, generator: G) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
        }
    }

    /// Strips surrounding whitespace from the URL.
    ///
    /// URLs are otherwise opaque, but the result must be non-empty and free
    /// of control characters so it can be sent back as a `Location` header.
    fn normalize_url(url: &str) -> Result<&str, ShortenerError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }
        if url.chars().any(char::is_control) {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must not contain control characters: {:?}",
                url
            )));
        }
        Ok(url)
    }
}

fn insert_fresh<R: Repository, G: Generator>(
    repository: &R,
    generator: &G,
    original_url: &str,
) -> Result<ShortCode, ShortenerError> {
    for attempt in 1..=MAX_GENERATE_ATTEMPTS {
        let code: ShortCode = generator.generate().into();
        match repository.insert(&code, original_url) {
            Ok(()) => return Ok(code),
            Err(StorageError::Conflict(_)) => {
                warn!(code = %code, attempt, "generated short code is taken, regenerating");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(ShortenerError::CodeSpaceExhausted {
        attempts: MAX_GENERATE_ATTEMPTS,
    })
}

fn join_error(err: tokio::task::JoinError) -> ShortenerError {
    ShortenerError::Storage(format!("storage task failed: {err}"))
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn shorten(&self, original_url: &str) -> Result<ShortCode, ShortenerError> {
        let url = Self::normalize_url(original_url)?.to_owned();

        let repository = Arc::clone(&self.repository);
        let generator = Arc::clone(&self.generator);

        let code = tokio::task::spawn_blocking(move || {
            insert_fresh(repository.as_ref(), generator.as_ref(), &url)
        })
        .await
        .map_err(join_error)??;

        info!(code = %code, "shortened url");
        Ok(code)
    }

    async fn resolve(&self, code: &ShortCode) -> Result<String, ShortenerError> {
        let repository = Arc::clone(&self.repository);
        let lookup = code.clone();

        let result = tokio::task::spawn_blocking(move || repository.get(&lookup))
            .await
            .map_err(join_error)?;

        if let Err(StorageError::NotFound(_)) = &result {
            debug!(code = %code, "short code not found");
        }

        Ok(result?)
    }
}
