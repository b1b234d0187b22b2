use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Stores `original_url` under a freshly generated short code and returns the code.
    async fn shorten(&self, original_url: &str) -> Result<ShortCode>;

    /// Resolves a short code to the original URL.
    /// Fails with `NotFound` if the code was never stored.
    async fn resolve(&self, code: &ShortCode) -> Result<String>;
}
