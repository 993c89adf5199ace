//! Trait for remote article sources

use crate::error::FetchError;
use crate::types::Article;
use async_trait::async_trait;

/// Source of the current article list
///
/// Each call is independent: success returns the full list in upstream
/// order, failure is terminal for that call.
///
/// # Examples
///
/// ```
/// use article_repo::source::{RemoteNewsSource, StaticNewsSource};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = StaticNewsSource::new(vec![]);
/// let articles = source.fetch_articles().await?;
/// assert!(articles.is_empty());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait RemoteNewsSource: Send + Sync {
    /// Fetch the current article list
    ///
    /// # Errors
    ///
    /// - [`FetchError::Network`] on connection failures or non-success status
    /// - [`FetchError::Timeout`] when the request times out
    /// - [`FetchError::Deserialize`] when the payload cannot be decoded
    async fn fetch_articles(&self) -> Result<Vec<Article>, FetchError>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
