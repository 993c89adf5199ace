//! Trait for favorite flag persistence

use crate::types::ArticleId;
use async_trait::async_trait;
use std::collections::HashSet;

/// Persistent set of favorited article ids for one user
///
/// Implementations must be durable: a successful [`set`](FavoriteStore::set)
/// is visible to [`get_all`](FavoriteStore::get_all) after a restart. Writes to
/// different ids never corrupt each other; writes to the same id resolve
/// last-write-wins in completion order.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// All favorited ids
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`](crate::Error::Persistence) if the store cannot be read.
    async fn get_all(&self) -> crate::Result<HashSet<ArticleId>>;

    /// Set or clear the favorite flag of one article
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`](crate::Error::Persistence) if the write was not confirmed.
    async fn set(&self, id: &ArticleId, favorited: bool) -> crate::Result<()>;

    /// Whether one article is favorited
    async fn is_favorite(&self, id: &ArticleId) -> crate::Result<bool> {
        Ok(self.get_all().await?.contains(id))
    }

    /// Remove every favorite
    async fn clear(&self) -> crate::Result<()>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
