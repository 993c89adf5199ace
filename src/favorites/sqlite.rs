//! SQLite-backed favorite store

use super::traits::FavoriteStore;
use crate::db::Database;
use crate::types::ArticleId;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// Durable favorite store scoped to one user
///
/// Several stores (one per user) can share the same [`Database`].
#[derive(Clone)]
pub struct SqliteFavoriteStore {
    db: Arc<Database>,
    user_id: String,
}

impl SqliteFavoriteStore {
    /// Create a store for `user_id` on an open database
    pub fn new(db: Arc<Database>, user_id: impl Into<String>) -> Self {
        Self {
            db,
            user_id: user_id.into(),
        }
    }

    /// User this store reads and writes
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Underlying database
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }
}

#[async_trait]
impl FavoriteStore for SqliteFavoriteStore {
    async fn get_all(&self) -> crate::Result<HashSet<ArticleId>> {
        self.db.get_favorite_ids(&self.user_id).await
    }

    async fn set(&self, id: &ArticleId, favorited: bool) -> crate::Result<()> {
        self.db.set_favorite(&self.user_id, id, favorited).await?;
        tracing::debug!(user = %self.user_id, id = %id, favorited, "Favorite persisted");
        Ok(())
    }

    async fn is_favorite(&self, id: &ArticleId) -> crate::Result<bool> {
        self.db.is_favorite(&self.user_id, id).await
    }

    async fn clear(&self) -> crate::Result<()> {
        let removed = self.db.clear_favorites(&self.user_id).await?;
        tracing::info!(user = %self.user_id, removed, "Cleared favorites");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}
