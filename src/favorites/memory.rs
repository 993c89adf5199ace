//! In-memory favorite store

use super::traits::FavoriteStore;
use crate::types::ArticleId;
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::RwLock;

/// Non-durable favorite store
///
/// Satisfies the [`FavoriteStore`] contract except durability. Used in tests
/// and for presentation previews.
#[derive(Default)]
pub struct InMemoryFavoriteStore {
    ids: RwLock<HashSet<ArticleId>>,
}

impl InMemoryFavoriteStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with favorites
    pub fn with_favorites<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ArticleId>,
    {
        Self {
            ids: RwLock::new(ids.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl FavoriteStore for InMemoryFavoriteStore {
    async fn get_all(&self) -> crate::Result<HashSet<ArticleId>> {
        Ok(self.ids.read().await.clone())
    }

    async fn set(&self, id: &ArticleId, favorited: bool) -> crate::Result<()> {
        let mut ids = self.ids.write().await;
        if favorited {
            ids.insert(id.clone());
        } else {
            ids.remove(id);
        }
        Ok(())
    }

    async fn is_favorite(&self, id: &ArticleId) -> crate::Result<bool> {
        Ok(self.ids.read().await.contains(id))
    }

    async fn clear(&self) -> crate::Result<()> {
        self.ids.write().await.clear();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
