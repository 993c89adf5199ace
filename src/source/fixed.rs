//! Fixed in-memory article source

use super::traits::RemoteNewsSource;
use crate::error::FetchError;
use crate::types::Article;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Source that serves a fixed list of articles
///
/// The list can be swapped with [`StaticNewsSource::replace`], which makes it
/// handy for previews and tests that simulate upstream changes.
pub struct StaticNewsSource {
    articles: RwLock<Vec<Article>>,
}

impl StaticNewsSource {
    /// Create a source serving `articles`
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles: RwLock::new(articles),
        }
    }

    /// Serve `articles` from the next fetch on
    pub async fn replace(&self, articles: Vec<Article>) {
        *self.articles.write().await = articles;
    }
}

#[async_trait]
impl RemoteNewsSource for StaticNewsSource {
    async fn fetch_articles(&self) -> Result<Vec<Article>, FetchError> {
        Ok(self.articles.read().await.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
