//! Article repository: the merged, cached view of the news feed.
//!
//! [`ArticleRepository`] combines a [`RemoteNewsSource`] with a
//! [`FavoriteStore`] and keeps one published [`RepositorySnapshot`]:
//! - [`refresh`](ArticleRepository::refresh) replaces it from a new fetch
//! - [`set_favorite`](ArticleRepository::set_favorite) replaces one entry after a write-through
//! - [`subscribe`](ArticleRepository::subscribe) observes every replacement
//!
//! ## Concurrency
//!
//! Every snapshot mutation runs under one writer lock. Remote fetches run
//! outside it, so overlapping refreshes fetch in parallel and are then applied
//! in completion order: the last refresh to complete wins. Favorites are read
//! under the lock, so a toggle that lands while a fetch is in flight is never
//! lost by the refresh that follows.

mod merge;
mod subscribers;

pub use subscribers::Subscription;

use crate::config::Config;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::favorites::{FavoriteStore, SqliteFavoriteStore};
use crate::source::{self, RemoteNewsSource};
use crate::types::{ArticleId, MergedArticle, RepositorySnapshot};
use std::sync::Arc;
use subscribers::Listeners;
use tokio::sync::{Mutex, MutexGuard, watch};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, info, warn};

/// Merged article feed with favorite flags
///
/// # Example
///
/// ```no_run
/// use article_repo::{ArticleRepository, Config};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repository = ArticleRepository::from_config(&Config::default()).await?;
///
///     let subscription = repository.subscribe(|snapshot| {
///         println!("{} articles", snapshot.len());
///     });
///
///     let snapshot = repository.refresh().await?;
///     if let Some(first) = snapshot.articles().first() {
///         repository.set_favorite(first.id(), true).await?;
///     }
///
///     subscription.unsubscribe();
///     Ok(())
/// }
/// ```
pub struct ArticleRepository {
    /// Where articles come from
    source: Arc<dyn RemoteNewsSource>,
    /// Authoritative favorite flags
    store: Arc<dyn FavoriteStore>,
    /// Serializes every snapshot mutation
    write_lock: Mutex<()>,
    /// Last published snapshot
    snapshot_tx: watch::Sender<Arc<RepositorySnapshot>>,
    /// Snapshot listeners
    listeners: Arc<Listeners>,
}

impl ArticleRepository {
    /// Create a repository over the given collaborators
    ///
    /// The cache starts empty; nothing is fetched until [`refresh`](Self::refresh).
    pub fn new(source: Arc<dyn RemoteNewsSource>, store: Arc<dyn FavoriteStore>) -> Self {
        let (snapshot_tx, _) = watch::channel(RepositorySnapshot::empty());
        Self {
            source,
            store,
            write_lock: Mutex::new(()),
            snapshot_tx,
            listeners: Arc::new(Listeners::default()),
        }
    }

    /// Build the configured source and a SQLite favorite store
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for invalid settings and
    /// [`Error::Persistence`] if the database cannot be opened.
    pub async fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let source = source::from_config(config)?;
        let db = Arc::new(Database::new(&config.persistence.database_path).await?);
        let store = Arc::new(SqliteFavoriteStore::new(
            db,
            config.persistence.user_id.clone(),
        ));

        info!(
            source = source.name(),
            url = %config.source.url,
            user = %config.persistence.user_id,
            "Article repository initialized"
        );

        Ok(Self::new(source, store))
    }

    /// Fetch, merge with favorites, and publish a new snapshot
    ///
    /// # Errors
    ///
    /// - [`Error::Fetch`] if the source fails
    /// - [`Error::Persistence`] if favorites cannot be read
    ///
    /// On error the cached snapshot is left untouched.
    pub async fn refresh(&self) -> Result<Arc<RepositorySnapshot>> {
        debug!(source = self.source.name(), "Refreshing articles");

        let articles = self.source.fetch_articles().await.map_err(|e| {
            warn!(
                source = self.source.name(),
                error = %e,
                "Refresh failed, keeping cached snapshot"
            );
            Error::from(e)
        })?;
        let fetched_at = chrono::Utc::now();

        let _guard = self.write_lock.lock().await;

        let favorites = self.store.get_all().await.map_err(|e| {
            warn!(store = self.store.name(), error = %e, "Failed to read favorites during refresh");
            e
        })?;

        let snapshot = Arc::new(merge::merge(articles, &favorites, Some(fetched_at)));
        self.publish(&snapshot);

        info!(
            articles = snapshot.len(),
            favorites = snapshot.favorites().count(),
            "Refresh applied"
        );
        Ok(snapshot)
    }

    /// Last published snapshot, without any I/O
    ///
    /// Empty until the first successful refresh.
    pub fn current(&self) -> Arc<RepositorySnapshot> {
        self.snapshot_tx.borrow().clone()
    }

    /// Set the favorite flag of an article in the current snapshot
    ///
    /// The flag is persisted before the snapshot is updated, so the cache never
    /// claims a write the store did not confirm.
    ///
    /// # Errors
    ///
    /// - [`Error::UnknownArticle`] if `id` is not in the current snapshot (nothing is written)
    /// - [`Error::Persistence`] if the store rejects the write (snapshot unchanged)
    pub async fn set_favorite(&self, id: &ArticleId, favorited: bool) -> Result<MergedArticle> {
        let guard = self.write_lock.lock().await;
        self.apply_favorite(&guard, id, favorited).await
    }

    /// Flip the favorite flag of an article in the current snapshot
    ///
    /// Reads and writes under the same lock, so concurrent toggles each flip once.
    ///
    /// # Errors
    ///
    /// Same as [`set_favorite`](Self::set_favorite).
    pub async fn toggle_favorite(&self, id: &ArticleId) -> Result<MergedArticle> {
        let guard = self.write_lock.lock().await;
        let favorited = self
            .current()
            .get(id)
            .map(|entry| !entry.favorited)
            .ok_or_else(|| Error::UnknownArticle(id.clone()))?;
        self.apply_favorite(&guard, id, favorited).await
    }

    /// Remove every favorite from the store and clear the flags in the snapshot
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the store cannot be cleared (snapshot unchanged).
    pub async fn clear_favorites(&self) -> Result<Arc<RepositorySnapshot>> {
        let _guard = self.write_lock.lock().await;

        self.store.clear().await?;

        let current = self.current();
        if current.favorites().next().is_none() {
            return Ok(current);
        }

        let articles = current
            .articles()
            .iter()
            .map(|entry| MergedArticle {
                article: entry.article.clone(),
                favorited: false,
            })
            .collect();
        let snapshot = Arc::new(RepositorySnapshot::from_merged(
            articles,
            current.fetched_at,
        ));
        self.publish(&snapshot);

        info!("Favorites cleared");
        Ok(snapshot)
    }

    /// Register a listener invoked with every new snapshot
    ///
    /// Each listener sees every update exactly once, in publish order. The
    /// listener runs on the task that caused the update, so it should return
    /// quickly; use [`updates`](Self::updates) to consume snapshots asynchronously.
    /// A listener that panics is logged and skipped without affecting the others.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Arc<RepositorySnapshot>) + Send + Sync + 'static,
    {
        let subscription = self.listeners.add(Arc::new(listener));
        debug!(subscribers = self.listeners.len(), "Listener subscribed");
        subscription
    }

    /// Stream of every new snapshot
    ///
    /// The stream ends once the returned [`Subscription`] is dropped.
    pub fn updates(&self) -> (Subscription, UnboundedReceiverStream<Arc<RepositorySnapshot>>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let subscription = self.subscribe(move |snapshot| {
            // Receiver gone means the consumer stopped listening
            let _ = tx.send(snapshot.clone());
        });
        (subscription, UnboundedReceiverStream::new(rx))
    }

    /// Receiver that always holds the latest snapshot
    ///
    /// Intermediate snapshots may be skipped; use [`subscribe`](Self::subscribe)
    /// to observe every update.
    pub fn watch(&self) -> watch::Receiver<Arc<RepositorySnapshot>> {
        self.snapshot_tx.subscribe()
    }

    /// Number of registered listeners
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Write-through favorite update; caller holds the writer lock
    async fn apply_favorite(
        &self,
        _guard: &MutexGuard<'_, ()>,
        id: &ArticleId,
        favorited: bool,
    ) -> Result<MergedArticle> {
        let current = self.current();
        let Some(existing) = current.get(id) else {
            debug!(id = %id, "Rejecting favorite for unknown article");
            return Err(Error::UnknownArticle(id.clone()));
        };
        let unchanged = existing.favorited == favorited;

        self.store.set(id, favorited).await.map_err(|e| {
            warn!(id = %id, favorited, error = %e, "Failed to persist favorite");
            e
        })?;

        let (snapshot, updated) = current
            .with_favorite(id, favorited)
            .ok_or_else(|| Error::UnknownArticle(id.clone()))?;

        if !unchanged {
            self.publish(&Arc::new(snapshot));
            info!(id = %id, favorited, "Favorite updated");
        }

        Ok(updated)
    }

    /// Replace the cached snapshot and notify listeners; caller holds the writer lock
    fn publish(&self, snapshot: &Arc<RepositorySnapshot>) {
        self.snapshot_tx.send_replace(snapshot.clone());
        self.listeners.notify(snapshot);
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod tests;
