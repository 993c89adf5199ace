//! # article-repo
//!
//! News article repository that merges a remote feed with locally persisted
//! favorites.
//!
//! ## Design Philosophy
//!
//! article-repo is designed to be:
//! - **Snapshot-based** - Readers get an immutable, ordered `Arc` snapshot
//! - **Write-through** - A favorite is persisted before the cache shows it
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - Consumers subscribe to snapshots, no polling required
//!
//! ## Quick Start
//!
//! ```no_run
//! use article_repo::{ArticleRepository, Config, SourceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         source: SourceConfig {
//!             url: "https://news.example.com/feeds/recent".to_string(),
//!             ..Default::default()
//!         },
//!         ..Default::default()
//!     };
//!
//!     let repository = ArticleRepository::from_config(&config).await?;
//!
//!     // Consume snapshots as they are published
//!     let (_subscription, mut updates) = repository.updates();
//!     tokio::spawn(async move {
//!         use tokio_stream::StreamExt;
//!         while let Some(snapshot) = updates.next().await {
//!             println!("{} articles, {} favorites", snapshot.len(), snapshot.favorites().count());
//!         }
//!     });
//!
//!     repository.refresh().await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Database persistence layer
pub mod db;
/// Error types
pub mod error;
/// Favorite flag storage
pub mod favorites;
/// Article repository (merge, cache, subscriptions)
pub mod repository;
/// Retry logic with exponential backoff
pub mod retry;
/// Remote news sources
pub mod source;
/// Core types
pub mod types;

// Re-export commonly used types
pub use config::{Config, PersistenceConfig, RetryConfig, SourceConfig, SourceFormat};
pub use db::Database;
pub use error::{Error, FetchError, PersistenceError, Result};
pub use favorites::{FavoriteStore, InMemoryFavoriteStore, SqliteFavoriteStore};
pub use repository::{ArticleRepository, Subscription};
pub use source::{FeedNewsSource, HttpNewsSource, RemoteNewsSource, StaticNewsSource};
pub use types::{
    Article, ArticleId, LocalizedContent, Media, MergedArticle, RepositorySnapshot,
};
