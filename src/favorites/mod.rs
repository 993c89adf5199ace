//! Favorite flag storage
//!
//! The core abstraction is the [`FavoriteStore`] trait: the set of article ids
//! the current user favorited. Absence from the set means "not favorited".
//!
//! - [`SqliteFavoriteStore`]: durable store on the crate's SQLite [`Database`](crate::Database)
//! - [`InMemoryFavoriteStore`]: process-local store for tests and previews
//!
//! ## Usage
//!
//! ```no_run
//! use article_repo::favorites::{FavoriteStore, SqliteFavoriteStore};
//! use article_repo::{ArticleId, Database};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Arc::new(Database::new(Path::new("favorites.db")).await?);
//!     let store = SqliteFavoriteStore::new(db, "alice");
//!
//!     store.set(&ArticleId::from("a1"), true).await?;
//!     assert!(store.get_all().await?.contains(&ArticleId::from("a1")));
//!     Ok(())
//! }
//! ```

mod memory;
mod sqlite;
mod traits;

pub use memory::InMemoryFavoriteStore;
pub use sqlite::SqliteFavoriteStore;
pub use traits::FavoriteStore;
