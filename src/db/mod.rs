//! Database layer for article-repo
//!
//! Handles SQLite persistence of per-user favorite flags.
//!
//! ## Submodules
//!
//! Methods on [`Database`] are organized by domain:
//! - [`migrations`]: Database lifecycle, schema migrations
//! - [`favorites`]: Favorite flag reads and writes

use sqlx::{FromRow, sqlite::SqlitePool};

mod favorites;
mod migrations;

/// Favorite record from database
#[derive(Debug, Clone, FromRow)]
pub struct FavoriteRow {
    /// User who favorited the article
    pub user_id: String,
    /// Favorited article
    pub article_id: crate::types::ArticleId,
    /// Unix timestamp when the favorite was last written
    pub favorited_at: i64,
}

/// Database handle for article-repo
pub struct Database {
    pool: SqlitePool,
}
