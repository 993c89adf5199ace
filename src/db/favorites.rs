//! Favorite flag persistence, scoped per user.

use crate::error::PersistenceError;
use crate::types::ArticleId;
use crate::{Error, Result};
use std::collections::HashSet;

use super::{Database, FavoriteRow};

impl Database {
    /// Get the ids of all articles the user has favorited
    pub async fn get_favorite_ids(&self, user_id: &str) -> Result<HashSet<ArticleId>> {
        let ids = sqlx::query_scalar::<_, ArticleId>(
            r#"
            SELECT article_id FROM favorites
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            Error::Persistence(PersistenceError::QueryFailed(format!(
                "Failed to get favorites: {}",
                e
            )))
        })?;

        Ok(ids.into_iter().collect())
    }

    /// List favorite records for the user, most recently favorited first
    pub async fn list_favorites(&self, user_id: &str) -> Result<Vec<FavoriteRow>> {
        let rows = sqlx::query_as::<_, FavoriteRow>(
            r#"
            SELECT user_id, article_id, favorited_at
            FROM favorites
            WHERE user_id = ?
            ORDER BY favorited_at DESC, article_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            Error::Persistence(PersistenceError::QueryFailed(format!(
                "Failed to list favorites: {}",
                e
            )))
        })?;

        Ok(rows)
    }

    /// Check whether one article is favorited
    pub async fn is_favorite(&self, user_id: &str, article_id: &ArticleId) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT 1 FROM favorites
            WHERE user_id = ? AND article_id = ?
            "#,
        )
        .bind(user_id)
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            Error::Persistence(PersistenceError::QueryFailed(format!(
                "Failed to check favorite: {}",
                e
            )))
        })?;

        Ok(found.is_some())
    }

    /// Set or clear the favorite flag for one article
    ///
    /// Favoriting upserts the row, unfavoriting deletes it. Each call is a
    /// single statement, so concurrent writes to the same id resolve in
    /// completion order.
    pub async fn set_favorite(
        &self,
        user_id: &str,
        article_id: &ArticleId,
        favorited: bool,
    ) -> Result<()> {
        let result = if favorited {
            let now = chrono::Utc::now().timestamp();
            sqlx::query(
                r#"
                INSERT INTO favorites (user_id, article_id, favorited_at)
                VALUES (?, ?, ?)
                ON CONFLICT(user_id, article_id) DO UPDATE SET favorited_at = excluded.favorited_at
                "#,
            )
            .bind(user_id)
            .bind(article_id)
            .bind(now)
            .execute(&self.pool)
            .await
        } else {
            sqlx::query("DELETE FROM favorites WHERE user_id = ? AND article_id = ?")
                .bind(user_id)
                .bind(article_id)
                .execute(&self.pool)
                .await
        };

        result.map_err(|e| {
            Error::Persistence(PersistenceError::QueryFailed(format!(
                "Failed to set favorite: {}",
                e
            )))
        })?;

        Ok(())
    }

    /// Remove every favorite of the user, returning how many were removed
    pub async fn clear_favorites(&self, user_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                Error::Persistence(PersistenceError::QueryFailed(format!(
                    "Failed to clear favorites: {}",
                    e
                )))
            })?;

        Ok(result.rows_affected())
    }
}
