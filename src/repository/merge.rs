//! Merge of fetched articles with persisted favorite flags.

use crate::types::{Article, ArticleId, MergedArticle, RepositorySnapshot};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Pair each fetched article with its favorite flag and sort into snapshot order
///
/// The fetched list is authoritative for which articles exist; `favorites` only
/// decides the flag. When an id appears more than once, the first occurrence
/// is kept.
pub(crate) fn merge(
    articles: Vec<Article>,
    favorites: &HashSet<ArticleId>,
    fetched_at: Option<DateTime<Utc>>,
) -> RepositorySnapshot {
    let mut seen = HashSet::with_capacity(articles.len());
    let mut merged = Vec::with_capacity(articles.len());

    for article in articles {
        if !seen.insert(article.id.clone()) {
            tracing::warn!(id = %article.id, "Dropping duplicate article from fetch");
            continue;
        }
        let favorited = favorites.contains(&article.id);
        merged.push(MergedArticle { article, favorited });
    }

    RepositorySnapshot::from_merged(merged, fetched_at)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::tests::article;

    fn ids(snapshot: &RepositorySnapshot) -> Vec<(&str, bool)> {
        snapshot
            .articles()
            .iter()
            .map(|m| (m.id().as_str(), m.favorited))
            .collect()
    }

    #[test]
    fn test_merge_orders_newest_first() {
        let snapshot = merge(
            vec![article("a1", 100), article("a2", 200)],
            &HashSet::new(),
            None,
        );

        assert_eq!(ids(&snapshot), vec![("a2", false), ("a1", false)]);
    }

    #[test]
    fn test_merge_applies_favorite_flags() {
        let favorites: HashSet<ArticleId> = [ArticleId::from("a1")].into_iter().collect();
        let snapshot = merge(
            vec![article("a1", 100), article("a2", 200)],
            &favorites,
            None,
        );

        assert_eq!(ids(&snapshot), vec![("a2", false), ("a1", true)]);
    }

    #[test]
    fn test_merge_keeps_first_duplicate() {
        let mut first = article("a1", 100);
        first.title = "first".to_string();
        let mut second = article("a1", 300);
        second.title = "second".to_string();

        let snapshot = merge(vec![first, article("a2", 200), second], &HashSet::new(), None);

        assert_eq!(snapshot.len(), 2);
        let a1 = snapshot.get(&ArticleId::from("a1")).unwrap();
        assert_eq!(a1.article.title, "first");
        assert_eq!(a1.article.published_at.timestamp(), 100);
    }

    #[test]
    fn test_merge_ignores_favorites_without_article() {
        let favorites: HashSet<ArticleId> = [ArticleId::from("gone"), ArticleId::from("a1")]
            .into_iter()
            .collect();
        let snapshot = merge(vec![article("a1", 100)], &favorites, None);

        assert_eq!(ids(&snapshot), vec![("a1", true)]);
        assert!(!snapshot.contains(&ArticleId::from("gone")));
    }

    #[test]
    fn test_merge_breaks_date_ties_by_id() {
        let snapshot = merge(
            vec![article("b", 100), article("c", 100), article("a", 100)],
            &HashSet::new(),
            None,
        );

        let order: Vec<&str> = snapshot.articles().iter().map(|m| m.id().as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_merge_empty_fetch() {
        let favorites: HashSet<ArticleId> = [ArticleId::from("a1")].into_iter().collect();
        let fetched_at = Utc::now();
        let snapshot = merge(vec![], &favorites, Some(fetched_at));

        assert!(snapshot.is_empty());
        assert_eq!(snapshot.fetched_at, Some(fetched_at));
    }
}
