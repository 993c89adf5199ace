//! Core types for article-repo

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// Stable identifier for an article, unique per news source
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    /// Create a new ArticleId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ArticleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ArticleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<ArticleId> for String {
    fn from(id: ArticleId) -> Self {
        id.0
    }
}

impl PartialEq<&str> for ArticleId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for ArticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Implement sqlx Type, Encode, and Decode for database operations
impl sqlx::Type<sqlx::Sqlite> for ArticleId {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for ArticleId {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, Box<dyn std::error::Error + Send + Sync>> {
        sqlx::Encode::<sqlx::Sqlite>::encode_by_ref(&self.0, buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for ArticleId {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <String as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        Ok(Self(id))
    }
}

/// Media/collection tag of an article
///
/// Known tags map to variants; anything else is kept verbatim in [`Media::Other`]
/// so a new upstream tag never fails decoding.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Media {
    /// Blog post
    Blog,
    /// Video
    Video,
    /// Podcast episode
    Podcast,
    /// Unrecognized tag, preserved as received
    Other(String),
}

impl Media {
    /// Tag string as received from the source
    pub fn as_str(&self) -> &str {
        match self {
            Media::Blog => "BLOG",
            Media::Video => "VIDEO",
            Media::Podcast => "PODCAST",
            Media::Other(tag) => tag,
        }
    }
}

impl From<String> for Media {
    fn from(tag: String) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "BLOG" => Media::Blog,
            "VIDEO" => Media::Video,
            "PODCAST" => Media::Podcast,
            _ => Media::Other(tag),
        }
    }
}

impl From<&str> for Media {
    fn from(tag: &str) -> Self {
        Media::from(tag.to_string())
    }
}

impl From<Media> for String {
    fn from(media: Media) -> Self {
        media.as_str().to_string()
    }
}

impl std::fmt::Display for Media {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Title and link for one locale
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedContent {
    /// Localized title
    pub title: String,
    /// Localized link (URI string)
    pub link: String,
}

/// Article metadata as fetched from the news source
///
/// Articles are immutable values: a refresh replaces them wholesale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Stable identifier
    pub id: ArticleId,
    /// Title
    pub title: String,
    /// Short summary
    #[serde(default)]
    pub summary: String,
    /// Link to the article (URI string)
    pub link: String,
    /// Optional image URL
    #[serde(default)]
    pub image_url: Option<String>,
    /// Media/collection tag
    pub media: Media,
    /// Publication time
    pub published_at: DateTime<Utc>,
    /// Localized title/link keyed by locale code (at least one entry)
    pub localized_contents: BTreeMap<String, LocalizedContent>,
}

impl Article {
    /// Reject articles that break the data model guarantees
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Deserialize`](crate::FetchError::Deserialize) if the id is
    /// empty or no localized contents are present.
    pub fn validate(&self) -> std::result::Result<(), crate::FetchError> {
        if self.id.as_str().trim().is_empty() {
            return Err(crate::FetchError::Deserialize(format!(
                "article '{}' has an empty id",
                self.title
            )));
        }
        if self.localized_contents.is_empty() {
            return Err(crate::FetchError::Deserialize(format!(
                "article {} has no localized contents",
                self.id
            )));
        }
        Ok(())
    }

    /// Localized contents for `locale`, falling back to `default_locale`, then the first locale
    ///
    /// Returns `None` only for an article that failed [`Article::validate`].
    pub fn contents_for(&self, locale: &str, default_locale: &str) -> Option<&LocalizedContent> {
        self.localized_contents
            .get(locale)
            .or_else(|| self.localized_contents.get(default_locale))
            .or_else(|| self.localized_contents.values().next())
    }
}

/// An article paired with its current favorite flag
///
/// Recomputed on every merge; never stored on its own.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MergedArticle {
    /// The article as last fetched
    pub article: Article,
    /// Whether the current user favorited it
    pub favorited: bool,
}

impl MergedArticle {
    /// Article id
    pub fn id(&self) -> &ArticleId {
        &self.article.id
    }
}

/// Ordered, de-duplicated view of merged articles
///
/// Ordered by `published_at` descending, ties broken by `id` ascending.
/// Shared as `Arc<RepositorySnapshot>` and never mutated once published.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RepositorySnapshot {
    articles: Vec<MergedArticle>,
    /// When the fetch behind this snapshot completed (`None` before the first refresh)
    pub fetched_at: Option<DateTime<Utc>>,
}

impl RepositorySnapshot {
    /// Empty snapshot used before the first successful refresh
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Build a snapshot, sorting entries into snapshot order
    pub(crate) fn from_merged(
        mut articles: Vec<MergedArticle>,
        fetched_at: Option<DateTime<Utc>>,
    ) -> Self {
        articles.sort_by(|a, b| {
            b.article
                .published_at
                .cmp(&a.article.published_at)
                .then_with(|| a.article.id.cmp(&b.article.id))
        });
        Self {
            articles,
            fetched_at,
        }
    }

    /// Copy of this snapshot with one entry's favorite flag replaced
    ///
    /// Ordering is unaffected since the flag takes no part in it.
    pub(crate) fn with_favorite(
        &self,
        id: &ArticleId,
        favorited: bool,
    ) -> Option<(Self, MergedArticle)> {
        let index = self.articles.iter().position(|m| m.id() == id)?;
        let mut articles = self.articles.clone();
        articles[index] = MergedArticle {
            article: articles[index].article.clone(),
            favorited,
        };
        let updated = articles[index].clone();
        Some((
            Self {
                articles,
                fetched_at: self.fetched_at,
            },
            updated,
        ))
    }

    /// Merged articles in snapshot order
    pub fn articles(&self) -> &[MergedArticle] {
        &self.articles
    }

    /// Number of articles
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Whether the snapshot has no articles
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Look up an article by id
    pub fn get(&self, id: &ArticleId) -> Option<&MergedArticle> {
        self.articles.iter().find(|m| m.id() == id)
    }

    /// Whether `id` is present
    pub fn contains(&self, id: &ArticleId) -> bool {
        self.get(id).is_some()
    }

    /// Favorited entries in snapshot order
    pub fn favorites(&self) -> impl Iterator<Item = &MergedArticle> {
        self.articles.iter().filter(|m| m.favorited)
    }

    /// Ids of favorited entries
    pub fn favorite_ids(&self) -> HashSet<ArticleId> {
        self.favorites().map(|m| m.id().clone()).collect()
    }
}

impl<'a> IntoIterator for &'a RepositorySnapshot {
    type Item = &'a MergedArticle;
    type IntoIter = std::slice::Iter<'a, MergedArticle>;

    fn into_iter(self) -> Self::IntoIter {
        self.articles.iter()
    }
}
