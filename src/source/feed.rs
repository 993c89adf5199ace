//! RSS/Atom feed source
//!
//! Supports both RSS 2.0 and Atom. Each feed entry becomes one [`Article`]
//! tagged with the configured media tag and carrying a single localized
//! content entry for the configured locale.

use super::traits::RemoteNewsSource;
use crate::config::SourceConfig;
use crate::error::{FetchError, Result};
use crate::retry::fetch_with_retry;
use crate::types::{Article, ArticleId, LocalizedContent, Media};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Source backed by an RSS 2.0 or Atom feed
pub struct FeedNewsSource {
    /// HTTP client for fetching the feed
    http_client: reqwest::Client,

    /// Source settings (URL, retry policy, media tag)
    config: SourceConfig,

    /// Locale the feed is written in
    locale: String,
}

/// Feed entry fields before conversion to an [`Article`]
struct FeedEntry {
    id: String,
    title: String,
    summary: String,
    link: String,
    image_url: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

impl FeedNewsSource {
    /// Create a new feed source
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: SourceConfig, locale: impl Into<String>) -> Result<Self> {
        let http_client = super::build_client(&config)?;
        Ok(Self {
            http_client,
            config,
            locale: locale.into(),
        })
    }

    /// Parse feed content, trying RSS first and falling back to Atom
    fn parse_feed(&self, content: &str) -> std::result::Result<Vec<Article>, FetchError> {
        match self.parse_as_rss(content) {
            Ok(articles) => {
                debug!(count = articles.len(), "Parsed feed as RSS");
                Ok(articles)
            }
            Err(rss_err) => {
                debug!(error = %rss_err, "Failed to parse as RSS, trying Atom");
                match self.parse_as_atom(content) {
                    Ok(articles) => {
                        debug!(count = articles.len(), "Parsed feed as Atom");
                        Ok(articles)
                    }
                    Err(atom_err) => Err(FetchError::Deserialize(format!(
                        "Failed to parse feed as RSS or Atom. RSS error: {}. Atom error: {}",
                        rss_err, atom_err
                    ))),
                }
            }
        }
    }

    /// Parse feed content as RSS
    fn parse_as_rss(&self, content: &str) -> std::result::Result<Vec<Article>, FetchError> {
        let channel = content
            .parse::<rss::Channel>()
            .map_err(|e| FetchError::Deserialize(format!("RSS parse error: {}", e)))?;

        let entries = channel.items().iter().map(|item| {
            // Prefer guid, fallback to link, then title
            let id = item
                .guid()
                .map(|g| g.value().to_string())
                .or_else(|| item.link().map(|l| l.to_string()))
                .unwrap_or_else(|| item.title().unwrap_or("").to_string());

            let published_at = item.pub_date().and_then(|date_str| {
                DateTime::parse_from_rfc2822(date_str)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            });

            let image_url = item
                .enclosure()
                .filter(|enc| enc.mime_type().starts_with("image/"))
                .map(|enc| enc.url().to_string());

            FeedEntry {
                id,
                title: item.title().unwrap_or("").to_string(),
                summary: item.description().unwrap_or("").to_string(),
                link: item.link().unwrap_or("").to_string(),
                image_url,
                published_at,
            }
        });

        Ok(self.to_articles(entries))
    }

    /// Parse feed content as Atom
    fn parse_as_atom(&self, content: &str) -> std::result::Result<Vec<Article>, FetchError> {
        let feed = atom_syndication::Feed::read_from(content.as_bytes())
            .map_err(|e| FetchError::Deserialize(format!("Atom parse error: {}", e)))?;

        let entries = feed.entries().iter().map(|entry| {
            // Publication date (prefer published, fallback to updated)
            let published_at = entry
                .published()
                .or_else(|| Some(entry.updated()))
                .and_then(|dt| {
                    DateTime::parse_from_rfc3339(&dt.to_rfc3339())
                        .ok()
                        .map(|dt| dt.with_timezone(&Utc))
                });

            // Primary link: rel="alternate" if present, else the first link
            let link = entry
                .links()
                .iter()
                .find(|link| link.rel() == "alternate")
                .or_else(|| entry.links().first())
                .map(|link| link.href().to_string())
                .unwrap_or_default();

            let image_url = entry
                .links()
                .iter()
                .find(|link| {
                    link.rel() == "enclosure"
                        && link.mime_type().is_some_and(|t| t.starts_with("image/"))
                })
                .map(|link| link.href().to_string());

            // Summary, falling back to content
            let summary = entry
                .summary()
                .map(|s| s.as_str().to_string())
                .or_else(|| {
                    entry
                        .content()
                        .and_then(|c| c.value().map(|v| v.to_string()))
                })
                .unwrap_or_default();

            FeedEntry {
                id: entry.id().to_string(),
                title: entry.title().as_str().to_string(),
                summary,
                link,
                image_url,
                published_at,
            }
        });

        Ok(self.to_articles(entries))
    }

    /// Convert parsed entries, dropping the ones without a usable id
    fn to_articles(&self, entries: impl Iterator<Item = FeedEntry>) -> Vec<Article> {
        entries
            .filter_map(|entry| {
                let mut localized_contents = BTreeMap::new();
                localized_contents.insert(
                    self.locale.clone(),
                    LocalizedContent {
                        title: entry.title.clone(),
                        link: entry.link.clone(),
                    },
                );

                let article = Article {
                    id: ArticleId::new(entry.id),
                    title: entry.title,
                    summary: entry.summary,
                    link: entry.link,
                    image_url: entry.image_url,
                    media: Media::from(self.config.media_tag.as_str()),
                    published_at: entry.published_at.unwrap_or(DateTime::UNIX_EPOCH),
                    localized_contents,
                };

                match article.validate() {
                    Ok(()) => Some(article),
                    Err(e) => {
                        warn!(error = %e, "Skipping feed entry");
                        None
                    }
                }
            })
            .collect()
    }

    async fn fetch_once(&self) -> std::result::Result<Vec<Article>, FetchError> {
        let content = super::fetch_text(&self.http_client, &self.config.url).await?;
        self.parse_feed(&content)
    }
}

#[async_trait]
impl RemoteNewsSource for FeedNewsSource {
    async fn fetch_articles(&self) -> std::result::Result<Vec<Article>, FetchError> {
        debug!(url = %self.config.url, "Checking feed");
        fetch_with_retry(&self.config.retry, || self.fetch_once()).await
    }

    fn name(&self) -> &'static str {
        "feed"
    }
}
