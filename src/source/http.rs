//! JSON news endpoint source

use super::traits::RemoteNewsSource;
use crate::config::SourceConfig;
use crate::error::{FetchError, Result};
use crate::retry::fetch_with_retry;
use crate::types::{Article, ArticleId, LocalizedContent, Media};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Response envelope served by the news endpoint
#[derive(Debug, Deserialize)]
struct ArticlesResponse {
    articles: Vec<ArticleDto>,
}

/// One article as served on the wire
#[derive(Debug, Deserialize)]
struct ArticleDto {
    id: String,
    title: String,
    #[serde(default)]
    summary: String,
    link: String,
    #[serde(default)]
    image_url: Option<String>,
    media: String,
    published_at: DateTime<Utc>,
    #[serde(default)]
    localized_contents: BTreeMap<String, LocalizedContent>,
}

impl ArticleDto {
    /// Convert to an [`Article`], synthesizing the default locale entry when none is sent
    fn into_article(self, default_locale: &str) -> Article {
        let mut localized_contents = self.localized_contents;
        if localized_contents.is_empty() {
            localized_contents.insert(
                default_locale.to_string(),
                LocalizedContent {
                    title: self.title.clone(),
                    link: self.link.clone(),
                },
            );
        }

        Article {
            id: ArticleId::new(self.id),
            title: self.title,
            summary: self.summary,
            link: self.link,
            image_url: self.image_url.filter(|url| !url.is_empty()),
            media: Media::from(self.media),
            published_at: self.published_at,
            localized_contents,
        }
    }
}

/// Source backed by a JSON news endpoint
///
/// Expects `{"articles": [{"id", "title", "summary", "link", "image_url",
/// "media", "published_at", "localized_contents"}]}` with RFC 3339 dates.
pub struct HttpNewsSource {
    /// HTTP client with the configured timeout and user agent
    http_client: reqwest::Client,

    /// Source settings (URL, retry policy)
    config: SourceConfig,

    /// Locale used when an article carries no localized contents
    default_locale: String,
}

impl HttpNewsSource {
    /// Create a new JSON source
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created
    pub fn new(config: SourceConfig, default_locale: impl Into<String>) -> Result<Self> {
        let http_client = super::build_client(&config)?;
        Ok(Self {
            http_client,
            config,
            default_locale: default_locale.into(),
        })
    }

    /// Decode a response body into validated articles
    fn parse_articles(&self, body: &str) -> std::result::Result<Vec<Article>, FetchError> {
        let response: ArticlesResponse = serde_json::from_str(body)
            .map_err(|e| FetchError::Deserialize(format!("invalid articles payload: {}", e)))?;

        response
            .articles
            .into_iter()
            .map(|dto| {
                let article = dto.into_article(&self.default_locale);
                article.validate()?;
                Ok(article)
            })
            .collect()
    }

    async fn fetch_once(&self) -> std::result::Result<Vec<Article>, FetchError> {
        let body = super::fetch_text(&self.http_client, &self.config.url).await?;
        self.parse_articles(&body)
    }
}

#[async_trait]
impl RemoteNewsSource for HttpNewsSource {
    async fn fetch_articles(&self) -> std::result::Result<Vec<Article>, FetchError> {
        tracing::debug!(url = %self.config.url, "Fetching articles");

        let articles = fetch_with_retry(&self.config.retry, || self.fetch_once()).await?;

        tracing::debug!(count = articles.len(), "Fetched articles");
        Ok(articles)
    }

    fn name(&self) -> &'static str {
        "http-json"
    }
}
