//! Remote news sources
//!
//! The core abstraction is the [`RemoteNewsSource`] trait. Sources are
//! stateless: no caching or pagination. The HTTP sources may retry transient
//! failures per [`RetryConfig`](crate::config::RetryConfig); the repository only
//! sees the final result.
//!
//! - [`HttpNewsSource`]: JSON endpoint returning `{"articles": [...]}`
//! - [`FeedNewsSource`]: RSS 2.0 or Atom feed
//! - [`StaticNewsSource`]: fixed in-memory list

mod feed;
mod fixed;
mod http;
mod traits;

pub use feed::FeedNewsSource;
pub use fixed::StaticNewsSource;
pub use http::HttpNewsSource;
pub use traits::RemoteNewsSource;

use crate::config::{Config, SourceFormat};
use crate::error::{Error, FetchError, Result};
use std::sync::Arc;

/// Build the source described by `config.source`
///
/// # Errors
///
/// Returns [`Error::Config`] if the HTTP client cannot be created.
pub fn from_config(config: &Config) -> Result<Arc<dyn RemoteNewsSource>> {
    let source: Arc<dyn RemoteNewsSource> = match config.source.format {
        SourceFormat::Json => Arc::new(HttpNewsSource::new(
            config.source.clone(),
            config.default_locale.clone(),
        )?),
        SourceFormat::Feed => Arc::new(FeedNewsSource::new(
            config.source.clone(),
            config.default_locale.clone(),
        )?),
    };
    Ok(source)
}

/// HTTP client shared by the network sources
pub(crate) fn build_client(config: &crate::config::SourceConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| Error::Config {
            message: format!("Failed to create HTTP client: {}", e),
            key: Some("source".to_string()),
        })
}

/// GET `url` and return the body, treating non-2xx statuses as network failures
pub(crate) async fn fetch_text(
    client: &reqwest::Client,
    url: &str,
) -> std::result::Result<String, FetchError> {
    let response = client.get(url).send().await?;

    // Check HTTP status before trying to read the body
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Network(format!(
            "HTTP {} from {}",
            status.as_u16(),
            url
        )));
    }

    let body = response.text().await?;
    Ok(body)
}
