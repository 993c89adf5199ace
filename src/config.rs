//! Configuration types for article-repo

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Top-level configuration
///
/// Every field has a default, so an empty JSON object deserializes into a
/// usable configuration pointing at the default news endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Remote news source settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Favorite store settings
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// Locale used when a requested locale is missing from an article (default: "ja")
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            persistence: PersistenceConfig::default(),
            default_locale: default_locale(),
        }
    }
}

impl Config {
    /// Check settings that would otherwise fail later at first use
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.source.url).map_err(|e| Error::Config {
            message: format!("invalid source URL '{}': {}", self.source.url, e),
            key: Some("source.url".to_string()),
        })?;

        if self.source.timeout.is_zero() {
            return Err(Error::Config {
                message: "timeout must be greater than zero".to_string(),
                key: Some("source.timeout".to_string()),
            });
        }

        if self.source.retry.max_attempts == 0 {
            return Err(Error::Config {
                message: "max_attempts must be at least 1".to_string(),
                key: Some("source.retry.max_attempts".to_string()),
            });
        }

        let multiplier = self.source.retry.backoff_multiplier;
        if !multiplier.is_finite() || multiplier < 1.0 {
            return Err(Error::Config {
                message: format!(
                    "backoff_multiplier must be a finite number >= 1.0, got {}",
                    multiplier
                ),
                key: Some("source.retry.backoff_multiplier".to_string()),
            });
        }

        if self.persistence.user_id.trim().is_empty() {
            return Err(Error::Config {
                message: "user_id must not be empty".to_string(),
                key: Some("persistence.user_id".to_string()),
            });
        }

        if self.default_locale.trim().is_empty() {
            return Err(Error::Config {
                message: "default_locale must not be empty".to_string(),
                key: Some("default_locale".to_string()),
            });
        }

        Ok(())
    }
}

/// Wire format served by the news endpoint
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// JSON document with an `articles` array
    #[default]
    Json,
    /// RSS 2.0 or Atom feed
    Feed,
}

/// Remote news source configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Endpoint URL
    #[serde(default = "default_source_url")]
    pub url: String,

    /// Wire format of the endpoint
    #[serde(default)]
    pub format: SourceFormat,

    /// Per-request timeout (default: 30 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// User-Agent header sent with requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Media tag assigned to entries of an RSS/Atom feed (default: "BLOG")
    #[serde(default = "default_media_tag")]
    pub media_tag: String,

    /// Retry behavior for transient fetch failures
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            format: SourceFormat::default(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            media_tag: default_media_tag(),
            retry: RetryConfig::default(),
        }
    }
}

/// Retry configuration for the HTTP news sources
///
/// The default performs a single attempt. Retries happen inside the source and
/// are invisible to the repository, which only sees the final outcome.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum attempts including the first (default: 1)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial delay before the first retry (default: 1 second)
    #[serde(default = "default_initial_delay", with = "duration_serde")]
    pub initial_delay: Duration,

    /// Maximum delay between retries (default: 30 seconds)
    #[serde(default = "default_max_delay", with = "duration_serde")]
    pub max_delay: Duration,

    /// Multiplier applied to the delay after each retry (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: true)
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

/// Favorite store configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Database path (default: "./article-repo.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// User whose favorites are read and written (default: "default")
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            user_id: default_user_id(),
        }
    }
}

// Default value functions
fn default_source_url() -> String {
    "https://ssot-api-staging.an.r.appspot.com/feeds/recent".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    concat!("article-repo/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_media_tag() -> String {
    "BLOG".to_string()
}

fn default_locale() -> String {
    "ja".to_string()
}

fn default_database_path() -> PathBuf {
    PathBuf::from("article-repo.db")
}

fn default_user_id() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    1
}

fn default_initial_delay() -> Duration {
    Duration::from_secs(1)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(30)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
