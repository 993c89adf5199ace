//! Test configuration helpers for repositories backed by a mock server and a temp database

use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use article_repo::{ArticleRepository, Config, PersistenceConfig, SourceConfig, SourceFormat};

/// Path the mock news endpoint is served on
pub const FEED_PATH: &str = "/feeds/recent";

/// Config pointing at `server` and a database inside `db_dir`
pub fn test_config(server: &MockServer, db_dir: &Path, format: SourceFormat) -> Config {
    Config {
        source: SourceConfig {
            url: format!("{}{}", server.uri(), FEED_PATH),
            format,
            timeout: Duration::from_secs(5),
            ..Default::default()
        },
        persistence: PersistenceConfig {
            database_path: db_dir.join("favorites.db"),
            user_id: "tester".to_string(),
        },
        ..Default::default()
    }
}

/// Serve `body` from the feed path until the server is reset
pub async fn serve_body(server: &MockServer, body: impl Into<String>) {
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.into()))
        .mount(server)
        .await;
}

/// Serve an HTTP error status from the feed path until the server is reset
pub async fn serve_status(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Create a JSON-backed repository with its own temp database
///
/// The returned [`TempDir`] must outlive the repository.
pub async fn create_test_repository(server: &MockServer) -> (ArticleRepository, TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let repository = open_repository(server, temp_dir.path()).await;
    (repository, temp_dir)
}

/// Open a JSON-backed repository on an existing database directory
pub async fn open_repository(server: &MockServer, db_dir: &Path) -> ArticleRepository {
    ArticleRepository::from_config(&test_config(server, db_dir, SourceFormat::Json))
        .await
        .unwrap()
}
