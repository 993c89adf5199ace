//! Custom test assertions for integration tests

use std::sync::Arc;
use std::time::Duration;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::UnboundedReceiverStream;

use article_repo::RepositorySnapshot;

/// Ids of `snapshot` in order, paired with their favorite flag
pub fn flags(snapshot: &RepositorySnapshot) -> Vec<(String, bool)> {
    snapshot
        .articles()
        .iter()
        .map(|m| (m.id().to_string(), m.favorited))
        .collect()
}

/// Wait for the next snapshot matching `predicate`
///
/// Panics if the stream ends or nothing matches within `timeout`.
pub async fn wait_for_snapshot<F>(
    updates: &mut UnboundedReceiverStream<Arc<RepositorySnapshot>>,
    timeout: Duration,
    predicate: F,
) -> Arc<RepositorySnapshot>
where
    F: Fn(&RepositorySnapshot) -> bool,
{
    tokio::time::timeout(timeout, async {
        while let Some(snapshot) = updates.next().await {
            if predicate(&*snapshot) {
                return snapshot;
            }
        }
        panic!("update stream ended before a matching snapshot arrived");
    })
    .await
    .unwrap_or_else(|_| panic!("no matching snapshot within {:?}", timeout))
}
