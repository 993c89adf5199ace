use super::*;
use crate::error::{FetchError, PersistenceError};
use crate::favorites::InMemoryFavoriteStore;
use crate::source::StaticNewsSource;
use crate::types::{Article, LocalizedContent, Media};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::{mpsc, oneshot};


/// Minimal valid article published `secs` after the epoch
pub(crate) fn article(id: &str, secs: i64) -> Article {
    let link = format!("https://medium.com/droidkaigi/{}", id);
    let mut localized_contents = BTreeMap::new();
    localized_contents.insert(
        "ja".to_string(),
        LocalizedContent {
            title: format!("Article {}", id),
            link: link.clone(),
        },
    );

    Article {
        id: ArticleId::from(id),
        title: format!("Article {}", id),
        summary: String::new(),
        link,
        image_url: None,
        media: Media::Blog,
        published_at: Utc.timestamp_opt(secs, 0).unwrap(),
        localized_contents,
    }
}

/// Ids in snapshot order
fn order(snapshot: &RepositorySnapshot) -> Vec<String> {
    snapshot
        .articles()
        .iter()
        .map(|m| m.id().as_str().to_string())
        .collect()
}

/// Source that replays a fixed sequence of results
struct ScriptedSource {
    responses: std::sync::Mutex<VecDeque<std::result::Result<Vec<Article>, FetchError>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    fn new(responses: Vec<std::result::Result<Vec<Article>, FetchError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: std::sync::Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteNewsSource for ScriptedSource {
    async fn fetch_articles(&self) -> std::result::Result<Vec<Article>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Network("no scripted response".to_string())))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

type FetchResult = std::result::Result<Vec<Article>, FetchError>;
type Gate = oneshot::Sender<FetchResult>;

/// Source whose fetches block until the test releases them
///
/// Each fetch reports its call index on `started` and then waits on its own gate.
struct GatedSource {
    gates: std::sync::Mutex<VecDeque<oneshot::Receiver<FetchResult>>>,
    next_call: AtomicUsize,
    started: mpsc::UnboundedSender<usize>,
}

impl GatedSource {
    fn new(calls: usize) -> (Arc<Self>, Vec<Gate>, mpsc::UnboundedReceiver<usize>) {
        let (senders, receivers): (Vec<_>, VecDeque<_>) =
            (0..calls).map(|_| oneshot::channel()).unzip();
        let (started_tx, started_rx) = mpsc::unbounded_channel();
        let source = Arc::new(Self {
            gates: std::sync::Mutex::new(receivers),
            next_call: AtomicUsize::new(0),
            started: started_tx,
        });
        (source, senders, started_rx)
    }
}

#[async_trait]
impl RemoteNewsSource for GatedSource {
    async fn fetch_articles(&self) -> std::result::Result<Vec<Article>, FetchError> {
        let gate = self.gates.lock().unwrap().pop_front();
        let call = self.next_call.fetch_add(1, Ordering::SeqCst);
        let _ = self.started.send(call);

        match gate {
            Some(gate) => gate
                .await
                .unwrap_or_else(|_| Err(FetchError::Network("gate dropped".to_string()))),
            None => Err(FetchError::Network("no gate left".to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}

/// In-memory store that counts writes and can be told to fail
#[derive(Default)]
struct RecordingStore {
    inner: InMemoryFavoriteStore,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl RecordingStore {
    fn with_favorites(ids: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryFavoriteStore::with_favorites(ids.iter().copied()),
            ..Default::default()
        })
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl FavoriteStore for RecordingStore {
    async fn get_all(&self) -> crate::Result<HashSet<ArticleId>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable("reads disabled".to_string()).into());
        }
        self.inner.get_all().await
    }

    async fn set(&self, id: &ArticleId, favorited: bool) -> crate::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable("writes disabled".to_string()).into());
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(id, favorited).await
    }

    async fn clear(&self) -> crate::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PersistenceError::Unavailable("writes disabled".to_string()).into());
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.clear().await
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Repository over a static source and a recording store
fn repository_with(
    articles: Vec<Article>,
    favorites: &[&str],
) -> (ArticleRepository, Arc<StaticNewsSource>, Arc<RecordingStore>) {
    let source = Arc::new(StaticNewsSource::new(articles));
    let store = RecordingStore::with_favorites(favorites);
    let repository = ArticleRepository::new(source.clone(), store.clone());
    (repository, source, store)
}

/// Listener that records every snapshot it receives
fn recorder() -> (
    Arc<std::sync::Mutex<Vec<Arc<RepositorySnapshot>>>>,
    impl Fn(&Arc<RepositorySnapshot>) + Send + Sync + 'static,
) {
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |snapshot: &Arc<RepositorySnapshot>| {
        sink.lock().unwrap().push(snapshot.clone());
    })
}
