//! Fixtures shared by unit tests.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;

use crate::model::{
    ArticleFullContent, ArticleIndexEntry, ArticleMetadata, ArticlesIndex, ContentBody, IndexMeta,
    LocalizedTeaser,
};
use crate::source::{ArticleSource, SourceError};

type Queue<T> = Mutex<VecDeque<Result<T, SourceError>>>;

struct MockState {
    index: Queue<ArticlesIndex>,
    contents: Mutex<HashMap<String, VecDeque<Result<ArticleFullContent, SourceError>>>>,
    index_calls: AtomicUsize,
    content_calls: AtomicUsize,
    gate: Semaphore,
}

/// Scripted source: answers are queued per call; unscripted content requests get a 404.
#[derive(Clone)]
pub(crate) struct MockSource {
    state: Arc<MockState>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::with_permits(Semaphore::MAX_PERMITS)
    }

    /// Content fetches block until [`release`](Self::release) is called.
    pub fn held() -> Self {
        Self::with_permits(0)
    }

    fn with_permits(permits: usize) -> Self {
        Self {
            state: Arc::new(MockState {
                index: Mutex::new(VecDeque::new()),
                contents: Mutex::new(HashMap::new()),
                index_calls: AtomicUsize::new(0),
                content_calls: AtomicUsize::new(0),
                gate: Semaphore::new(permits),
            }),
        }
    }

    pub fn release(&self) {
        self.state.gate.add_permits(1024);
    }

    pub fn push_index(&self, result: Result<ArticlesIndex, SourceError>) {
        self.state.index.lock().unwrap().push_back(result);
    }

    pub fn push_content(&self, id: &str, result: Result<ArticleFullContent, SourceError>) {
        self.state
            .contents
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_default()
            .push_back(result);
    }

    pub fn index_calls(&self) -> usize {
        self.state.index_calls.load(Ordering::SeqCst)
    }

    pub fn content_calls(&self) -> usize {
        self.state.content_calls.load(Ordering::SeqCst)
    }
}

impl ArticleSource for MockSource {
    fn fetch_index(&self) -> impl Future<Output = Result<ArticlesIndex, SourceError>> + Send {
        let state = Arc::clone(&self.state);
        async move {
            state.index_calls.fetch_add(1, Ordering::SeqCst);
            let next = state.index.lock().unwrap().pop_front();
            next.unwrap_or(Err(SourceError::Status(404)))
        }
    }

    fn fetch_content(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<ArticleFullContent, SourceError>> + Send {
        let state = Arc::clone(&self.state);
        let id = id.to_string();
        async move {
            state.content_calls.fetch_add(1, Ordering::SeqCst);
            let _permit = state.gate.acquire().await.expect("gate closed");
            let next = state
                .contents
                .lock()
                .unwrap()
                .get_mut(&id)
                .and_then(VecDeque::pop_front);
            next.unwrap_or(Err(SourceError::Status(404)))
        }
    }
}

pub(crate) fn teaser(title: &str) -> LocalizedTeaser {
    LocalizedTeaser {
        title: title.to_string(),
        description: format!("{title} description"),
        excerpt: format!("{title} excerpt"),
        ..Default::default()
    }
}

pub(crate) fn entry(id: &str) -> ArticleIndexEntry {
    ArticleIndexEntry {
        id: id.to_string(),
        metadata: ArticleMetadata {
            title_vi: format!("{id} vi"),
            title_en: format!("{id} en"),
            ..Default::default()
        },
        vi: teaser(&format!("Bài {id}")),
        en: teaser(&format!("Article {id}")),
    }
}

pub(crate) fn tagged(id: &str, genres: &str, tags: &[&str]) -> ArticleIndexEntry {
    let mut e = entry(id);
    e.metadata.genres = genres.to_string();
    e.metadata.tags = tags.iter().map(|t| t.to_string()).collect();
    e
}

pub(crate) fn index_of(articles: Vec<ArticleIndexEntry>) -> ArticlesIndex {
    ArticlesIndex {
        meta: IndexMeta {
            total_articles: articles.len(),
            ..Default::default()
        },
        articles,
    }
}

pub(crate) fn content(id: &str) -> ArticleFullContent {
    ArticleFullContent {
        id: id.to_string(),
        vi: ContentBody {
            content: format!("<p>nội dung {id}</p>"),
        },
        en: ContentBody {
            content: format!("<p>content {id}</p>"),
        },
    }
}
