//! Content Fetcher/Cache: per-article full text, fetched lazily and kept for the process lifetime.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tracing::{debug, warn};

use crate::model::ArticleFullContent;
use crate::source::ArticleSource;

type PendingFetch = Shared<BoxFuture<'static, Option<Arc<ArticleFullContent>>>>;

#[derive(Default)]
struct CacheState {
    loaded: HashMap<String, Arc<ArticleFullContent>>,
    in_flight: HashMap<String, PendingFetch>,
}

enum Lookup {
    Ready(Arc<ArticleFullContent>),
    Pending(PendingFetch),
    Started(PendingFetch),
}

/// Deduplicating content cache.
///
/// At most one transport call per id is in flight; concurrent callers await the same
/// shared future. Successes move into `loaded` and are never evicted. Failures resolve
/// to `None` and leave no trace, so the next request for that id fetches again.
///
/// Every fetch runs on its own tokio task, so dropping a caller's future does not cancel
/// it and the result still lands in `loaded`.
pub struct ContentCache<S> {
    source: S,
    state: Arc<Mutex<CacheState>>,
}

impl<S: ArticleSource> ContentCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    pub async fn fetch_content(&self, id: &str) -> Option<Arc<ArticleFullContent>> {
        match self.get_or_create_pending(id) {
            Lookup::Ready(content) => Some(content),
            Lookup::Pending(pending) | Lookup::Started(pending) => pending.await,
        }
    }

    /// Start fetching `id` in the background unless it is already loaded or in flight.
    ///
    /// Must be called from within a tokio runtime.
    pub fn preload(&self, id: &str) {
        if let Lookup::Started(_) = self.get_or_create_pending(id) {
            debug!(id, "preloading article content");
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<ArticleFullContent>> {
        lock(&self.state).loaded.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        lock(&self.state).loaded.contains_key(id)
    }

    pub fn is_in_flight(&self, id: &str) -> bool {
        lock(&self.state).in_flight.contains_key(id)
    }

    pub fn len(&self) -> usize {
        lock(&self.state).loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Must be called from within a tokio runtime: a newly created fetch is spawned.
    fn get_or_create_pending(&self, id: &str) -> Lookup {
        let pending = {
            let mut state = lock(&self.state);
            if let Some(content) = state.loaded.get(id) {
                debug!(id, "content cache hit");
                return Lookup::Ready(Arc::clone(content));
            }
            if let Some(pending) = state.in_flight.get(id) {
                return Lookup::Pending(pending.clone());
            }

            let pending = self.start_fetch(id);
            state.in_flight.insert(id.to_string(), pending.clone());
            pending
        };

        tokio::spawn(pending.clone());
        Lookup::Started(pending)
    }

    fn start_fetch(&self, id: &str) -> PendingFetch {
        let source = self.source.clone();
        let state = Arc::clone(&self.state);
        let id = id.to_string();

        async move {
            let outcome = source.fetch_content(&id).await;

            let mut state = lock(&state);
            state.in_flight.remove(&id);
            match outcome {
                Ok(content) => {
                    debug!(id = %id, "article content loaded");
                    let content = Arc::new(content);
                    state.loaded.insert(id, Arc::clone(&content));
                    Some(content)
                }
                Err(e) => {
                    warn!(id = %id, error = %e, "article content unavailable");
                    None
                }
            }
        }
        .boxed()
        .shared()
    }
}

fn lock(state: &Mutex<CacheState>) -> MutexGuard<'_, CacheState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
