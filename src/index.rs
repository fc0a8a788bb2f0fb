//! Index Store: the loaded `articles-index.json` snapshot.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::model::{ArticleIndexEntry, ArticlesIndex};
use crate::query;
use crate::source::{ArticleSource, SourceError};

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("duplicate article id in index: {0}")]
    DuplicateId(String),
}

/// Reject indexes that break the unique-id invariant.
pub fn validate(index: &ArticlesIndex) -> Result<(), IndexError> {
    let mut seen = HashSet::with_capacity(index.articles.len());
    for entry in &index.articles {
        if !seen.insert(entry.id.as_str()) {
            return Err(IndexError::DuplicateId(entry.id.clone()));
        }
    }
    Ok(())
}

/// Holds the article index for the process lifetime.
///
/// The first successful [`load`](Self::load) pins the snapshot; failures degrade to the
/// empty index and are retried on the next call. Snapshots are never patched in place:
/// [`reload`](Self::reload) swaps in a whole new one.
pub struct IndexStore<S> {
    source: S,
    current: RwLock<Option<Arc<ArticlesIndex>>>,
    empty: Arc<ArticlesIndex>,
    /// Serializes transport calls so concurrent first loads share one fetch.
    load_gate: Mutex<()>,
}

impl<S: ArticleSource> IndexStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: RwLock::new(None),
            empty: Arc::new(ArticlesIndex::default()),
            load_gate: Mutex::new(()),
        }
    }

    pub async fn load(&self) -> Arc<ArticlesIndex> {
        if let Some(index) = self.loaded() {
            return index;
        }

        let _gate = self.load_gate.lock().await;
        if let Some(index) = self.loaded() {
            return index;
        }

        match self.fetch().await {
            Ok(index) => self.replace(index),
            Err(e) => {
                warn!(error = %e, "article index unavailable, serving empty catalog");
                Arc::clone(&self.empty)
            }
        }
    }

    /// Fetch the index again. The previous snapshot survives a failed reload.
    pub async fn reload(&self) -> Result<Arc<ArticlesIndex>, IndexError> {
        let _gate = self.load_gate.lock().await;
        let index = self.fetch().await?;
        Ok(self.replace(index))
    }

    /// Current snapshot, or the empty index before the first successful load.
    pub fn snapshot(&self) -> Arc<ArticlesIndex> {
        self.loaded().unwrap_or_else(|| Arc::clone(&self.empty))
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded().is_some()
    }

    /// Whether a load or reload currently holds the transport.
    pub fn is_loading(&self) -> bool {
        self.load_gate.try_lock().is_err()
    }

    pub fn all_articles(&self) -> Vec<ArticleIndexEntry> {
        self.snapshot().articles.clone()
    }

    pub fn total_count(&self) -> usize {
        self.snapshot().meta.total_articles
    }

    pub fn unique_genres(&self) -> Vec<String> {
        query::unique_genres(&self.snapshot().articles)
    }

    async fn fetch(&self) -> Result<ArticlesIndex, IndexError> {
        let index = self.source.fetch_index().await?;
        validate(&index)?;
        if index.meta.total_articles != index.articles.len() {
            debug!(
                declared = index.meta.total_articles,
                actual = index.articles.len(),
                "index meta count differs from article list"
            );
        }
        Ok(index)
    }

    fn loaded(&self) -> Option<Arc<ArticlesIndex>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, index: ArticlesIndex) -> Arc<ArticlesIndex> {
        let index = Arc::new(index);
        debug!(articles = index.articles.len(), "article index loaded");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&index));
        index
    }
}
