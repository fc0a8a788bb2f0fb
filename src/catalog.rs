//! The catalog service: the one owner of the index snapshot, the content cache and the
//! memoized query views. Presentation code shares a single instance.

use std::sync::Arc;

use tracing::debug;

use crate::Lang;
use crate::content::ContentCache;
use crate::index::{IndexError, IndexStore};
use crate::memo::Memo;
use crate::merge::{self, Resolution};
use crate::model::{Article, ArticleFullContent, ArticleIndexEntry, ArticlesIndex};
use crate::query::{self, BrowseFilter, POPULAR_TAG_LIMIT, TagCount};
use crate::source::ArticleSource;

#[derive(Debug, PartialEq, Eq, Hash)]
enum EntryView {
    Search { query: String, lang: Lang },
    Browse { filter: BrowseFilter, lang: Lang },
    Related { id: String, limit: usize },
}

#[derive(Debug, PartialEq, Eq, Hash)]
enum LabelView {
    Genres,
    Authors,
}

pub struct Catalog<S> {
    index: Arc<IndexStore<S>>,
    content: ContentCache<S>,
    entries: Memo<EntryView, Arc<[ArticleIndexEntry]>>,
    labels: Memo<LabelView, Arc<[String]>>,
    tags: Memo<usize, Arc<[TagCount]>>,
}

impl<S: ArticleSource> Catalog<S> {
    pub fn new(source: S) -> Self {
        Self {
            index: Arc::new(IndexStore::new(source.clone())),
            content: ContentCache::new(source),
            entries: Memo::new(),
            labels: Memo::new(),
            tags: Memo::new(),
        }
    }

    pub fn index_store(&self) -> &IndexStore<S> {
        &self.index
    }

    pub fn content_cache(&self) -> &ContentCache<S> {
        &self.content
    }

    /// Load the index (once). Failures degrade to an empty catalog.
    pub async fn load(&self) -> Arc<ArticlesIndex> {
        self.index.load().await
    }

    pub async fn reload(&self) -> Result<Arc<ArticlesIndex>, IndexError> {
        self.index.reload().await
    }

    pub fn snapshot(&self) -> Arc<ArticlesIndex> {
        self.index.snapshot()
    }

    pub fn total_count(&self) -> usize {
        self.index.total_count()
    }

    pub fn featured(&self, count: usize) -> Vec<ArticleIndexEntry> {
        query::featured(&self.snapshot().articles, count).to_vec()
    }

    pub fn unique_genres(&self) -> Arc<[String]> {
        self.labels
            .get_or_compute(&self.snapshot(), LabelView::Genres, |index| {
                query::unique_genres(&index.articles).into()
            })
    }

    pub fn all_authors(&self) -> Arc<[String]> {
        self.labels
            .get_or_compute(&self.snapshot(), LabelView::Authors, |index| {
                query::all_authors(&index.articles).into()
            })
    }

    pub fn popular_tags(&self) -> Arc<[TagCount]> {
        self.tags
            .get_or_compute(&self.snapshot(), POPULAR_TAG_LIMIT, |index| {
                query::popular_tags(&index.articles, POPULAR_TAG_LIMIT).into()
            })
    }

    /// Free-text search. Blank queries return nothing.
    pub fn search(&self, text: &str, lang: Lang) -> Arc<[ArticleIndexEntry]> {
        let Some(normalized) = query::normalize_query(text) else {
            return Arc::from([]);
        };
        let key = EntryView::Search {
            query: normalized,
            lang,
        };
        self.entries.get_or_compute(&self.snapshot(), key, |index| {
            owned(query::search(&index.articles, text, lang))
        })
    }

    pub fn browse(&self, filter: &BrowseFilter, lang: Lang) -> Arc<[ArticleIndexEntry]> {
        let filter = filter.normalized();
        let view = |index: &ArticlesIndex| owned(query::browse(&index.articles, &filter, lang));
        let key = EntryView::Browse {
            filter: filter.clone(),
            lang,
        };
        self.entries.get_or_compute(&self.snapshot(), key, view)
    }

    pub fn related(&self, id: &str, limit: usize) -> Arc<[ArticleIndexEntry]> {
        let key = EntryView::Related {
            id: id.to_string(),
            limit,
        };
        self.entries.get_or_compute(&self.snapshot(), key, |index| {
            owned(query::related(&index.articles, id, limit))
        })
    }

    /// Immediate lookup against the current snapshot and cached content.
    ///
    /// Until an index snapshot is available this is [`Resolution::Loading`] and the index
    /// load is started in the background; a failed load keeps it `Loading` and the next call
    /// retries. On [`Resolution::Pending`] a background content fetch is started; await
    /// [`article`](Self::article) or call `resolve` again later for the merged form.
    /// Must be called within a tokio runtime.
    pub fn resolve(&self, id: &str) -> Resolution {
        if !self.index.is_loaded() {
            self.start_load();
            return Resolution::Loading;
        }
        let content = self.content.get(id);
        let resolution = merge::resolve(&self.snapshot(), content.as_deref(), id);
        if resolution.is_pending() {
            self.content.preload(id);
        }
        resolution
    }

    /// Load the index if needed, then the article's content, and return the merged article.
    ///
    /// `None` means the id is not in the index. When content cannot be fetched the
    /// index-only article is returned.
    pub async fn article(&self, id: &str) -> Option<Article> {
        let snapshot = self.load().await;
        let entry = snapshot.get(id)?;
        match self.content.fetch_content(id).await {
            Some(content) => Some(merge::merge(entry, &content)),
            None => {
                debug!(id, "serving article without content");
                Some(Article::from(entry))
            }
        }
    }

    pub async fn fetch_content(&self, id: &str) -> Option<Arc<ArticleFullContent>> {
        self.content.fetch_content(id).await
    }

    /// Warm the content cache for `id`, e.g. on hover. Must be called within a tokio runtime.
    pub fn preload(&self, id: &str) {
        self.content.preload(id);
    }

    fn start_load(&self) {
        if self.index.is_loading() {
            return;
        }
        debug!("loading article index in the background");
        let index = Arc::clone(&self.index);
        tokio::spawn(async move {
            index.load().await;
        });
    }
}

fn owned(entries: Vec<&ArticleIndexEntry>) -> Arc<[ArticleIndexEntry]> {
    entries.into_iter().cloned().collect()
}


#[cfg(test)]
mod http_tests {
    use super::*;
    use crate::source::HttpSource;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const INDEX_BODY: &str = r#"{
        "meta": { "totalArticles": 2, "generatedAt": "2025-06-01T00:00:00Z" },
        "articles": [
            {
                "id": "chemistry-basics",
                "metadata": {
                    "titleVi": "Hóa học cơ bản", "titleEn": "Chemistry Basics",
                    "genres": "Hóa học", "difficultyLevel": "Cơ bản",
                    "tags": ["atoms", "energy"], "creators": ["Lan"],
                    "createdAt": "2024-05-01T10:00:00", "length": 3000, "page": 1
                },
                "vi": { "title": "Hóa học cơ bản", "description": "", "excerpt": "", "tags": [], "genres": ["Hóa học"] },
                "en": { "title": "Chemistry Basics", "description": "", "excerpt": "", "tags": [], "genres": ["Chemistry"] }
            },
            {
                "id": "stars",
                "metadata": {
                    "titleVi": "Các vì sao", "titleEn": "Stars",
                    "genres": "Thiên văn học", "difficultyLevel": "Nâng cao",
                    "tags": ["energy"], "creators": ["Minh"],
                    "createdAt": "2024-06-01T10:00:00", "length": 9000, "page": 2
                },
                "vi": { "title": "Các vì sao", "description": "", "excerpt": "", "tags": [], "genres": [] },
                "en": { "title": "Stars", "description": "", "excerpt": "", "tags": [], "genres": [] }
            }
        ]
    }"#;

    const CONTENT_BODY: &str = r#"{
        "id": "chemistry-basics",
        "vi": { "content": "<p>Nguyên tử</p>" },
        "en": { "content": "<p>Atoms</p>" }
    }"#;

    async fn catalog_for(server: &MockServer) -> Catalog<HttpSource> {
        let source = HttpSource::new(reqwest::Client::new(), &server.uri()).unwrap();
        Catalog::new(source)
    }

    #[tokio::test]
    async fn concurrent_article_requests_issue_one_content_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles-index.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(INDEX_BODY))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/articles/chemistry-basics.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(CONTENT_BODY)
                    .set_delay(Duration::from_millis(100)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let catalog = catalog_for(&server).await;
        let (first, second) = tokio::join!(
            catalog.article("chemistry-basics"),
            catalog.article("chemistry-basics")
        );

        let first = first.unwrap();
        assert_eq!(first, second.unwrap());
        assert_eq!(first.content(Lang::En), Some("<p>Atoms</p>"));

        let cached = catalog.article("chemistry-basics").await.unwrap();
        assert_eq!(cached.content(Lang::Vi), Some("<p>Nguyên tử</p>"));
        assert_eq!(catalog.total_count(), 2);
    }

    #[tokio::test]
    async fn failed_content_fetch_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles-index.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(INDEX_BODY))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/articles/stars.json"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;

        let catalog = catalog_for(&server).await;
        assert!(catalog.article("stars").await.unwrap().content(Lang::En).is_none());
        assert!(catalog.article("stars").await.unwrap().content(Lang::En).is_none());
    }

    #[tokio::test]
    async fn unreachable_index_degrades_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles-index.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let catalog = catalog_for(&server).await;
        let index = catalog.load().await;
        assert!(index.articles.is_empty());
        assert!(catalog.article("stars").await.is_none());
    }
}
