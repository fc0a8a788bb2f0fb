//! Merge Layer: combine an index entry with fetched content into an [`Article`].

use crate::model::{Article, ArticleFullContent, ArticleIndexEntry, ArticlesIndex};

/// Outcome of looking an article up.
///
/// `Pending` carries the index-only placeholder so callers can render the teaser while
/// content loads. `Loading` means no index snapshot is available yet, so nothing can be
/// said about the id; `NotFound` is only reported against a loaded index.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(Article),
    Pending(Article),
    Loading,
    NotFound,
}

impl Resolution {
    pub fn article(&self) -> Option<&Article> {
        match self {
            Resolution::Found(a) | Resolution::Pending(a) => Some(a),
            Resolution::Loading | Resolution::NotFound => None,
        }
    }

    pub fn into_article(self) -> Option<Article> {
        match self {
            Resolution::Found(a) | Resolution::Pending(a) => Some(a),
            Resolution::Loading | Resolution::NotFound => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Resolution::Pending(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resolution::Loading)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolution::NotFound)
    }
}

/// Copy `entry`, replacing only the `content` field of each language block.
pub fn merge(entry: &ArticleIndexEntry, content: &ArticleFullContent) -> Article {
    let mut article = Article::from(entry);
    article.vi.content = Some(content.vi.content.clone());
    article.en.content = Some(content.en.content.clone());
    article
}

/// Resolve `id` against an index snapshot and whatever content is already cached.
///
/// Content without a matching index entry is not an article.
pub fn resolve(
    index: &ArticlesIndex,
    content: Option<&ArticleFullContent>,
    id: &str,
) -> Resolution {
    let Some(entry) = index.get(id) else {
        return Resolution::NotFound;
    };
    match content {
        Some(content) => Resolution::Found(merge(entry, content)),
        None => Resolution::Pending(Article::from(entry)),
    }
}
