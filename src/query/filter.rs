use serde::{Deserialize, Serialize};

use super::search::{matches_query, normalize_query};
use crate::Lang;
use crate::model::ArticleIndexEntry;
use crate::text::nfc;

/// Genre match is exact (in NFC) against one of the trimmed comma-separated genre tokens,
/// so `"Art"` does not match `"Arts, History"`.
pub fn matches_genre(entry: &ArticleIndexEntry, genre: &str) -> bool {
    let genre = nfc(genre.trim());
    entry.metadata.genre_tokens().any(|g| nfc(g) == genre)
}

pub fn matches_author(entry: &ArticleIndexEntry, author: &str) -> bool {
    let author = nfc(author.trim());
    entry.metadata.creators.iter().any(|c| nfc(c.trim()) == author)
}

pub fn filter_by_genre<'a>(
    articles: &'a [ArticleIndexEntry],
    genre: &str,
) -> Vec<&'a ArticleIndexEntry> {
    articles.iter().filter(|a| matches_genre(a, genre)).collect()
}

pub fn filter_by_author<'a>(
    articles: &'a [ArticleIndexEntry],
    author: &str,
) -> Vec<&'a ArticleIndexEntry> {
    articles.iter().filter(|a| matches_author(a, author)).collect()
}

/// Listing filter: each present criterion narrows the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrowseFilter {
    pub query: Option<String>,
    pub genre: Option<String>,
    pub author: Option<String>,
}

impl BrowseFilter {
    /// Lowercase + trim the query, trim genre and author, compose everything to NFC and
    /// drop blank criteria. Equal filters normalize to equal values, which makes them usable
    /// as cache keys.
    pub fn normalized(&self) -> Self {
        let trimmed = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| nfc(s).into_owned())
        };
        Self {
            query: self.query.as_deref().and_then(normalize_query),
            genre: trimmed(&self.genre),
            author: trimmed(&self.author),
        }
    }

    pub fn is_empty(&self) -> bool {
        let normalized = self.normalized();
        normalized.query.is_none() && normalized.genre.is_none() && normalized.author.is_none()
    }
}

/// Apply a [`BrowseFilter`]. Unlike [`super::search`], a blank query keeps every article.
pub fn browse<'a>(
    articles: &'a [ArticleIndexEntry],
    filter: &BrowseFilter,
    lang: Lang,
) -> Vec<&'a ArticleIndexEntry> {
    let filter = filter.normalized();
    articles
        .iter()
        .filter(|a| {
            filter
                .query
                .as_deref()
                .is_none_or(|q| matches_query(a, q, lang))
        })
        .filter(|a| filter.genre.as_deref().is_none_or(|g| matches_genre(a, g)))
        .filter(|a| filter.author.as_deref().is_none_or(|au| matches_author(a, au)))
        .collect()
}
