use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::model::ArticleIndexEntry;
use crate::text::nfc;

pub const POPULAR_TAG_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Sorted, deduplicated genre tokens across all articles, in NFC.
pub fn unique_genres(articles: &[ArticleIndexEntry]) -> Vec<String> {
    articles
        .iter()
        .flat_map(|a| a.metadata.genre_tokens())
        .map(nfc)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

/// Most frequent metadata tags, highest count first; equal counts keep the order in which
/// the tags first appeared.
pub fn popular_tags(articles: &[ArticleIndexEntry], limit: usize) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for tag in articles
        .iter()
        .flat_map(|a| &a.metadata.tags)
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
    {
        match positions.get(tag) {
            Some(&i) => counts[i].count += 1,
            None => {
                positions.insert(tag, counts.len());
                counts.push(TagCount {
                    tag: tag.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Every distinct trimmed creator name in NFC, sorted.
pub fn all_authors(articles: &[ArticleIndexEntry]) -> Vec<String> {
    articles
        .iter()
        .flat_map(|a| &a.metadata.creators)
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(nfc)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}
