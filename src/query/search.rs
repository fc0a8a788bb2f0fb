use crate::Lang;
use crate::model::ArticleIndexEntry;
use crate::text::nfc;

/// Trim, compose (NFC) and lowercase a free-text query. Blank queries normalize to `None`.
pub fn normalize_query(query: &str) -> Option<String> {
    let q = nfc(query.trim()).to_lowercase();
    (!q.is_empty()).then_some(q)
}

/// Substring match of an already-normalized `needle` against the article's teaser in `lang`
/// (title, description, excerpt, tags) and its language-neutral tags and creators.
pub fn matches_query(entry: &ArticleIndexEntry, needle: &str, lang: Lang) -> bool {
    let teaser = entry.localized(lang);
    let contains = |haystack: &str| nfc(haystack).to_lowercase().contains(needle);

    contains(&teaser.title)
        || contains(&teaser.description)
        || contains(&teaser.excerpt)
        || teaser.tags.iter().any(|t| contains(t))
        || entry.metadata.tags.iter().any(|t| contains(t))
        || entry.metadata.creators.iter().any(|c| contains(c))
}

/// Articles matching `query` in index order. A blank query matches nothing.
pub fn search<'a>(
    articles: &'a [ArticleIndexEntry],
    query: &str,
    lang: Lang,
) -> Vec<&'a ArticleIndexEntry> {
    let Some(needle) = normalize_query(query) else {
        return Vec::new();
    };
    articles
        .iter()
        .filter(|a| matches_query(a, &needle, lang))
        .collect()
}
