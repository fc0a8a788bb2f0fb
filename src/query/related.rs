use std::collections::HashSet;

use crate::model::ArticleIndexEntry;

const GENRE_WEIGHT: usize = 3;
const TAG_WEIGHT: usize = 1;

/// Similarity of `candidate` to a source article with the given tag set and genre string.
///
/// Genre counts only on full-string equality. Tags are counted by walking the candidate's
/// list, so a tag the candidate repeats scores once per repetition.
pub fn similarity(
    candidate: &ArticleIndexEntry,
    source_tags: &HashSet<&str>,
    source_genres: &str,
) -> usize {
    let genre = if candidate.metadata.genres == source_genres {
        GENRE_WEIGHT
    } else {
        0
    };
    let tags = candidate
        .metadata
        .tags
        .iter()
        .filter(|t| source_tags.contains(t.as_str()))
        .count()
        * TAG_WEIGHT;
    genre + tags
}

/// Up to `limit` articles most similar to `id`, best first; ties keep index order.
/// Zero-score candidates and unknown ids produce nothing.
pub fn related<'a>(
    articles: &'a [ArticleIndexEntry],
    id: &str,
    limit: usize,
) -> Vec<&'a ArticleIndexEntry> {
    let Some(source) = articles.iter().find(|a| a.id == id) else {
        return Vec::new();
    };
    let source_tags: HashSet<&str> = source.metadata.tags.iter().map(String::as_str).collect();

    let mut scored: Vec<(usize, &ArticleIndexEntry)> = articles
        .iter()
        .filter(|a| a.id != id)
        .map(|a| (similarity(a, &source_tags, &source.metadata.genres), a))
        .filter(|(score, _)| *score > 0)
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, a)| a).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::tagged;

    fn ids<'a>(results: &[&'a ArticleIndexEntry]) -> Vec<&'a str> {
        results.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn genre_outweighs_shared_tags() {
        let articles = vec![
            tagged("a", "Science", &["atoms", "energy"]),
            tagged("c", "Art", &["atoms", "energy"]),
            tagged("b", "Science", &["atoms"]),
        ];
        assert_eq!(ids(&related(&articles, "a", 5)), vec!["b", "c"]);
    }

    #[test]
    fn scores_follow_weights() {
        let tags: HashSet<&str> = ["atoms", "energy"].into_iter().collect();
        assert_eq!(similarity(&tagged("b", "Science", &["atoms"]), &tags, "Science"), 4);
        assert_eq!(similarity(&tagged("c", "Art", &["atoms", "energy"]), &tags, "Science"), 2);
        assert_eq!(similarity(&tagged("d", "Art", &["music"]), &tags, "Science"), 0);
    }

    #[test]
    fn genre_compares_whole_string() {
        let tags = HashSet::new();
        assert_eq!(similarity(&tagged("x", "Science, Art", &[]), &tags, "Science"), 0);
        assert_eq!(similarity(&tagged("y", "Science, Art", &[]), &tags, "Science, Art"), 3);
    }

    #[test]
    fn repeated_candidate_tags_count_each_time() {
        let tags: HashSet<&str> = ["atoms"].into_iter().collect();
        assert_eq!(similarity(&tagged("x", "Art", &["atoms", "atoms"]), &tags, "Science"), 2);
    }

    #[test]
    fn excludes_self_and_zero_scores() {
        let articles = vec![
            tagged("a", "Science", &["atoms"]),
            tagged("b", "Art", &["music"]),
            tagged("c", "Science", &[]),
        ];
        assert_eq!(ids(&related(&articles, "a", 10)), vec!["c"]);
    }

    #[test]
    fn ties_keep_index_order_and_limit_applies() {
        let articles = vec![
            tagged("src", "Science", &[]),
            tagged("p", "Science", &[]),
            tagged("q", "Science", &[]),
            tagged("r", "Science", &[]),
        ];
        assert_eq!(ids(&related(&articles, "src", 2)), vec!["p", "q"]);
        assert!(related(&articles, "src", 0).is_empty());
    }

    #[test]
    fn unknown_id_has_no_related() {
        let articles = vec![tagged("a", "Science", &["atoms"])];
        assert!(related(&articles, "missing", 5).is_empty());
    }
}
