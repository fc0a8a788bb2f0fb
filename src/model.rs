use serde::{Deserialize, Serialize};

use crate::Lang;

/// Language-neutral article metadata, as written by the index generator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMetadata {
    pub title_vi: String,
    pub title_en: String,
    /// One or more genres joined with commas, e.g. `"History, Philosophy"`.
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub difficulty_level: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub creators: Vec<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub length: u64,
    #[serde(default)]
    pub page: u32,
}

impl ArticleMetadata {
    /// Trimmed, non-empty genre tokens of the comma-joined `genres` field.
    pub fn genre_tokens(&self) -> impl Iterator<Item = &str> {
        self.genres.split(',').map(str::trim).filter(|g| !g.is_empty())
    }
}

/// Per-language teaser. `content` stays `None` until full content is merged in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct LocalizedTeaser {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// One article in `articles-index.json`. Both language blocks are required.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArticleIndexEntry {
    pub id: String,
    pub metadata: ArticleMetadata,
    pub vi: LocalizedTeaser,
    pub en: LocalizedTeaser,
}

impl ArticleIndexEntry {
    pub fn localized(&self, lang: Lang) -> &LocalizedTeaser {
        match lang {
            Lang::Vi => &self.vi,
            Lang::En => &self.en,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct IndexMeta {
    pub total_articles: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Response from `GET <base>/articles-index.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ArticlesIndex {
    pub meta: IndexMeta,
    pub articles: Vec<ArticleIndexEntry>,
}

impl ArticlesIndex {
    pub fn get(&self, id: &str) -> Option<&ArticleIndexEntry> {
        self.articles.iter().find(|a| a.id == id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ContentBody {
    pub content: String,
}

/// Response from `GET <base>/articles/<id>.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArticleFullContent {
    pub id: String,
    pub vi: ContentBody,
    pub en: ContentBody,
}

impl ArticleFullContent {
    pub fn body(&self, lang: Lang) -> &str {
        match lang {
            Lang::Vi => &self.vi.content,
            Lang::En => &self.en.content,
        }
    }
}

/// Index entry with whatever full content is known. Built by [`crate::merge`], never stored.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Article {
    pub id: String,
    pub metadata: ArticleMetadata,
    pub vi: LocalizedTeaser,
    pub en: LocalizedTeaser,
}

impl Article {
    pub fn localized(&self, lang: Lang) -> &LocalizedTeaser {
        match lang {
            Lang::Vi => &self.vi,
            Lang::En => &self.en,
        }
    }

    pub fn content(&self, lang: Lang) -> Option<&str> {
        self.localized(lang).content.as_deref()
    }

    pub fn has_content(&self) -> bool {
        self.vi.content.is_some() && self.en.content.is_some()
    }
}

impl From<&ArticleIndexEntry> for Article {
    fn from(entry: &ArticleIndexEntry) -> Self {
        Self {
            id: entry.id.clone(),
            metadata: entry.metadata.clone(),
            vi: entry.vi.clone(),
            en: entry.en.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_JSON: &str = r#"{
        "meta": { "totalArticles": 1, "generatedAt": "2025-01-01T00:00:00Z" },
        "articles": [{
            "id": "hoa-hoc-co-ban",
            "metadata": {
                "titleVi": "Hóa học cơ bản",
                "titleEn": "Chemistry Basics",
                "genres": "Hóa học, Giáo dục",
                "difficultyLevel": "Cơ bản",
                "tags": ["atoms", "energy"],
                "creators": ["Lan"],
                "createdAt": "2024-05-01T10:00:00",
                "length": 4200,
                "page": 3
            },
            "vi": { "title": "Hóa học cơ bản", "description": "d", "excerpt": "e", "tags": [], "genres": [] },
            "en": { "title": "Chemistry Basics", "description": "d", "excerpt": "e", "tags": ["atoms"], "genres": ["Chemistry"] }
        }]
    }"#;

    #[test]
    fn decodes_camel_case_index() {
        let index: ArticlesIndex = serde_json::from_str(INDEX_JSON).unwrap();
        assert_eq!(index.meta.total_articles, 1);
        assert_eq!(index.meta.generated_at.as_deref(), Some("2025-01-01T00:00:00Z"));

        let entry = &index.articles[0];
        assert_eq!(entry.metadata.title_en, "Chemistry Basics");
        assert_eq!(entry.metadata.difficulty_level, "Cơ bản");
        assert_eq!(entry.metadata.length, 4200);
        assert_eq!(entry.localized(Lang::En).tags, vec!["atoms"]);
        assert!(entry.en.content.is_none());
    }

    #[test]
    fn missing_language_block_is_decode_error() {
        let json = r#"{
            "meta": { "totalArticles": 1 },
            "articles": [{
                "id": "x",
                "metadata": { "titleVi": "a", "titleEn": "b" },
                "vi": { "title": "a" }
            }]
        }"#;
        let err = serde_json::from_str::<ArticlesIndex>(json).unwrap_err();
        assert!(err.to_string().contains("en"), "got: {err}");
    }

    #[test]
    fn genre_tokens_trim_and_skip_empty() {
        let meta = ArticleMetadata {
            genres: " History ,Philosophy,, ".into(),
            ..Default::default()
        };
        let tokens: Vec<_> = meta.genre_tokens().collect();
        assert_eq!(tokens, vec!["History", "Philosophy"]);
    }

    #[test]
    fn index_lookup_by_id() {
        let index: ArticlesIndex = serde_json::from_str(INDEX_JSON).unwrap();
        assert!(index.get("hoa-hoc-co-ban").is_some());
        assert!(index.get("missing").is_none());
    }

    #[test]
    fn decodes_full_content() {
        let json = r#"{ "id": "a", "vi": { "content": "xin chào" }, "en": { "content": "hello" } }"#;
        let content: ArticleFullContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.body(Lang::Vi), "xin chào");
        assert_eq!(content.body(Lang::En), "hello");
    }
}
