//! Read-only transport for the static catalog files.

mod http;

pub use http::HttpSource;

use std::future::Future;

use crate::model::{ArticleFullContent, ArticlesIndex};

pub(crate) const MAX_RESPONSE_BYTES: usize = 32_000_000;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("invalid base URL: must be HTTP(S)")]
    InvalidScheme,

    #[error("invalid article id: {0:?}")]
    InvalidId(String),

    #[error("fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("fetch failed: status {0}")]
    Status(u16),

    #[error("response too large (>{} bytes)", MAX_RESPONSE_BYTES)]
    TooLarge,

    #[error("malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where the catalog reads `articles-index.json` and `articles/<id>.json` from.
/// Implemented by [`HttpSource`] for production; mock implementations are used in tests.
///
/// Sources are cloned into background fetches, so they must be cheap to clone and `'static`.
pub trait ArticleSource: Clone + Send + Sync + 'static {
    fn fetch_index(&self) -> impl Future<Output = Result<ArticlesIndex, SourceError>> + Send;

    fn fetch_content(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<ArticleFullContent, SourceError>> + Send;
}
