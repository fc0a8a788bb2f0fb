//! Article index and content cache for a bilingual (Vietnamese/English) article catalog.
//!
//! The [`Catalog`] owns the loaded index snapshot and the per-article content cache;
//! [`query`] holds the pure search, filter, ranking and pagination functions it builds on.

pub mod catalog;
pub mod config;
pub mod content;
pub mod display;
pub mod format;
pub mod index;
mod lang;
mod memo;
pub mod merge;
pub mod model;
pub mod query;
pub mod source;
mod text;

#[cfg(test)]
mod testing;

pub use catalog::Catalog;
pub use config::CatalogConfig;
pub use lang::{Lang, LangError};
pub use merge::Resolution;
pub use model::{Article, ArticleFullContent, ArticleIndexEntry, ArticlesIndex};
pub use source::{ArticleSource, HttpSource, SourceError};

pub const USER_AGENT: &str = concat!("monsterbox/", env!("CARGO_PKG_VERSION"));
