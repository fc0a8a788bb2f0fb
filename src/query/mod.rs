//! Query Engine: pure functions over an index snapshot.
//!
//! Nothing here holds state. Results borrow from the slice they were computed from and
//! keep index order unless a function says otherwise.

mod aggregate;
mod filter;
mod page;
mod related;
mod search;

pub use aggregate::{POPULAR_TAG_LIMIT, TagCount, all_authors, popular_tags, unique_genres};
pub use filter::{BrowseFilter, browse, filter_by_author, filter_by_genre, matches_author, matches_genre};
pub use page::{DisplayWindow, PageSlot, is_valid_page, total_pages, visible_pages, window};
pub use related::{related, similarity};
pub use search::{matches_query, normalize_query, search};

use crate::model::ArticleIndexEntry;

/// The first `count` articles in index order.
pub fn featured(articles: &[ArticleIndexEntry], count: usize) -> &[ArticleIndexEntry] {
    &articles[..count.min(articles.len())]
}
