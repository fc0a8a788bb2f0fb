//! Markdown rendering for the command-line front end.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::Lang;
use crate::display::{Difficulty, reading_minutes, translate_genre};
use crate::model::{Article, ArticleIndexEntry};
use crate::query::{PageSlot, TagCount};

/// Article titles as Markdown link text: backslashes and square brackets are escaped,
/// line breaks collapse into single spaces.
pub fn link_text(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for c in one_line(title).chars() {
        if matches!(c, '\\' | '[' | ']') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Parentheses and spaces would end a link target early.
const LINK_TARGET: &AsciiSet = &CONTROLS.add(b' ').add(b'(').add(b')').add(b'<').add(b'>');

/// Article ids as percent-encoded link targets.
pub fn link_target(id: &str) -> String {
    utf8_percent_encode(id.trim(), LINK_TARGET).to_string()
}

/// Collapse every whitespace run, line breaks included, into one space.
pub fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn genre_list(genres: &str, lang: Lang) -> String {
    genres
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(|g| translate_genre(g, lang))
        .collect::<Vec<_>>()
        .join(", ")
}

fn difficulty_label(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Basic => "basic",
        Difficulty::Intermediate => "intermediate",
        Difficulty::Advanced => "advanced",
    }
}

/// One bullet per article: `- [title](id): description`.
fn push_entry_line(out: &mut String, entry: &ArticleIndexEntry, lang: Lang) {
    let teaser = entry.localized(lang);
    out.push_str(&format!(
        "- [{}]({})",
        link_text(&teaser.title),
        link_target(&entry.id)
    ));
    if !teaser.description.trim().is_empty() {
        out.push_str(&format!(": {}", one_line(&teaser.description)));
    }
    out.push('\n');
}

pub fn format_listing(
    heading: &str,
    entries: &[ArticleIndexEntry],
    lang: Lang,
    total: usize,
) -> String {
    let mut out = format!("# {}\n\n", one_line(heading));
    out.push_str(&format!("articles: {total}\n\n"));
    if entries.is_empty() {
        out.push_str("(no results)\n");
        return out;
    }
    for entry in entries {
        push_entry_line(&mut out, entry, lang);
    }
    out
}

pub fn format_page_bar(slots: &[PageSlot], current: usize) -> String {
    slots
        .iter()
        .map(|slot| match *slot {
            PageSlot::Page(n) if n == current => format!("[{n}]"),
            PageSlot::Page(n) => n.to_string(),
            PageSlot::Gap => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full article view: metadata table, body (or a note when it is missing), related list.
pub fn format_article(article: &Article, lang: Lang, related: &[ArticleIndexEntry]) -> String {
    let teaser = article.localized(lang);
    let meta = &article.metadata;
    let mut out = format!("# {}\n\n", one_line(&teaser.title));

    if !teaser.description.is_empty() {
        out.push_str(&format!("{}\n\n", teaser.description));
    }

    out.push_str("| | |\n|---|---|\n");
    if !meta.creators.is_empty() {
        out.push_str(&format!("| Authors | {} |\n", meta.creators.join(", ")));
    }
    if !meta.created_at.is_empty() {
        out.push_str(&format!("| Published | {} |\n", meta.created_at));
    }
    out.push_str(&format!(
        "| Reading time | {} min |\n",
        reading_minutes(meta.length)
    ));
    if !meta.difficulty_level.is_empty() {
        out.push_str(&format!(
            "| Difficulty | {} ({}) |\n",
            meta.difficulty_level,
            difficulty_label(Difficulty::classify(&meta.difficulty_level))
        ));
    }
    if !meta.genres.is_empty() {
        out.push_str(&format!("| Genres | {} |\n", genre_list(&meta.genres, lang)));
    }
    if !teaser.tags.is_empty() {
        out.push_str(&format!("| Tags | {} |\n", teaser.tags.join(", ")));
    }
    out.push('\n');

    match article.content(lang) {
        Some(body) => {
            out.push_str(body);
            out.push_str("\n\n");
        }
        None => out.push_str("> Full content unavailable; showing the summary only.\n\n"),
    }

    if !related.is_empty() {
        out.push_str("## Related\n\n");
        for entry in related {
            push_entry_line(&mut out, entry, lang);
        }
    }

    out
}

pub fn format_labels<'a>(heading: &str, labels: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = format!("# {heading}\n\n");
    for label in labels {
        out.push_str(&format!("- {label}\n"));
    }
    out
}

pub fn format_tags(tags: &[TagCount]) -> String {
    let mut out = String::from("# Popular tags\n\n");
    for tag in tags {
        out.push_str(&format!("- {} ({})\n", tag.tag, tag.count));
    }
    out
}
