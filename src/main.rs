use std::num::NonZeroUsize;

use clap::{Parser, Subcommand};
use monsterbox::config::{DEFAULT_FEATURED_COUNT, DEFAULT_RELATED_LIMIT};
use monsterbox::format;
use monsterbox::query::{self, BrowseFilter, DisplayWindow};
use monsterbox::{Catalog, CatalogConfig, HttpSource, Lang};
use tracing::info;

/// Browse a bilingual article catalog served as static JSON.
#[derive(Parser)]
#[command(name = "monsterbox", version, about)]
struct Cli {
    /// Directory URL holding articles-index.json (overrides MONSTERBOX_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Display language: vi or en
    #[arg(long, global = true, default_value = "vi")]
    lang: Lang,

    /// Articles per page for `list` (overrides MONSTERBOX_PAGE_SIZE)
    #[arg(long, global = true)]
    page_size: Option<NonZeroUsize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Free-text search over titles, descriptions, excerpts, tags and authors
    Search {
        query: String,
        /// Show this many extra batches of results
        #[arg(long, default_value_t = 0)]
        more: usize,
    },
    /// Paginated listing with optional filters
    List {
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one article with its full content and related articles
    Show {
        id: String,
        #[arg(long, default_value_t = DEFAULT_RELATED_LIMIT)]
        related: usize,
    },
    /// Articles most similar to the given one
    Related {
        id: String,
        #[arg(long, default_value_t = DEFAULT_RELATED_LIMIT)]
        limit: usize,
    },
    /// First articles of the index
    Featured {
        #[arg(long, default_value_t = DEFAULT_FEATURED_COUNT)]
        count: usize,
    },
    /// All genres
    Genres,
    /// Most used tags
    Tags,
    /// All authors
    Authors,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("monsterbox=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let mut config = CatalogConfig::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }

    let catalog = Catalog::new(HttpSource::from_config(&config)?);
    let index = catalog.load().await;
    info!(base_url = %config.base_url, articles = index.articles.len(), "catalog loaded");

    let lang = cli.lang;
    let output = match cli.command {
        Command::Search { query, more } => {
            info!(query = %query, "command:search");
            let results = catalog.search(&query, lang);
            let mut display = DisplayWindow::default();
            display.grow_by(more);
            let mut out = format::format_listing(
                &format!("Search: {query}"),
                display.visible(&results),
                lang,
                results.len(),
            );
            if display.has_more(results.len()) {
                out.push_str(&format!(
                    "\n({} more, rerun with --more {})\n",
                    results.len() - display.count(),
                    more.saturating_add(1)
                ));
            }
            out
        }
        Command::List {
            query,
            genre,
            author,
            page,
        } => {
            let filter = BrowseFilter {
                query,
                genre,
                author,
            };
            info!(?filter, page, "command:list");
            let results = catalog.browse(&filter, lang);
            let total_pages = query::total_pages(results.len(), config.page_size);
            if !query::is_valid_page(page, results.len(), config.page_size) {
                return Err(format!("page {page} out of range (1-{total_pages})").into());
            }
            let mut out = format::format_listing(
                "Articles",
                query::window(&results, config.page_size, page),
                lang,
                results.len(),
            );
            if total_pages > 1 {
                let slots = query::visible_pages(page, total_pages);
                out.push_str(&format!("\npages: {}\n", format::format_page_bar(&slots, page)));
            }
            out
        }
        Command::Show { id, related } => {
            info!(id = %id, "command:show");
            let article = catalog
                .article(&id)
                .await
                .ok_or_else(|| format!("no article with id '{id}'"))?;
            let related = catalog.related(&id, related);
            format::format_article(&article, lang, &related)
        }
        Command::Related { id, limit } => {
            if catalog.snapshot().get(&id).is_none() {
                return Err(format!("no article with id '{id}'").into());
            }
            let related = catalog.related(&id, limit);
            format::format_listing(&format!("Related to {id}"), &related, lang, related.len())
        }
        Command::Featured { count } => {
            let featured = catalog.featured(count);
            format::format_listing("Featured", &featured, lang, catalog.total_count())
        }
        Command::Genres => {
            let genres = catalog.unique_genres();
            format::format_labels(
                "Genres",
                genres
                    .iter()
                    .map(|g| monsterbox::display::translate_genre(g, lang)),
            )
        }
        Command::Tags => format::format_tags(&catalog.popular_tags()),
        Command::Authors => {
            let authors = catalog.all_authors();
            format::format_labels("Authors", authors.iter().map(String::as_str))
        }
    };

    println!("{output}");
    Ok(())
}
