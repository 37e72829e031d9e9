//! Build command implementation.
//!
//! Documents are processed strictly sequentially: one book is fetched,
//! split, rendered, and indexed before the next begins. The existing
//! search index is browsed once, before the first publish, and never
//! refreshed mid-run.

use anyhow::{bail, Context, Result};
use askama::Template;
use docsmith_core::{
    collect_records, parse_news, parse_testimonials, render_html, split, sub_nav, title_case,
    Article, BookConfig, Config, FeedConfig, IndexSnapshot, Page, SplitError, Testimonial,
};
use docsmith_fetch::FetchClient;
use docsmith_render::{
    ArticleView, NavLink, NavTemplate, NewsTemplate, PageTemplate, TestimonialView,
    TestimonialsTemplate,
};
use docsmith_search::SearchClient;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Default)]
struct BuildReport {
    pages_written: usize,
    records_published: usize,
    records_skipped: usize,
    failed_books: Vec<String>,
}

pub async fn build_site(
    config_path: &Path,
    skip_search: bool,
    search_key: Option<String>,
) -> Result<()> {
    tracing::info!("Loading config from {:?}", config_path);
    let (config, fetcher) = super::load(config_path)?;

    let search = if skip_search {
        tracing::info!("Search publishing disabled");
        None
    } else {
        search_client(&config, search_key)?
    };

    // The snapshot must be complete before the first publish of the run;
    // later publish decisions depend on it
    let snapshot = match &search {
        Some(client) => client
            .snapshot()
            .await
            .context("Failed to browse existing search index")?,
        None => IndexSnapshot::new(),
    };

    let html_root = config.html_root();
    fs::create_dir_all(&html_root).context("Failed to create output directory")?;

    let mut report = BuildReport::default();

    for book in &config.books {
        tracing::info!("Building {} docs...", book.book);

        // A missing source is fatal: every page and record downstream
        // would be derived from incomplete input
        let markdown = fetcher
            .fetch(&book.source)
            .await
            .with_context(|| format!("Failed to fetch source for book '{}'", book.book))?;

        let pages = match split(&markdown, &book.book, &book.split_options()) {
            Ok(pages) => pages,
            Err(err @ SplitError::NoHeading { .. }) => {
                tracing::error!("Skipping book '{}': {}", book.book, err);
                report.failed_books.push(book.book.clone());
                continue;
            }
        };

        write_book(&html_root, book, &pages, &mut report)?;
        index_book(search.as_ref(), &snapshot, book, &markdown, &mut report).await?;
    }

    if let Some(feed) = &config.news {
        build_news(&config, &fetcher, feed, &html_root).await?;
    }

    if let Some(feed) = &config.testimonials {
        build_testimonials(&fetcher, feed, &html_root).await?;
    }

    tracing::info!(
        "✓ Wrote {} pages, published {} records, skipped {} blocks",
        report.pages_written,
        report.records_published,
        report.records_skipped
    );

    if !report.failed_books.is_empty() {
        bail!(
            "{} book(s) failed to build: {}",
            report.failed_books.len(),
            report.failed_books.join(", ")
        );
    }

    Ok(())
}

fn search_client(config: &Config, search_key: Option<String>) -> Result<Option<SearchClient>> {
    let Some(search) = &config.search else {
        return Ok(None);
    };

    let Some(key) = search_key.or_else(|| search.api_key.clone()) else {
        bail!(
            "Search is configured but no write key was provided \
             (use --search-key or DOCSMITH_SEARCH_KEY)"
        );
    };

    Ok(Some(SearchClient::new(&search.app_id, &key, &search.index)))
}

/// Render a book's pages and nav fragment to the output tree.
fn write_book(
    html_root: &Path,
    book: &BookConfig,
    pages: &[Page],
    report: &mut BuildReport,
) -> Result<()> {
    let book_dir = html_root.join(&book.book);
    fs::create_dir_all(&book_dir)
        .with_context(|| format!("Failed to create output directory for '{}'", book.book))?;

    for (index, page) in pages.iter().enumerate() {
        let next_page = pages.get(index + 1).map(|next| NavLink {
            href: next.href.clone(),
            title: next.title.clone(),
        });

        let template = PageTemplate {
            page_title: format!("{} - {}", title_case(&book.book), page.title),
            content: render_html(&page.text),
            links: sub_nav(&page.text),
            next_page,
        };

        let html = template
            .render()
            .with_context(|| format!("Failed to render page '{}'", page.title))?;

        let output_path = output_path_for(html_root, &page.href);
        fs::write(&output_path, html)
            .with_context(|| format!("Failed to write {:?}", output_path))?;

        tracing::info!("+ Wrote {}:{}", book.book, page.title);
        report.pages_written += 1;
    }

    let nav = NavTemplate {
        book: book.book.clone(),
        items: pages
            .iter()
            .map(|page| NavLink {
                href: page.href.clone(),
                title: page.title.clone(),
            })
            .collect(),
    };
    let nav_path = book_dir.join("_nav.html");
    fs::write(&nav_path, nav.render().context("Failed to render nav template")?)
        .with_context(|| format!("Failed to write {:?}", nav_path))?;

    Ok(())
}

/// Map a page href (`/book/slug.html`) to its file under the output root.
fn output_path_for(html_root: &Path, href: &str) -> PathBuf {
    html_root.join(href.trim_start_matches('/'))
}

/// Re-tokenize the book's markdown into search records and publish the
/// delta against the run's snapshot.
async fn index_book(
    search: Option<&SearchClient>,
    snapshot: &IndexSnapshot,
    book: &BookConfig,
    markdown: &str,
    report: &mut BuildReport,
) -> Result<()> {
    let set = collect_records(markdown, &book.book, &book.index_options());
    report.records_skipped += set.skipped;

    let delta = set.delta(snapshot);
    tracing::info!(
        "{} of {} records new for '{}'",
        delta.len(),
        set.records.len(),
        book.book
    );

    if let Some(client) = search {
        client
            .publish(&book.book, &delta)
            .await
            .with_context(|| format!("Failed to publish records for book '{}'", book.book))?;
        report.records_published += delta.len();
    }

    Ok(())
}

async fn build_news(
    config: &Config,
    fetcher: &FetchClient,
    feed: &FeedConfig,
    html_root: &Path,
) -> Result<()> {
    let markdown = fetcher
        .fetch(&feed.source)
        .await
        .context("Failed to fetch news source")?;

    let articles = parse_news(&markdown);
    let count = articles.len();

    let template = NewsTemplate {
        page_title: format!("{} - News", config.site.title),
        articles: articles.into_iter().map(article_view).collect(),
    };

    let path = html_root.join("news.html");
    fs::write(&path, template.render().context("Failed to render news template")?)
        .with_context(|| format!("Failed to write {:?}", path))?;

    tracing::info!("Created news.html ({} articles)", count);
    Ok(())
}

fn article_view(article: Article) -> ArticleView {
    ArticleView {
        title: article.title,
        link: article.link,
        date: article.date_text,
        description: article.description,
        tags: article.tags,
        image: article.image,
        alt: article.alt.unwrap_or_default(),
    }
}

async fn build_testimonials(
    fetcher: &FetchClient,
    feed: &FeedConfig,
    html_root: &Path,
) -> Result<()> {
    let markdown = fetcher
        .fetch(&feed.source)
        .await
        .context("Failed to fetch testimonials source")?;

    let entries = parse_testimonials(&markdown);
    let count = entries.len();

    let template = TestimonialsTemplate {
        entries: entries.into_iter().map(testimonial_view).collect(),
    };

    let path = html_root.join("_testimonials.html");
    fs::write(
        &path,
        template
            .render()
            .context("Failed to render testimonials template")?,
    )
    .with_context(|| format!("Failed to write {:?}", path))?;

    tracing::info!("Created _testimonials.html ({} entries)", count);
    Ok(())
}

fn testimonial_view(entry: Testimonial) -> TestimonialView {
    TestimonialView {
        name: entry.name,
        avatar: entry.avatar,
        link: entry.link,
        provider: entry.provider,
        body_html: render_html(&entry.body),
    }
}
