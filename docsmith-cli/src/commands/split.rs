//! Split command implementation: inspect a book's page breakdown.

use anyhow::{Context, Result};
use docsmith_core::split;
use std::path::Path;

pub async fn split_book(config_path: &Path, book_name: &str) -> Result<()> {
    let (config, fetcher) = super::load(config_path)?;
    let book = super::find_book(&config, book_name)?;

    let markdown = fetcher
        .fetch(&book.source)
        .await
        .with_context(|| format!("Failed to fetch source for book '{}'", book.book))?;

    let pages = split(&markdown, &book.book, &book.split_options())?;

    for page in &pages {
        println!(
            "{:4} lines  {:40} {}",
            page.text.lines().count(),
            page.href,
            page.title
        );
    }
    println!("{} pages", pages.len());

    Ok(())
}
