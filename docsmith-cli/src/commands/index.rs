//! Index command implementation: show a book's search records without
//! publishing them.

use anyhow::{Context, Result};
use docsmith_core::collect_records;
use std::path::Path;

pub async fn index_book(config_path: &Path, book_name: &str, json: bool) -> Result<()> {
    let (config, fetcher) = super::load(config_path)?;
    let book = super::find_book(&config, book_name)?;

    let markdown = fetcher
        .fetch(&book.source)
        .await
        .with_context(|| format!("Failed to fetch source for book '{}'", book.book))?;

    let set = collect_records(&markdown, &book.book, &book.index_options());

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&set.records).context("Failed to serialize records")?
        );
    } else {
        for record in &set.records {
            println!(
                "{}  {} / {}  [{}]",
                &record.object_id[..12],
                record.chapter,
                record.section,
                record.kind
            );
        }
        println!("{} records", set.records.len());
    }

    if set.skipped > 0 {
        tracing::warn!("{} blocks could not be assigned a chapter", set.skipped);
    }

    Ok(())
}
