//! Subcommand implementations.

mod build;
mod index;
mod split;

pub use build::build_site;
pub use index::index_book;
pub use split::split_book;

use anyhow::{Context, Result};
use docsmith_core::{BookConfig, Config};
use docsmith_fetch::FetchClient;
use std::path::Path;

/// Load the config and set up a fetch client rooted at its directory.
fn load(config_path: &Path) -> Result<(Config, FetchClient)> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let base_dir = config_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    Ok((config, FetchClient::new(base_dir)))
}

/// Look up a configured book by name.
fn find_book<'a>(config: &'a Config, name: &str) -> Result<&'a BookConfig> {
    config
        .books
        .iter()
        .find(|book| book.book == name)
        .with_context(|| format!("No book '{}' in configuration", name))
}
