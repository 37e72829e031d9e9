//! # docsmith CLI
//!
//! Command-line interface for the docsmith documentation-site generator.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "docsmith.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, split, render, and index every configured document
    Build {
        /// Build pages but do not contact the search index
        #[arg(long)]
        skip_search: bool,

        /// Write key for the search index
        #[arg(long, env = "DOCSMITH_SEARCH_KEY", hide_env_values = true)]
        search_key: Option<String>,
    },

    /// Show the page breakdown of one configured book
    Split {
        /// Book name from the config file
        book: String,
    },

    /// Show the search records of one configured book without publishing
    Index {
        /// Book name from the config file
        book: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Build {
            skip_search,
            search_key,
        } => commands::build_site(&cli.config, skip_search, search_key).await,
        Commands::Split { book } => commands::split_book(&cli.config, &book).await,
        Commands::Index { book, json } => commands::index_book(&cli.config, &book, json).await,
    }
}
