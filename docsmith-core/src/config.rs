//! Configuration parsing and management.
//!
//! All runtime settings come from one `docsmith.yml` file loaded at
//! process start and passed explicitly through the pipeline. Nothing in
//! the library layer reads the environment.

use crate::records::IndexOptions;
use crate::split::SplitOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the docsmith.yml schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,

    #[serde(default)]
    pub books: Vec<BookConfig>,

    #[serde(default)]
    pub news: Option<FeedConfig>,

    #[serde(default)]
    pub testimonials: Option<FeedConfig>,

    #[serde(default)]
    pub search: Option<SearchConfig>,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,

    /// Root directory for generated HTML output.
    #[serde(default = "default_html_root")]
    pub html_root: PathBuf,
}

fn default_html_root() -> PathBuf {
    PathBuf::from("code/html")
}

/// Where a document's markdown comes from.
///
/// Remote sources name a repository and a path within it; local sources
/// name a file relative to the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum SourceSpec {
    Remote { repo: String, path: String },
    Local { path: PathBuf },
}

/// One configured book (a markdown document split into pages).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookConfig {
    pub book: String,
    pub source: SourceSpec,

    #[serde(default = "default_page_break_depths")]
    pub page_break_depths: Vec<u8>,

    #[serde(default)]
    pub skip_lines: usize,

    #[serde(default)]
    pub title: Option<String>,
}

fn default_page_break_depths() -> Vec<u8> {
    vec![1, 2]
}

impl BookConfig {
    pub fn split_options(&self) -> SplitOptions {
        SplitOptions {
            page_break_depths: self.page_break_depths.iter().copied().collect(),
            skip_lines: self.skip_lines,
            title: self.title.clone(),
        }
    }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            page_break_depths: self.page_break_depths.iter().copied().collect(),
            title: self.title.clone(),
        }
    }
}

/// A single-file feed source (news, testimonials).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub source: SourceSpec,
}

/// Hosted search index settings.
///
/// The write key is normally supplied via CLI flag or environment rather
/// than the config file; a key present here is used as a fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub app_id: String,
    pub index: String,

    #[serde(default)]
    pub api_key: Option<String>,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;

        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// The HTML output root, resolved relative to the config file.
    pub fn html_root(&self) -> PathBuf {
        self.resolve_path(&self.site.html_root)
    }

    /// Resolve an arbitrary path relative to the config file location.
    pub fn resolve_relative(&self, path: &Path) -> PathBuf {
        self.resolve_path(path)
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            match config_path.parent() {
                Some(parent) => parent.join(path),
                None => path.to_path_buf(),
            }
        } else {
            path.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
site:
  title: "Example Docs"
  html_root: "out/html"
books:
  - book: tutorial
    source:
      repo: example/tutorial
      path: README.md
    page_break_depths: [1, 2]
    skip_lines: 4
    title: "Welcome to the Tutorial"
  - book: roadmap
    source:
      path: ROADMAP.md
    page_break_depths: [1]
news:
  source:
    path: NEWS.md
search:
  app_id: APP123
  index: docs_dev
"#;

    #[test]
    fn test_parse_full_config() {
        let config: Config = serde_yaml::from_str(FULL).unwrap();

        assert_eq!(config.site.title, "Example Docs");
        assert_eq!(config.books.len(), 2);
        assert_eq!(
            config.books[0].source,
            SourceSpec::Remote {
                repo: "example/tutorial".into(),
                path: "README.md".into()
            }
        );
        assert_eq!(config.books[0].skip_lines, 4);
        assert_eq!(
            config.books[1].source,
            SourceSpec::Local {
                path: PathBuf::from("ROADMAP.md")
            }
        );
        assert!(config.news.is_some());
        assert!(config.testimonials.is_none());

        let search = config.search.unwrap();
        assert_eq!(search.app_id, "APP123");
        assert_eq!(search.api_key, None);
    }

    #[test]
    fn test_book_defaults() {
        let yaml = r#"
site:
  title: "Minimal"
books:
  - book: docs
    source:
      path: DOCS.md
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let book = &config.books[0];

        assert_eq!(book.page_break_depths, vec![1, 2]);
        assert_eq!(book.skip_lines, 0);
        assert_eq!(book.title, None);
        assert_eq!(config.site.html_root, PathBuf::from("code/html"));
    }

    #[test]
    fn test_split_options_from_book() {
        let yaml = r#"
site:
  title: "X"
books:
  - book: docs
    source:
      path: DOCS.md
    page_break_depths: [1]
    skip_lines: 2
    title: "Hello"
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let options = config.books[0].split_options();

        assert!(options.page_break_depths.contains(&1));
        assert!(!options.page_break_depths.contains(&2));
        assert_eq!(options.skip_lines, 2);
        assert_eq!(options.title.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_paths_resolve_relative_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("docsmith.yml");
        std::fs::write(&config_path, FULL).unwrap();

        let config = Config::from_file(&config_path).unwrap();

        assert_eq!(config.html_root(), dir.path().join("out/html"));
        assert_eq!(
            config.resolve_relative(Path::new("NEWS.md")),
            dir.path().join("NEWS.md")
        );
    }
}
