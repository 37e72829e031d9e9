//! # docsmith-fetch
//!
//! Resolves configured document sources to their markdown text. Local
//! sources are read from disk; remote sources name a repository and a
//! path, served from the raw-content host.
//!
//! A failed fetch is fatal for the build: downstream pages and index
//! records would otherwise be derived from incomplete input.

use docsmith_core::SourceSpec;
use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_RAW_HOST: &str = "https://raw.githubusercontent.com";
const USER_AGENT: &str = concat!("docsmith/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to read local source {path:?}: {source}")]
    Local {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("remote source {url} returned {status}")]
    Status { url: String, status: StatusCode },
}

/// Client for resolving document sources.
pub struct FetchClient {
    http: reqwest::Client,
    raw_host: String,
    /// Base directory for relative local paths (the config file's directory).
    base_dir: PathBuf,
}

impl FetchClient {
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            http: reqwest::Client::new(),
            raw_host: DEFAULT_RAW_HOST.to_string(),
            base_dir,
        }
    }

    /// Point remote fetches at a different host. Used by tests.
    pub fn with_raw_host(mut self, host: impl Into<String>) -> Self {
        self.raw_host = host.into();
        self
    }

    /// Resolve a source to its text content.
    pub async fn fetch(&self, source: &SourceSpec) -> Result<String, FetchError> {
        match source {
            SourceSpec::Local { path } => self.fetch_local(path),
            SourceSpec::Remote { repo, path } => self.fetch_remote(repo, path).await,
        }
    }

    fn fetch_local(&self, path: &Path) -> Result<String, FetchError> {
        let resolved = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        };

        tracing::debug!(path = ?resolved, "reading local source");

        std::fs::read_to_string(&resolved).map_err(|source| FetchError::Local {
            path: resolved,
            source,
        })
    }

    async fn fetch_remote(&self, repo: &str, path: &str) -> Result<String, FetchError> {
        let url = format!(
            "{}/{}/HEAD/{}",
            self.raw_host,
            repo.trim_matches('/'),
            path.trim_start_matches('/')
        );

        tracing::debug!(%url, "fetching remote source");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        response.text().await.map_err(|source| FetchError::Http {
            url: url.clone(),
            source,
        })
    }
}
