//! # docsmith-search
//!
//! Client for the hosted search index. Two operations matter to a build
//! run: browsing every existing record once (to build the membership
//! snapshot that makes indexing incremental), and batch-publishing the
//! records the snapshot does not already contain.
//!
//! The snapshot must be fully retrieved before the first publish of a
//! run; it is never refreshed mid-run.

use docsmith_core::{IndexSnapshot, SearchRecord};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("browse of index '{index}' failed: {source}")]
    Browse {
        index: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("publish of {count} records for book '{book}' to index '{index}' failed: {source}")]
    Publish {
        index: String,
        book: String,
        count: usize,
        #[source]
        source: reqwest::Error,
    },

    #[error("index '{index}' returned {status} for {operation}")]
    Status {
        index: String,
        operation: &'static str,
        status: reqwest::StatusCode,
    },
}

/// A previously indexed record, as returned by browse.
///
/// Only the fields needed for the membership snapshot are retrieved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedObject {
    #[serde(rename = "objectID")]
    pub object_id: String,

    #[serde(default)]
    pub book: String,

    #[serde(default)]
    pub chapter: String,
}

#[derive(Debug, Deserialize)]
struct BrowsePage {
    hits: Vec<IndexedObject>,

    #[serde(default)]
    cursor: Option<String>,
}

/// Hosted search index client.
pub struct SearchClient {
    http: reqwest::Client,
    host: String,
    app_id: String,
    api_key: String,
    index: String,
}

impl SearchClient {
    pub fn new(app_id: &str, api_key: &str, index: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            host: format!("https://{}.algolia.net", app_id.to_lowercase()),
            app_id: app_id.to_string(),
            api_key: api_key.to_string(),
            index: index.to_string(),
        }
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("X-Algolia-Application-Id", &self.app_id)
            .header("X-Algolia-API-Key", &self.api_key)
    }

    /// Batch-publish records to the index.
    pub async fn publish(&self, book: &str, records: &[SearchRecord]) -> Result<(), SearchError> {
        if records.is_empty() {
            tracing::debug!(book, "nothing to publish");
            return Ok(());
        }

        let url = format!("{}/1/indexes/{}/batch", self.host, self.index);
        let requests: Vec<_> = records
            .iter()
            .map(|record| json!({ "action": "updateObject", "body": record }))
            .collect();

        let wrap = |source| SearchError::Publish {
            index: self.index.clone(),
            book: book.to_string(),
            count: records.len(),
            source,
        };

        let response = self
            .request(self.http.post(&url))
            .json(&json!({ "requests": requests }))
            .send()
            .await
            .map_err(wrap)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                index: self.index.clone(),
                operation: "publish",
                status,
            });
        }

        tracing::info!(book, count = records.len(), "published search records");
        Ok(())
    }

    /// Retrieve every record currently in the index.
    pub async fn browse_all(&self) -> Result<Vec<IndexedObject>, SearchError> {
        let url = format!("{}/1/indexes/{}/browse", self.host, self.index);
        let mut objects = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut query = vec![("attributesToRetrieve", "objectID,book,chapter".to_string())];
            if let Some(cursor) = &cursor {
                query.push(("cursor", cursor.clone()));
            }

            let wrap = |source| SearchError::Browse {
                index: self.index.clone(),
                source,
            };

            let response = self
                .request(self.http.get(&url))
                .query(&query)
                .send()
                .await
                .map_err(wrap)?;

            let status = response.status();
            if !status.is_success() {
                return Err(SearchError::Status {
                    index: self.index.clone(),
                    operation: "browse",
                    status,
                });
            }

            let page: BrowsePage = response.json().await.map_err(wrap)?;
            objects.extend(page.hits);

            match page.cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        tracing::info!(count = objects.len(), "browsed existing index");
        Ok(objects)
    }

    /// Build the run's membership snapshot from a full browse.
    pub async fn snapshot(&self) -> Result<IndexSnapshot, SearchError> {
        Ok(snapshot_from(self.browse_all().await?))
    }
}

/// Fold browse output into the membership snapshot.
pub fn snapshot_from(objects: Vec<IndexedObject>) -> IndexSnapshot {
    let mut snapshot = IndexSnapshot::new();
    for object in objects {
        snapshot.insert(&object.book, &object.chapter, object.object_id);
    }
    snapshot
}
