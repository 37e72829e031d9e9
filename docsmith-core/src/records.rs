//! Content-addressed search records and incremental index filtering.

use crate::blocks::{lex, Block, BlockKind};
use crate::slug::slugify;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// One flat, searchable record derived from a markdown block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRecord {
    /// Stable content-derived identifier. Identical across rebuilds for
    /// unchanged content, so unchanged blocks are never re-published.
    #[serde(rename = "objectID")]
    pub object_id: String,

    /// Anchor link into the rendered page, e.g.
    /// `/tutorial/installation.html#prerequisites`.
    pub href: String,

    pub book: String,
    pub chapter: String,
    pub section: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub text: String,
}

/// Options controlling chapter assignment during indexing.
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    /// Heading depths that open a new chapter (the page-break depths).
    pub page_break_depths: BTreeSet<u8>,

    /// Seed for chapter/section when content precedes the first heading.
    pub title: Option<String>,
}

/// Records collected from one document, plus the count of blocks that
/// could not be assigned a chapter and were skipped.
#[derive(Debug, Default)]
pub struct RecordSet {
    pub records: Vec<SearchRecord>,
    pub skipped: usize,
}

impl RecordSet {
    /// Records not yet present in the existing index.
    pub fn delta(&self, snapshot: &IndexSnapshot) -> Vec<SearchRecord> {
        self.records
            .iter()
            .filter(|r| !snapshot.contains(&r.book, &r.chapter, &r.object_id))
            .cloned()
            .collect()
    }
}

/// Known object ids in the hosted index, keyed book -> chapter.
///
/// Fetched once per run before any publishing, and used purely as a
/// membership filter; a missing book or chapter key answers "not found".
#[derive(Debug, Clone, Default)]
pub struct IndexSnapshot {
    books: HashMap<String, HashMap<String, HashSet<String>>>,
}

impl IndexSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, book: &str, chapter: &str, object_id: String) {
        self.books
            .entry(book.to_string())
            .or_default()
            .entry(chapter.to_string())
            .or_default()
            .insert(object_id);
    }

    pub fn contains(&self, book: &str, chapter: &str, object_id: &str) -> bool {
        self.books
            .get(book)
            .and_then(|chapters| chapters.get(chapter))
            .is_some_and(|ids| ids.contains(object_id))
    }

    /// Total number of known object ids.
    pub fn len(&self) -> usize {
        self.books
            .values()
            .flat_map(|chapters| chapters.values())
            .map(|ids| ids.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rolling chapter/section state for the indexing fold.
#[derive(Debug, Default)]
struct Cursor {
    chapter: Option<String>,
    section: Option<String>,
}

/// Tokenize a document and fold it into search records.
///
/// Headings at a page-break depth open a new chapter (and section);
/// other headings open a new section within the current chapter. Every
/// remaining block becomes one record scoped to (book, chapter, section).
/// Horizontal rules and raw HTML neither produce records nor move the
/// cursor. A content block seen before any heading is seeded from
/// `options.title` when present, and otherwise skipped with a warning.
pub fn collect_records(markdown: &str, book: &str, options: &IndexOptions) -> RecordSet {
    let mut set = RecordSet::default();
    let mut cursor = Cursor::default();

    for block in lex(markdown) {
        match block.kind {
            BlockKind::Rule | BlockKind::Html => continue,
            BlockKind::Heading => {
                let depth = block.depth.unwrap_or(1);
                if options.page_break_depths.contains(&depth) {
                    cursor.chapter = Some(block.text.clone());
                    cursor.section = Some(block.text);
                } else {
                    cursor.section = Some(block.text);
                }
            }
            _ => {
                if cursor.chapter.is_none() && cursor.section.is_none() {
                    if let Some(title) = &options.title {
                        cursor.chapter = Some(title.clone());
                        cursor.section = Some(title.clone());
                    }
                }

                match (&cursor.chapter, &cursor.section) {
                    (Some(chapter), Some(section)) => {
                        set.records.push(record_for(book, chapter, section, &block));
                    }
                    _ => {
                        tracing::warn!(
                            book,
                            kind = block.kind.as_str(),
                            "skipping block with no enclosing chapter"
                        );
                        set.skipped += 1;
                    }
                }
            }
        }
    }

    set
}

fn record_for(book: &str, chapter: &str, section: &str, block: &Block) -> SearchRecord {
    let kind = block.kind.as_str();
    SearchRecord {
        object_id: object_id(book, chapter, section, kind, &block.text),
        href: format!("/{}/{}.html#{}", book, slugify(chapter), slugify(section)),
        book: book.to_string(),
        chapter: chapter.to_string(),
        section: section.to_string(),
        kind: kind.to_string(),
        text: block.text.clone(),
    }
}

/// Deterministic content hash over all identity-bearing fields.
fn object_id(book: &str, chapter: &str, section: &str, kind: &str, text: &str) -> String {
    let digest = blake3::hash(format!("{book}:{chapter}:{section}:{kind}:{text}").as_bytes());
    digest.to_hex().to_string()
}
