//! Splitting a markdown document into addressable pages.

use crate::heading::parse_heading;
use crate::slug::slugify;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("malformed document: page {index} of book '{book}' has no heading")]
    NoHeading { book: String, index: usize },
}

/// Options controlling how a document is split.
#[derive(Debug, Clone, Default)]
pub struct SplitOptions {
    /// Heading depths that force a page break (e.g. {1, 2}).
    pub page_break_depths: BTreeSet<u8>,

    /// Leading lines to drop before splitting (badge headers and the like).
    /// Skipped lines appear in no page.
    pub skip_lines: usize,

    /// Title override for the first page. The page text is unchanged.
    pub title: Option<String>,
}

/// One logical page of a book.
///
/// `text` is the raw markdown chunk including its own heading line.
/// Concatenating the `text` of all pages in order reconstructs the source
/// document, minus any skipped leading lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub href: String,
    pub text: String,
}

/// Split a markdown document into ordered pages at heading boundaries.
///
/// A line starts a new page when it is an ATX heading whose depth is in
/// `page_break_depths` and the current page already has content. The final
/// buffer is always flushed, so a document with no qualifying heading
/// yields exactly one page.
///
/// Each page's title is the text of the first heading found anywhere in
/// its chunk; a chunk with no heading at all is a malformed document.
pub fn split(markdown: &str, book: &str, options: &SplitOptions) -> Result<Vec<Page>, SplitError> {
    let mut chunks: Vec<String> = Vec::new();
    let mut buffer = String::new();

    for line in markdown.split_inclusive('\n').skip(options.skip_lines) {
        if let Some((depth, _)) = parse_heading(line) {
            if options.page_break_depths.contains(&depth) && !buffer.is_empty() {
                chunks.push(std::mem::take(&mut buffer));
            }
        }
        buffer.push_str(line);
    }
    chunks.push(buffer);

    let mut pages = Vec::with_capacity(chunks.len());
    for (index, text) in chunks.into_iter().enumerate() {
        let derived = text
            .split_inclusive('\n')
            .find_map(parse_heading)
            .map(|(_, title)| title.to_string())
            .ok_or_else(|| SplitError::NoHeading {
                book: book.to_string(),
                index,
            })?;

        let title = match (&options.title, index) {
            (Some(over), 0) => over.clone(),
            _ => derived,
        };

        pages.push(Page {
            href: format!("/{}/{}.html", book, slugify(&title)),
            title,
            text,
        });
    }

    Ok(pages)
}
