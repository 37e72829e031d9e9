//! Lexer-level markdown tokenization into flat typed blocks.
//!
//! The indexer and the feed parsers work on structural tokens rather than
//! rendered HTML. This module folds pulldown-cmark's event stream into an
//! ordered sequence of [`Block`]s: headings, paragraphs, code blocks,
//! tables, list items, horizontal rules, and raw HTML. Container
//! boundaries (lists, blockquotes) never surface as blocks of their own.
//!
//! Inline link, image, and code-span syntax is reconstructed in the block
//! text so downstream regex extraction (news titles, article images) sees
//! the raw markdown form. Emphasis markers are not preserved.

use crate::markdown::cmark_options;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading,
    Paragraph,
    Code,
    Table,
    ListItem,
    Rule,
    Html,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Heading => "heading",
            BlockKind::Paragraph => "paragraph",
            BlockKind::Code => "code",
            BlockKind::Table => "table",
            BlockKind::ListItem => "list_item",
            BlockKind::Rule => "hr",
            BlockKind::Html => "html",
        }
    }
}

/// One flat block of a markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Heading depth (1-6); `None` for every other kind.
    pub depth: Option<u8>,
    pub text: String,
}

/// Tokenize markdown into an ordered sequence of flat blocks.
pub fn lex(markdown: &str) -> Vec<Block> {
    let mut lexer = Lexer::default();
    for event in Parser::new_ext(markdown, cmark_options()) {
        lexer.push(event);
    }
    lexer.finish()
}

#[derive(Default)]
struct Lexer {
    blocks: Vec<Block>,
    open: Option<(BlockKind, Option<u8>)>,
    buf: String,
    list_depth: usize,
    // Destination stack for inline links/images being reconstructed
    dests: Vec<String>,
    // Set at the start of each table row to suppress the cell separator
    first_cell: bool,
}

impl Lexer {
    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush();
                self.open = Some((BlockKind::Heading, Some(level as u8)));
            }
            Event::End(TagEnd::Heading(_)) => self.flush(),

            Event::Start(Tag::Paragraph) => {
                // Paragraphs inside a loose list item fold into the item
                if self.open.is_none() {
                    self.open = Some((BlockKind::Paragraph, None));
                } else if !self.buf.is_empty() {
                    self.buf.push(' ');
                }
            }
            Event::End(TagEnd::Paragraph) => {
                if matches!(self.open, Some((BlockKind::Paragraph, _))) {
                    self.flush();
                }
            }

            Event::Start(Tag::CodeBlock(_)) => {
                self.flush();
                self.open = Some((BlockKind::Code, None));
            }
            Event::End(TagEnd::CodeBlock) => self.flush(),

            Event::Start(Tag::List(_)) => {
                self.flush();
                self.list_depth += 1;
            }
            Event::End(TagEnd::List(_)) => {
                self.list_depth = self.list_depth.saturating_sub(1);
            }
            Event::Start(Tag::Item) => {
                self.flush();
                self.open = Some((BlockKind::ListItem, None));
            }
            Event::End(TagEnd::Item) => {
                if matches!(self.open, Some((BlockKind::ListItem, _))) {
                    self.flush();
                }
            }

            Event::Start(Tag::Table(_)) => {
                self.flush();
                self.open = Some((BlockKind::Table, None));
                self.first_cell = true;
            }
            Event::Start(Tag::TableHead) | Event::Start(Tag::TableRow) => {
                if !self.buf.is_empty() {
                    self.buf.push('\n');
                }
                self.first_cell = true;
            }
            Event::Start(Tag::TableCell) => {
                if self.first_cell {
                    self.first_cell = false;
                } else {
                    self.buf.push_str(" | ");
                }
            }
            Event::End(TagEnd::Table) => self.flush(),
            Event::End(TagEnd::TableHead)
            | Event::End(TagEnd::TableRow)
            | Event::End(TagEnd::TableCell) => {}

            Event::Start(Tag::HtmlBlock) => {
                self.flush();
                self.open = Some((BlockKind::Html, None));
            }
            Event::End(TagEnd::HtmlBlock) => self.flush(),

            Event::Rule => {
                self.flush();
                self.blocks.push(Block {
                    kind: BlockKind::Rule,
                    depth: None,
                    text: String::new(),
                });
            }

            // Blockquote boundaries are structural; the quoted content
            // surfaces as ordinary paragraphs
            Event::Start(Tag::BlockQuote(_)) => {}

            Event::Start(Tag::Link { dest_url, .. }) => {
                self.ensure_open();
                self.buf.push('[');
                self.dests.push(dest_url.to_string());
            }
            Event::End(TagEnd::Link) => {
                let dest = self.dests.pop().unwrap_or_default();
                self.buf.push_str("](");
                self.buf.push_str(&dest);
                self.buf.push(')');
            }
            Event::Start(Tag::Image { dest_url, .. }) => {
                self.ensure_open();
                self.buf.push_str("![");
                self.dests.push(dest_url.to_string());
            }
            Event::End(TagEnd::Image) => {
                let dest = self.dests.pop().unwrap_or_default();
                self.buf.push_str("](");
                self.buf.push_str(&dest);
                self.buf.push(')');
            }

            Event::Text(text) => {
                self.ensure_open();
                self.buf.push_str(&text);
            }
            Event::Code(code) => {
                self.ensure_open();
                self.buf.push('`');
                self.buf.push_str(&code);
                self.buf.push('`');
            }
            Event::InlineHtml(html) => {
                self.ensure_open();
                self.buf.push_str(&html);
            }
            Event::Html(html) => {
                if !matches!(self.open, Some((BlockKind::Html, _))) {
                    self.flush();
                    self.open = Some((BlockKind::Html, None));
                }
                self.buf.push_str(&html);
            }
            Event::SoftBreak | Event::HardBreak => {
                if self.open.is_some() {
                    self.buf.push(' ');
                }
            }
            Event::TaskListMarker(checked) => {
                self.ensure_open();
                self.buf.push_str(if checked { "[x] " } else { "[ ] " });
            }

            // Emphasis markers, footnotes, and everything else we don't
            // materialize pass through without opening a block
            _ => {}
        }
    }

    /// Re-open a block for stray inline content (text after a nested code
    /// block inside a list item, loose text between containers).
    fn ensure_open(&mut self) {
        if self.open.is_none() {
            let kind = if self.list_depth > 0 {
                BlockKind::ListItem
            } else {
                BlockKind::Paragraph
            };
            self.open = Some((kind, None));
        }
    }

    fn flush(&mut self) {
        let Some((kind, depth)) = self.open.take() else {
            return;
        };

        let text = match kind {
            BlockKind::Code | BlockKind::Html => {
                self.buf.trim_end_matches('\n').to_string()
            }
            _ => self.buf.trim().to_string(),
        };
        self.buf.clear();

        // Whitespace-only blocks never surface
        if text.is_empty() {
            return;
        }

        self.blocks.push(Block { kind, depth, text });
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}
