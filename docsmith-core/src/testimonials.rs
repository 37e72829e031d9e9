//! Testimonial parsing from a markdown collection.
//!
//! Testimonials are separated by `---` lines. Within one entry, heading
//! depth selects the field: depth 1 is the author name, 2 the avatar URL,
//! 3 the profile link, 4 the provider label. Everything else is body
//! text, kept as markdown for later rendering.

use crate::blocks::{lex, BlockKind};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Testimonial {
    pub name: String,
    pub avatar: String,
    pub link: String,
    pub provider: String,
    /// Body markdown, blocks joined by blank lines.
    pub body: String,
}

/// Parse a testimonials document into entries.
///
/// Entries without an author name are dropped.
pub fn parse_testimonials(markdown: &str) -> Vec<Testimonial> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in markdown.split_inclusive('\n') {
        if line.trim_end() == "---" {
            chunks.push(std::mem::take(&mut current));
        } else {
            current.push_str(line);
        }
    }
    chunks.push(current);

    let mut testimonials: Vec<Testimonial> = chunks
        .iter()
        .map(|chunk| parse_entry(chunk))
        .collect();

    testimonials.retain(|t| !t.name.is_empty());
    testimonials
}

fn parse_entry(markdown: &str) -> Testimonial {
    let mut entry = Testimonial::default();

    for block in lex(markdown) {
        match block.kind {
            BlockKind::Heading => match block.depth.unwrap_or(1) {
                1 => entry.name = block.text,
                2 => entry.avatar = block.text,
                3 => entry.link = block.text,
                4 => entry.provider = block.text,
                _ => {}
            },
            BlockKind::Rule | BlockKind::Html => {}
            _ => {
                if !entry.body.is_empty() {
                    entry.body.push_str("\n\n");
                }
                entry.body.push_str(&block.text);
            }
        }
    }

    entry
}
