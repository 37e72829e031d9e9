//! Markdown to HTML rendering and in-page sub-navigation.

pub mod highlight;

use crate::heading::parse_heading;
use crate::slug::slugify;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::sync::OnceLock;

pub(crate) fn cmark_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

static ENTITY: OnceLock<Regex> = OnceLock::new();

fn entity() -> &'static Regex {
    ENTITY.get_or_init(|| Regex::new(r"&.*?;").unwrap())
}

/// Anchor id for a heading: entities stripped, then param-cased.
fn anchor_slug(title: &str) -> String {
    slugify(&entity().replace_all(title, ""))
}

/// Render a markdown page to HTML.
///
/// Headings get `id` attributes matching the anchors produced by
/// [`sub_nav`], and fenced code blocks are syntax highlighted.
pub fn render_html(markdown: &str) -> String {
    let events: Vec<Event> = Parser::new_ext(markdown, cmark_options()).collect();

    let ids = collect_heading_ids(&events);
    let events = attach_heading_ids(events, ids);
    let events = highlight::highlight_code_blocks(events);

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    out
}

/// An "on this page" navigation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubNavLink {
    /// In-page anchor, e.g. `#creating-a-cell`.
    pub href: String,
    /// Heading depth (1-3).
    pub level: u8,
    /// Display title: backticks stripped, angle brackets escaped.
    pub title: String,
}

/// Build the in-page navigation from a page's raw markdown.
///
/// Headings of depth 1-3 each contribute one link. The anchor must agree
/// with the heading ids injected by [`render_html`].
pub fn sub_nav(markdown: &str) -> Vec<SubNavLink> {
    markdown
        .split_inclusive('\n')
        .filter_map(parse_heading)
        .filter(|(depth, _)| *depth <= 3)
        .map(|(level, raw)| {
            let stripped = raw.replace('`', "");
            SubNavLink {
                href: format!("#{}", anchor_slug(&stripped)),
                level,
                title: stripped.replace('<', "&lt;").replace('>', "&gt;"),
            }
        })
        .collect()
}

/// Collect one anchor id per heading, in document order.
fn collect_heading_ids(events: &[Event<'_>]) -> Vec<String> {
    let mut ids = Vec::new();
    let mut current: Option<String> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { .. }) => current = Some(String::new()),
            Event::Text(text) => {
                if let Some(buf) = current.as_mut() {
                    buf.push_str(text);
                }
            }
            Event::Code(code) => {
                if let Some(buf) = current.as_mut() {
                    buf.push_str(code);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(buf) = current.take() {
                    ids.push(anchor_slug(&buf));
                }
            }
            _ => {}
        }
    }

    ids
}

/// Inject collected ids into heading start tags that carry none.
fn attach_heading_ids<'a>(events: Vec<Event<'a>>, ids: Vec<String>) -> Vec<Event<'a>> {
    let mut id_iter = ids.into_iter();
    events
        .into_iter()
        .map(|event| match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                let id = id.or_else(|| {
                    id_iter
                        .next()
                        .map(|next| CowStr::Boxed(next.into_boxed_str()))
                });
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                })
            }
            other => other,
        })
        .collect()
}

pub(crate) fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
