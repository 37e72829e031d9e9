//! Fenced code block highlighting using syntect.

use super::html_escape;
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};
use std::sync::OnceLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME: OnceLock<Theme> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme() -> &'static Theme {
    THEME.get_or_init(|| {
        let theme_set = ThemeSet::load_defaults();
        theme_set
            .themes
            .get("InspiredGitHub")
            .or_else(|| theme_set.themes.get("base16-ocean.light"))
            .unwrap()
            .clone()
    })
}

/// Replace code block events with pre-rendered, highlighted HTML.
///
/// Unknown languages fall back to plain text; a highlighting failure falls
/// back to an escaped code block.
pub(crate) fn highlight_code_blocks(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut out = Vec::with_capacity(events.len());
    let mut open: Option<(Option<String>, String)> = None;

    for event in events {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                };
                open = Some((lang, String::new()));
            }
            Event::Text(text) if open.is_some() => {
                if let Some((_, content)) = open.as_mut() {
                    content.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((lang, content)) = open.take() {
                    let html = render_code(&content, lang.as_deref());
                    out.push(Event::Html(CowStr::Boxed(html.into_boxed_str())));
                }
            }
            other => out.push(other),
        }
    }

    out
}

fn render_code(code: &str, lang: Option<&str>) -> String {
    let ss = syntax_set();
    let syntax = lang
        .and_then(|token| {
            ss.find_syntax_by_token(token)
                .or_else(|| ss.find_syntax_by_extension(token))
        })
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    match highlighted_html_for_string(code, ss, syntax, theme()) {
        Ok(html) => html,
        Err(_) => format!("<pre><code>{}</code></pre>", html_escape(code)),
    }
}
