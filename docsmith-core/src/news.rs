//! News feed parsing from a markdown changelog.
//!
//! The news document is a flat list of articles separated by horizontal
//! rules. Within an article, heading depth selects the field: depth 1 is
//! the linked title, 2 the date, 3 the description, 4 the comma-separated
//! tags. A paragraph carrying an image reference supplies the artwork.

use crate::blocks::{lex, BlockKind};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

static LINK: OnceLock<Regex> = OnceLock::new();
static IMAGE: OnceLock<Regex> = OnceLock::new();

fn link_re() -> &'static Regex {
    LINK.get_or_init(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap())
}

fn image_re() -> &'static Regex {
    IMAGE.get_or_init(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").unwrap())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub link: String,
    /// Parsed publication date, used for ordering.
    pub date: Option<NaiveDate>,
    /// The date exactly as written, used for display.
    pub date_text: String,
    pub description: String,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub alt: Option<String>,
}

/// Parse a news document into articles, newest first.
///
/// Articles without a title (e.g. the empty chunk after a trailing rule)
/// are dropped. Undated articles sort last.
pub fn parse_news(markdown: &str) -> Vec<Article> {
    let mut articles: Vec<Article> = Vec::new();
    let mut current = Article::default();

    for block in lex(markdown) {
        match block.kind {
            BlockKind::Rule => {
                articles.push(std::mem::take(&mut current));
            }
            BlockKind::Heading => {
                apply_heading(&mut current, block.depth.unwrap_or(1), &block.text);
            }
            BlockKind::Paragraph => {
                if let Some(caps) = image_re().captures(&block.text) {
                    current.alt = Some(caps[1].to_string());
                    current.image = Some(caps[2].to_string());
                }
            }
            _ => {}
        }
    }
    articles.push(current);

    articles.retain(|a| !a.title.is_empty());
    articles.sort_by(|a, b| b.date.cmp(&a.date));
    articles
}

fn apply_heading(article: &mut Article, depth: u8, text: &str) {
    match depth {
        1 => {
            if let Some(caps) = link_re().captures(text) {
                article.title = caps[1].to_string();
                article.link = caps[2].to_string();
            } else {
                article.title = text.to_string();
            }
        }
        2 => {
            article.date_text = text.to_string();
            article.date = parse_date(text);
        }
        3 => article.description = text.to_string(),
        4 => {
            article.tags = text
                .split(',')
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect();
        }
        _ => {}
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%B %d, %Y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEWS: &str = "\
# [Second Post](https://example.com/second)\n\n\
## April 14, 2020\n\n\
### A later article\n\n\
#### Article, Video\n\n\
![cover](https://example.com/cover.png)\n\n\
---\n\n\
# [First Post](https://example.com/first)\n\n\
## 2020-01-02\n\n\
### An earlier article\n\n\
#### Podcast\n";

    #[test]
    fn test_articles_parsed_and_sorted_newest_first() {
        let articles = parse_news(NEWS);

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "Second Post");
        assert_eq!(articles[0].link, "https://example.com/second");
        assert_eq!(articles[0].date, NaiveDate::from_ymd_opt(2020, 4, 14));
        assert_eq!(articles[1].title, "First Post");
        assert_eq!(articles[1].date, NaiveDate::from_ymd_opt(2020, 1, 2));
    }

    #[test]
    fn test_field_mapping_by_heading_depth() {
        let articles = parse_news(NEWS);
        let article = &articles[0];

        assert_eq!(article.date_text, "April 14, 2020");
        assert_eq!(article.description, "A later article");
        assert_eq!(article.tags, vec!["Article", "Video"]);
        assert_eq!(article.image.as_deref(), Some("https://example.com/cover.png"));
        assert_eq!(article.alt.as_deref(), Some("cover"));
    }

    #[test]
    fn test_article_without_image_or_date() {
        let articles = parse_news("# [Bare](https://example.com)\n");

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].image, None);
        assert_eq!(articles[0].date, None);
    }

    #[test]
    fn test_trailing_rule_yields_no_empty_article() {
        let articles = parse_news("# [Only](https://example.com)\n\n---\n");

        assert_eq!(articles.len(), 1);
    }

    #[test]
    fn test_undated_articles_sort_last() {
        let doc = "\
# [Undated](https://example.com/u)\n\n\
---\n\n\
# [Dated](https://example.com/d)\n\n\
## March 1, 2020\n";
        let articles = parse_news(doc);

        assert_eq!(articles[0].title, "Dated");
        assert_eq!(articles[1].title, "Undated");
    }
}
